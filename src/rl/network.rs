//! Q-network for the Snake agent
//!
//! A small feed-forward network mapping the 11-element state vector to one
//! Q-value per relative turn.
//!
//! ```text
//! Input:  [batch, 11]
//! FC1:    11 -> 256, ReLU
//! FC2:    256 -> 3  (Q-values: straight, right turn, left turn)
//! ```

use burn::nn::{Linear, LinearConfig, Relu};
use burn::prelude::*;

/// Two-layer feed-forward Q-network
///
/// Generic over the Burn backend so the same definition serves training
/// (`Autodiff<NdArray<f32>>`) and inference (`NdArray<f32>`). No internal
/// state beyond the layer weights.
#[derive(Module, Debug)]
pub struct QNetwork<B: Backend> {
    fc1: Linear<B>,
    fc2: Linear<B>,
    relu: Relu,
}

/// Configuration for the Q-network architecture
#[derive(Config, Debug)]
pub struct QNetworkConfig {
    /// Size of the input feature vector
    #[config(default = 11)]
    pub state_dim: usize,
    /// Width of the hidden layer
    #[config(default = 256)]
    pub hidden_dim: usize,
    /// Number of Q-values produced, one per relative turn
    #[config(default = 3)]
    pub num_actions: usize,
}

impl QNetworkConfig {
    /// Initialize the Q-network from this configuration
    pub fn init<B: Backend>(&self, device: &B::Device) -> QNetwork<B> {
        QNetwork {
            fc1: LinearConfig::new(self.state_dim, self.hidden_dim).init(device),
            fc2: LinearConfig::new(self.hidden_dim, self.num_actions).init(device),
            relu: Relu::new(),
        }
    }
}

impl<B: Backend> QNetwork<B> {
    /// Forward pass: input `[batch, 11]` -> output `[batch, 3]` Q-values
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.relu.forward(self.fc1.forward(input));
        self.fc2.forward(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::Autodiff;
    use burn::backend::ndarray::{NdArray, NdArrayDevice};
    use burn::tensor::TensorData;

    type TestBackend = NdArray<f32>;
    type TestAutodiffBackend = Autodiff<NdArray<f32>>;

    #[test]
    fn test_network_output_shape() {
        let device = NdArrayDevice::default();
        let network = QNetworkConfig::new().init::<TestBackend>(&device);

        let input = Tensor::zeros([2, 11], &device);
        let output = network.forward(input);
        assert_eq!(output.shape().dims, [2, 3]);
    }

    #[test]
    fn test_network_single_input() {
        let device = NdArrayDevice::default();
        let network = QNetworkConfig::new().init::<TestBackend>(&device);

        let input = Tensor::zeros([1, 11], &device);
        let output = network.forward(input);
        assert_eq!(output.shape().dims, [1, 3]);
    }

    #[test]
    fn test_custom_dimensions() {
        let device = NdArrayDevice::default();
        let network = QNetworkConfig::new()
            .with_hidden_dim(32)
            .init::<TestBackend>(&device);

        let input = Tensor::zeros([4, 11], &device);
        let output = network.forward(input);
        assert_eq!(output.shape().dims, [4, 3]);
    }

    #[test]
    fn test_output_finite() {
        let device = NdArrayDevice::default();
        let network = QNetworkConfig::new().init::<TestBackend>(&device);

        let input = Tensor::ones([8, 11], &device);
        let output = network.forward(input);

        let data: TensorData = output.into_data();
        for &val in data.as_slice::<f32>().unwrap() {
            assert!(val.is_finite(), "Q-values should be finite, got: {}", val);
        }
    }

    #[test]
    fn test_gradient_flow() {
        let device = NdArrayDevice::default();
        let network = QNetworkConfig::new().init::<TestAutodiffBackend>(&device);

        let input = Tensor::ones([1, 11], &device).require_grad();
        let output = network.forward(input.clone());
        let loss = output.sum();
        let gradients = loss.backward();

        let input_grad = input.grad(&gradients);
        assert!(
            input_grad.is_some(),
            "Gradients should flow back to the input"
        );
    }
}
