//! Backend type aliases and device management
//!
//! Convenient type aliases for the Burn backends used in training and
//! inference. The NdArray (CPU) backend is more than sufficient for an
//! 11-input MLP; GPU support (via the Wgpu backend) could be slotted in
//! later without touching the rest of the crate.

use burn::backend::{
    Autodiff,
    ndarray::{NdArray, NdArrayDevice},
};

/// Backend type for training (with autodiff)
///
/// Includes automatic differentiation support needed for gradient-based
/// optimization of the Q-network.
pub type TrainingBackend = Autodiff<NdArray<f32>>;

/// Backend type for inference (without autodiff)
///
/// Used for running trained models; does not track gradients.
pub type InferenceBackend = NdArray<f32>;

/// Get the default device for computation
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_device() {
        let device = default_device();
        let _device_copy = device.clone();
    }
}
