//! Temporal-difference training step for the Q-network

use burn::module::AutodiffModule;
use burn::optim::adaptor::OptimizerAdaptor;
use burn::optim::{Adam, AdamConfig, GradientsParams, Optimizer};
use burn::tensor::backend::AutodiffBackend;
use burn::tensor::{ElementConversion, Tensor, TensorData};

use super::config::QLearningConfig;
use super::memory::Transition;
use super::network::QNetwork;
use super::observation::{StateVec, batch_to_tensor};
use crate::game::{NUM_ACTIONS, Turn};

/// Computes the TD loss for a batch of transitions and applies one Adam step
///
/// Works identically for a single transition (a batch of one) and for replay
/// batches. Bootstraps next-state values from the same network; there is no
/// separate target network.
pub struct QTrainer<B: AutodiffBackend> {
    optimizer: OptimizerAdaptor<Adam, QNetwork<B>, B>,
    learning_rate: f64,
    gamma: f32,
    device: B::Device,
}

impl<B: AutodiffBackend> QTrainer<B> {
    pub fn new(config: &QLearningConfig, device: B::Device) -> Self {
        QTrainer {
            optimizer: AdamConfig::new().init(),
            learning_rate: config.learning_rate,
            gamma: config.gamma,
            device,
        }
    }

    /// Perform one gradient update over the batch
    ///
    /// Consumes the network and returns the updated one together with the
    /// scalar loss. Shape mismatches panic inside the backend, matching the
    /// rest of the tensor plumbing.
    pub fn train_step(&mut self, network: QNetwork<B>, batch: &[Transition]) -> (QNetwork<B>, f32) {
        let batch_size = batch.len();

        let states: Vec<StateVec> = batch.iter().map(|t| t.state).collect();
        let next_states: Vec<StateVec> = batch.iter().map(|t| t.next_state).collect();
        let actions: Vec<usize> = batch
            .iter()
            .map(|t| Turn::from_one_hot(&t.action).index())
            .collect();
        let rewards: Vec<f32> = batch.iter().map(|t| t.reward).collect();
        let dones: Vec<bool> = batch.iter().map(|t| t.done).collect();

        // Forward pass on current states, with gradient tracking: [B, 3]
        let q_pred = network.forward(batch_to_tensor::<B>(&states, &self.device));
        let q_pred_data: Vec<f32> = q_pred
            .clone()
            .into_data()
            .to_vec()
            .expect("f32 tensor data extraction");

        // Next-state values come from the same network, without gradients
        let q_next = network
            .valid()
            .forward(batch_to_tensor::<B::InnerBackend>(&next_states, &self.device));
        let q_next_data: Vec<f32> = q_next
            .into_data()
            .to_vec()
            .expect("f32 tensor data extraction");

        let target_data = td_targets(
            &q_pred_data,
            &q_next_data,
            &actions,
            &rewards,
            &dones,
            self.gamma,
        );
        let targets = Tensor::<B, 2>::from_data(
            TensorData::new(target_data, [batch_size, NUM_ACTIONS]),
            &self.device,
        );

        // MSE over the full predicted vectors; only the taken action's slot
        // differs from the prediction
        let diff = q_pred - targets;
        let loss = (diff.clone() * diff).mean();

        let loss_val: f32 = loss.clone().into_scalar().elem::<f32>();

        let grads = GradientsParams::from_grads(loss.backward(), &network);
        let network = self.optimizer.step(self.learning_rate, network, grads);

        (network, loss_val)
    }
}

/// Build the regression targets for a batch
///
/// Starts from a copy of the predictions and overwrites only the taken
/// action's slot: with the raw reward for terminal transitions, otherwise
/// with `reward + gamma * max(Q_next)`. The untaken slots keep their
/// predicted values so they contribute nothing to the loss.
pub fn td_targets(
    q_pred: &[f32],
    q_next: &[f32],
    actions: &[usize],
    rewards: &[f32],
    dones: &[bool],
    gamma: f32,
) -> Vec<f32> {
    let mut targets = q_pred.to_vec();

    for i in 0..actions.len() {
        let row = &q_next[i * NUM_ACTIONS..(i + 1) * NUM_ACTIONS];
        let max_next = row.iter().fold(f32::NEG_INFINITY, |acc, &q| acc.max(q));

        let target = if dones[i] {
            rewards[i]
        } else {
            rewards[i] + gamma * max_next
        };
        targets[i * NUM_ACTIONS + actions[i]] = target;
    }

    targets
}
