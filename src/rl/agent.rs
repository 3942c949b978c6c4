//! The Q-learning agent
//!
//! Owns the Q-network, the trainer, and the replay memory, and keeps the
//! per-agent counters (game count, and through it the exploration epsilon).
//! All state lives on the agent value itself, so several independent agents
//! can coexist in one process.

use burn::module::AutodiffModule;
use burn::tensor::backend::AutodiffBackend;
use rand::Rng;
use rand::rngs::ThreadRng;

use super::config::QLearningConfig;
use super::memory::{ReplayMemory, Transition};
use super::network::{QNetwork, QNetworkConfig};
use super::observation::{STATE_DIM, StateVec, state_to_tensor};
use super::trainer::QTrainer;
use crate::game::{ActionVec, NUM_ACTIONS, Turn};

/// How the next action gets chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Uniform random action
    Explore,
    /// Argmax over the network's prediction
    Exploit,
}

/// Q-learning agent with epsilon-greedy action selection
pub struct Agent<B: AutodiffBackend> {
    q_network: QNetwork<B>,
    trainer: QTrainer<B>,
    memory: ReplayMemory,
    config: QLearningConfig,
    n_games: usize,
    device: B::Device,
    rng: ThreadRng,
}

impl<B: AutodiffBackend> Agent<B> {
    /// Create an agent with a freshly initialized network
    pub fn new(config: QLearningConfig, device: B::Device) -> Self {
        let network = QNetworkConfig::new()
            .with_state_dim(STATE_DIM)
            .with_hidden_dim(config.hidden_dim)
            .with_num_actions(NUM_ACTIONS)
            .init(&device);
        Self::from_network(network, config, device)
    }

    /// Build an agent around an existing network, e.g. one loaded from a
    /// checkpoint
    pub fn from_network(q_network: QNetwork<B>, config: QLearningConfig, device: B::Device) -> Self {
        let trainer = QTrainer::new(&config, device.clone());
        let memory = ReplayMemory::new(config.memory_capacity);

        Agent {
            q_network,
            trainer,
            memory,
            config,
            n_games: 0,
            device,
            rng: rand::thread_rng(),
        }
    }

    /// Current exploration threshold, derived from the game counter
    ///
    /// Decreases by one per completed game and goes negative once the
    /// counter passes the base; a negative threshold never wins the draw, so
    /// the agent is purely greedy from then on.
    pub fn epsilon(&self) -> i32 {
        self.config.epsilon_base - self.n_games as i32
    }

    /// Probability gate between exploration and exploitation
    pub fn decide_policy(&mut self) -> Policy {
        if self.rng.gen_range(0..self.config.epsilon_scale) < self.epsilon() {
            Policy::Explore
        } else {
            Policy::Exploit
        }
    }

    /// Epsilon-greedy action selection
    ///
    /// Returns a one-hot selection vector over the 3 relative turns.
    pub fn select_action(&mut self, state: &StateVec) -> ActionVec {
        let turn = match self.decide_policy() {
            Policy::Explore => Turn::from_index(self.rng.gen_range(0..NUM_ACTIONS)),
            Policy::Exploit => self.greedy_action(state),
        };
        turn.one_hot()
    }

    /// Greedy argmax over the network's prediction for one state
    pub fn greedy_action(&self, state: &StateVec) -> Turn {
        let input = state_to_tensor::<B::InnerBackend>(state, &self.device);
        let q_values: Vec<f32> = self
            .q_network
            .valid()
            .forward(input)
            .into_data()
            .to_vec()
            .expect("f32 tensor data extraction");

        let mut best = 0;
        for i in 1..NUM_ACTIONS {
            if q_values[i] > q_values[best] {
                best = i;
            }
        }
        Turn::from_index(best)
    }

    /// Append a transition to the replay memory
    pub fn remember(&mut self, transition: Transition) {
        self.memory.push(transition);
    }

    /// Single-transition update performed right after a step
    pub fn train_short_memory(&mut self, transition: Transition) -> f32 {
        let (network, loss) = self
            .trainer
            .train_step(self.q_network.clone(), std::slice::from_ref(&transition));
        self.q_network = network;
        loss
    }

    /// Episode-end replay update over a sampled batch
    ///
    /// Samples `batch_size` transitions without replacement when the memory
    /// holds more than that, otherwise replays the whole memory. Returns
    /// `None` when there is nothing to learn from yet.
    pub fn train_long_memory(&mut self) -> Option<f32> {
        if self.memory.is_empty() {
            return None;
        }

        let batch = if self.memory.len() > self.config.batch_size {
            self.memory.sample(self.config.batch_size)
        } else {
            self.memory.snapshot()
        };

        let (network, loss) = self.trainer.train_step(self.q_network.clone(), &batch);
        self.q_network = network;
        Some(loss)
    }

    /// Bump the game counter; called exactly once per finished episode
    pub fn increment_games(&mut self) {
        self.n_games += 1;
    }

    pub fn n_games(&self) -> usize {
        self.n_games
    }

    pub fn network(&self) -> &QNetwork<B> {
        &self.q_network
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    pub fn memory_len(&self) -> usize {
        self.memory.len()
    }
}
