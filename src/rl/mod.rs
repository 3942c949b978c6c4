//! Q-learning infrastructure for the Snake agent
//!
//! Provides:
//! - 11-element state-vector encoding of the game geometry
//! - A two-layer feed-forward Q-network
//! - Bounded experience-replay memory
//! - Temporal-difference trainer (masked TD target, MSE loss, Adam)
//! - Epsilon-greedy agent tying the pieces together
//! - Checkpoint persistence

pub mod agent;
pub mod backend;
pub mod config;
pub mod memory;
pub mod network;
pub mod observation;
pub mod persistence;
pub mod trainer;

pub use agent::{Agent, Policy};
pub use backend::{InferenceBackend, TrainingBackend, default_device};
pub use config::QLearningConfig;
pub use memory::{ReplayMemory, Transition};
pub use network::{QNetwork, QNetworkConfig};
pub use observation::{STATE_DIM, StateVec, encode_state, state_to_tensor};
pub use persistence::{ModelMetadata, checkpoint_stem, load_network, save_model};
pub use trainer::{QTrainer, td_targets};
