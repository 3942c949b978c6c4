//! Snake Q-Learning - a Snake agent trained with deep Q-learning
//!
//! This library provides:
//! - Core game logic (game module)
//! - Q-learning infrastructure: network, replay memory, trainer, agent (rl module)
//! - Episode and training metrics (metrics module)
//! - Train and play execution modes (modes module)

pub mod game;
pub mod metrics;
pub mod modes;
pub mod rl;
