//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering
//! dependencies. The engine is driven through one-hot relative-turn actions,
//! the interface the RL agent speaks.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{ActionVec, Direction, Turn, NUM_ACTIONS};
pub use config::GameConfig;
pub use engine::{GameEngine, GameOverCause, StepResult};
pub use state::{GameState, Position, Snake};
