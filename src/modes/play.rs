//! Play mode for watching a trained agent
//!
//! Loads a checkpoint and runs the game greedily: every action is the argmax
//! of the network's prediction, with no exploration and no learning. Prints
//! the same per-episode summary as training.

use anyhow::{Context, Result};
use burn::tensor::backend::Backend;
use std::path::Path;

use crate::game::{ActionVec, GameConfig, GameEngine, GameState, NUM_ACTIONS, Turn};
use crate::metrics::ScoreHistory;
use crate::rl::{ModelMetadata, QNetwork, StateVec, encode_state, load_network, state_to_tensor};

/// Play mode driving the game with a fixed, trained network
pub struct PlayMode<B: Backend> {
    network: QNetwork<B>,
    engine: GameEngine,
    state: GameState,
    history: ScoreHistory,
    metadata: ModelMetadata,
    device: B::Device,
}

impl<B: Backend> PlayMode<B> {
    /// Load a checkpoint and set up the game
    pub fn new(model_path: &Path, config: GameConfig, device: B::Device) -> Result<Self> {
        let (network, metadata) = load_network::<B>(model_path, &device)
            .with_context(|| format!("Failed to load model from {:?}", model_path))?;

        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Ok(Self {
            network,
            engine,
            state,
            history: ScoreHistory::new(),
            metadata,
            device,
        })
    }

    /// Run episodes until the limit, or forever when none is given
    pub fn run(&mut self, episodes: Option<usize>) {
        println!(
            "Loaded checkpoint: {} games trained, record {}",
            self.metadata.games_trained, self.metadata.record
        );

        loop {
            let state_vec = encode_state(&self.state);
            let action = self.greedy_action(&state_vec);

            let result = self.engine.play_step(&mut self.state, action);

            if result.done {
                self.history.record_episode(result.score);
                println!(
                    "Game: {}, Score: {}, Record: {}",
                    self.history.games(),
                    result.score,
                    self.history.record()
                );

                self.state = self.engine.reset();

                if let Some(limit) = episodes {
                    if self.history.games() >= limit {
                        break;
                    }
                }
            }
        }
    }

    /// Argmax over the network's prediction, as a one-hot selection vector
    fn greedy_action(&self, state: &StateVec) -> ActionVec {
        let input = state_to_tensor::<B>(state, &self.device);
        let q_values: Vec<f32> = self
            .network
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
        Turn::from_index(best).one_hot()
    }

    /// Metadata of the loaded checkpoint
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}
