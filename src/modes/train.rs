//! Training mode for the Q-learning agent
//!
//! Runs the learning loop: observe, act, step the game, learn, repeat. Every
//! step feeds a single-transition update; every finished episode feeds a
//! replay-batch update and, on a new record score, writes a checkpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use snake_dqn::modes::{TrainConfig, TrainMode};
//! use snake_dqn::rl::{TrainingBackend, default_device};
//! use std::path::PathBuf;
//!
//! let mut config = TrainConfig::new(PathBuf::from("models"));
//! config.episodes = Some(500);
//!
//! let mut train_mode = TrainMode::<TrainingBackend>::new(config, default_device());
//! train_mode.run()?;
//! ```

use anyhow::{Context, Result};
use burn::module::AutodiffModule;
use burn::tensor::backend::AutodiffBackend;
use std::path::PathBuf;

use crate::game::{GameConfig, GameEngine, GameState};
use crate::metrics::{ScoreHistory, TrainingStats};
use crate::rl::{
    Agent, ModelMetadata, QLearningConfig, Transition, checkpoint_stem, encode_state, save_model,
};

/// Configuration for training mode
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Stop after this many episodes; `None` runs until the process is
    /// interrupted
    pub episodes: Option<usize>,

    /// Directory record checkpoints are written into
    pub model_dir: PathBuf,

    /// Print rolling statistics every N episodes
    pub log_frequency: usize,

    /// Game configuration (grid size, rewards)
    pub game_config: GameConfig,

    /// Q-learning hyperparameters
    pub agent_config: QLearningConfig,
}

impl TrainConfig {
    /// Create a training configuration with defaults
    pub fn new(model_dir: PathBuf) -> Self {
        Self {
            episodes: None,
            model_dir,
            log_frequency: 50,
            game_config: GameConfig::default(),
            agent_config: QLearningConfig::default(),
        }
    }
}

/// Training mode for the Q-learning agent
pub struct TrainMode<B: AutodiffBackend> {
    agent: Agent<B>,
    engine: GameEngine,
    state: GameState,
    stats: TrainingStats,
    history: ScoreHistory,
    config: TrainConfig,
}

impl<B: AutodiffBackend> TrainMode<B> {
    /// Create a new training mode with a fresh agent
    pub fn new(config: TrainConfig, device: B::Device) -> Self {
        let agent = Agent::new(config.agent_config.clone(), device);
        let mut engine = GameEngine::new(config.game_config.clone());
        let state = engine.reset();

        // 100-episode rolling window for progress reporting
        let stats = TrainingStats::new(100);

        Self {
            agent,
            engine,
            state,
            stats,
            history: ScoreHistory::new(),
            config,
        }
    }

    /// Run the training loop
    pub fn run(&mut self) -> Result<()> {
        self.print_header();

        loop {
            let (score, episode_reward, episode_steps) = self.run_episode();

            self.stats.record_episode(episode_reward, episode_steps, score);
            let new_record = self.history.record_episode(score);

            if new_record {
                let path = self.save_checkpoint()?;
                println!("  New record! Checkpoint saved: {:?}", path);
            }

            println!(
                "Game: {}, Score: {}, Record: {}",
                self.agent.n_games(),
                score,
                self.history.record()
            );

            if self.agent.n_games() % self.config.log_frequency == 0 {
                println!("  {}", self.stats.format_summary());
            }

            if let Some(limit) = self.config.episodes {
                if self.agent.n_games() >= limit {
                    break;
                }
            }
        }

        println!("\nTraining complete!");
        println!("{}", self.stats.format_summary());

        Ok(())
    }

    /// Run one episode to termination
    ///
    /// Returns the final score, the total reward, and the number of steps.
    fn run_episode(&mut self) -> (u32, f32, usize) {
        let mut episode_reward = 0.0;
        let mut episode_steps = 0;

        loop {
            let state_old = encode_state(&self.state);
            let action = self.agent.select_action(&state_old);

            let result = self.engine.play_step(&mut self.state, action);
            let state_new = encode_state(&self.state);

            let transition = Transition {
                state: state_old,
                action,
                reward: result.reward,
                next_state: state_new,
                done: result.done,
            };

            // The single-step update runs before the transition enters the
            // replay memory, so the episode-end batch may revisit it
            self.agent.train_short_memory(transition.clone());
            self.agent.remember(transition);

            episode_reward += result.reward;
            episode_steps += 1;

            if result.done {
                self.state = self.engine.reset();
                self.agent.increment_games();

                if let Some(loss) = self.agent.train_long_memory() {
                    self.stats.record_loss(loss);
                }

                return (result.score, episode_reward, episode_steps);
            }
        }
    }

    /// Write a checkpoint named after the current game count and record
    fn save_checkpoint(&self) -> Result<PathBuf> {
        let stem = checkpoint_stem(self.agent.n_games(), self.history.record());
        let path = self.config.model_dir.join(stem);

        let metadata = ModelMetadata::new(
            self.agent.config().clone(),
            self.agent.n_games(),
            self.history.record(),
        );

        save_model(&self.agent.network().valid(), &metadata, &path)
            .with_context(|| format!("Failed to save checkpoint to {:?}", path))?;

        Ok(path)
    }

    fn print_header(&self) {
        println!("{}", "=".repeat(70));
        println!("Q-Learning Training - Snake");
        println!("{}", "=".repeat(70));
        match self.config.episodes {
            Some(limit) => println!("Episodes: {}", limit),
            None => println!("Episodes: until interrupted"),
        }
        println!(
            "Game Config: {}x{} grid",
            self.config.game_config.grid_width, self.config.game_config.grid_height
        );
        println!("Q-Learning Config:");
        println!("  Learning rate: {}", self.config.agent_config.learning_rate);
        println!("  Gamma: {}", self.config.agent_config.gamma);
        println!(
            "  Replay memory: {} transitions",
            self.config.agent_config.memory_capacity
        );
        println!("  Batch size: {}", self.config.agent_config.batch_size);
        println!(
            "  Exploration: epsilon = {} - games, drawn from [0, {})",
            self.config.agent_config.epsilon_base, self.config.agent_config.epsilon_scale
        );
        println!("Checkpoints: {:?} (on new record)", self.config.model_dir);
        println!("{}", "=".repeat(70));
        println!();
    }
}
