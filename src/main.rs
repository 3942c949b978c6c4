use anyhow::Result;
use clap::{Parser, ValueEnum};
use snake_dqn::game::GameConfig;
use snake_dqn::modes::{PlayMode, TrainConfig, TrainMode};
use snake_dqn::rl::{InferenceBackend, QLearningConfig, TrainingBackend, default_device};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_dqn")]
#[command(version, about = "Snake agent trained with Q-learning")]
struct Cli {
    /// Execution mode
    #[arg(long, default_value = "train")]
    mode: Mode,

    /// Grid width
    #[arg(long, default_value = "20")]
    width: usize,

    /// Grid height
    #[arg(long, default_value = "20")]
    height: usize,

    /// Checkpoint directory (train) or checkpoint to load (play)
    #[arg(long, default_value = "models")]
    model: PathBuf,

    /// Episode limit; runs until interrupted when omitted
    #[arg(long)]
    episodes: Option<usize>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Train a new agent, checkpointing on record scores
    Train,
    /// Replay a trained checkpoint greedily, without learning
    Play,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let game_config = GameConfig::new(cli.width, cli.height);
    let agent_config = QLearningConfig::default();
    agent_config.validate().map_err(anyhow::Error::msg)?;

    let device = default_device();

    match cli.mode {
        Mode::Train => {
            let mut config = TrainConfig::new(cli.model);
            config.episodes = cli.episodes;
            config.game_config = game_config;
            config.agent_config = agent_config;

            let mut train_mode = TrainMode::<TrainingBackend>::new(config, device);
            train_mode.run()?;
        }
        Mode::Play => {
            let mut play_mode =
                PlayMode::<InferenceBackend>::new(&cli.model, game_config, device)?;
            play_mode.run(cli.episodes);
        }
    }

    Ok(())
}
