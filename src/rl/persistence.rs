//! Model persistence for saving and loading trained agents
//!
//! Uses Burn's Record system for the network weights and a JSON sidecar for
//! the metadata needed to reconstruct the network and report on the run.

use anyhow::{Context, Result};
use burn::{
    module::Module,
    record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder},
    tensor::backend::Backend,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::config::QLearningConfig;
use super::network::{QNetwork, QNetworkConfig};

/// Metadata saved next to the model weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Hyperparameters the agent was trained with
    pub config: QLearningConfig,

    /// Size of the input feature vector
    pub state_dim: usize,

    /// Number of actions the network scores
    pub num_actions: usize,

    /// Number of games completed when the checkpoint was written
    pub games_trained: usize,

    /// Best score reached so far
    pub record: u32,

    /// Crate version that wrote the checkpoint
    pub version: String,
}

impl ModelMetadata {
    pub fn new(config: QLearningConfig, games_trained: usize, record: u32) -> Self {
        Self {
            config,
            state_dim: super::observation::STATE_DIM,
            num_actions: crate::game::NUM_ACTIONS,
            games_trained,
            record,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Filename stem for a record checkpoint, e.g. `game136_score72`
pub fn checkpoint_stem(n_games: usize, score: u32) -> String {
    format!("game{}_score{}", n_games, score)
}

/// Save network weights and metadata
///
/// Writes two files:
/// - `<path>.mpk` - network weights (Burn named-mpk record, full precision)
/// - `<path>.meta.json` - metadata as JSON
pub fn save_model<B: Backend>(
    network: &QNetwork<B>,
    metadata: &ModelMetadata,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }

    let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
    recorder
        .record(network.clone().into_record(), path.to_path_buf())
        .context("Failed to save network weights")?;

    let meta_path = path.with_extension("meta.json");
    let meta_json =
        serde_json::to_string_pretty(metadata).context("Failed to serialize metadata")?;
    std::fs::write(&meta_path, meta_json)
        .with_context(|| format!("Failed to write metadata to {:?}", meta_path))?;

    Ok(())
}

/// Load a trained network and its metadata
///
/// The network is reconstructed from the recorded dimensions before the
/// weights are loaded into it.
pub fn load_network<B: Backend>(
    path: &Path,
    device: &B::Device,
) -> Result<(QNetwork<B>, ModelMetadata)> {
    let meta_path = path.with_extension("meta.json");
    let meta_json = std::fs::read_to_string(&meta_path)
        .with_context(|| format!("Failed to read metadata from {:?}", meta_path))?;
    let metadata: ModelMetadata =
        serde_json::from_str(&meta_json).context("Failed to deserialize metadata")?;

    let network = QNetworkConfig::new()
        .with_state_dim(metadata.state_dim)
        .with_hidden_dim(metadata.config.hidden_dim)
        .with_num_actions(metadata.num_actions)
        .init::<B>(device);

    let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
    let record = recorder
        .load(path.to_path_buf(), device)
        .with_context(|| format!("Failed to load network weights from {:?}", path))?;

    Ok((network.load_record(record), metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::backend::{InferenceBackend, default_device};
    use crate::rl::observation::{STATE_DIM, state_to_tensor};
    use tempfile::TempDir;

    #[test]
    fn test_checkpoint_stem_format() {
        assert_eq!(checkpoint_stem(136, 72), "game136_score72");
        assert_eq!(checkpoint_stem(1, 0), "game1_score0");
    }

    #[test]
    fn test_metadata_serialization() {
        let metadata = ModelMetadata::new(QLearningConfig::default(), 42, 17);

        let json = serde_json::to_string(&metadata).unwrap();
        let restored: ModelMetadata = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.games_trained, 42);
        assert_eq!(restored.record, 17);
        assert_eq!(restored.state_dim, STATE_DIM);
        assert_eq!(restored.config.hidden_dim, metadata.config.hidden_dim);
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("model");
        let device = default_device();

        let config = QLearningConfig {
            hidden_dim: 16,
            ..Default::default()
        };
        let network = QNetworkConfig::new()
            .with_hidden_dim(config.hidden_dim)
            .init::<InferenceBackend>(&device);

        let metadata = ModelMetadata::new(config, 10, 5);
        save_model(&network, &metadata, &path).unwrap();

        let (loaded, loaded_meta) = load_network::<InferenceBackend>(&path, &device).unwrap();
        assert_eq!(loaded_meta.games_trained, 10);
        assert_eq!(loaded_meta.record, 5);

        // Same weights produce the same predictions
        let state = [1.0; STATE_DIM];
        let input = state_to_tensor::<InferenceBackend>(&state, &device);
        let before: Vec<f32> = network.forward(input.clone()).into_data().to_vec().unwrap();
        let after: Vec<f32> = loaded.forward(input).into_data().to_vec().unwrap();

        for (b, a) in before.iter().zip(after.iter()) {
            assert!((b - a).abs() < 1e-6);
        }
    }

    #[test]
    fn test_load_missing_checkpoint_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("does_not_exist");
        let device = default_device();

        let result = load_network::<InferenceBackend>(&path, &device);
        assert!(result.is_err());
    }
}
