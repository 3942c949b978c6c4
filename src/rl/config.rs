//! Q-learning hyperparameter configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Q-learning algorithm
///
/// # Example
///
/// ```rust
/// use snake_dqn::rl::QLearningConfig;
///
/// // Use default hyperparameters
/// let config = QLearningConfig::default();
///
/// // Or customize specific parameters
/// let config = QLearningConfig {
///     gamma: 0.95,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QLearningConfig {
    /// Learning rate for the Adam optimizer
    ///
    /// Default: 1e-3
    pub learning_rate: f64,

    /// Discount factor for future rewards (gamma)
    ///
    /// Default: 0.9
    pub gamma: f32,

    /// Capacity of the replay memory; the oldest transition is evicted once
    /// it fills up
    ///
    /// Default: 100,000
    pub memory_capacity: usize,

    /// Number of transitions sampled for the episode-end replay update
    ///
    /// Default: 1,000
    pub batch_size: usize,

    /// Width of the Q-network's hidden layer
    ///
    /// Default: 256
    pub hidden_dim: usize,

    /// Base of the exploration schedule: epsilon is this value minus the
    /// number of games played, so exploration stops entirely once the game
    /// counter reaches it
    ///
    /// Default: 80
    pub epsilon_base: i32,

    /// The exploration gate draws uniformly from `[0, epsilon_scale)` and
    /// explores when the draw falls below epsilon
    ///
    /// Default: 200
    pub epsilon_scale: i32,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 1e-3,
            gamma: 0.9,
            memory_capacity: 100_000,
            batch_size: 1_000,
            hidden_dim: 256,
            epsilon_base: 80,
            epsilon_scale: 200,
        }
    }
}

impl QLearningConfig {
    /// Create a new configuration with default hyperparameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.learning_rate <= 0.0 {
            return Err("learning_rate must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err("gamma must be in [0, 1]".to_string());
        }
        if self.memory_capacity == 0 {
            return Err("memory_capacity must be positive".to_string());
        }
        if self.batch_size == 0 {
            return Err("batch_size must be positive".to_string());
        }
        if self.hidden_dim == 0 {
            return Err("hidden_dim must be positive".to_string());
        }
        if self.epsilon_scale <= 0 {
            return Err("epsilon_scale must be positive".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = QLearningConfig::default();
        assert_eq!(config.learning_rate, 1e-3);
        assert_eq!(config.gamma, 0.9);
        assert_eq!(config.memory_capacity, 100_000);
        assert_eq!(config.batch_size, 1_000);
        assert_eq!(config.hidden_dim, 256);
        assert_eq!(config.epsilon_base, 80);
        assert_eq!(config.epsilon_scale, 200);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(QLearningConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = QLearningConfig {
            learning_rate: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = QLearningConfig {
            gamma: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = QLearningConfig {
            memory_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = QLearningConfig {
            epsilon_scale: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = QLearningConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: QLearningConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.batch_size, config.batch_size);
        assert_eq!(restored.gamma, config.gamma);
    }
}
