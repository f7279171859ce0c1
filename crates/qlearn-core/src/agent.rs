//! Agent configuration and per-episode reporting

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::RLError;

/// Configuration for a tabular Q-learning agent
///
/// Every field has a default, so a JSON document only needs to name the
/// values it changes:
///
/// ```
/// use qlearn_core::QLearningConfig;
///
/// let config = QLearningConfig::from_json(r#"{ "episodes": 1000 }"#).unwrap();
/// assert_eq!(config.episodes, 1000);
/// assert_eq!(config.gamma, 0.9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    /// Discount factor γ
    pub gamma: f64,
    /// Learning rate α
    pub alpha: f64,
    /// Number of episodes run by a full training pass
    pub episodes: usize,
    /// Seed for the exploration generator (entropy when absent)
    pub seed: Option<u64>,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            gamma: 0.9,
            alpha: 0.1,
            episodes: 100,
            seed: None,
        }
    }
}

impl QLearningConfig {
    /// Set the discount factor
    #[must_use]
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set the learning rate
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the number of training episodes
    #[must_use]
    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    /// Seed the exploration generator
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every scalar lies in its admissible range
    pub fn validate(&self) -> crate::Result<()> {
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(RLError::Configuration(format!(
                "gamma must lie in [0, 1], got {}",
                self.gamma
            )));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(RLError::Configuration(format!(
                "alpha must lie in [0, 1], got {}",
                self.alpha
            )));
        }
        if self.episodes == 0 {
            return Err(RLError::Configuration(
                "episode count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::debug!(?path, ?config, "loaded Q-learning configuration");
        Ok(config)
    }
}

/// What happened during one training episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// 1-based episode index
    pub episode: usize,
    /// Exploration rate used for the whole episode
    pub epsilon: f64,
    /// Sum of rewards collected
    pub total_reward: f64,
    /// Number of environment steps taken
    pub steps: usize,
}
