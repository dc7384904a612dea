//! Serializable simulation configuration and its validation.
//!
//! A `SimulationConfig` captures everything one run needs: the story, the
//! indicators to attach, and the rules to evaluate. Configs round-trip
//! through TOML (CLI input) and JSON (result export), and hash to a
//! deterministic content id used for seed derivation.

use crate::domain::Story;
use crate::indicators::IndicatorConfig;
use crate::rules::StrategyRule;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Everything needed to run one simulation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub story: Story,
    #[serde(default)]
    pub indicators: Vec<IndicatorConfig>,
    #[serde(default)]
    pub rules: Vec<StrategyRule>,
}

/// Invalid-configuration errors. Values the original quietly mishandled
/// (zero durations, zero periods) are rejected up front instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("scene {index} has zero duration")]
    EmptyScene { index: usize },

    #[error("indicator '{id}' has zero period")]
    InvalidPeriod { id: String },

    #[error("scene {index} has a non-finite market state")]
    NonFiniteState { index: usize },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl SimulationConfig {
    pub fn new(
        story: Story,
        indicators: Vec<IndicatorConfig>,
        rules: Vec<StrategyRule>,
    ) -> Self {
        Self {
            story,
            indicators,
            rules,
        }
    }

    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Deterministic content hash (BLAKE3 of the canonical JSON form).
    /// Identical configs share a hash; used for seed derivation and as a
    /// run identifier.
    pub fn config_hash(&self) -> String {
        let json = serde_json::to_string(self).expect("SimulationConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    /// Reject configurations the pipeline cannot run meaningfully.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, scene) in self.story.scenes.iter().enumerate() {
            if scene.duration == 0 {
                return Err(ConfigError::EmptyScene { index });
            }
            if !scene.state.is_finite() {
                return Err(ConfigError::NonFiniteState { index });
            }
        }
        for indicator in &self.indicators {
            if indicator.period == 0 {
                return Err(ConfigError::InvalidPeriod {
                    id: indicator.id.clone(),
                });
            }
        }
        Ok(())
    }
}
