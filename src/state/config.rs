//! Game configuration.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use super::attempts::DEFAULT_MAX_ATTEMPTS;
use super::rotation::{DailyRotation, DEFAULT_ROTATION_HOURS};
use super::scorer::ScoringRule;

/// Default delay between revealed tiles.
pub const DEFAULT_REVEAL_STEP_MS: u64 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0} must be at least 1")]
    OutOfRange(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub max_attempts: usize,
    pub rotation_period_hours: i64,
    pub reveal_step_ms: u64,
    pub scoring: ScoringRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            rotation_period_hours: DEFAULT_ROTATION_HOURS,
            reveal_step_ms: DEFAULT_REVEAL_STEP_MS,
            scoring: ScoringRule::default(),
        }
    }
}

impl GameConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts < 1 {
            return Err(ConfigError::OutOfRange("max_attempts"));
        }
        if self.rotation_period_hours < 1 {
            return Err(ConfigError::OutOfRange("rotation_period_hours"));
        }
        Ok(())
    }

    pub fn rotation(&self) -> DailyRotation {
        DailyRotation::new(chrono::Duration::hours(self.rotation_period_hours))
    }

    pub fn reveal_step(&self) -> Duration {
        Duration::from_millis(self.reveal_step_ms)
    }
}
