//! Simulation configuration.
//!
//! Two knobs govern a session: the difficulty the chain starts at and the
//! block-time target the reactive controller steers toward. Values come from
//! defaults or environment variables and are validated before use.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;

/// Tunables for a simulation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Difficulty the chain starts at (leading zero hex characters).
    pub initial_difficulty: u32,
    /// Target mining time in seconds for the difficulty controller.
    pub target_block_time: f64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            initial_difficulty: 2,
            target_block_time: 2.0,
        }
    }
}

impl ChainConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// Recognized variables: `EDUCHAIN_DIFFICULTY`,
    /// `EDUCHAIN_TARGET_BLOCK_TIME`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = env::var("EDUCHAIN_DIFFICULTY") {
            config.initial_difficulty = raw.parse().map_err(|_| ConfigError::Parse {
                var: "EDUCHAIN_DIFFICULTY".to_string(),
                value: raw.clone(),
            })?;
        }

        if let Ok(raw) = env::var("EDUCHAIN_TARGET_BLOCK_TIME") {
            config.target_block_time = raw.parse().map_err(|_| ConfigError::Parse {
                var: "EDUCHAIN_TARGET_BLOCK_TIME".to_string(),
                value: raw.clone(),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the rest of the system relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_difficulty == 0 {
            return Err(ConfigError::Invalid(
                "initial difficulty must be at least 1".to_string(),
            ));
        }
        if !(self.target_block_time > 0.0) {
            return Err(ConfigError::Invalid(
                "target block time must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChainConfig::default();
        assert_eq!(config.initial_difficulty, 2);
        assert_eq!(config.target_block_time, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_difficulty() {
        let config = ChainConfig {
            initial_difficulty: 0,
            ..ChainConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nonpositive_target() {
        let config = ChainConfig {
            target_block_time: 0.0,
            ..ChainConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
