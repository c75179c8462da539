//! Engine configuration.
//!
//! Loaded from environment variables with fallback to defaults.

use std::env;

use printhub_core::{Money, DEFAULT_PAPER_RATE};

/// Environment variable overriding the per-sheet paper rate, in minor units.
pub const PAPER_RATE_VAR: &str = "PRINTHUB_PAPER_RATE_CENTS";

/// Posting engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Charge per printed sheet.
    pub paper_rate: Money,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            paper_rate: DEFAULT_PAPER_RATE,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let paper_rate = match lookup(PAPER_RATE_VAR) {
            Some(raw) => {
                let cents: i64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(PAPER_RATE_VAR.to_string()))?;
                if cents < 0 {
                    return Err(ConfigError::InvalidValue(PAPER_RATE_VAR.to_string()));
                }
                Money::from_cents(cents)
            }
            None => DEFAULT_PAPER_RATE,
        };

        Ok(EngineConfig { paper_rate })
    }

    /// Overrides the paper rate.
    pub fn with_paper_rate(mut self, rate: Money) -> Self {
        self.paper_rate = rate;
        self
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_vars() {
        let config = EngineConfig::from_vars(|_| None).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.paper_rate, DEFAULT_PAPER_RATE);
    }

    #[test]
    fn test_paper_rate_override() {
        let config = EngineConfig::from_vars(|key| {
            (key == PAPER_RATE_VAR).then(|| " 50000 ".to_string())
        })
        .unwrap();
        assert_eq!(config.paper_rate, Money::from_cents(50_000));
    }

    #[test]
    fn test_invalid_paper_rate_rejected() {
        for raw in ["abc", "-1", "12.5"] {
            let result = EngineConfig::from_vars(|_| Some(raw.to_string()));
            assert!(
                matches!(result, Err(ConfigError::InvalidValue(ref var)) if var == PAPER_RATE_VAR),
                "{raw} should be rejected"
            );
        }
    }
}
