//! # Match configuration
//!
//! All tunables of a single match, loadable from JSON or YAML.
//!
//! ```rust
//! use ps_core::engine::config::MatchConfig;
//!
//! let standard = MatchConfig::standard();
//! let quick = MatchConfig::short(10);
//! assert!(quick.regulation_secs < standard.regulation_secs);
//! ```

use crate::error::{MatchError, Result};
use serde::{Deserialize, Serialize};

/// 90 minutes.
pub const DEFAULT_REGULATION_SECS: u32 = 90 * 60;
pub const DEFAULT_PENALTY_ROUNDS: u8 = 5;
pub const DEFAULT_SUDDEN_DEATH_LIMIT: u32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Length of regulation time in seconds.
    pub regulation_secs: u32,
    /// Kicks per side before sudden death.
    pub penalty_rounds: u8,
    /// Sudden-death rounds before the shootout is declared undecided.
    pub sudden_death_limit: u32,
    /// Optional ceiling on regulation turns.
    pub max_turns: Option<u32>,
    /// Teams change ends at halftime.
    pub swap_sides_at_halftime: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            regulation_secs: DEFAULT_REGULATION_SECS,
            penalty_rounds: DEFAULT_PENALTY_ROUNDS,
            sudden_death_limit: DEFAULT_SUDDEN_DEATH_LIMIT,
            max_turns: None,
            swap_sides_at_halftime: true,
        }
    }
}

impl MatchConfig {
    pub fn standard() -> Self {
        Self::default()
    }

    /// A shorter match, mostly for tests and quick demos.
    pub fn short(minutes: u32) -> Self {
        Self {
            regulation_secs: minutes.saturating_mul(60),
            ..Self::default()
        }
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(input: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.regulation_secs < 2 {
            return Err(MatchError::InvalidConfig(format!(
                "regulation_secs must be at least 2, got {}",
                self.regulation_secs
            )));
        }
        if self.penalty_rounds == 0 {
            return Err(MatchError::InvalidConfig(
                "penalty_rounds must be at least 1".to_string(),
            ));
        }
        if self.max_turns == Some(0) {
            return Err(MatchError::InvalidConfig(
                "max_turns must be positive when set".to_string(),
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
        let cfg = MatchConfig::default();
        assert_eq!(cfg.regulation_secs, 5400);
        assert_eq!(cfg.penalty_rounds, 5);
        assert!(cfg.max_turns.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let cfg = MatchConfig::from_yaml_str("regulation_secs: 600\nmax_turns: 1000\n").unwrap();
        assert_eq!(cfg.regulation_secs, 600);
        assert_eq!(cfg.max_turns, Some(1000));
        assert_eq!(cfg.penalty_rounds, DEFAULT_PENALTY_ROUNDS);
    }

    #[test]
    fn test_json_rejects_invalid() {
        let err = MatchConfig::from_json_str(r#"{"penalty_rounds": 0}"#).unwrap_err();
        assert!(matches!(err, MatchError::InvalidConfig(_)));
        assert!(MatchConfig::short(0).validate().is_err());
    }
}
