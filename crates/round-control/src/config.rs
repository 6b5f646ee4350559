//! Match configuration
//!
//! Load-time constants for a match: the per-round point cap, the round-win
//! margin that ends the match, and the celebratory delay between rounds.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use crate::error::{MatchError, Result};

/// Smallest accepted per-round point cap
pub const MIN_POINTS_PER_ROUND: u32 = 1;
/// Largest accepted per-round point cap
pub const MAX_POINTS_PER_ROUND: u32 = 3;
/// Delay between a round ending and the next one starting
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(2);

/// Configuration for a single match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Points needed to take a round (1-3)
    pub max_points_per_round: u32,
    /// Round-win lead needed to take the match. Zero or less ends the match
    /// with the first decided round.
    pub winning_difference: i32,
    #[serde(rename = "reset_delay_ms", with = "millis")]
    pub reset_delay: Duration,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_points_per_round: 1,
            winning_difference: 2,
            reset_delay: DEFAULT_RESET_DELAY,
        }
    }
}

impl MatchConfig {
    /// Create a config with the default reset delay
    pub fn new(max_points_per_round: u32, winning_difference: i32) -> Self {
        Self {
            max_points_per_round,
            winning_difference,
            ..Self::default()
        }
    }

    pub fn with_reset_delay(mut self, reset_delay: Duration) -> Self {
        self.reset_delay = reset_delay;
        self
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: MatchConfig = serde_json::from_str(json)
            .map_err(|e| MatchError::InvalidConfigJson(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_POINTS_PER_ROUND..=MAX_POINTS_PER_ROUND).contains(&self.max_points_per_round) {
            return Err(MatchError::InvalidConfig(format!(
                "max_points_per_round must be in {}..={}, got {}",
                MIN_POINTS_PER_ROUND, MAX_POINTS_PER_ROUND, self.max_points_per_round
            )));
        }
        if self.reset_delay.is_zero() {
            return Err(MatchError::InvalidConfig("reset_delay must be non-zero".to_string()));
        }
        if self.winning_difference <= 0 {
            tracing::warn!(
                winning_difference = self.winning_difference,
                "non-positive winning difference, the first decided round ends the match"
            );
        }
        Ok(())
    }
}

/// `Duration` as whole milliseconds
mod millis {
    use std::time::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
