//! Configuration constants and defaults for actor vitality and actions.
//!
//! These values appear in `forage-config.yaml` under the `actor` key. The
//! [`ActorConfig`] struct bundles every tunable so that callers (the world,
//! tests) can override defaults.

use serde::Deserialize;

use crate::error::ActorError;

/// Configuration for actor vitality and action effects.
///
/// All amounts are whole strength points applied once per turn.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    /// Upper bound on strength (default: 10).
    pub max_strength: u32,

    /// Strength of a newly created actor (default: 5).
    pub starting_strength: u32,

    /// An actor at or below this strength dies before acting (default: 1).
    pub death_threshold: u32,

    /// Strength paid at the start of every turn (default: 1).
    pub upkeep: u32,

    /// Strength gained from eating one unit of food (default: 2).
    pub eat_gain: u32,

    /// Strength must be strictly above this to reproduce (default: 5).
    pub reproduce_threshold: u32,

    /// Strength paid by the parent on reproduction (default: 2).
    pub reproduce_cost: u32,

    /// Strength at or below which the low-strength penalty applies (default: 2).
    pub low_strength_threshold: u32,

    /// Reward added when strength ends a turn at or below
    /// `low_strength_threshold` (default: -1).
    pub low_strength_penalty: i64,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            max_strength: 10,
            starting_strength: 5,
            death_threshold: 1,
            upkeep: 1,
            eat_gain: 2,
            reproduce_threshold: 5,
            reproduce_cost: 2,
            low_strength_threshold: 2,
            low_strength_penalty: -1,
        }
    }
}

impl ActorConfig {
    /// Reject configurations that would produce a degenerate simulation.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::InvalidConfig`] if `max_strength` is zero or
    /// `starting_strength` exceeds it.
    pub fn validate(&self) -> Result<(), ActorError> {
        if self.max_strength == 0 {
            return Err(ActorError::InvalidConfig {
                reason: String::from("max_strength must be at least 1"),
            });
        }
        if self.starting_strength > self.max_strength {
            return Err(ActorError::InvalidConfig {
                reason: format!(
                    "starting_strength {} exceeds max_strength {}",
                    self.starting_strength, self.max_strength
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ActorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_strength, 10);
        assert_eq!(config.death_threshold, 1);
    }

    #[test]
    fn starting_above_cap_is_rejected() {
        let config = ActorConfig {
            starting_strength: 11,
            ..ActorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ActorError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn zero_cap_is_rejected() {
        let config = ActorConfig {
            max_strength: 0,
            starting_strength: 0,
            ..ActorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let parsed: Result<ActorConfig, _> = serde_json::from_str(r#"{"eat_gain": 3}"#);
        let config = parsed.ok().unwrap_or_default();
        assert_eq!(config.eat_gain, 3);
        assert_eq!(config.reproduce_cost, 2);
    }
}
