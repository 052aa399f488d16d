//! Outcome of applying one action.
//!
//! Every turn produces exactly one [`ActionOutcome`]. No-op variants are
//! explicit so that event lines and tests can tell "chose Eat but there was
//! no food" apart from "ate".

use serde::{Deserialize, Serialize};

use crate::ids::ActorId;

/// What happened when an actor applied its chosen action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// Ate one unit of food.
    Ate {
        /// Strength actually gained after clamping.
        gained: u32,
    },
    /// Wanted to eat but the world had no food.
    NoFood,
    /// Wanted to eat but strength was already at the cap.
    AlreadyFull,
    /// Spawned a child (staged until the step boundary).
    Reproduced {
        /// Id allocated to the child.
        child: ActorId,
    },
    /// Strength was not above the reproduction threshold.
    TooWeak,
    /// Struck the looked-at actor.
    Attacked {
        /// The actor that was struck.
        target: ActorId,
        /// Strength removed from the target.
        dealt: u32,
        /// Strength the attacker regained.
        regained: u32,
    },
    /// The looked-at actor was running and could not be struck.
    TargetRunning {
        /// The actor that evaded.
        target: ActorId,
    },
    /// Nobody (or only a removed actor, or itself) was being looked at.
    NoTarget,
    /// Started running.
    Ran,
    /// Turned its gaze.
    Looked {
        /// The actor now looked at, if the registry was non-empty.
        target: Option<ActorId>,
    },
    /// The decision policy produced no valid action.
    Forfeited,
}

impl ActionOutcome {
    /// Whether the outcome changed any state beyond upkeep.
    pub const fn is_effective(self) -> bool {
        matches!(
            self,
            Self::Ate { .. }
                | Self::Reproduced { .. }
                | Self::Attacked { .. }
                | Self::Ran
                | Self::Looked { target: Some(_) }
        )
    }
}

impl core::fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ate { gained } => write!(f, "ate (+{gained})"),
            Self::NoFood => write!(f, "found no food"),
            Self::AlreadyFull => write!(f, "was too full to eat"),
            Self::Reproduced { child } => write!(f, "reproduced ({child})"),
            Self::TooWeak => write!(f, "was too weak to reproduce"),
            Self::Attacked {
                target,
                dealt,
                regained,
            } => write!(f, "attacked {target} (-{dealt}, +{regained})"),
            Self::TargetRunning { target } => write!(f, "missed {target}, who was running"),
            Self::NoTarget => write!(f, "had nobody to attack"),
            Self::Ran => write!(f, "ran"),
            Self::Looked { target: Some(id) } => write!(f, "looked at {id}"),
            Self::Looked { target: None } => write!(f, "looked at nobody"),
            Self::Forfeited => write!(f, "did nothing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_op_outcomes_are_not_effective() {
        assert!(!ActionOutcome::NoFood.is_effective());
        assert!(!ActionOutcome::TargetRunning { target: ActorId::new(1) }.is_effective());
        assert!(!ActionOutcome::Looked { target: None }.is_effective());
        assert!(ActionOutcome::Ran.is_effective());
    }

    #[test]
    fn display_names_the_target() {
        let outcome = ActionOutcome::Attacked {
            target: ActorId::new(4),
            dealt: 3,
            regained: 1,
        };
        assert_eq!(outcome.to_string(), "attacked #4 (-3, +1)");
    }
}
