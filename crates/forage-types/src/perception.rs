//! Observation payload handed to a decision policy each turn.
//!
//! The observation is the **only** information a policy receives about the
//! world. It is assembled by the world right before the policy is consulted,
//! after upkeep has been paid.

use serde::{Deserialize, Serialize};

use crate::enums::ActionKind;
use crate::ids::ActorId;

/// The looked-at actor as seen by the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetView {
    /// The target's identifier.
    pub id: ActorId,
    /// The target's current strength.
    pub strength: u32,
    /// Whether the target is running (immune to attacks).
    pub running: bool,
    /// Whether the target is looking back at the observer.
    pub looking_back: bool,
}

/// Everything an actor knows when choosing its action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// The observing actor.
    pub actor_id: ActorId,
    /// Strength after this turn's upkeep.
    pub strength: u32,
    /// Number of successful reproductions so far.
    pub children: u32,
    /// Food currently available in the world.
    pub food: u32,
    /// The parent's last move, if the parent is still alive and has moved.
    pub parent_last_move: Option<ActionKind>,
    /// The looked-at actor, if it is still present.
    pub target: Option<TargetView>,
}
