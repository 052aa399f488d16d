//! Actor snapshots and reward feedback.

use serde::{Deserialize, Serialize};

use crate::enums::ActionKind;
use crate::ids::ActorId;

/// Point-in-time copy of an actor's stats.
///
/// Snapshots outlive the actor they describe; the world keeps one for the
/// longest-lived actor even after that actor has been removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    /// The actor's identifier.
    pub id: ActorId,
    /// Display name.
    pub name: String,
    /// Strength when the snapshot was taken.
    pub strength: u32,
    /// Steps survived when the snapshot was taken.
    pub lifespan: u32,
    /// Successful reproductions.
    pub children: u32,
    /// Parent id, if the actor was born from reproduction.
    pub parent: Option<ActorId>,
    /// The last action chosen.
    pub last_move: Option<ActionKind>,
    /// Step during which the actor was created.
    pub born_at_step: u64,
}

impl ActorSnapshot {
    /// Render as pretty-printed JSON for end-of-run reports.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Feedback handed back to the decision policy after a turn.
///
/// All fields are signed deltas; a learned policy typically trains on
/// [`Reward::total`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    /// Strength after the action minus strength before upkeep.
    pub strength_delta: i64,
    /// Children gained this turn (0 or 1).
    pub children_delta: i64,
    /// Penalty applied when strength ends the turn dangerously low.
    pub low_strength_penalty: i64,
}

impl Reward {
    /// Sum of all components.
    pub const fn total(&self) -> i64 {
        self.strength_delta
            .saturating_add(self.children_delta)
            .saturating_add(self.low_strength_penalty)
    }
}
