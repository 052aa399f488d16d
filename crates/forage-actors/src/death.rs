//! Death records.
//!
//! An actor dies when it starts a turn at or below the death threshold.
//! The world stages the removal and keeps the [`DeathRecord`] for the
//! step summary and the event log; the actor itself is evicted at the
//! step boundary.

use forage_types::{ActorId, ActorSnapshot};

use crate::actor::Actor;

/// Data emitted when an actor dies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeathRecord {
    /// Stats at the moment of death.
    pub snapshot: ActorSnapshot,
    /// Step during which the actor died.
    pub died_at_step: u64,
}

impl DeathRecord {
    /// Record the death of `actor` during `step`.
    pub fn new(actor: &Actor, step: u64) -> Self {
        Self {
            snapshot: actor.snapshot(),
            died_at_step: step,
        }
    }

    /// The actor who died.
    pub const fn actor_id(&self) -> ActorId {
        self.snapshot.id
    }
}
