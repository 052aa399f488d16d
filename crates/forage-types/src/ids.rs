//! Type-safe identifier wrapper for actors.
//!
//! Actor ids are allocated by the world from a monotonically increasing
//! counter and are never reused. Because every insertion into the live
//! registry happens in allocation order, ordering by id is the same as
//! ordering by insertion.

use serde::{Deserialize, Serialize};

/// Unique identifier for an actor in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub u64);

impl ActorId {
    /// Wrap a raw counter value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the inner counter value.
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for ActorId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ActorId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<ActorId> for u64 {
    fn from(id: ActorId) -> Self {
        id.0
    }
}
