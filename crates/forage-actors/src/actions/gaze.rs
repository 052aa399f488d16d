//! Gaze rotation for `LookLeft` / `LookRight`.
//!
//! The gaze moves through the ordered list of live actor ids, wrapping at
//! both ends. The list includes the looking actor itself. When the current
//! target is unset or no longer live, a random live id is picked instead.

use forage_types::{ActionKind, ActorId};
use rand::Rng;

/// Direction of a gaze rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GazeDirection {
    /// Towards the previous id.
    Left,
    /// Towards the next id.
    Right,
}

impl GazeDirection {
    /// Map a look action to its direction.
    pub const fn from_action(kind: ActionKind) -> Option<Self> {
        match kind {
            ActionKind::LookLeft => Some(Self::Left),
            ActionKind::LookRight => Some(Self::Right),
            _ => None,
        }
    }
}

/// Rotate from `current` one place in `direction` through `ids`.
///
/// Returns `None` when `current` is not in `ids`.
pub fn rotate(ids: &[ActorId], current: ActorId, direction: GazeDirection) -> Option<ActorId> {
    let position = ids.iter().position(|id| *id == current)?;
    let len = ids.len();
    let next = match direction {
        GazeDirection::Left => position.checked_sub(1).unwrap_or_else(|| len.saturating_sub(1)),
        GazeDirection::Right => position.saturating_add(1).checked_rem(len).unwrap_or(0),
    };
    ids.get(next).copied()
}

/// Pick the new gaze target.
///
/// Rotates from `current` when it is still live, otherwise picks uniformly
/// at random. Returns `None` only when `ids` is empty.
pub fn choose_target<R: Rng>(
    ids: &[ActorId],
    current: Option<ActorId>,
    direction: GazeDirection,
    rng: &mut R,
) -> Option<ActorId> {
    if let Some(next) = current.and_then(|id| rotate(ids, id, direction)) {
        return Some(next);
    }
    if ids.is_empty() {
        return None;
    }
    ids.get(rng.random_range(0..ids.len())).copied()
}
