//! The closed set of actions an actor can take.
//!
//! Decision policies answer with a raw index; [`ActionKind::from_index`]
//! is the single place where that index is interpreted. Anything outside
//! the set maps to `None` and the actor forfeits its turn.

use serde::{Deserialize, Serialize};

/// An action an actor can choose on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Consume one unit of world food to regain strength.
    Eat,
    /// Spend strength to spawn a child.
    Reproduce,
    /// Strike the actor currently looked at.
    Attack,
    /// Become immune to attacks until the next turn.
    Run,
    /// Rotate gaze to the previous actor in id order.
    LookLeft,
    /// Rotate gaze to the next actor in id order.
    LookRight,
}

impl ActionKind {
    /// Every action, in index order.
    pub const ALL: [Self; 6] = [
        Self::Eat,
        Self::Reproduce,
        Self::Attack,
        Self::Run,
        Self::LookLeft,
        Self::LookRight,
    ];

    /// Number of actions in the closed set.
    pub const COUNT: usize = Self::ALL.len();

    /// Interpret a policy's raw index. Returns `None` when out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this action within [`ActionKind::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Eat => 0,
            Self::Reproduce => 1,
            Self::Attack => 2,
            Self::Run => 3,
            Self::LookLeft => 4,
            Self::LookRight => 5,
        }
    }

    /// Short lowercase label used in event lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Eat => "eat",
            Self::Reproduce => "reproduce",
            Self::Attack => "attack",
            Self::Run => "run",
            Self::LookLeft => "look_left",
            Self::LookRight => "look_right",
        }
    }
}

impl core::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
