//! Decision policy trait and built-in policies.
//!
//! On every turn the world presents the acting actor's [`Observation`] to a
//! [`DecisionPolicy`] and receives a raw action index in return. The trait
//! abstracts the mechanism by which decisions are obtained -- it could be a
//! learned model, a scripted bot, a heuristic, or a test stub. The world
//! calls [`decide`] exactly once per acting actor per step, synchronously.
//!
//! An index outside [`ActionKind::ALL`] or an `Err` means the actor forfeits
//! its turn. It still pays upkeep and ages.
//!
//! [`decide`]: DecisionPolicy::decide

use std::collections::BTreeMap;

use forage_actors::ActorConfig;
use forage_types::{ActionKind, ActorId, Observation, Reward};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{PolicyConfig, PolicyKind};

/// Errors a decision policy may report for a single decision.
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    /// An internal error in the policy.
    #[error("decision policy error: {message}")]
    Internal {
        /// Description of the error.
        message: String,
    },

    /// The policy produced an index outside the action set.
    #[error("action index {index} is outside the action set")]
    InvalidIndex {
        /// The offending index.
        index: usize,
    },
}

/// A source of actor decisions.
pub trait DecisionPolicy: Send {
    /// Choose an action index for the observing actor.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionError`] if no decision could be made. The world
    /// treats this as a forfeited turn, never as a step failure.
    fn decide(&mut self, observation: &Observation) -> Result<usize, DecisionError>;

    /// Receive feedback about how the actor's turn went.
    ///
    /// Called once after every turn in which the actor was alive to act.
    /// Policies that do not learn ignore it.
    fn reward(&mut self, actor: ActorId, reward: &Reward) {
        let _ = (actor, reward);
    }
}

/// Map a policy's answer onto the action set.
///
/// # Errors
///
/// Returns [`DecisionError::InvalidIndex`] if `index` is out of range.
pub fn action_for_index(index: usize) -> Result<ActionKind, DecisionError> {
    ActionKind::from_index(index).ok_or(DecisionError::InvalidIndex { index })
}

/// Build the policy selected by configuration.
pub fn build_policy(
    config: &PolicyConfig,
    actor_config: &ActorConfig,
    seed: u64,
) -> Box<dyn DecisionPolicy> {
    match config.kind {
        PolicyKind::Random => Box::new(RandomPolicy::seeded(seed)),
        PolicyKind::Rule => Box::new(RulePolicy::new(actor_config)),
        PolicyKind::Scripted => Box::new(ScriptedPolicy::always(config.scripted_action)),
        PolicyKind::Stub => Box::new(StubPolicy),
    }
}

// ---------------------------------------------------------------------------
// Random
// ---------------------------------------------------------------------------

/// Picks uniformly among all actions.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// Create a random policy with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DecisionPolicy for RandomPolicy {
    fn decide(&mut self, _observation: &Observation) -> Result<usize, DecisionError> {
        Ok(self.rng.random_range(0..ActionKind::COUNT))
    }
}

// ---------------------------------------------------------------------------
// Scripted
// ---------------------------------------------------------------------------

/// Plays a fixed action, with optional per-actor overrides.
#[derive(Debug, Clone)]
pub struct ScriptedPolicy {
    default_action: ActionKind,
    overrides: BTreeMap<ActorId, ActionKind>,
}

impl ScriptedPolicy {
    /// Every actor plays `action` every turn.
    pub const fn always(action: ActionKind) -> Self {
        Self {
            default_action: action,
            overrides: BTreeMap::new(),
        }
    }

    /// Make `actor` play `action` instead of the default.
    #[must_use]
    pub fn with_override(mut self, actor: ActorId, action: ActionKind) -> Self {
        self.overrides.insert(actor, action);
        self
    }
}

impl DecisionPolicy for ScriptedPolicy {
    fn decide(&mut self, observation: &Observation) -> Result<usize, DecisionError> {
        let action = self
            .overrides
            .get(&observation.actor_id)
            .copied()
            .unwrap_or(self.default_action);
        Ok(action.index())
    }
}

// ---------------------------------------------------------------------------
// Rule-based
// ---------------------------------------------------------------------------

/// A fixed survival heuristic.
///
/// In priority order: eat when weak and food exists; run from a stronger
/// actor that stares back; attack a weaker, non-running target while there
/// is headroom to regain strength; reproduce when strong; eat when below the
/// cap; otherwise keep looking around.
#[derive(Debug, Clone)]
pub struct RulePolicy {
    max_strength: u32,
    reproduce_above: u32,
    hungry_below: u32,
}

impl RulePolicy {
    /// Build the heuristic around the actor tunables.
    pub fn new(config: &ActorConfig) -> Self {
        Self {
            max_strength: config.max_strength,
            reproduce_above: config.reproduce_threshold.saturating_add(config.reproduce_cost),
            hungry_below: config.low_strength_threshold.saturating_add(2),
        }
    }

    fn choose(&self, obs: &Observation) -> ActionKind {
        if obs.strength < self.hungry_below && obs.food > 0 {
            return ActionKind::Eat;
        }

        if let Some(target) = obs.target {
            if target.looking_back && target.strength > obs.strength {
                return ActionKind::Run;
            }
            if target.id != obs.actor_id
                && !target.running
                && target.strength < obs.strength
                && obs.strength < self.max_strength
            {
                return ActionKind::Attack;
            }
        }

        if obs.strength > self.reproduce_above {
            return ActionKind::Reproduce;
        }
        if obs.food > 0 && obs.strength < self.max_strength {
            return ActionKind::Eat;
        }
        ActionKind::LookRight
    }
}

impl DecisionPolicy for RulePolicy {
    fn decide(&mut self, observation: &Observation) -> Result<usize, DecisionError> {
        Ok(self.choose(observation).index())
    }
}

// ---------------------------------------------------------------------------
// Stub
// ---------------------------------------------------------------------------

/// Always answers with an index outside the action set.
///
/// Every actor forfeits every turn; useful for exercising the forfeit path
/// end-to-end.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubPolicy;

impl DecisionPolicy for StubPolicy {
    fn decide(&mut self, _observation: &Observation) -> Result<usize, DecisionError> {
        Ok(ActionKind::COUNT)
    }
}
