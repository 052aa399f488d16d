//! Per-turn vital bookkeeping and reward shaping.
//!
//! A turn opens with [`open_turn`] (death check, then upkeep) and closes
//! with [`reward_for_turn`], which summarises how the turn went for the
//! decision policy's feedback channel.

use forage_types::Reward;

use crate::actor::Actor;
use crate::config::ActorConfig;

/// Result of opening an actor's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStart {
    /// The actor was already at or below the death threshold. It takes no
    /// action and must be staged for removal.
    Dies,
    /// Upkeep was paid; the actor may act.
    Acts,
}

/// Open a turn: check for death, otherwise pay upkeep.
///
/// A dying actor is left untouched so that its death record carries the
/// strength it died with.
pub const fn open_turn(actor: &mut Actor, config: &ActorConfig) -> TurnStart {
    if actor.is_dying(config) {
        return TurnStart::Dies;
    }
    actor.pay_upkeep(config);
    TurnStart::Acts
}

/// Vital values captured before a turn, used to compute the reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnBaseline {
    /// Strength before upkeep.
    pub strength: u32,
    /// Children before the action.
    pub children: u32,
}

impl TurnBaseline {
    /// Capture the baseline from the actor's current state.
    pub const fn capture(actor: &Actor) -> Self {
        Self {
            strength: actor.strength(),
            children: actor.children(),
        }
    }
}

/// Compute the feedback for a finished turn.
pub fn reward_for_turn(baseline: TurnBaseline, actor: &Actor, config: &ActorConfig) -> Reward {
    let strength_delta = i64::from(actor.strength()).saturating_sub(i64::from(baseline.strength));
    let children_delta = i64::from(actor.children()).saturating_sub(i64::from(baseline.children));
    let low_strength_penalty = if actor.strength() <= config.low_strength_threshold {
        config.low_strength_penalty
    } else {
        0
    };

    Reward {
        strength_delta,
        children_delta,
        low_strength_penalty,
    }
}

#[cfg(test)]
mod tests {
    use forage_types::ActorId;

    use super::*;

    fn actor_with(config: &ActorConfig) -> Actor {
        Actor::new(ActorId::new(0), String::from("V"), None, 0, config)
    }

    #[test]
    fn healthy_actor_pays_upkeep() {
        let config = ActorConfig::default();
        let mut a = actor_with(&config);
        assert_eq!(open_turn(&mut a, &config), TurnStart::Acts);
        assert_eq!(a.strength(), 4);
    }

    #[test]
    fn actor_at_threshold_dies_untouched() {
        let config = ActorConfig {
            starting_strength: 1,
            ..ActorConfig::default()
        };
        let mut a = actor_with(&config);
        a.start_running();
        assert_eq!(open_turn(&mut a, &config), TurnStart::Dies);
        assert_eq!(a.strength(), 1);
        assert!(a.is_running());
    }

    #[test]
    fn reward_counts_upkeep_and_children() {
        let config = ActorConfig::default();
        let mut a = actor_with(&config);
        let baseline = TurnBaseline::capture(&a);
        open_turn(&mut a, &config);
        a.record_child();
        let reward = reward_for_turn(baseline, &a, &config);
        assert_eq!(reward.strength_delta, -1);
        assert_eq!(reward.children_delta, 1);
        assert_eq!(reward.low_strength_penalty, 0);
    }

    #[test]
    fn low_strength_is_penalised() {
        let config = ActorConfig {
            starting_strength: 3,
            ..ActorConfig::default()
        };
        let mut a = actor_with(&config);
        let baseline = TurnBaseline::capture(&a);
        open_turn(&mut a, &config);
        let reward = reward_for_turn(baseline, &a, &config);
        assert_eq!(reward.low_strength_penalty, -1);
        assert_eq!(reward.total(), -2);
    }
}
