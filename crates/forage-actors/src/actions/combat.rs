//! Attack resolution between two actors.
//!
//! ## Combat flow
//!
//! 1. A running target is immune: nothing changes.
//! 2. Strike power is `min(attacker strength, attacker headroom to the cap)`.
//! 3. The target loses up to that much through [`Actor::take_damage`].
//! 4. The attacker regains half of the damage actually dealt, clamped.
//!
//! Target lookup (absent ids, self-targeting) is the world's job; this
//! module only sees two distinct, live actors.

use forage_types::ActionOutcome;

use crate::actor::Actor;
use crate::config::ActorConfig;

/// Strength the attacker can strike with.
pub fn strike_power(attacker: &Actor, config: &ActorConfig) -> u32 {
    let headroom = config.max_strength.saturating_sub(attacker.strength());
    attacker.strength().min(headroom)
}

/// Resolve an attack of `attacker` on `target`.
pub fn resolve_attack(
    attacker: &mut Actor,
    target: &mut Actor,
    config: &ActorConfig,
) -> ActionOutcome {
    if target.is_running() {
        return ActionOutcome::TargetRunning { target: target.id() };
    }

    let power = strike_power(attacker, config);
    let dealt = target.take_damage(power);
    let regained = attacker.gain_strength(dealt.checked_div(2).unwrap_or(0), config);

    ActionOutcome::Attacked {
        target: target.id(),
        dealt,
        regained,
    }
}

#[cfg(test)]
mod tests {
    use forage_types::ActorId;

    use super::*;

    fn actor(id: u64, strength: u32) -> Actor {
        let config = ActorConfig {
            starting_strength: strength,
            ..ActorConfig::default()
        };
        Actor::new(ActorId::new(id), format!("A{id}"), None, 0, &config)
    }

    #[test]
    fn power_is_limited_by_headroom() {
        let config = ActorConfig::default();
        assert_eq!(strike_power(&actor(0, 3), &config), 3);
        assert_eq!(strike_power(&actor(0, 5), &config), 5);
        assert_eq!(strike_power(&actor(0, 8), &config), 2);
        assert_eq!(strike_power(&actor(0, 10), &config), 0);
    }

    #[test]
    fn attack_transfers_half_the_damage() {
        let config = ActorConfig::default();
        let mut attacker = actor(0, 4);
        let mut target = actor(1, 6);
        let outcome = resolve_attack(&mut attacker, &mut target, &config);
        assert_eq!(
            outcome,
            ActionOutcome::Attacked {
                target: ActorId::new(1),
                dealt: 4,
                regained: 2,
            }
        );
        assert_eq!(target.strength(), 2);
        assert_eq!(attacker.strength(), 6);
    }

    #[test]
    fn damage_is_capped_by_target_strength() {
        let config = ActorConfig::default();
        let mut attacker = actor(0, 5);
        let mut target = actor(1, 1);
        let outcome = resolve_attack(&mut attacker, &mut target, &config);
        assert!(matches!(outcome, ActionOutcome::Attacked { dealt: 1, regained: 0, .. }));
        assert_eq!(target.strength(), 0);
    }

    #[test]
    fn running_target_is_immune() {
        let config = ActorConfig::default();
        let mut attacker = actor(0, 4);
        let mut target = actor(1, 6);
        target.start_running();
        let outcome = resolve_attack(&mut attacker, &mut target, &config);
        assert_eq!(
            outcome,
            ActionOutcome::TargetRunning {
                target: ActorId::new(1)
            }
        );
        assert_eq!(attacker.strength(), 4);
        assert_eq!(target.strength(), 6);
    }
}
