//! Execution logic for the self-directed actions: Eat, Reproduce, and Run.

use forage_types::ActionOutcome;

use crate::actor::Actor;
use crate::config::ActorConfig;

/// Eat one unit of shared food.
///
/// No-op when the world has no food or the actor is already at the cap;
/// in both cases `food` is left untouched.
pub fn execute_eat(actor: &mut Actor, food: &mut u32, config: &ActorConfig) -> ActionOutcome {
    if actor.strength() >= config.max_strength {
        return ActionOutcome::AlreadyFull;
    }
    let Some(remaining) = food.checked_sub(1) else {
        return ActionOutcome::NoFood;
    };
    *food = remaining;
    let gained = actor.gain_strength(config.eat_gain, config);
    ActionOutcome::Ate { gained }
}

/// Pay the reproduction cost if the actor is strong enough.
///
/// Returns `true` when the caller should spawn a child with this actor as
/// parent. The child itself is created by the world.
pub fn begin_reproduction(actor: &mut Actor, config: &ActorConfig) -> bool {
    if actor.strength() <= config.reproduce_threshold {
        return false;
    }
    actor.spend_strength(config.reproduce_cost);
    actor.record_child();
    true
}

/// Start running; the actor is immune to attacks until its next upkeep.
pub const fn execute_run(actor: &mut Actor) -> ActionOutcome {
    actor.start_running();
    ActionOutcome::Ran
}
