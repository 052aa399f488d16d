//! Observation assembly.
//!
//! Builds the [`Observation`] handed to the decision policy, right after the
//! acting actor has paid upkeep. Weak relations are resolved here: a parent
//! or gaze target that is gone (or has died earlier in this step) is
//! reported as absent.

use forage_types::{ActorId, Observation, TargetView};

use crate::world::World;

/// Assemble the observation for `id`. `None` if the actor is not live.
pub fn assemble_observation(world: &World, id: ActorId) -> Option<Observation> {
    let actor = world.get_actor(id)?;

    let parent_last_move = actor
        .parent()
        .and_then(|parent| resolve(world, parent))
        .and_then(forage_actors::Actor::last_move);

    let target = actor
        .looking_at()
        .and_then(|target| resolve(world, target))
        .map(|target| TargetView {
            id: target.id(),
            strength: target.strength(),
            running: target.is_running(),
            looking_back: target.looking_at() == Some(id),
        });

    Some(Observation {
        actor_id: id,
        strength: actor.strength(),
        children: actor.children(),
        food: world.food(),
        parent_last_move,
        target,
    })
}

/// Resolve a weak reference to an actor that is present and not dying.
fn resolve(world: &World, id: ActorId) -> Option<&forage_actors::Actor> {
    if world.pending_removals().contains(&id) {
        return None;
    }
    world.get_actor(id)
}
