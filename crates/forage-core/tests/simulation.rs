//! End-to-end scenarios for the step cycle.
//!
//! Every world here uses scripted or recording policies, sequential names,
//! and in-memory sinks, so each scenario is fully deterministic.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use forage_actors::{ActorConfig, SequentialNames};
use forage_core::config::{SimulationConfig, WorldConfig};
use forage_core::decision::{
    DecisionError, DecisionPolicy, RandomPolicy, ScriptedPolicy, StubPolicy,
};
use forage_core::observer::{EventSink, MemorySink, NullSink, SimEvent, SinkError};
use forage_core::{Collaborators, World};
use forage_types::{ActionKind, ActorId, Observation, Reward};

/// Records who decided and what feedback they got, then plays a fixed action.
struct RecordingPolicy {
    action: ActionKind,
    decided: Arc<Mutex<Vec<ActorId>>>,
    rewards: Arc<Mutex<Vec<(ActorId, Reward)>>>,
}

impl DecisionPolicy for RecordingPolicy {
    fn decide(&mut self, observation: &Observation) -> Result<usize, DecisionError> {
        self.decided.lock().unwrap().push(observation.actor_id);
        Ok(self.action.index())
    }

    fn reward(&mut self, actor: ActorId, reward: &Reward) {
        self.rewards.lock().unwrap().push((actor, *reward));
    }
}

/// Fails every decision.
struct FailingPolicy;

impl DecisionPolicy for FailingPolicy {
    fn decide(&mut self, _observation: &Observation) -> Result<usize, DecisionError> {
        Err(DecisionError::Internal {
            message: String::from("model offline"),
        })
    }
}

/// Rejects every event.
struct BrokenSink;

impl EventSink for BrokenSink {
    fn emit(&mut self, _event: &SimEvent) -> Result<(), SinkError> {
        Err(SinkError::Unavailable {
            message: String::from("disk full"),
        })
    }
}

fn no_replenish() -> WorldConfig {
    WorldConfig {
        food_per_step: 0,
        ..WorldConfig::default()
    }
}

fn build(
    actor_count: u32,
    config: WorldConfig,
    actor_config: ActorConfig,
    policy: Box<dyn DecisionPolicy>,
) -> World {
    let collaborators = Collaborators::new(
        policy,
        Box::new(NullSink),
        Box::new(SequentialNames::default()),
    );
    World::new(actor_count, config, actor_config, collaborators).unwrap()
}

fn scripted(actor_count: u32, policy: ScriptedPolicy) -> World {
    build(actor_count, no_replenish(), ActorConfig::default(), Box::new(policy))
}

#[test]
fn single_actor_eats() {
    let mut world = scripted(1, ScriptedPolicy::always(ActionKind::Eat));
    let id = ActorId::new(0);

    world.step();

    let actor = world.get_actor(id).unwrap();
    assert_eq!(actor.strength(), 6);
    assert_eq!(actor.lifespan(), 1);
    assert_eq!(actor.last_move(), Some(ActionKind::Eat));
    assert_eq!(world.food(), 9);
    assert_eq!(world.population(), 1);
}

#[test]
fn weak_actor_dies_without_acting() {
    let mut world = scripted(2, ScriptedPolicy::always(ActionKind::Eat));
    let (weak, healthy) = (ActorId::new(0), ActorId::new(1));
    world.get_actor_mut(weak).unwrap().take_damage(4);

    let summary = world.step();

    assert_eq!(summary.deaths, 1);
    assert_eq!(summary.eaten, 1);
    assert_eq!(world.population(), 1);
    assert!(world.get_actor(weak).is_none());
    assert!(world.get_actor(healthy).is_some());
    assert_eq!(world.food(), 9);
}

#[test]
fn dead_actor_is_staged_during_its_step() {
    let sink = MemorySink::new();
    let collaborators = Collaborators::new(
        Box::new(ScriptedPolicy::always(ActionKind::Run)),
        Box::new(sink.clone()),
        Box::new(SequentialNames::default()),
    );
    let actor_config = ActorConfig {
        starting_strength: 1,
        ..ActorConfig::default()
    };
    let mut world = World::new(1, no_replenish(), actor_config, collaborators).unwrap();

    world.step();

    assert!(world.is_extinct());
    assert!(world.pending_removals().is_empty());
    let lines = sink.lines();
    assert!(lines.iter().any(|l| l.contains("died after 0 steps")));
    assert!(!lines.iter().any(|l| l.contains("ran")));
}

#[test]
fn reproduction_is_visible_next_step() {
    let decided = Arc::new(Mutex::new(Vec::new()));
    let policy = RecordingPolicy {
        action: ActionKind::Reproduce,
        decided: Arc::clone(&decided),
        rewards: Arc::new(Mutex::new(Vec::new())),
    };
    let actor_config = ActorConfig {
        starting_strength: 8,
        ..ActorConfig::default()
    };
    let mut world = build(1, no_replenish(), actor_config, Box::new(policy));
    let parent = ActorId::new(0);

    let summary = world.step();

    assert_eq!(summary.births, 1);
    assert_eq!(world.population(), 2);
    assert_eq!(*decided.lock().unwrap(), vec![parent]);

    let parent_state = world.get_actor(parent).unwrap();
    assert_eq!(parent_state.children(), 1);
    assert_eq!(parent_state.strength(), 5);

    let child = ActorId::new(1);
    let child_state = world.get_actor(child).unwrap();
    assert_eq!(child_state.parent(), Some(parent));
    assert_eq!(child_state.born_at_step(), 0);
    assert_eq!(child_state.lifespan(), 0);

    decided.lock().unwrap().clear();
    world.step();
    assert_eq!(*decided.lock().unwrap(), vec![parent, child]);
}

#[test]
fn weak_actor_cannot_reproduce() {
    let mut world = scripted(1, ScriptedPolicy::always(ActionKind::Reproduce));
    world.step();

    assert_eq!(world.population(), 1);
    assert_eq!(world.next_id(), 1);
    assert_eq!(world.get_actor(ActorId::new(0)).unwrap().children(), 0);
}

#[test]
fn staged_changes_are_invisible_mid_step() {
    let mut world = scripted(2, ScriptedPolicy::always(ActionKind::Run));
    let added = world.add_actor(None);
    world.remove_actor(ActorId::new(0));

    assert!(world.get_actor(added).is_none());
    assert!(world.get_actor(ActorId::new(0)).is_some());
    assert_eq!(world.pending_additions().len(), 1);

    world.step();

    assert!(world.get_actor(added).is_some());
    assert!(world.get_actor(ActorId::new(0)).is_none());
    assert_eq!(world.population(), 2);
}

#[test]
fn double_remove_equals_single() {
    let mut world = scripted(3, ScriptedPolicy::always(ActionKind::Run));
    let id = ActorId::new(1);
    world.remove_actor(id);
    world.remove_actor(id);
    assert_eq!(world.pending_removals().len(), 1);

    world.step();
    assert_eq!(world.population(), 2);
    assert!(world.get_actor(id).is_none());
}

#[test]
fn attack_on_running_target_changes_nothing() {
    let (attacker, target) = (ActorId::new(0), ActorId::new(1));
    let policy =
        ScriptedPolicy::always(ActionKind::Run).with_override(attacker, ActionKind::Attack);
    let mut world = scripted(2, policy);
    world.get_actor_mut(attacker).unwrap().look_at(Some(target));
    world.get_actor_mut(target).unwrap().start_running();

    world.step();

    // only upkeep was paid on both sides
    assert_eq!(world.get_actor(attacker).unwrap().strength(), 4);
    assert_eq!(world.get_actor(target).unwrap().strength(), 4);
}

#[test]
fn attack_drains_target() {
    let (attacker, target) = (ActorId::new(0), ActorId::new(1));
    let policy =
        ScriptedPolicy::always(ActionKind::Run).with_override(attacker, ActionKind::Attack);
    let mut world = scripted(2, policy);
    world.get_actor_mut(attacker).unwrap().look_at(Some(target));

    world.step();

    // attacker: 5 - 1 upkeep = 4, strikes for min(4, 6) = 4, regains 2
    assert_eq!(world.get_actor(attacker).unwrap().strength(), 6);
    // target: 5 - 4 = 1 before its own turn, so it dies on that turn
    assert!(world.get_actor(target).is_none());
    assert_eq!(world.population(), 1);
}

#[test]
fn attack_without_target_is_a_no_op() {
    let mut world = scripted(2, ScriptedPolicy::always(ActionKind::Attack));
    world.step();
    for actor in world.actors() {
        assert_eq!(actor.strength(), 4);
        assert_eq!(actor.last_move(), Some(ActionKind::Attack));
    }
}

#[test]
fn look_right_wraps_onto_self() {
    let looker = ActorId::new(0);
    let policy =
        ScriptedPolicy::always(ActionKind::Run).with_override(looker, ActionKind::LookRight);
    let mut world = scripted(3, policy);
    world.get_actor_mut(looker).unwrap().look_at(Some(ActorId::new(2)));

    world.step();
    assert_eq!(world.get_actor(looker).unwrap().looking_at(), Some(looker));

    world.step();
    assert_eq!(world.get_actor(looker).unwrap().looking_at(), Some(ActorId::new(1)));
}

#[test]
fn look_left_steps_back() {
    let looker = ActorId::new(1);
    let policy =
        ScriptedPolicy::always(ActionKind::Run).with_override(looker, ActionKind::LookLeft);
    let mut world = scripted(3, policy);
    world.get_actor_mut(looker).unwrap().look_at(Some(ActorId::new(0)));

    world.step();
    assert_eq!(world.get_actor(looker).unwrap().looking_at(), Some(ActorId::new(2)));
}

#[test]
fn forfeited_turn_still_ages_and_pays_upkeep() {
    let mut world = build(1, no_replenish(), ActorConfig::default(), Box::new(StubPolicy));
    world.step();

    let actor = world.get_actor(ActorId::new(0)).unwrap();
    assert_eq!(actor.strength(), 4);
    assert_eq!(actor.lifespan(), 1);
    assert_eq!(actor.last_move(), None);
    assert_eq!(world.food(), 10);
}

#[test]
fn failing_policy_forfeits() {
    let mut world = build(2, no_replenish(), ActorConfig::default(), Box::new(FailingPolicy));
    world.step();
    world.step();

    for actor in world.actors() {
        assert_eq!(actor.strength(), 3);
        assert_eq!(actor.lifespan(), 2);
    }
}

#[test]
fn rewards_follow_each_turn() {
    let rewards = Arc::new(Mutex::new(Vec::new()));
    let policy = RecordingPolicy {
        action: ActionKind::Eat,
        decided: Arc::new(Mutex::new(Vec::new())),
        rewards: Arc::clone(&rewards),
    };
    let mut world = build(1, no_replenish(), ActorConfig::default(), Box::new(policy));
    world.step();

    let rewards = rewards.lock().unwrap();
    assert_eq!(rewards.len(), 1);
    let (id, reward) = rewards.first().copied().unwrap();
    assert_eq!(id, ActorId::new(0));
    assert_eq!(reward.strength_delta, 1);
    assert_eq!(reward.children_delta, 0);
    assert_eq!(reward.low_strength_penalty, 0);
}

#[test]
fn low_strength_is_penalised() {
    let rewards = Arc::new(Mutex::new(Vec::new()));
    let policy = RecordingPolicy {
        action: ActionKind::Run,
        decided: Arc::new(Mutex::new(Vec::new())),
        rewards: Arc::clone(&rewards),
    };
    let actor_config = ActorConfig {
        starting_strength: 3,
        ..ActorConfig::default()
    };
    let mut world = build(1, no_replenish(), actor_config, Box::new(policy));
    world.step();

    let (_, reward) = rewards.lock().unwrap().first().copied().unwrap();
    assert_eq!(reward.strength_delta, -1);
    assert_eq!(reward.low_strength_penalty, -1);
    assert_eq!(reward.total(), -2);
}

#[test]
fn food_and_strength_invariants_hold() {
    let actor_config = ActorConfig::default();
    let mut world = build(
        12,
        WorldConfig::default(),
        actor_config.clone(),
        Box::new(RandomPolicy::seeded(7)),
    );

    for _ in 0..60 {
        if world.is_extinct() {
            break;
        }
        let summary = world.step();
        let expected = summary
            .food_start
            .checked_add(summary.replenished)
            .and_then(|f| f.checked_sub(summary.eaten));
        assert_eq!(expected, Some(summary.food_end));
        for actor in world.actors() {
            assert!(actor.strength() <= actor_config.max_strength);
        }
    }
}

#[test]
fn longest_lived_ties_keep_the_first() {
    let mut world = scripted(3, ScriptedPolicy::always(ActionKind::Eat));
    world.step();
    world.step();

    let record = world.longest_lived().unwrap();
    assert_eq!(record.id, ActorId::new(0));
    assert_eq!(record.lifespan, 2);

    let json: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
    assert_eq!(json["lifespan"], 2);
}

#[test]
fn broken_sink_does_not_abort_the_step() {
    let collaborators = Collaborators::new(
        Box::new(ScriptedPolicy::always(ActionKind::Eat)),
        Box::new(BrokenSink),
        Box::new(SequentialNames::default()),
    );
    let mut world =
        World::new(2, no_replenish(), ActorConfig::default(), collaborators).unwrap();

    let summary = world.step();
    assert_eq!(summary.eaten, 2);
    assert_eq!(world.step_count(), 1);
}

#[test]
fn world_from_yaml_config() {
    let config = SimulationConfig::parse(
        "world:\n  initial_actors: 4\n  starting_food: 3\n  food_per_step: 0\n\
         policy:\n  kind: scripted\n  scripted_action: eat\n",
    )
    .unwrap();
    let collaborators = Collaborators::new(
        Box::new(ScriptedPolicy::always(config.policy.scripted_action)),
        Box::new(NullSink),
        Box::new(SequentialNames::default()),
    );
    let mut world = World::from_config(&config, collaborators).unwrap();
    assert_eq!(world.population(), 4);

    let summary = world.step();
    // three meals for four hungry actors
    assert_eq!(summary.eaten, 3);
    assert_eq!(world.food(), 0);
}
