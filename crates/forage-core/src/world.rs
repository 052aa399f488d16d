//! The world: actor registry, shared food, and the step cycle.
//!
//! Each call to [`World::step`] runs these phases:
//!
//! 1. **Replenish** -- add `food_per_step` to the shared food supply.
//! 2. **Turns** -- every actor present at the start of the step takes one
//!    turn, in id order: death check, upkeep, decision, action effect,
//!    reward feedback, aging.
//! 3. **Commit** -- staged additions are inserted, then staged removals are
//!    evicted. An id staged in both never becomes visible.
//!
//! Turns never change the registry's structure directly. Births and deaths
//! are staged, so an actor created during step N first acts in step N+1 and
//! an actor that died during step N is gone by step N+1.
//!
//! Relations between actors (`looking_at`, `parent`) are ids resolved
//! through [`World::get_actor`] on every use.

use std::collections::{BTreeMap, BTreeSet};

use forage_actors::actions::gaze::{self, GazeDirection};
use forage_actors::actions::{combat, handlers};
use forage_actors::vitals::{self, TurnBaseline, TurnStart};
use forage_actors::{
    Actor, ActorConfig, ActorError, DeathRecord, NameGenerator, PoolNameGenerator,
};
use forage_types::{ActionKind, ActionOutcome, ActorId, ActorSnapshot};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::config::{SimulationConfig, WorldConfig};
use crate::decision::{self, DecisionPolicy};
use crate::observer::{EventSink, SimEvent, TracingSink};
use crate::perception;

/// Errors that can occur when building a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The actor tunables are inconsistent.
    #[error("invalid world configuration: {source}")]
    InvalidConfig {
        /// The underlying validation error.
        #[from]
        source: ActorError,
    },
}

/// The pluggable collaborators a world talks to.
pub struct Collaborators {
    /// Chooses each actor's action.
    pub policy: Box<dyn DecisionPolicy>,
    /// Receives births, deaths, actions, and step summaries.
    pub sink: Box<dyn EventSink>,
    /// Names new actors.
    pub names: Box<dyn NameGenerator>,
}

impl Collaborators {
    /// Bundle the three collaborators.
    pub const fn new(
        policy: Box<dyn DecisionPolicy>,
        sink: Box<dyn EventSink>,
        names: Box<dyn NameGenerator>,
    ) -> Self {
        Self {
            policy,
            sink,
            names,
        }
    }

    /// The configured policy, a tracing sink, and pool names, all seeded
    /// from `world.seed`.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            decision::build_policy(&config.policy, &config.actor, config.world.seed),
            Box::new(TracingSink),
            Box::new(PoolNameGenerator::seeded(config.world.seed)),
        )
    }
}

impl core::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// What happened during one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSummary {
    /// Index of the step that ran (0-based).
    pub step: u64,
    /// Food before replenishment.
    pub food_start: u32,
    /// Food actually added by replenishment.
    pub replenished: u32,
    /// Food units consumed by Eat actions.
    pub eaten: u32,
    /// Food at the end of the step.
    pub food_end: u32,
    /// Live actors after the commit.
    pub population: usize,
    /// Actors created during the step.
    pub births: usize,
    /// Actors that died during the step.
    pub deaths: usize,
    /// Turns that changed nothing beyond upkeep (forfeits and no-op actions).
    pub idle_turns: usize,
}

/// Per-step counters collected while turns run.
#[derive(Debug, Default)]
struct StepTally {
    eaten: u32,
    deaths: usize,
    idle_turns: usize,
}

/// The simulated world.
pub struct World {
    food: u32,
    actors: BTreeMap<ActorId, Actor>,
    pending_additions: Vec<Actor>,
    pending_removals: BTreeSet<ActorId>,
    step_count: u64,
    next_id: u64,
    longest_lived: Option<ActorSnapshot>,
    config: WorldConfig,
    actor_config: ActorConfig,
    rng: StdRng,
    names: Box<dyn NameGenerator>,
    policy: Box<dyn DecisionPolicy>,
    sink: Box<dyn EventSink>,
}

impl World {
    /// Create a world with `actor_count` parentless actors.
    ///
    /// The seeded actors are committed immediately, so they all act in
    /// step 0.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidConfig`] if `actor_config` fails
    /// validation.
    pub fn new(
        actor_count: u32,
        config: WorldConfig,
        actor_config: ActorConfig,
        collaborators: Collaborators,
    ) -> Result<Self, WorldError> {
        actor_config.validate()?;

        let Collaborators {
            policy,
            sink,
            names,
        } = collaborators;

        let mut world = Self {
            food: config.starting_food,
            actors: BTreeMap::new(),
            pending_additions: Vec::new(),
            pending_removals: BTreeSet::new(),
            step_count: 0,
            next_id: 0,
            longest_lived: None,
            rng: StdRng::seed_from_u64(config.seed),
            config,
            actor_config,
            names,
            policy,
            sink,
        };

        for _ in 0..actor_count {
            world.add_actor(None);
        }
        world.commit_staged();

        info!(
            population = world.population(),
            food = world.food,
            seed = world.config.seed,
            "World created"
        );
        Ok(world)
    }

    /// Create a world from a full configuration, seeding
    /// `world.initial_actors` actors.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidConfig`] if the actor tunables fail
    /// validation.
    pub fn from_config(
        config: &SimulationConfig,
        collaborators: Collaborators,
    ) -> Result<Self, WorldError> {
        Self::new(
            config.world.initial_actors,
            config.world.clone(),
            config.actor.clone(),
            collaborators,
        )
    }

    /// Create a world with default tunables, a random policy, and a tracing
    /// sink.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidConfig`] only if the built-in defaults
    /// were inconsistent.
    pub fn with_defaults(actor_count: u32) -> Result<Self, WorldError> {
        let config = SimulationConfig::default();
        let collaborators = Collaborators::from_config(&config);
        Self::new(actor_count, config.world, config.actor, collaborators)
    }

    // -----------------------------------------------------------------------
    // Step cycle
    // -----------------------------------------------------------------------

    /// Run one step and commit its staged changes.
    pub fn step(&mut self) -> StepSummary {
        let step = self.step_count;
        let food_start = self.food;
        self.food = self.food.saturating_add(self.config.food_per_step);
        let replenished = self.food.saturating_sub(food_start);

        debug!(step, food = self.food, population = self.population(), "Step started");

        let mut tally = StepTally::default();
        let ids: Vec<ActorId> = self.actors.keys().copied().collect();
        for id in ids {
            self.take_turn(id, &mut tally);
        }

        let births = self
            .pending_additions
            .iter()
            .filter(|actor| !self.pending_removals.contains(&actor.id()))
            .count();
        self.commit_staged();
        self.step_count = self.step_count.saturating_add(1);

        let summary = StepSummary {
            step,
            food_start,
            replenished,
            eaten: tally.eaten,
            food_end: self.food,
            population: self.population(),
            births,
            deaths: tally.deaths,
            idle_turns: tally.idle_turns,
        };

        info!(
            step,
            population = summary.population,
            food = summary.food_end,
            births,
            deaths = summary.deaths,
            "Step completed"
        );
        self.notify(&SimEvent::StepCompleted(summary));
        summary
    }

    /// One actor's turn.
    fn take_turn(&mut self, id: ActorId, tally: &mut StepTally) {
        if self.pending_removals.contains(&id) {
            return;
        }
        let step = self.step_count;

        let Some(actor) = self.actors.get_mut(&id) else {
            return;
        };
        let baseline = TurnBaseline::capture(actor);
        if vitals::open_turn(actor, &self.actor_config) == TurnStart::Dies {
            let record = DeathRecord::new(actor, step);
            info!(
                step,
                actor = %id,
                lifespan = record.snapshot.lifespan,
                children = record.snapshot.children,
                "Actor died"
            );
            self.remove_actor(id);
            tally.deaths = tally.deaths.saturating_add(1);
            self.notify(&SimEvent::Died(record));
            return;
        }

        let Some(observation) = perception::assemble_observation(self, id) else {
            return;
        };
        let decided = self
            .policy
            .decide(&observation)
            .and_then(decision::action_for_index);
        let action = match decided {
            Ok(kind) => Some(kind),
            Err(err) => {
                warn!(step, actor = %id, %err, "Decision failed, turn forfeited");
                None
            }
        };

        let outcome = match action {
            Some(kind) => self.apply_action(id, kind, tally),
            None => ActionOutcome::Forfeited,
        };
        if !outcome.is_effective() {
            tally.idle_turns = tally.idle_turns.saturating_add(1);
        }

        let Some(actor) = self.actors.get_mut(&id) else {
            return;
        };
        let reward = vitals::reward_for_turn(baseline, actor, &self.actor_config);
        self.policy.reward(id, &reward);
        actor.finish_turn(action);

        let lifespan = actor.lifespan();
        if self
            .longest_lived
            .as_ref()
            .is_none_or(|record| lifespan > record.lifespan)
        {
            self.longest_lived = Some(actor.snapshot());
        }

        let event = SimEvent::Acted {
            step,
            id,
            name: actor.name().to_owned(),
            action,
            outcome,
            strength: actor.strength(),
        };
        self.notify(&event);
    }

    /// Apply one action's effect for `id`.
    fn apply_action(
        &mut self,
        id: ActorId,
        kind: ActionKind,
        tally: &mut StepTally,
    ) -> ActionOutcome {
        match kind {
            ActionKind::Eat => {
                let Some(actor) = self.actors.get_mut(&id) else {
                    return ActionOutcome::Forfeited;
                };
                let outcome = handlers::execute_eat(actor, &mut self.food, &self.actor_config);
                if let ActionOutcome::Ate { .. } = outcome {
                    tally.eaten = tally.eaten.saturating_add(1);
                }
                outcome
            }
            ActionKind::Reproduce => {
                let Some(actor) = self.actors.get_mut(&id) else {
                    return ActionOutcome::Forfeited;
                };
                if !handlers::begin_reproduction(actor, &self.actor_config) {
                    return ActionOutcome::TooWeak;
                }
                let child = self.add_actor(Some(id));
                ActionOutcome::Reproduced { child }
            }
            ActionKind::Attack => self.attack(id),
            ActionKind::Run => match self.actors.get_mut(&id) {
                Some(actor) => handlers::execute_run(actor),
                None => ActionOutcome::Forfeited,
            },
            ActionKind::LookLeft | ActionKind::LookRight => GazeDirection::from_action(kind)
                .map_or(ActionOutcome::Forfeited, |direction| self.look(id, direction)),
        }
    }

    fn attack(&mut self, id: ActorId) -> ActionOutcome {
        let target_id = self
            .actors
            .get(&id)
            .and_then(Actor::looking_at)
            .filter(|target| *target != id && !self.pending_removals.contains(target));
        let Some(target_id) = target_id else {
            return ActionOutcome::NoTarget;
        };
        let Some((attacker, target)) = pair_mut(&mut self.actors, id, target_id) else {
            return ActionOutcome::NoTarget;
        };
        combat::resolve_attack(attacker, target, &self.actor_config)
    }

    fn look(&mut self, id: ActorId, direction: GazeDirection) -> ActionOutcome {
        let ids = self.live_ids();
        let current = self.actors.get(&id).and_then(Actor::looking_at);
        let target = gaze::choose_target(&ids, current, direction, &mut self.rng);
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.look_at(target);
        }
        ActionOutcome::Looked { target }
    }

    /// Ids of actors that are present and not staged for removal, in order.
    fn live_ids(&self) -> Vec<ActorId> {
        self.actors
            .keys()
            .filter(|id| !self.pending_removals.contains(id))
            .copied()
            .collect()
    }

    /// Insert staged additions, then evict staged removals.
    fn commit_staged(&mut self) {
        for actor in self.pending_additions.drain(..) {
            self.actors.insert(actor.id(), actor);
        }
        for id in core::mem::take(&mut self.pending_removals) {
            self.actors.remove(&id);
        }
    }

    fn notify(&mut self, event: &SimEvent) {
        if let Err(err) = self.sink.emit(event) {
            warn!(%err, "Event sink failed, event dropped");
        }
    }

    // -----------------------------------------------------------------------
    // Structural changes
    // -----------------------------------------------------------------------

    /// Create a new actor and stage it for insertion at the end of the
    /// current step. Returns its id.
    pub fn add_actor(&mut self, parent: Option<ActorId>) -> ActorId {
        let id = ActorId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);

        let mut name = self.names.generate();
        if name.is_empty() {
            name = format!("Actor {}", id.into_inner());
        }

        let step = self.step_count;
        let actor = Actor::new(id, name.clone(), parent, step, &self.actor_config);
        self.pending_additions.push(actor);

        debug!(step, actor = %id, parent = ?parent, %name, "Actor staged for birth");
        self.notify(&SimEvent::Born {
            step,
            id,
            name,
            parent,
        });
        id
    }

    /// Stage `id` for removal at the end of the current step.
    ///
    /// Idempotent. Unknown ids are accepted and ignored at commit.
    pub fn remove_actor(&mut self, id: ActorId) {
        self.pending_removals.insert(id);
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Look up a live actor. `None` for absent or removed ids.
    pub fn get_actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// Mutable access to a live actor, for harnesses that set up scenarios.
    ///
    /// Strength stays clamped; only the actor's own mutators are reachable.
    pub fn get_actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Current food supply.
    pub const fn food(&self) -> u32 {
        self.food
    }

    /// Number of completed steps.
    pub const fn step_count(&self) -> u64 {
        self.step_count
    }

    /// The next id to be allocated; equals the number of actors ever created.
    pub const fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Number of live actors.
    pub fn population(&self) -> usize {
        self.actors.len()
    }

    /// Whether no actor is alive.
    pub fn is_extinct(&self) -> bool {
        self.actors.is_empty()
    }

    /// Live actors in id order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    /// Live actor ids in order.
    pub fn actor_ids(&self) -> Vec<ActorId> {
        self.actors.keys().copied().collect()
    }

    /// Snapshot of the actor with the greatest lifespan seen so far.
    pub const fn longest_lived(&self) -> Option<&ActorSnapshot> {
        self.longest_lived.as_ref()
    }

    /// Actors created this step and not yet committed.
    pub fn pending_additions(&self) -> &[Actor] {
        &self.pending_additions
    }

    /// Ids staged for removal this step.
    pub const fn pending_removals(&self) -> &BTreeSet<ActorId> {
        &self.pending_removals
    }

    /// The actor tunables.
    pub const fn actor_config(&self) -> &ActorConfig {
        &self.actor_config
    }

    /// The world tunables.
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }
}

impl core::fmt::Debug for World {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("World")
            .field("step_count", &self.step_count)
            .field("food", &self.food)
            .field("population", &self.actors.len())
            .field("next_id", &self.next_id)
            .field("pending_additions", &self.pending_additions.len())
            .field("pending_removals", &self.pending_removals)
            .finish_non_exhaustive()
    }
}

/// Borrow two distinct actors mutably at once.
fn pair_mut(
    actors: &mut BTreeMap<ActorId, Actor>,
    first: ActorId,
    second: ActorId,
) -> Option<(&mut Actor, &mut Actor)> {
    if first == second {
        return None;
    }
    let mut a = None;
    let mut b = None;
    for (id, actor) in actors.iter_mut() {
        if *id == first {
            a = Some(actor);
        } else if *id == second {
            b = Some(actor);
        }
    }
    Some((a?, b?))
}
