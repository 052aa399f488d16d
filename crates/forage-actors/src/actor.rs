//! A single actor: identity, vitality, and social relations.
//!
//! Strength is private. It only changes through [`Actor::pay_upkeep`],
//! [`Actor::gain_strength`], [`Actor::spend_strength`] and
//! [`Actor::take_damage`], all of which keep it inside
//! `[0, max_strength]`.
//!
//! `looking_at` and `parent` are weak relations: they hold an [`ActorId`]
//! and are resolved through the world on every use, so a removed actor
//! simply resolves to "absent".

use forage_types::{ActionKind, ActorId, ActorSnapshot};

use crate::config::ActorConfig;

/// One simulated individual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    id: ActorId,
    name: String,
    strength: u32,
    lifespan: u32,
    children: u32,
    running: bool,
    looking_at: Option<ActorId>,
    parent: Option<ActorId>,
    last_move: Option<ActionKind>,
    born_at_step: u64,
}

impl Actor {
    /// Create an actor with the configured starting strength.
    ///
    /// The starting strength is clamped to `max_strength` so that an
    /// unvalidated config still produces an in-range actor.
    pub fn new(
        id: ActorId,
        name: String,
        parent: Option<ActorId>,
        born_at_step: u64,
        config: &ActorConfig,
    ) -> Self {
        Self {
            id,
            name,
            strength: config.starting_strength.min(config.max_strength),
            lifespan: 0,
            children: 0,
            running: false,
            looking_at: None,
            parent,
            last_move: None,
            born_at_step,
        }
    }

    /// The actor's identifier.
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current strength.
    pub const fn strength(&self) -> u32 {
        self.strength
    }

    /// Completed turns survived.
    pub const fn lifespan(&self) -> u32 {
        self.lifespan
    }

    /// Successful reproductions.
    pub const fn children(&self) -> u32 {
        self.children
    }

    /// Whether the actor ran on its last turn and is immune to attacks.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// The actor currently looked at, if any. May be stale.
    pub const fn looking_at(&self) -> Option<ActorId> {
        self.looking_at
    }

    /// The parent, if born from reproduction. May be stale.
    pub const fn parent(&self) -> Option<ActorId> {
        self.parent
    }

    /// The last valid action chosen.
    pub const fn last_move(&self) -> Option<ActionKind> {
        self.last_move
    }

    /// Step during which the actor was created.
    pub const fn born_at_step(&self) -> u64 {
        self.born_at_step
    }

    /// Whether the actor dies at the start of its next turn.
    pub const fn is_dying(&self, config: &ActorConfig) -> bool {
        self.strength <= config.death_threshold
    }

    /// Pay the per-turn upkeep and drop the running flag.
    pub const fn pay_upkeep(&mut self, config: &ActorConfig) {
        self.strength = self.strength.saturating_sub(config.upkeep);
        self.running = false;
    }

    /// Add strength, clamped to the cap. Returns the amount actually gained.
    pub fn gain_strength(&mut self, amount: u32, config: &ActorConfig) -> u32 {
        let before = self.strength;
        self.strength = self.strength.saturating_add(amount).min(config.max_strength);
        self.strength.saturating_sub(before)
    }

    /// Pay strength for one of the actor's own actions (floor at zero).
    pub const fn spend_strength(&mut self, amount: u32) {
        self.strength = self.strength.saturating_sub(amount);
    }

    /// Remove up to `amount` strength. Returns `min(strength, amount)`.
    ///
    /// This is the only way another actor's strength is reduced.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let taken = self.strength.min(amount);
        self.strength = self.strength.saturating_sub(taken);
        taken
    }

    /// Count one successful reproduction.
    pub const fn record_child(&mut self) {
        self.children = self.children.saturating_add(1);
    }

    /// Become immune to attacks until the next turn's upkeep.
    pub const fn start_running(&mut self) {
        self.running = true;
    }

    /// Point the gaze at another actor, or at nobody.
    pub const fn look_at(&mut self, target: Option<ActorId>) {
        self.looking_at = target;
    }

    /// Age by one turn and remember the chosen action.
    ///
    /// A forfeited turn (`None`) still ages the actor but keeps the previous
    /// `last_move`.
    pub const fn finish_turn(&mut self, action: Option<ActionKind>) {
        self.lifespan = self.lifespan.saturating_add(1);
        if let Some(kind) = action {
            self.last_move = Some(kind);
        }
    }

    /// Copy the actor's stats into a standalone snapshot.
    pub fn snapshot(&self) -> ActorSnapshot {
        ActorSnapshot {
            id: self.id,
            name: self.name.clone(),
            strength: self.strength,
            lifespan: self.lifespan,
            children: self.children,
            parent: self.parent,
            last_move: self.last_move,
            born_at_step: self.born_at_step,
        }
    }
}
