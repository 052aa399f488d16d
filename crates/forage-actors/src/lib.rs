//! Actor state, vitality, and action effects for the Forage simulation.
//!
//! This crate contains the logic layer for actors -- everything that
//! operates on actor state without touching the world's registry or any
//! I/O. The world engine in `forage-core` drives it.
//!
//! # Modules
//!
//! - [`actions`] -- Action effects: eat, reproduce, run, attack, look.
//! - [`actor`] -- The [`Actor`] struct with clamped strength.
//! - [`config`] -- Tunables for vitality and actions ([`ActorConfig`]).
//! - [`death`] -- Death records ([`DeathRecord`]).
//! - [`error`] -- Error types ([`ActorError`]).
//! - [`naming`] -- Display name generation ([`NameGenerator`]).
//! - [`vitals`] -- Turn opening (death check, upkeep) and reward shaping.

pub mod actions;
pub mod actor;
pub mod config;
pub mod death;
pub mod error;
pub mod naming;
pub mod vitals;

// Re-export primary types at crate root for convenience.
pub use actions::gaze::GazeDirection;
pub use actor::Actor;
pub use config::ActorConfig;
pub use death::DeathRecord;
pub use error::ActorError;
pub use naming::{NameGenerator, PoolNameGenerator, SequentialNames};
pub use vitals::{TurnBaseline, TurnStart};
