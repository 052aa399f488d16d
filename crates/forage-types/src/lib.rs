//! Shared type definitions for the Forage simulation.
//!
//! This crate is the single source of truth for the plain data that flows
//! between the actor logic, the world engine, and decision policies. It
//! holds no behaviour beyond small conversions.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe actor identifier
//! - [`enums`] -- The closed action set
//! - [`actions`] -- Outcome of applying one action
//! - [`perception`] -- Observation handed to decision policies each turn
//! - [`structs`] -- Actor snapshots and reward feedback

pub mod actions;
pub mod enums;
pub mod ids;
pub mod perception;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use actions::ActionOutcome;
pub use enums::ActionKind;
pub use ids::ActorId;
pub use perception::{Observation, TargetView};
pub use structs::{ActorSnapshot, Reward};
