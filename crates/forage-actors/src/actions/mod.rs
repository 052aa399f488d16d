//! Action effects.
//!
//! Each handler applies one action to the acting [`Actor`] and reports an
//! [`ActionOutcome`]. Unmet preconditions are no-op outcomes, never errors.
//! Handlers never touch the world's registry: reproduction only reports that
//! a child should be spawned and the world stages it.
//!
//! # Submodules
//!
//! - [`handlers`] -- Eat, Reproduce, and Run.
//! - [`combat`] -- Attack resolution between two actors.
//! - [`gaze`] -- `LookLeft` / `LookRight` rotation through the id list.
//!
//! [`Actor`]: crate::actor::Actor
//! [`ActionOutcome`]: forage_types::ActionOutcome

pub mod combat;
pub mod gaze;
pub mod handlers;
