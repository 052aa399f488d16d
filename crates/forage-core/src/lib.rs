//! World registry, step cycle, and orchestration for the Forage simulation.
//!
//! This crate owns the [`World`]: the actor registry, the shared food
//! supply, the staging buffers for births and deaths, and the step cycle
//! that drives every actor's turn. Around it sit the pluggable decision
//! policies, the event sinks, YAML configuration, and the async runner.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `forage-config.yaml` into
//!   strongly-typed structs.
//! - [`decision`] -- [`DecisionPolicy`] trait and the built-in policies.
//! - [`observer`] -- [`SimEvent`] and the [`EventSink`] implementations.
//! - [`operator`] -- [`RunControl`] pause/resume/stop flags and
//!   [`SimulationEndReason`].
//! - [`perception`] -- Per-actor observation assembly from world state.
//! - [`runner`] -- The async step loop ([`run_simulation`]).
//! - [`world`] -- The [`World`] and its step cycle.
//!
//! [`DecisionPolicy`]: decision::DecisionPolicy
//! [`SimEvent`]: observer::SimEvent
//! [`EventSink`]: observer::EventSink
//! [`RunControl`]: operator::RunControl
//! [`SimulationEndReason`]: operator::SimulationEndReason
//! [`run_simulation`]: runner::run_simulation

pub mod config;
pub mod decision;
pub mod observer;
pub mod operator;
pub mod perception;
pub mod runner;
pub mod world;

pub use world::{Collaborators, StepSummary, World, WorldError};
