//! Simulation loop runner with run controls.
//!
//! This module provides [`run_simulation`], the top-level async function
//! that drives the step loop with support for:
//!
//! - **Bounded simulation**: stop once `max_steps` steps have run
//! - **Extinction**: stop as soon as no actor is alive
//! - **Pause/resume** and **clean stop** through a shared [`RunControl`]
//! - **Step pacing**: optional real-time sleep between steps
//!
//! The runner wraps the synchronous [`World::step`] and adds the control
//! plane around it. Controls are only honoured between steps.

use std::sync::Arc;

use forage_types::ActorSnapshot;
use tracing::{info, warn};

use crate::config::SimulationBoundsConfig;
use crate::operator::{RunControl, SimulationEndReason};
use crate::world::{StepSummary, World, WorldError};

/// Errors that can occur when starting a simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The run was asked for something meaningless.
    #[error("invalid run arguments: {reason}")]
    InvalidArguments {
        /// What was wrong.
        reason: String,
    },

    /// The world could not be built.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}

/// Per-run options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// The run ends once the world's step count reaches this value.
    pub max_steps: u64,
    /// Sleep between steps in milliseconds (0 = none).
    pub step_interval_ms: u64,
}

impl RunOptions {
    /// Run `max_steps` steps without pacing.
    pub const fn steps(max_steps: u64) -> Self {
        Self {
            max_steps,
            step_interval_ms: 0,
        }
    }
}

impl From<&SimulationBoundsConfig> for RunOptions {
    fn from(bounds: &SimulationBoundsConfig) -> Self {
        Self {
            max_steps: bounds.max_steps,
            step_interval_ms: bounds.step_interval_ms,
        }
    }
}

/// Result of the simulation run.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// Number of steps executed by this run.
    pub total_steps: u64,
    /// Total actors ever created in the world.
    pub total_born: u64,
    /// The longest-lived actor seen, if any actor ever finished a turn.
    pub longest_lived: Option<ActorSnapshot>,
    /// Live actors when the run ended.
    pub final_population: usize,
    /// The last step summary, if any step ran.
    pub final_summary: Option<StepSummary>,
}

/// Run the simulation loop until a termination condition is met.
///
/// Before every step, in order: wait while paused, end on extinction, end
/// when the step budget is used up, end on a stop request.
///
/// # Errors
///
/// Returns [`RunnerError::InvalidArguments`] if `options.max_steps` is 0.
pub async fn run_simulation(
    world: &mut World,
    options: &RunOptions,
    control: &Arc<RunControl>,
) -> Result<SimulationResult, RunnerError> {
    if options.max_steps == 0 {
        return Err(RunnerError::InvalidArguments {
            reason: String::from("max_steps must be at least 1"),
        });
    }

    let mut final_summary: Option<StepSummary> = None;
    let mut total_steps: u64 = 0;

    info!(
        max_steps = options.max_steps,
        step_interval_ms = options.step_interval_ms,
        population = world.population(),
        "Simulation starting"
    );

    let end_reason = loop {
        if control.is_paused() {
            info!("Simulation paused, waiting for resume...");
            control.wait_if_paused().await;
            info!("Simulation resumed");
        }

        if world.is_extinct() {
            info!(step = world.step_count(), "All actors dead -- extinction");
            break SimulationEndReason::Extinction;
        }

        if world.step_count() >= options.max_steps {
            info!(
                step = world.step_count(),
                max_steps = options.max_steps,
                "Step budget reached"
            );
            break SimulationEndReason::MaxStepsReached;
        }

        if control.is_stop_requested() {
            info!(step = world.step_count(), "Stop requested");
            break SimulationEndReason::StopRequested;
        }

        final_summary = Some(world.step());
        total_steps = total_steps.saturating_add(1);

        if options.step_interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(options.step_interval_ms)).await;
        }
    };

    Ok(SimulationResult {
        end_reason,
        total_steps,
        total_born: world.next_id(),
        longest_lived: world.longest_lived().cloned(),
        final_population: world.population(),
        final_summary,
    })
}

/// Build a default world and run it to completion.
///
/// Uses the default tunables, a random policy, and a tracing sink, then
/// logs the outcome through [`log_simulation_end`].
///
/// # Errors
///
/// Returns [`RunnerError::InvalidArguments`] if either argument is 0.
pub async fn run_simulation_with_defaults(
    initial_actor_count: u32,
    max_steps: u64,
) -> Result<SimulationResult, RunnerError> {
    if initial_actor_count == 0 {
        return Err(RunnerError::InvalidArguments {
            reason: String::from("initial_actor_count must be at least 1"),
        });
    }
    if max_steps == 0 {
        return Err(RunnerError::InvalidArguments {
            reason: String::from("max_steps must be at least 1"),
        });
    }

    let mut world = World::with_defaults(initial_actor_count)?;
    let control = Arc::new(RunControl::new());
    let result = run_simulation(&mut world, &RunOptions::steps(max_steps), &control).await?;
    log_simulation_end(&result);
    Ok(result)
}

/// Log the simulation end sequence: the end reason, totals, and the
/// longest-lived actor as JSON.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = %result.end_reason,
        total_steps = result.total_steps,
        total_born = result.total_born,
        final_population = result.final_population,
        "Simulation ended"
    );

    if let Some(summary) = result.final_summary {
        info!(
            step = summary.step,
            population = summary.population,
            food = summary.food_end,
            "Final step summary"
        );
    } else {
        warn!("Simulation ended with no steps executed");
    }

    match result.longest_lived.as_ref().map(ActorSnapshot::to_json) {
        Some(Ok(json)) => info!(longest_lived = %json, "Longest-lived actor"),
        Some(Err(err)) => warn!(%err, "Could not render longest-lived actor"),
        None => info!("No actor completed a turn"),
    }
}
