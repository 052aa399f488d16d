//! Engine binary for the Forage simulation.
//!
//! This is the main entry point that wires together configuration, the
//! decision policy, the event sink, and the step loop, then runs the
//! simulation until a termination condition is met.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `FORAGE_CONFIG` or `forage-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Select the policy, event sink, and name generator
//! 4. Build the world and seed the initial actors
//! 5. Wire Ctrl-C to a clean stop
//! 6. Run the simulation loop
//! 7. Log the result

mod error;
mod wiring;

use std::sync::Arc;

use forage_core::World;
use forage_core::config::SimulationConfig;
use forage_core::operator::RunControl;
use forage_core::runner::{self, RunOptions};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration, the event log, or the world cannot
/// be set up.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        seed = config.world.seed,
        initial_actors = config.world.initial_actors,
        max_steps = config.simulation.max_steps,
        policy = ?config.policy.kind,
        "forage-engine starting"
    );

    // 3. Select collaborators.
    let collaborators = wiring::build_collaborators(&config)?;

    // 4. Build the world.
    let mut world = World::from_config(&config, collaborators)?;

    // 5. Stop cleanly on Ctrl-C.
    let control = Arc::new(RunControl::new());
    let signal_control = Arc::clone(&control);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, stopping after the current step");
                signal_control.request_stop();
            }
            Err(e) => warn!(error = %e, "failed to listen for Ctrl-C"),
        }
    });

    // 6. Run the simulation.
    let options = RunOptions::from(&config.simulation);
    let result = runner::run_simulation(&mut world, &options, &control).await?;

    // 7. Log results.
    runner::log_simulation_end(&result);

    info!(
        end_reason = %result.end_reason,
        total_steps = result.total_steps,
        elapsed_seconds = control.elapsed_seconds(),
        "forage-engine shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration.
///
/// Falls back to defaults when the default file is absent. A path given
/// through `FORAGE_CONFIG` must exist.
fn load_config() -> Result<SimulationConfig, EngineError> {
    let (path, explicit) = wiring::config_path();
    if explicit || path.exists() {
        Ok(SimulationConfig::from_file(&path)?)
    } else {
        Ok(SimulationConfig::parse("")?)
    }
}
