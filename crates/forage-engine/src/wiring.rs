//! Collaborator selection from configuration.
//!
//! Picks the decision policy, the event sink, and the name generator the
//! engine hands to the world.

use std::path::PathBuf;

use forage_actors::PoolNameGenerator;
use forage_core::Collaborators;
use forage_core::config::{LoggingConfig, SimulationConfig};
use forage_core::decision;
use forage_core::observer::{EventSink, FileSink, SinkError, TracingSink};
use tracing::info;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "forage-config.yaml";

/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_PATH_ENV: &str = "FORAGE_CONFIG";

/// Build the collaborators described by `config`.
pub fn build_collaborators(config: &SimulationConfig) -> Result<Collaborators, SinkError> {
    let policy = decision::build_policy(&config.policy, &config.actor, config.world.seed);
    let sink = event_sink(&config.logging)?;
    let names = Box::new(PoolNameGenerator::seeded(config.world.seed));
    info!(policy = ?config.policy.kind, "Collaborators selected");
    Ok(Collaborators::new(policy, sink, names))
}

/// A file sink when `event_log` is set, otherwise a tracing sink.
pub fn event_sink(logging: &LoggingConfig) -> Result<Box<dyn EventSink>, SinkError> {
    match logging.event_log.as_deref() {
        Some(path) => {
            let sink = FileSink::create(path)?;
            info!(path = %sink.path().display(), "Writing events to file");
            Ok(Box::new(sink))
        }
        None => Ok(Box::new(TracingSink)),
    }
}

/// The config file path: `FORAGE_CONFIG` if set, else the default.
///
/// The second value says whether the path was given explicitly; a missing
/// explicit file is an error, a missing default file is not.
pub fn config_path() -> (PathBuf, bool) {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.is_empty() => (PathBuf::from(path), true),
        _ => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    }
}
