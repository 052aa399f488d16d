//! Configuration loading and typed config structures for the Forage simulation.
//!
//! The canonical configuration lives in `forage-config.yaml`. This module
//! defines strongly-typed structs that mirror the YAML structure, and
//! provides a loader that reads and validates the file. Every field has a
//! default, so an empty file is a valid configuration.

use std::path::{Path, PathBuf};

use forage_actors::ActorConfig;
use forage_types::ActionKind;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `forage-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (seed, food, initial population).
    #[serde(default)]
    pub world: WorldConfig,

    /// Actor vitality and action tunables.
    #[serde(default)]
    pub actor: ActorConfig,

    /// Run boundaries.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Which decision policy drives the actors.
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `FORAGE_EVENT_LOG` overrides `logging.event_log` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml maps an empty document to unit, not to an empty mapping
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.logging.apply_env_overrides();
        Ok(config)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Random seed for reproducibility (look targets, names, random policy).
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Food available before the first step.
    #[serde(default = "default_starting_food")]
    pub starting_food: u32,

    /// Food added at the start of every step.
    #[serde(default = "default_food_per_step")]
    pub food_per_step: u32,

    /// Number of actors seeded at world creation.
    #[serde(default = "default_initial_actors")]
    pub initial_actors: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            starting_food: default_starting_food(),
            food_per_step: default_food_per_step(),
            initial_actors: default_initial_actors(),
        }
    }
}

/// Simulation boundary configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Step budget for one run.
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,

    /// Real-time pause between steps in milliseconds (0 = run flat out).
    #[serde(default)]
    pub step_interval_ms: u64,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            step_interval_ms: 0,
        }
    }
}

/// Decision policy selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Uniformly random actions.
    #[default]
    Random,
    /// The built-in survival heuristic.
    Rule,
    /// The same action every turn.
    Scripted,
    /// Always forfeits.
    Stub,
}

/// Decision policy configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PolicyConfig {
    /// Which policy to build.
    #[serde(default)]
    pub kind: PolicyKind,

    /// Action used when `kind` is `scripted`.
    #[serde(default = "default_scripted_action")]
    pub scripted_action: ActionKind,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            kind: PolicyKind::default(),
            scripted_action: default_scripted_action(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Path of the line-oriented event log. Events go to `tracing` when unset.
    #[serde(default)]
    pub event_log: Option<PathBuf>,
}

impl LoggingConfig {
    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("FORAGE_EVENT_LOG")
            && !path.is_empty()
        {
            self.event_log = Some(PathBuf::from(path));
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            event_log: None,
        }
    }
}

const fn default_seed() -> u64 {
    42
}

const fn default_starting_food() -> u32 {
    10
}

const fn default_food_per_step() -> u32 {
    10
}

const fn default_initial_actors() -> u32 {
    10
}

const fn default_max_steps() -> u64 {
    1000
}

const fn default_scripted_action() -> ActionKind {
    ActionKind::Eat
}

fn default_log_level() -> String {
    "info".to_owned()
}
