//! Observability events and sinks.
//!
//! The world reports births, deaths, actions, and step summaries to an
//! [`EventSink`] as best-effort notifications. A failing sink is logged and
//! ignored; it never aborts a step.

use std::fs::{File, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use forage_actors::DeathRecord;
use forage_types::{ActionKind, ActionOutcome, ActorId};
use tracing::{debug, info};

use crate::world::StepSummary;

/// Errors a sink may report.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Writing to the underlying file failed.
    #[error("event log I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The sink cannot accept events right now.
    #[error("event sink unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },
}

/// Something that happened in the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    /// An actor was created (visible from the next step boundary).
    Born {
        /// Step during which the actor was created.
        step: u64,
        /// The new actor.
        id: ActorId,
        /// Its display name.
        name: String,
        /// The parent, for actors born from reproduction.
        parent: Option<ActorId>,
    },
    /// An actor died and was staged for removal.
    Died(DeathRecord),
    /// An actor finished its turn.
    Acted {
        /// Step of the turn.
        step: u64,
        /// The acting actor.
        id: ActorId,
        /// Its display name.
        name: String,
        /// The chosen action, `None` when the turn was forfeited.
        action: Option<ActionKind>,
        /// What happened.
        outcome: ActionOutcome,
        /// Strength at the end of the turn.
        strength: u32,
    },
    /// A step finished and its staged changes were committed.
    StepCompleted(StepSummary),
}

impl core::fmt::Display for SimEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Born {
                step,
                id,
                name,
                parent: Some(parent),
            } => write!(f, "step {step}: {name} ({id}) was born to {parent}"),
            Self::Born {
                step,
                id,
                name,
                parent: None,
            } => write!(f, "step {step}: {name} ({id}) appeared"),
            Self::Died(record) => write!(
                f,
                "step {}: {} ({}) died after {} steps with {} children",
                record.died_at_step,
                record.snapshot.name,
                record.snapshot.id,
                record.snapshot.lifespan,
                record.snapshot.children
            ),
            Self::Acted {
                step,
                id,
                name,
                outcome,
                strength,
                ..
            } => write!(f, "step {step}: {name} ({id}) {outcome} [strength {strength}]"),
            Self::StepCompleted(summary) => write!(
                f,
                "step {} complete: population {}, food {}, {} born, {} died, {} eaten, {} idle",
                summary.step,
                summary.population,
                summary.food_end,
                summary.births,
                summary.deaths,
                summary.eaten,
                summary.idle_turns
            ),
        }
    }
}

/// Receiver for line-oriented simulation events.
pub trait EventSink: Send {
    /// Record one event.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the event could not be recorded. The world
    /// logs the failure and carries on.
    fn emit(&mut self, event: &SimEvent) -> Result<(), SinkError>;
}

/// Forwards events to `tracing`.
///
/// Births, deaths, and step summaries go out at `info`; individual actions
/// at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: &SimEvent) -> Result<(), SinkError> {
        match event {
            SimEvent::Acted { .. } => debug!(target: "forage::events", "{event}"),
            _ => info!(target: "forage::events", "{event}"),
        }
        Ok(())
    }
}

/// Appends timestamped event lines to a file.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: File,
}

impl FileSink {
    /// Open (or create) the log file in append mode, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Io`] if the directory or file cannot be created.
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Where events are written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSink for FileSink {
    fn emit(&mut self, event: &SimEvent) -> Result<(), SinkError> {
        writeln!(self.file, "{} {event}", Utc::now().to_rfc3339())?;
        Ok(())
    }
}

/// Keeps event lines in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every line recorded so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
    }
}

impl EventSink for MemorySink {
    fn emit(&mut self, event: &SimEvent) -> Result<(), SinkError> {
        let mut lines = self.lines.lock().map_err(|e| SinkError::Unavailable {
            message: format!("memory sink poisoned: {e}"),
        })?;
        lines.push(event.to_string());
        Ok(())
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &SimEvent) -> Result<(), SinkError> {
        Ok(())
    }
}
