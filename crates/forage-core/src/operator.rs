//! Run control state shared between the step loop and its driver.
//!
//! The driver (the engine binary, a test, a signal handler) can pause,
//! resume, or stop a running simulation. Flags are atomics wrapped in
//! [`Arc`](std::sync::Arc) by the caller, and are only checked at step
//! boundaries: a step that has started always completes.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Notify;

/// Reason why the simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationEndReason {
    /// Reached the configured step budget.
    MaxStepsReached,
    /// All actors are dead.
    Extinction,
    /// A stop was requested through [`RunControl`].
    StopRequested,
}

impl core::fmt::Display for SimulationEndReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MaxStepsReached => write!(f, "step budget reached"),
            Self::Extinction => write!(f, "extinction"),
            Self::StopRequested => write!(f, "stop requested"),
        }
    }
}

/// Shared run control flags.
#[derive(Debug)]
pub struct RunControl {
    /// Whether the run is paused.
    paused: AtomicBool,

    /// Wakes the step loop when resumed.
    resume_notify: Notify,

    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Wall-clock time the control was created.
    started_at: DateTime<Utc>,
}

impl RunControl {
    /// Create a control in the running state.
    pub fn new() -> Self {
        Self {
            paused: AtomicBool::new(false),
            resume_notify: Notify::new(),
            stop_requested: AtomicBool::new(false),
            started_at: Utc::now(),
        }
    }

    // -----------------------------------------------------------------------
    // Pause / Resume
    // -----------------------------------------------------------------------

    /// Whether the run is paused.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Pause before the next step.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    /// Resume and wake the step loop.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
        self.resume_notify.notify_one();
    }

    /// Wait until the run is no longer paused.
    ///
    /// Returns immediately if not paused. A stop request also ends the wait.
    pub async fn wait_if_paused(&self) {
        while self.is_paused() && !self.is_stop_requested() {
            self.resume_notify.notified().await;
        }
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Request a clean stop at the next step boundary.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        self.resume_notify.notify_one();
    }

    /// Whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    // -----------------------------------------------------------------------
    // Timing
    // -----------------------------------------------------------------------

    /// Wall-clock time the control was created.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Elapsed whole seconds since creation.
    pub fn elapsed_seconds(&self) -> u64 {
        let elapsed = Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds();
        u64::try_from(elapsed.max(0)).unwrap_or(u64::MAX)
    }
}

impl Default for RunControl {
    fn default() -> Self {
        Self::new()
    }
}
