//! Error types for the forage-actors crate.
//!
//! Action effects never fail: unmet preconditions are reported as no-op
//! [`ActionOutcome`] variants. Errors are reserved for setup problems.
//!
//! [`ActionOutcome`]: forage_types::ActionOutcome

/// Errors that can occur when configuring actors.
#[derive(Debug, thiserror::Error)]
pub enum ActorError {
    /// The actor configuration is unusable.
    #[error("invalid actor configuration: {reason}")]
    InvalidConfig {
        /// Description of what is wrong with the configuration.
        reason: String,
    },
}
