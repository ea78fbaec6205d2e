//! Error types for the harness.

use call_latch::TimeoutError;

use crate::engine::EngineError;

/// Errors surfaced to a scenario.
///
/// The harness never retries internally - a timeout is always handed to
/// the caller, and any retry is the scenario's decision.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// A wait's deadline elapsed before the expected count was reached
    #[error("wait timed out: {0}")]
    Timeout(#[from] TimeoutError),

    /// An observed count or payload disagrees with the expected scenario
    /// outcome; an assertion-level failure, not a harness fault
    #[error("unexpected notification state: {0}")]
    UnexpectedNotification(String),

    /// The engine refused a submission
    #[error("engine call failed: {0}")]
    Engine(#[from] EngineError),

    /// Invalid harness configuration
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A collaborator (server or engine) failed to initialize; fatal to
    /// the scenario
    #[error("collaborator setup failed: {0}")]
    Setup(String),
}

/// Convenience type alias for Results using HarnessError.
pub type Result<T> = std::result::Result<T, HarnessError>;
