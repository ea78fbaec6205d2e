//! Error types for the call-latch crate.

use std::time::Duration;

/// A wait's deadline elapsed before the target call count was reached.
///
/// Reports how many of the requested calls were actually observed so a
/// failing scenario can tell "nothing happened" apart from "only some of
/// the expected callbacks arrived".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("timed out after {timeout:?} waiting for {requested} call(s): observed {observed}")]
pub struct TimeoutError {
    /// Number of calls the wait asked for
    pub requested: u64,
    /// Number of those calls observed before the deadline
    pub observed: u64,
    /// The timeout that elapsed
    pub timeout: Duration,
}
