//! Cardinality assertions for scenarios.

use call_latch::EventRecorder;

use crate::error::HarnessError;

/// Check that a recorder has observed exactly `expected` events.
///
/// Surfaces a disagreement as
/// [`HarnessError::UnexpectedNotification`] - a test failure, never
/// retried by the harness.
pub fn expect_call_count<P: Clone>(
    name: &str,
    recorder: &EventRecorder<P>,
    expected: u64,
) -> Result<(), HarnessError> {
    let observed = recorder.call_count();
    if observed == expected {
        Ok(())
    } else {
        Err(HarnessError::UnexpectedNotification(format!(
            "{name}: expected exactly {expected} call(s), observed {observed}"
        )))
    }
}
