//! Payload-recording latch
//!
//! Pairs a [`CallLatch`] with the most-recently-observed callback payload.
//! One recorder is instantiated per distinct event kind - composition over
//! a class hierarchy.

use std::sync::Mutex;
use std::time::Duration;

use crate::error::TimeoutError;
use crate::latch::CallLatch;

/// Records occurrences of one event kind together with its latest payload.
///
/// On every notification the delivery thread calls
/// [`record`](EventRecorder::record), which stores the payload and then
/// advances the underlying latch. The payload write happens-before the
/// wakeup of any waiter unblocked by that advance, so a reader that
/// returned from a successful wait sees the payload written by the call
/// that satisfied it.
///
/// [`last_payload`](EventRecorder::last_payload) and
/// [`call_count`](EventRecorder::call_count) are only well-defined to
/// consult after a matching wait has returned successfully - a documented
/// pre-condition, not an enforced lock.
///
/// # Example
///
/// ```rust
/// use call_latch::EventRecorder;
/// use std::time::Duration;
///
/// let finished: EventRecorder<String> = EventRecorder::new();
/// let baseline = finished.call_count();
///
/// // Delivery thread:
/// finished.record("http://localhost/test.html".to_string());
///
/// finished
///     .wait_for_call(baseline, Duration::from_secs(5))
///     .unwrap();
/// assert_eq!(
///     finished.last_payload().as_deref(),
///     Some("http://localhost/test.html")
/// );
/// ```
#[derive(Debug)]
pub struct EventRecorder<P> {
    payload: Mutex<Option<P>>,
    latch: CallLatch,
}

// Not derived: an empty recorder needs no `P: Default`.
impl<P> Default for EventRecorder<P> {
    fn default() -> Self {
        Self {
            payload: Mutex::new(None),
            latch: CallLatch::new(),
        }
    }
}

impl<P: Clone> EventRecorder<P> {
    /// Create a recorder with no observed events.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of events recorded so far.
    pub fn call_count(&self) -> u64 {
        self.latch.call_count()
    }

    /// Record one event occurrence.
    ///
    /// Stores `payload` as the latest observation, then advances the
    /// counter and wakes all waiters. The store is completed (and its
    /// lock released) before the counter lock is taken.
    pub fn record(&self, payload: P) {
        {
            let mut slot = self
                .payload
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *slot = Some(payload);
        }
        self.latch.advance();
    }

    /// Block until one event past `baseline` has been recorded.
    pub fn wait_for_call(&self, baseline: u64, timeout: Duration) -> Result<(), TimeoutError> {
        self.latch.wait_for_call(baseline, timeout)
    }

    /// Block until `calls` events past `baseline` have been recorded.
    ///
    /// # Errors
    ///
    /// Returns [`TimeoutError`] when the deadline elapses first.
    pub fn wait_for_calls(
        &self,
        baseline: u64,
        calls: u64,
        timeout: Duration,
    ) -> Result<(), TimeoutError> {
        self.latch.wait_for_calls(baseline, calls, timeout)
    }

    /// Get the most recently recorded payload.
    ///
    /// Returns `None` if no event has been recorded yet.
    pub fn last_payload(&self) -> Option<P> {
        self.payload
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
