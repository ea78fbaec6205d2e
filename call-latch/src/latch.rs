//! Counting wait latch
//!
//! The core synchronization primitive: a monotonic call counter with
//! blocking "wait until count >= baseline + n" semantics and a bounded
//! timeout. Classic monitor pattern - a mutex-guarded counter plus a
//! condition variable notified on every advance.

use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::error::TimeoutError;

/// Thread-safe counting latch for callback synchronization.
///
/// One thread (typically a test) blocks until another thread (typically a
/// notification dispatcher) has called [`advance`](CallLatch::advance) a
/// target number of times. Waits are always relative to a baseline count
/// snapshotted by the caller before triggering the action under test, so
/// the counter is never reset - cumulative counts are intentional.
///
/// # Example
///
/// ```rust
/// use call_latch::CallLatch;
/// use std::sync::Arc;
/// use std::thread;
/// use std::time::Duration;
///
/// let latch = Arc::new(CallLatch::new());
/// let baseline = latch.call_count();
///
/// let notifier = Arc::clone(&latch);
/// thread::spawn(move || notifier.advance());
///
/// latch
///     .wait_for_call(baseline, Duration::from_secs(5))
///     .expect("notification arrived");
/// ```
///
/// # Thread Safety
///
/// `advance` may be called concurrently from any number of threads; each
/// call increments the counter exactly once. Any number of waiters with
/// independent baselines and targets may block at the same time; every
/// `advance` wakes them all and each re-checks its own predicate.
#[derive(Debug, Default)]
pub struct CallLatch {
    count: Mutex<u64>,
    advanced: Condvar,
}

impl CallLatch {
    /// Create a new latch with a call count of zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current call count without blocking.
    pub fn call_count(&self) -> u64 {
        *lock_count(&self.count)
    }

    /// Record one call: increment the counter and wake all waiters.
    ///
    /// With no waiters blocked this is a no-op beyond the counter bump.
    /// Never fails.
    pub fn advance(&self) {
        let mut count = lock_count(&self.count);
        *count += 1;
        self.advanced.notify_all();
    }

    /// Block until one call past `baseline` has been observed.
    ///
    /// Shorthand for [`wait_for_calls`](CallLatch::wait_for_calls) with a
    /// target of one call.
    pub fn wait_for_call(&self, baseline: u64, timeout: Duration) -> Result<(), TimeoutError> {
        self.wait_for_calls(baseline, 1, timeout)
    }

    /// Block until `calls` calls past `baseline` have been observed.
    ///
    /// Returns as soon as `call_count() >= baseline + calls`. A target of
    /// zero calls returns immediately. The predicate is re-checked on
    /// every wakeup against the remaining time to a precomputed deadline,
    /// so spurious wakeups neither return early nor extend the wait.
    ///
    /// # Errors
    ///
    /// Returns [`TimeoutError`] when `timeout` elapses first, reporting
    /// how many of the requested calls were observed.
    pub fn wait_for_calls(
        &self,
        baseline: u64,
        calls: u64,
        timeout: Duration,
    ) -> Result<(), TimeoutError> {
        if calls == 0 {
            return Ok(());
        }

        let target = baseline.saturating_add(calls);
        let deadline = Instant::now() + timeout;

        let mut count = lock_count(&self.count);
        while *count < target {
            let now = Instant::now();
            if now >= deadline {
                return Err(TimeoutError {
                    requested: calls,
                    observed: count.saturating_sub(baseline),
                    timeout,
                });
            }
            let (guard, _) = self
                .advanced
                .wait_timeout(count, deadline - now)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            count = guard;
        }

        Ok(())
    }
}

// An increment cannot tear, so a poisoned lock still holds a consistent
// count; recover the guard instead of propagating the panic.
fn lock_count(count: &Mutex<u64>) -> MutexGuard<'_, u64> {
    count.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_starts_at_zero() {
        let latch = CallLatch::new();
        assert_eq!(latch.call_count(), 0);
    }

    #[test]
    fn test_advance_increments() {
        let latch = CallLatch::new();
        latch.advance();
        latch.advance();
        latch.advance();
        assert_eq!(latch.call_count(), 3);
    }

    #[test]
    fn test_wait_returns_immediately_when_satisfied() {
        // For any N, N advances then wait(0, N) must not block.
        for n in 0..5 {
            let latch = CallLatch::new();
            for _ in 0..n {
                latch.advance();
            }
            let start = Instant::now();
            latch
                .wait_for_calls(0, n, Duration::from_secs(5))
                .expect("already satisfied");
            assert!(start.elapsed() < Duration::from_secs(1));
        }
    }

    #[test]
    fn test_wait_for_zero_calls_returns_immediately() {
        let latch = CallLatch::new();
        latch
            .wait_for_calls(0, 0, Duration::from_millis(1))
            .expect("zero-call wait never blocks");
    }

    #[test]
    fn test_wait_times_out_with_observed_count() {
        let latch = CallLatch::new();
        latch.advance();

        let start = Instant::now();
        let error = latch
            .wait_for_calls(0, 3, Duration::from_millis(50))
            .expect_err("target never reached");

        assert!(start.elapsed() >= Duration::from_millis(45));
        assert_eq!(error.requested, 3);
        assert_eq!(error.observed, 1);
        assert_eq!(error.timeout, Duration::from_millis(50));
    }

    #[test]
    fn test_wait_never_succeeds_below_target() {
        let latch = Arc::new(CallLatch::new());
        let baseline = latch.call_count();

        let notifier = Arc::clone(&latch);
        let handle = thread::spawn(move || {
            for _ in 0..2 {
                thread::sleep(Duration::from_millis(10));
                notifier.advance();
            }
        });

        latch
            .wait_for_calls(baseline, 2, Duration::from_secs(5))
            .expect("both advances observed");
        assert!(latch.call_count() >= baseline + 2);

        handle.join().unwrap();
    }

    #[test]
    fn test_concurrent_advances_are_never_lost() {
        let latch = Arc::new(CallLatch::new());
        let threads: u64 = 8;
        let per_thread: u64 = 100;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let latch = Arc::clone(&latch);
                thread::spawn(move || {
                    for _ in 0..per_thread {
                        latch.advance();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(latch.call_count(), threads * per_thread);
    }

    #[test]
    fn test_independent_waiters_resolve_independently() {
        // Two waiters with different targets: every advance wakes both
        // (a spurious wake for the unsatisfied one), and each re-checks
        // its own predicate.
        let latch = Arc::new(CallLatch::new());

        let one = Arc::clone(&latch);
        let waiter_one = thread::spawn(move || one.wait_for_calls(0, 1, Duration::from_secs(5)));
        let two = Arc::clone(&latch);
        let waiter_two = thread::spawn(move || two.wait_for_calls(0, 2, Duration::from_secs(5)));

        thread::sleep(Duration::from_millis(20));
        latch.advance();
        waiter_one
            .join()
            .unwrap()
            .expect("first waiter satisfied by one advance");

        thread::sleep(Duration::from_millis(20));
        latch.advance();
        waiter_two
            .join()
            .unwrap()
            .expect("second waiter satisfied by two advances");
    }

    #[test]
    fn test_burst_advances_satisfy_overlapping_waits() {
        let latch = Arc::new(CallLatch::new());

        let waiters: Vec<_> = (1..=4)
            .map(|calls| {
                let latch = Arc::clone(&latch);
                thread::spawn(move || latch.wait_for_calls(0, calls, Duration::from_secs(5)))
            })
            .collect();

        thread::sleep(Duration::from_millis(20));
        // Tight burst, no pauses between increments.
        for _ in 0..4 {
            latch.advance();
        }

        for waiter in waiters {
            waiter.join().unwrap().expect("burst reached every target");
        }
    }

    #[test]
    fn test_baseline_offsets_past_counts() {
        let latch = CallLatch::new();
        latch.advance();
        latch.advance();

        // A fresh baseline ignores the two earlier calls.
        let baseline = latch.call_count();
        let error = latch
            .wait_for_call(baseline, Duration::from_millis(20))
            .expect_err("no calls past the baseline");
        assert_eq!(error.observed, 0);

        latch.advance();
        latch
            .wait_for_call(baseline, Duration::from_secs(5))
            .expect("one call past the baseline");
    }
}
