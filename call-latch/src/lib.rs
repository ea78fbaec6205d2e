//! Callback Counting Latch Library
//!
//! Thread-safe counting latches for synchronizing a test thread with
//! callbacks delivered on threads it does not own.
//!
//! # Features
//!
//! - **Counting Waits**: Block until a callback has fired a target number
//!   of times, relative to a baseline snapshot
//! - **Bounded Blocking**: Every wait takes a finite timeout and reports
//!   requested-vs-observed counts on expiry
//! - **Payload Recording**: Pair the counter with the most recent callback
//!   payload, visible to any thread a successful wait unblocks
//! - **Multiple Waiters**: Independent waiters with independent baselines
//!   and targets resolve correctly against the same latch
//!
//! # Quick Start
//!
//! ```rust
//! use call_latch::CallLatch;
//! use std::time::Duration;
//!
//! let latch = CallLatch::new();
//!
//! // Snapshot before triggering the action under test.
//! let baseline = latch.call_count();
//!
//! // ...the notification thread later calls latch.advance()...
//! latch.advance();
//!
//! latch
//!     .wait_for_call(baseline, Duration::from_secs(5))
//!     .expect("callback fired");
//! assert_eq!(latch.call_count(), 1);
//! ```
//!
//! # Architecture
//!
//! ```text
//! EventRecorder<P>
//!     │
//!     ├── payload: Mutex<Option<P>>   (latest callback payload)
//!     │
//!     └── CallLatch
//!             ├── count: Mutex<u64>   (monotonic call counter)
//!             └── Condvar             (notified on every advance)
//! ```

pub mod error;
pub mod latch;
pub mod recorder;

pub use error::TimeoutError;
pub use latch::CallLatch;
pub use recorder::EventRecorder;
