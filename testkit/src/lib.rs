//! # webview-testkit
//!
//! A synchronization harness for deterministically testing the
//! asynchronous page-lifecycle notifications of an embeddable
//! web-rendering engine.
//!
//! The engine loads content off the caller's thread and later delivers
//! lifecycle callbacks ("page finished", "error received") from its own
//! internal threads. This crate lets a test block until a callback has
//! fired a target number of times - with a bounded timeout - instead of
//! busy-waiting or sleeping for fixed durations.
//!
//! The harness spawns no threads of its own; it only synchronizes across
//! the test thread and the delivery threads owned by the engine. It never
//! interprets page content: it observes notifications, counts them, and
//! exposes their latest payload.
//!
//! # Overview
//!
//! - [`RenderingEngine`]: the boundary trait an engine implements;
//!   submission-only operations that return before the load completes.
//! - [`PageEventSink`]: the notification interface the engine calls on
//!   its delivery thread(s).
//! - [`PageEventClient`]: records each notification kind into its own
//!   [`EventRecorder`](call_latch::EventRecorder) - page-finished,
//!   error-received, and script-result.
//! - [`navigation`]: plain-function orchestrators composing
//!   "snapshot baseline → trigger → wait".
//! - [`HarnessConfig`]: the default timeouts every wait is bounded by.

pub mod assertions;
pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod navigation;

pub use client::PageEventClient;
pub use config::HarnessConfig;
pub use engine::{EngineError, LoadErrorInfo, PageEventSink, RenderingEngine};
pub use error::HarnessError;
pub use navigation::NavigationHandle;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::PageEventClient;
    pub use crate::config::HarnessConfig;
    pub use crate::engine::{EngineError, LoadErrorInfo, PageEventSink, RenderingEngine};
    pub use crate::error::HarnessError;
    pub use crate::navigation::{
        self, data_url, execute_script_and_wait, load_data_sync, load_url_sync, NavigationHandle,
    };
    pub use call_latch::{CallLatch, EventRecorder, TimeoutError};
}
