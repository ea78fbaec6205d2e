//! Ephemeral HTTP server for deterministic navigation scenarios.
//!
//! This crate provides a throwaway web server that serves fixed bodies at
//! fixed paths, so a test can construct subresource and navigation
//! scenarios against real URLs. It has no knowledge of the rendering
//! engine or of the synchronization harness consuming it.
//!
//! # Overview
//!
//! - [`TestWebServer`]: binds 127.0.0.1 on an OS-assigned port, serves
//!   registered responses, counts requests per path, and shuts down
//!   gracefully - explicitly via [`TestWebServer::shutdown`] or implicitly
//!   when dropped, so a failing scenario still releases the listener.
//! - [`ServerError`]: bind/startup/shutdown failures, fatal to a scenario.
//!
//! The server runs on its own single-threaded tokio runtime in a
//! background thread; the public API is fully synchronous and never
//! requires the caller to hold an async runtime.
//!
//! # Example
//!
//! ```no_run
//! use test_web_server::TestWebServer;
//!
//! let server = TestWebServer::start().expect("server starts");
//! let url = server.set_response("/test.html", "<html><body>Body</body></html>", &[]);
//!
//! // ...point the engine at `url`...
//!
//! assert_eq!(server.request_count("/test.html"), 0);
//! server.shutdown().expect("clean shutdown");
//! ```

pub mod error;
pub mod server;

pub use error::ServerError;
pub use server::TestWebServer;
