//! Error types for the test web server.

/// Errors raised while starting or stopping the server.
///
/// All of these are collaborator-setup failures: fatal to the scenario
/// that requested the server, never retried internally.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The background tokio runtime could not be created
    #[error("failed to create server runtime: {0}")]
    Runtime(String),

    /// The listener could not bind a loopback port
    #[error("failed to bind test server: {0}")]
    Bind(String),

    /// The server thread exited before reporting its bound address
    #[error("server failed to start: {0}")]
    Startup(String),

    /// The server thread did not shut down cleanly
    #[error("server shutdown failed: {0}")]
    Shutdown(String),
}
