//! HTTP server serving registered responses for navigation scenarios.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{mpsc, Arc, Mutex, RwLock};
use std::thread;

use tokio::sync::oneshot;
use warp::http::{Response, StatusCode};
use warp::Filter;

use crate::error::ServerError;

/// A response registered for one path.
#[derive(Debug, Clone)]
struct StoredResponse {
    status: StatusCode,
    body: String,
    headers: Vec<(String, String)>,
}

/// Shared state behind the warp routes.
#[derive(Debug, Default)]
struct ServerState {
    responses: RwLock<HashMap<String, StoredResponse>>,
    request_counts: Mutex<HashMap<String, usize>>,
}

impl ServerState {
    fn serve(&self, path: &str) -> Response<Vec<u8>> {
        {
            let mut counts = self
                .request_counts
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *counts.entry(path.to_string()).or_insert(0) += 1;
        }

        let stored = self
            .responses
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(path)
            .cloned();

        match stored {
            Some(response) => {
                tracing::debug!(path, status = %response.status, "serving registered response");
                let mut builder = Response::builder().status(response.status);
                for (name, value) in &response.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder
                    .body(response.body.into_bytes())
                    .unwrap_or_else(|error| {
                        tracing::debug!(path, %error, "invalid registered response");
                        internal_error()
                    })
            }
            None => {
                tracing::debug!(path, "no response registered");
                Response::builder()
                    .status(StatusCode::NOT_FOUND)
                    .body(b"Not Found".to_vec())
                    .unwrap_or_else(|_| internal_error())
            }
        }
    }
}

fn internal_error() -> Response<Vec<u8>> {
    let mut response = Response::new(Vec::new());
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

/// Ephemeral web server for deterministic subresource and navigation
/// scenarios.
///
/// Binds 127.0.0.1 on an OS-assigned port and serves whatever bodies the
/// test registered, with per-path request counting. The server owns a
/// single-threaded tokio runtime on a background thread; the API here is
/// fully synchronous.
///
/// Shutdown is guaranteed: dropping the server sends the shutdown signal
/// and joins the background thread, so the listener is released even when
/// a scenario fails mid-way. Call [`shutdown`](TestWebServer::shutdown)
/// instead when the scenario wants to observe shutdown errors.
///
/// # Example
///
/// ```no_run
/// use test_web_server::TestWebServer;
///
/// let server = TestWebServer::start().unwrap();
/// let test_url = server.set_response(
///     "/test.html",
///     "<html><head>Header</head><body>Body</body></html>",
///     &[],
/// );
/// assert!(test_url.ends_with("/test.html"));
/// ```
pub struct TestWebServer {
    port: u16,
    base_url: String,
    state: Arc<ServerState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    server_thread: Option<thread::JoinHandle<()>>,
}

impl TestWebServer {
    /// Start a server on an OS-assigned loopback port.
    ///
    /// Blocks until the listener is bound and the bound address is known,
    /// so registered URLs are valid as soon as this returns.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] if the runtime cannot be created or no
    /// loopback port can be bound.
    pub fn start() -> Result<Self, ServerError> {
        let state = Arc::new(ServerState::default());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<SocketAddr, ServerError>>();

        let route_state = Arc::clone(&state);
        let server_thread = thread::Builder::new()
            .name("test-web-server".to_string())
            .spawn(move || run_server(route_state, shutdown_rx, ready_tx))
            .map_err(|e| ServerError::Runtime(e.to_string()))?;

        let addr = match ready_rx.recv() {
            Ok(Ok(addr)) => addr,
            Ok(Err(error)) => {
                let _ = server_thread.join();
                return Err(error);
            }
            Err(_) => {
                let _ = server_thread.join();
                return Err(ServerError::Startup(
                    "server thread exited before reporting an address".to_string(),
                ));
            }
        };

        tracing::debug!(%addr, "test web server listening");

        Ok(Self {
            port: addr.port(),
            base_url: format!("http://{addr}"),
            state,
            shutdown_tx: Some(shutdown_tx),
            server_thread: Some(server_thread),
        })
    }

    /// Get the base URL, e.g. `http://127.0.0.1:49521`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the port the server is bound to.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Register a 200 response for `path` and return its absolute URL.
    ///
    /// `headers` are served verbatim. Registering the same path again
    /// replaces the previous response; request counts are kept.
    pub fn set_response(&self, path: &str, body: &str, headers: &[(&str, &str)]) -> String {
        self.register(
            path,
            StoredResponse {
                status: StatusCode::OK,
                body: body.to_string(),
                headers: own_headers(headers),
            },
        )
    }

    /// Register a 302 redirect from `path` to `destination`.
    ///
    /// Returns the absolute URL of `path`.
    pub fn set_redirect(&self, path: &str, destination: &str) -> String {
        self.register(
            path,
            StoredResponse {
                status: StatusCode::FOUND,
                body: String::new(),
                headers: vec![("Location".to_string(), destination.to_string())],
            },
        )
    }

    /// Get the absolute URL for `path` without registering a response.
    ///
    /// Fetching such a URL yields 404; useful for addresses that must
    /// exist as strings but never be served (e.g. history-API targets).
    pub fn response_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, normalize(path))
    }

    /// Get the number of requests served for `path` so far.
    pub fn request_count(&self, path: &str) -> usize {
        self.state
            .request_counts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&normalize(path))
            .copied()
            .unwrap_or(0)
    }

    /// Shut the server down and wait for the listener to close.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Shutdown`] if the server thread panicked.
    pub fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.server_thread.take() {
            handle
                .join()
                .map_err(|_| ServerError::Shutdown("server thread panicked".to_string()))?;
        }
        Ok(())
    }

    fn register(&self, path: &str, response: StoredResponse) -> String {
        let path = normalize(path);
        self.state
            .responses
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(path.clone(), response);
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestWebServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.server_thread.take() {
            let _ = handle.join();
        }
    }
}

fn run_server(
    state: Arc<ServerState>,
    shutdown_rx: oneshot::Receiver<()>,
    ready_tx: mpsc::Sender<Result<SocketAddr, ServerError>>,
) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            let _ = ready_tx.send(Err(ServerError::Runtime(e.to_string())));
            return;
        }
    };

    runtime.block_on(async move {
        let routes = warp::path::full()
            .and(warp::any().map(move || Arc::clone(&state)))
            .map(|path: warp::path::FullPath, state: Arc<ServerState>| state.serve(path.as_str()));

        let bound = warp::serve(routes).try_bind_with_graceful_shutdown(
            ([127, 0, 0, 1], 0),
            async move {
                let _ = shutdown_rx.await;
            },
        );

        match bound {
            Ok((addr, server)) => {
                let _ = ready_tx.send(Ok(addr));
                server.await;
            }
            Err(e) => {
                let _ = ready_tx.send(Err(ServerError::Bind(e.to_string())));
            }
        }
    });
}

fn normalize(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

fn own_headers(headers: &[(&str, &str)]) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}
