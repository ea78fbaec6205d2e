//! The rendering-engine boundary.
//!
//! The engine is an external collaborator: the harness submits loads and
//! scripts through [`RenderingEngine`] and receives lifecycle
//! notifications through [`PageEventSink`] on threads the engine owns.
//! The harness does not model navigation state machines - that belongs
//! to the engine.

/// Errors from engine submission calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// `execute_script` was called before `enable_scripting`
    #[error("scripting is not enabled")]
    ScriptingDisabled,

    /// The engine refused the submission
    #[error("engine rejected request: {0}")]
    Rejected(String),
}

/// Payload of an error-received notification.
///
/// Mirrors the engine's network-or-protocol-level failure report: an
/// error code, a human-readable description, and the URL that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadErrorInfo {
    /// Engine-defined error code
    pub code: i32,
    /// Human-readable description
    pub description: String,
    /// The URL whose load failed
    pub failing_url: String,
}

impl LoadErrorInfo {
    /// Create a new error payload.
    pub fn new(code: i32, description: impl Into<String>, failing_url: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            failing_url: failing_url.into(),
        }
    }
}

impl std::fmt::Display for LoadErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error {} loading {}: {}", self.code, self.failing_url, self.description)
    }
}

/// Submission interface of the external rendering engine.
///
/// Every operation returns as soon as the request has been handed to the
/// engine; completion is observable only through the notifications the
/// engine later delivers to its [`PageEventSink`].
pub trait RenderingEngine {
    /// Begin navigating to `url`. Returns without waiting for completion.
    fn load_url_async(&self, url: &str) -> Result<(), EngineError>;

    /// Begin loading inline `html` as a `data:` navigation.
    ///
    /// `base64_encoded` indicates whether `html` is already base64
    /// encoded; the harness passes it through untouched.
    fn load_data_async(
        &self,
        html: &str,
        mime_type: &str,
        base64_encoded: bool,
    ) -> Result<(), EngineError>;

    /// Allow subsequent `execute_script` calls.
    fn enable_scripting(&self) -> Result<(), EngineError>;

    /// Submit `script` for execution on the engine's thread.
    ///
    /// The acknowledgement arrives as a script-result notification,
    /// distinct from page lifecycle.
    fn execute_script(&self, script: &str) -> Result<(), EngineError>;
}

/// Notification interface the engine drives.
///
/// Implementations must be callable from any thread the engine chooses
/// to deliver on.
pub trait PageEventSink: Send + Sync {
    /// A top-level navigation finished loading.
    ///
    /// Expected exactly once per top-level navigation, regardless of how
    /// many subresource loads occurred within it, and exactly once even
    /// when an error was reported first. A same-document navigation
    /// (e.g. a history-API update) must not re-trigger this.
    fn on_page_finished(&self, url: String);

    /// A navigation hit a network-or-protocol-level failure.
    fn on_received_error(&self, error: LoadErrorInfo);

    /// A previously submitted script finished executing.
    fn on_script_result(&self, result: String);
}
