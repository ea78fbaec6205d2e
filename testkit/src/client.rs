//! Per-event-kind recording client.

use call_latch::EventRecorder;

use crate::engine::{LoadErrorInfo, PageEventSink};

/// Records every engine notification into a recorder for its kind.
///
/// One client is created per test fixture and handed to the engine as its
/// [`PageEventSink`]. Each event kind gets an independent
/// [`EventRecorder`] instance of the same generic type - composition, not
/// a recorder hierarchy. Recorders are never reset mid-test, so scenarios
/// can assert exact cumulative counts.
///
/// # Example
///
/// ```rust
/// use webview_testkit::{PageEventClient, PageEventSink};
/// use std::time::Duration;
///
/// let client = PageEventClient::new();
/// let baseline = client.page_finished().call_count();
///
/// // Engine delivery thread:
/// client.on_page_finished("data:text/html,<html></html>".to_string());
///
/// client
///     .page_finished()
///     .wait_for_call(baseline, Duration::from_secs(5))
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct PageEventClient {
    page_finished: EventRecorder<String>,
    received_error: EventRecorder<LoadErrorInfo>,
    script_result: EventRecorder<String>,
}

impl PageEventClient {
    /// Create a client with all recorders at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder for page-finished notifications; payload is the URL.
    pub fn page_finished(&self) -> &EventRecorder<String> {
        &self.page_finished
    }

    /// Recorder for error-received notifications.
    pub fn received_error(&self) -> &EventRecorder<LoadErrorInfo> {
        &self.received_error
    }

    /// Recorder for script execution acknowledgements.
    ///
    /// Keyed to script execution, not page lifecycle: running a script
    /// never advances the page-finished recorder.
    pub fn script_result(&self) -> &EventRecorder<String> {
        &self.script_result
    }
}

impl PageEventSink for PageEventClient {
    fn on_page_finished(&self, url: String) {
        tracing::trace!(%url, "page finished");
        self.page_finished.record(url);
    }

    fn on_received_error(&self, error: LoadErrorInfo) {
        tracing::trace!(%error, "load error received");
        self.received_error.record(error);
    }

    fn on_script_result(&self, result: String) {
        tracing::trace!(%result, "script result received");
        self.script_result.record(result);
    }
}
