//! Navigation orchestration.
//!
//! Plain functions composing "snapshot baseline → trigger → wait". The
//! concurrency-correctness-bearing primitive stays in `call_latch`; these
//! helpers add no state of their own.

use std::time::Duration;

use crate::client::PageEventClient;
use crate::engine::RenderingEngine;
use crate::error::HarnessError;

/// Opaque reference to a load issued through the orchestrator.
///
/// Carries the navigation target and the page-finished baseline
/// snapshotted before the load was submitted; the engine tracks all
/// actual navigation state.
#[derive(Debug, Clone)]
pub struct NavigationHandle {
    target: String,
    baseline: u64,
}

impl NavigationHandle {
    /// The URL (or `data:` URL) this navigation was asked to load.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Page-finished count recorded just before the load was submitted.
    pub fn baseline(&self) -> u64 {
        self.baseline
    }

    /// Block until this navigation's page-finished notification arrives.
    pub fn wait_for_finished(
        &self,
        client: &PageEventClient,
        timeout: Duration,
    ) -> Result<(), HarnessError> {
        client
            .page_finished()
            .wait_for_call(self.baseline, timeout)?;
        tracing::debug!(url = %self.target, "navigation finished");
        Ok(())
    }
}

/// Build the `data:` URL the engine reports for an inline-HTML load.
pub fn data_url(html: &str, mime_type: &str) -> String {
    format!("data:{mime_type},{html}")
}

/// Submit an asynchronous URL load and return its handle.
///
/// Returns immediately; the page-finished notification arrives later on
/// the engine's delivery thread.
pub fn start_load_url(
    engine: &dyn RenderingEngine,
    client: &PageEventClient,
    url: &str,
) -> Result<NavigationHandle, HarnessError> {
    let baseline = client.page_finished().call_count();
    tracing::debug!(url, baseline, "submitting url load");
    engine.load_url_async(url)?;
    Ok(NavigationHandle {
        target: url.to_string(),
        baseline,
    })
}

/// Submit an asynchronous inline-HTML load and return its handle.
pub fn start_load_data(
    engine: &dyn RenderingEngine,
    client: &PageEventClient,
    html: &str,
    mime_type: &str,
) -> Result<NavigationHandle, HarnessError> {
    let baseline = client.page_finished().call_count();
    tracing::debug!(mime_type, baseline, "submitting data load");
    engine.load_data_async(html, mime_type, false)?;
    Ok(NavigationHandle {
        target: data_url(html, mime_type),
        baseline,
    })
}

/// Load `url` and block until its page-finished notification arrives.
///
/// Composition of [`start_load_url`] and
/// [`NavigationHandle::wait_for_finished`]; fails with whatever the wait
/// fails with.
pub fn load_url_sync(
    engine: &dyn RenderingEngine,
    client: &PageEventClient,
    url: &str,
    timeout: Duration,
) -> Result<(), HarnessError> {
    start_load_url(engine, client, url)?.wait_for_finished(client, timeout)
}

/// Load inline HTML and block until its page-finished notification
/// arrives.
pub fn load_data_sync(
    engine: &dyn RenderingEngine,
    client: &PageEventClient,
    html: &str,
    mime_type: &str,
    timeout: Duration,
) -> Result<(), HarnessError> {
    start_load_data(engine, client, html, mime_type)?.wait_for_finished(client, timeout)
}

/// Run `script` on the engine's thread and block for its acknowledgement.
///
/// Waits on the script-result recorder, never on page lifecycle, and
/// returns the acknowledged result payload.
pub fn execute_script_and_wait(
    engine: &dyn RenderingEngine,
    client: &PageEventClient,
    script: &str,
    timeout: Duration,
) -> Result<String, HarnessError> {
    let baseline = client.script_result().call_count();
    tracing::debug!(baseline, "submitting script");
    engine.execute_script(script)?;
    client.script_result().wait_for_call(baseline, timeout)?;
    client.script_result().last_payload().ok_or_else(|| {
        HarnessError::UnexpectedNotification(
            "script acknowledgement arrived without a result payload".to_string(),
        )
    })
}
