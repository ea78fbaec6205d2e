//! Configuration for the harness.
//!
//! Every wait in the harness is bounded - unbounded blocking is
//! disallowed by contract - so the configuration is mostly timeouts.

use std::time::Duration;

use crate::error::HarnessError;

/// Timeouts applied by the sync orchestrator helpers.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Deadline for page-lifecycle waits
    /// Default: 15 seconds
    pub wait_timeout: Duration,

    /// Deadline for script execution acknowledgements
    /// Default: 10 seconds
    pub script_timeout: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            wait_timeout: Duration::from_secs(15),
            script_timeout: Duration::from_secs(10),
        }
    }
}

impl HarnessConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with short deadlines for unit-level tests.
    pub fn fast() -> Self {
        Self {
            wait_timeout: Duration::from_secs(2),
            script_timeout: Duration::from_secs(2),
        }
    }

    /// Validate the configuration and return any issues.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.wait_timeout == Duration::ZERO {
            return Err(HarnessError::Configuration(
                "wait timeout must be greater than 0".to_string(),
            ));
        }

        if self.script_timeout == Duration::ZERO {
            return Err(HarnessError::Configuration(
                "script timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Builder pattern methods for fluent configuration

    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    pub fn with_script_timeout(mut self, timeout: Duration) -> Self {
        self.script_timeout = timeout;
        self
    }
}
