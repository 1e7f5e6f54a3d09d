//! Registry configuration.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use std::time::Duration;

/// Options applied to every call dispatched through a [`ToolRegistry`].
///
/// Serializes as `{"call_timeout_ms": 5000, "log_arguments": true}`; both
/// fields are optional.
///
/// [`ToolRegistry`]: crate::registry::ToolRegistry
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryOptions {
    /// Deadline for a single tool call. If None, calls run to completion.
    ///
    /// When the deadline elapses the call's future is dropped, so the tool
    /// stops at its current suspension point and produces no output.
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    #[serde(rename = "call_timeout_ms", skip_serializing_if = "Option::is_none")]
    pub call_timeout: Option<Duration>,

    /// Log argument payloads at debug level.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub log_arguments: bool,
}

impl RegistryOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-call timeout.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    /// Enable or disable argument logging.
    pub fn with_log_arguments(mut self, enabled: bool) -> Self {
        self.log_arguments = enabled;
        self
    }
}
