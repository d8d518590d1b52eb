use serde::{Deserialize, Serialize};

/// Dispatcher settings
///
/// Deserializable so a host server can embed it in its own configuration
/// file; missing keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Default for `catch_unhandled` when dispatching through `handle_request`.
    ///
    /// Off by default: handler failures that are not `RpcError`s surface as
    /// `DispatchError` so bugs are seen during development.
    pub catch_unhandled: bool,

    /// Emit request and response payloads at `trace` level.
    pub log_payloads: bool,
}

impl DispatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catch_unhandled(mut self, catch_unhandled: bool) -> Self {
        self.catch_unhandled = catch_unhandled;
        self
    }

    pub fn with_log_payloads(mut self, log_payloads: bool) -> Self {
        self.log_payloads = log_payloads;
        self
    }
}
