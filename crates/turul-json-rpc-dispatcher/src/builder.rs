//! Dispatcher Builder
//!
//! This module provides a builder pattern for creating JSON-RPC dispatchers.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::DispatcherConfig;
use crate::dispatch::JsonRpcDispatcher;
use crate::handler::JsonRpcHandler;

/// Builder for JSON-RPC dispatchers
#[derive(Default)]
pub struct JsonRpcDispatcherBuilder {
    /// Methods registered with the dispatcher
    handlers: HashMap<String, Arc<dyn JsonRpcHandler>>,

    /// Dispatch settings
    config: DispatcherConfig,
}

impl JsonRpcDispatcherBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Default `catch_unhandled` used by `handle_request`
    pub fn catch_unhandled(mut self, catch_unhandled: bool) -> Self {
        self.config.catch_unhandled = catch_unhandled;
        self
    }

    /// Trace request and response payloads
    pub fn log_payloads(mut self, log_payloads: bool) -> Self {
        self.config.log_payloads = log_payloads;
        self
    }

    /// Register a method; a later registration under the same name wins
    pub fn method<H>(mut self, name: impl Into<String>, handler: H) -> Self
    where
        H: JsonRpcHandler + 'static,
    {
        self.handlers.insert(name.into(), Arc::new(handler));
        self
    }

    /// Register one shared handler under several names
    pub fn shared_method(
        mut self,
        name: impl Into<String>,
        handler: Arc<dyn JsonRpcHandler>,
    ) -> Self {
        self.handlers.insert(name.into(), handler);
        self
    }

    /// Build the dispatcher
    pub fn build(self) -> JsonRpcDispatcher {
        JsonRpcDispatcher::from_parts(self.handlers, self.config)
    }
}
