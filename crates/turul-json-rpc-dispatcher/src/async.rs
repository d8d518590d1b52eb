//! Async dispatcher
//!
//! Same request contract as [`crate::JsonRpcDispatcher`], for handlers that
//! need to await. Batch items run concurrently; responses keep input order.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{BoxFuture, join_all};
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::DispatcherConfig;
use crate::dispatch::{accept, into_message, log_response};
use crate::error::{DispatchError, RpcError};
use crate::handler::HandlerResult;
use crate::response::{DispatchResponse, JsonRpcMessage};
use crate::validation;

/// Trait for handling JSON-RPC method calls asynchronously
#[async_trait]
pub trait AsyncJsonRpcHandler: Send + Sync {
    async fn handle(&self, params: Option<Value>) -> HandlerResult;
}

/// A simple function-based handler
pub struct FunctionHandler<F>
where
    F: Fn(Option<Value>) -> BoxFuture<'static, HandlerResult> + Send + Sync,
{
    handler_fn: F,
}

impl<F> FunctionHandler<F>
where
    F: Fn(Option<Value>) -> BoxFuture<'static, HandlerResult> + Send + Sync,
{
    pub fn new(handler_fn: F) -> Self {
        Self { handler_fn }
    }
}

#[async_trait]
impl<F> AsyncJsonRpcHandler for FunctionHandler<F>
where
    F: Fn(Option<Value>) -> BoxFuture<'static, HandlerResult> + Send + Sync,
{
    async fn handle(&self, params: Option<Value>) -> HandlerResult {
        (self.handler_fn)(params).await
    }
}

/// JSON-RPC method dispatcher for async handlers
pub struct AsyncJsonRpcDispatcher {
    handlers: HashMap<String, Arc<dyn AsyncJsonRpcHandler>>,
    config: DispatcherConfig,
}

impl AsyncJsonRpcDispatcher {
    pub fn new() -> Self {
        Self::with_config(DispatcherConfig::default())
    }

    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            handlers: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Register a handler for a specific method
    pub fn register_method<H>(&mut self, method: impl Into<String>, handler: H)
    where
        H: AsyncJsonRpcHandler + 'static,
    {
        let method = method.into();
        if self.handlers.insert(method.clone(), Arc::new(handler)).is_some() {
            debug!(method = %method, "Replaced JSON-RPC method handler");
        }
    }

    /// Register a handler for multiple methods
    pub fn register_methods<H>(&mut self, methods: Vec<String>, handler: H)
    where
        H: AsyncJsonRpcHandler + 'static,
    {
        let handler_arc: Arc<dyn AsyncJsonRpcHandler> = Arc::new(handler);
        for method in methods {
            if self.handlers.insert(method.clone(), handler_arc.clone()).is_some() {
                debug!(method = %method, "Replaced JSON-RPC method handler");
            }
        }
    }

    pub fn has_method(&self, method: &str) -> bool {
        self.handlers.contains_key(method)
    }

    /// Get all registered methods, sorted
    pub fn registered_methods(&self) -> Vec<String> {
        let mut methods: Vec<String> = self.handlers.keys().cloned().collect();
        methods.sort();
        methods
    }

    pub fn validate(&self, request: &Value) -> Result<(), RpcError> {
        validation::validate_request(request)
    }

    /// Process one request object
    pub async fn dispatch_one(
        &self,
        request: Value,
        catch_unhandled: bool,
    ) -> Result<JsonRpcMessage, DispatchError> {
        let call = match accept(request) {
            Ok(call) => call,
            Err(message) => return Ok(message),
        };

        let method = call.method_label();
        let Some(handler) = call.method.as_str().and_then(|name| self.handlers.get(name)) else {
            debug!(method = %method, "JSON-RPC method not found");
            return Ok(JsonRpcMessage::error(
                call.id,
                RpcError::method_not_found(&method),
            ));
        };

        let outcome = handler.handle(call.params).await;
        into_message(&method, call.id, outcome, catch_unhandled)
    }

    /// Process a single request or a batch.
    ///
    /// Batch items are awaited together. The first unhandled failure in input
    /// order is returned when `catch_unhandled` is off; every item still runs.
    pub async fn dispatch(
        &self,
        request: impl Into<Value>,
        catch_unhandled: bool,
    ) -> Result<DispatchResponse, DispatchError> {
        let request = request.into();
        if self.config.log_payloads {
            trace!(request = %request, "JSON-RPC request payload");
        }

        let response = match request {
            Value::Array(batch) => {
                debug!(size = batch.len(), "Dispatching JSON-RPC batch concurrently");
                let outcomes = join_all(
                    batch
                        .into_iter()
                        .map(|item| self.dispatch_one(item, catch_unhandled)),
                )
                .await;
                DispatchResponse::Batch(outcomes.into_iter().collect::<Result<Vec<_>, _>>()?)
            }
            single => DispatchResponse::Single(self.dispatch_one(single, catch_unhandled).await?),
        };

        if self.config.log_payloads {
            log_response(&response);
        }
        Ok(response)
    }

    /// `dispatch` with the configured `catch_unhandled` default
    pub async fn handle_request(
        &self,
        request: impl Into<Value>,
    ) -> Result<DispatchResponse, DispatchError> {
        self.dispatch(request, self.config.catch_unhandled).await
    }
}

impl Default for AsyncJsonRpcDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
