//! Synchronous JSON-RPC dispatcher
//!
//! Each request makes one linear pass: validate, look up the method, invoke
//! the handler, build the response. Nothing is kept between calls apart from
//! the method registry.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, trace, warn};

use crate::builder::JsonRpcDispatcherBuilder;
use crate::config::DispatcherConfig;
use crate::error::{DispatchError, HandlerError, RpcError};
use crate::handler::{HandlerResult, JsonRpcHandler};
use crate::request::IncomingCall;
use crate::response::{DispatchResponse, JsonRpcMessage};
use crate::types::RequestId;
use crate::validation;

/// JSON-RPC method dispatcher
pub struct JsonRpcDispatcher {
    handlers: HashMap<String, Arc<dyn JsonRpcHandler>>,
    config: DispatcherConfig,
}

impl JsonRpcDispatcher {
    pub fn new() -> Self {
        Self::with_config(DispatcherConfig::default())
    }

    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            handlers: HashMap::new(),
            config,
        }
    }

    pub fn builder() -> JsonRpcDispatcherBuilder {
        JsonRpcDispatcherBuilder::new()
    }

    pub(crate) fn from_parts(
        handlers: HashMap<String, Arc<dyn JsonRpcHandler>>,
        config: DispatcherConfig,
    ) -> Self {
        Self { handlers, config }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Register a handler for a method, replacing any previous one
    pub fn register_method<H>(&mut self, method: impl Into<String>, handler: H)
    where
        H: JsonRpcHandler + 'static,
    {
        self.register_handler(method, Arc::new(handler));
    }

    /// Register an already shared handler, e.g. one serving several methods
    pub fn register_handler(
        &mut self,
        method: impl Into<String>,
        handler: Arc<dyn JsonRpcHandler>,
    ) {
        let method = method.into();
        if self.handlers.insert(method.clone(), handler).is_some() {
            debug!(method = %method, "Replaced JSON-RPC method handler");
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

    /// Check a decoded request against the protocol's structural rules
    pub fn validate(&self, request: &Value) -> Result<(), RpcError> {
        validation::validate_request(request)
    }

    /// Process one request object.
    ///
    /// Protocol-level problems always come back as an error response. A
    /// handler failure that is not an `RpcError` becomes a
    /// `MethodErrorUnhandled` response when `catch_unhandled` is set and is
    /// returned as `Err` otherwise.
    pub fn dispatch_one(
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

        let outcome = handler.handle(call.params);
        into_message(&method, call.id, outcome, catch_unhandled)
    }

    /// Process a single request or a batch.
    ///
    /// A JSON array is a batch: every element is dispatched in order and gets
    /// exactly one response in the same position. Anything else is treated as
    /// a single request.
    pub fn dispatch(
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
                debug!(size = batch.len(), "Dispatching JSON-RPC batch");
                let messages = batch
                    .into_iter()
                    .map(|item| self.dispatch_one(item, catch_unhandled))
                    .collect::<Result<Vec<_>, _>>()?;
                DispatchResponse::Batch(messages)
            }
            single => DispatchResponse::Single(self.dispatch_one(single, catch_unhandled)?),
        };

        if self.config.log_payloads {
            log_response(&response);
        }
        Ok(response)
    }

    /// `dispatch` with the configured `catch_unhandled` default
    pub fn handle_request(
        &self,
        request: impl Into<Value>,
    ) -> Result<DispatchResponse, DispatchError> {
        self.dispatch(request, self.config.catch_unhandled)
    }
}

impl Default for JsonRpcDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate and take apart a request, or produce the error response that
/// replaces it. The response id is always `null` here since the request's own
/// id cannot be trusted.
pub(crate) fn accept(request: Value) -> Result<IncomingCall, JsonRpcMessage> {
    match validation::accept(request) {
        Ok(call) => {
            debug!(method = %call.method_label(), id = ?call.id, "Dispatching JSON-RPC request");
            Ok(call)
        }
        Err(error) => {
            debug!(code = error.code.code(), "Invalid JSON-RPC request: {}", error.message);
            Err(JsonRpcMessage::error(None, error))
        }
    }
}

/// Turn a handler outcome into the response for `id`.
pub(crate) fn into_message(
    method: &str,
    id: Option<RequestId>,
    outcome: HandlerResult,
    catch_unhandled: bool,
) -> Result<JsonRpcMessage, DispatchError> {
    match outcome {
        Ok(result) => Ok(JsonRpcMessage::success(id, result)),
        Err(HandlerError::Rpc(error)) => {
            debug!(method, code = error.code.code(), "JSON-RPC method returned error");
            Ok(JsonRpcMessage::error(id, error))
        }
        Err(HandlerError::Unhandled(source)) if catch_unhandled => {
            warn!(method, "Caught unhandled error in JSON-RPC method: {:#}", source);
            Ok(JsonRpcMessage::error(
                id,
                RpcError::method_error_unhandled(&source),
            ))
        }
        Err(HandlerError::Unhandled(source)) => {
            error!(method, "Unhandled error in JSON-RPC method: {:#}", source);
            Err(DispatchError::Unhandled {
                method: method.to_string(),
                source,
            })
        }
    }
}

pub(crate) fn log_response(response: &DispatchResponse) {
    match serde_json::to_string(response) {
        Ok(payload) => trace!(response = %payload, "JSON-RPC response payload"),
        Err(e) => warn!("Failed to render JSON-RPC response for logging: {}", e),
    }
}
