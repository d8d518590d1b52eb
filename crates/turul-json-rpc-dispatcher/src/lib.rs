//! # JSON-RPC 2.0 Dispatcher
//!
//! The request-handling core of a JSON-RPC 2.0 server. It validates decoded
//! request objects, dispatches them to registered procedures by name and
//! builds protocol-compliant responses. Transports and text encoding are left
//! to the caller: requests come in as `serde_json::Value`, responses go out as
//! `serde`-serializable types.
//!
//! ## Features
//! - Structural request validation with precise `Invalid Request` errors
//! - Single and batch requests, responses kept in input order
//! - Typed split between sanctioned [`RpcError`]s and unexpected handler
//!   failures, with an opt-in `catch_unhandled` policy
//! - Async handlers and concurrent batches with the `async` feature
//!
//! ```rust
//! use serde_json::{Value, json};
//! use turul_json_rpc_dispatcher::prelude::*;
//!
//! let mut dispatcher = JsonRpcDispatcher::new();
//! dispatcher.register_method("ping", |_params: Option<Value>| -> HandlerResult {
//!     Ok(json!("pong"))
//! });
//!
//! let response = dispatcher
//!     .dispatch(json!({"jsonrpc": "2.0", "id": 1, "method": "ping"}), false)
//!     .unwrap();
//! assert_eq!(
//!     serde_json::to_value(&response).unwrap(),
//!     json!({"jsonrpc": "2.0", "id": 1, "result": "pong"})
//! );
//! ```

pub mod builder;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod prelude;
pub mod request;
pub mod response;
pub mod types;
pub mod validation;

#[cfg(feature = "async")]
pub mod r#async;

// Re-export main types
pub use builder::JsonRpcDispatcherBuilder;
pub use config::DispatcherConfig;
pub use dispatch::JsonRpcDispatcher;
pub use error::{DispatchError, HandlerError, JsonRpcError, JsonRpcErrorCode, RpcError};
pub use handler::{HandlerResult, JsonRpcHandler};
pub use request::JsonRpcRequest;
pub use response::{DispatchResponse, JsonRpcMessage, JsonRpcResponse};
pub use types::{JsonRpcVersion, RequestId};
pub use validation::validate_request;

#[cfg(feature = "async")]
pub use r#async::{AsyncJsonRpcDispatcher, AsyncJsonRpcHandler, FunctionHandler};

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;

    // Implementation-defined codes
    pub const VALIDATOR_ERROR_UNHANDLED: i64 = -32101;
    pub const METHOD_ERROR_UNHANDLED: i64 = -32102;

    // Reserved for implementation-defined server errors: -32768 to -32000
    pub const RESERVED_START: i64 = -32768;
    pub const RESERVED_END: i64 = -32000;
}
