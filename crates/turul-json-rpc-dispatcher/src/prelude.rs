//! # JSON-RPC Dispatcher Prelude
//!
//! This module provides convenient re-exports of the most commonly used types
//! from the dispatcher library.
//!
//! ```rust
//! use turul_json_rpc_dispatcher::prelude::*;
//! ```

// Core JSON-RPC types
pub use crate::builder::JsonRpcDispatcherBuilder;
pub use crate::config::DispatcherConfig;
pub use crate::dispatch::JsonRpcDispatcher;
pub use crate::error::{DispatchError, HandlerError, JsonRpcError, JsonRpcErrorCode, RpcError};
pub use crate::handler::{HandlerResult, JsonRpcHandler};
pub use crate::request::JsonRpcRequest;
pub use crate::response::{DispatchResponse, JsonRpcMessage, JsonRpcResponse};
pub use crate::types::{JsonRpcVersion, RequestId};

#[cfg(feature = "async")]
pub use crate::r#async::{AsyncJsonRpcDispatcher, AsyncJsonRpcHandler, FunctionHandler};

// Error codes
pub use crate::error_codes::*;
