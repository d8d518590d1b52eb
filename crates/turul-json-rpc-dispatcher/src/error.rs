use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::types::{JsonRpcVersion, RequestId};

/// JSON-RPC error codes
///
/// Named variants cover the standard codes and the codes this dispatcher
/// defines itself. Any other integer is carried by `Other`, so handlers can
/// raise application-specific codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonRpcErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    /// Reserved for classifying validator failures; never emitted.
    ValidatorErrorUnhandled,
    /// A handler failed with an error that is not an `RpcError`.
    MethodErrorUnhandled,
    Other(i64),
}

impl JsonRpcErrorCode {
    pub fn code(&self) -> i64 {
        match self {
            JsonRpcErrorCode::ParseError => crate::error_codes::PARSE_ERROR,
            JsonRpcErrorCode::InvalidRequest => crate::error_codes::INVALID_REQUEST,
            JsonRpcErrorCode::MethodNotFound => crate::error_codes::METHOD_NOT_FOUND,
            JsonRpcErrorCode::InvalidParams => crate::error_codes::INVALID_PARAMS,
            JsonRpcErrorCode::InternalError => crate::error_codes::INTERNAL_ERROR,
            JsonRpcErrorCode::ValidatorErrorUnhandled => {
                crate::error_codes::VALIDATOR_ERROR_UNHANDLED
            }
            JsonRpcErrorCode::MethodErrorUnhandled => crate::error_codes::METHOD_ERROR_UNHANDLED,
            JsonRpcErrorCode::Other(code) => *code,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            JsonRpcErrorCode::ParseError => "Parse error",
            JsonRpcErrorCode::InvalidRequest => "Invalid Request",
            JsonRpcErrorCode::MethodNotFound => "Method not found",
            JsonRpcErrorCode::InvalidParams => "Invalid params",
            JsonRpcErrorCode::InternalError => "Internal error",
            JsonRpcErrorCode::ValidatorErrorUnhandled => "Unhandled validator error",
            JsonRpcErrorCode::MethodErrorUnhandled => "Unhandled method error",
            JsonRpcErrorCode::Other(code) if Self::is_reserved(*code) => "Server error",
            JsonRpcErrorCode::Other(_) => "Application error",
        }
    }

    /// Whether `code` lies in the range reserved for implementation-defined
    /// server errors (-32768 to -32000 inclusive).
    pub fn is_reserved(code: i64) -> bool {
        (crate::error_codes::RESERVED_START..=crate::error_codes::RESERVED_END).contains(&code)
    }
}

impl From<i64> for JsonRpcErrorCode {
    fn from(code: i64) -> Self {
        use crate::error_codes::*;
        match code {
            PARSE_ERROR => JsonRpcErrorCode::ParseError,
            INVALID_REQUEST => JsonRpcErrorCode::InvalidRequest,
            METHOD_NOT_FOUND => JsonRpcErrorCode::MethodNotFound,
            INVALID_PARAMS => JsonRpcErrorCode::InvalidParams,
            INTERNAL_ERROR => JsonRpcErrorCode::InternalError,
            VALIDATOR_ERROR_UNHANDLED => JsonRpcErrorCode::ValidatorErrorUnhandled,
            METHOD_ERROR_UNHANDLED => JsonRpcErrorCode::MethodErrorUnhandled,
            other => JsonRpcErrorCode::Other(other),
        }
    }
}

impl From<JsonRpcErrorCode> for i64 {
    fn from(code: JsonRpcErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for JsonRpcErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl Serialize for JsonRpcErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for JsonRpcErrorCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        i64::deserialize(deserializer).map(JsonRpcErrorCode::from)
    }
}

/// Keeps an explicit `"data": null` as `Some(Value::Null)` instead of
/// collapsing it into "no data".
fn deserialize_data<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// JSON-RPC error object, and the error type handlers raise to report a
/// protocol-level failure.
///
/// `data` is `None` when no auxiliary payload was supplied. A supplied
/// payload is always serialized, even when it is `null`, `""`, `0` or `false`.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("JSON-RPC error {}: {}", .code.code(), .message)]
pub struct RpcError {
    pub code: JsonRpcErrorCode,
    pub message: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_data"
    )]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: impl Into<JsonRpcErrorCode>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(
        code: impl Into<JsonRpcErrorCode>,
        message: impl Into<String>,
        data: impl Into<Value>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: Some(data.into()),
        }
    }

    pub fn invalid_request(message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            code: JsonRpcErrorCode::InvalidRequest,
            message: message.into(),
            data,
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            JsonRpcErrorCode::MethodNotFound,
            format!("Method {} not found.", method),
        )
    }

    pub fn invalid_params(message: impl Into<String>, data: impl Into<Value>) -> Self {
        Self::with_data(JsonRpcErrorCode::InvalidParams, message, data)
    }

    /// Wrap a handler failure that was not raised as an `RpcError`.
    pub fn method_error_unhandled(failure: &anyhow::Error) -> Self {
        Self::with_data(
            JsonRpcErrorCode::MethodErrorUnhandled,
            "Unknown error while executing procedure",
            format!("{:#}", failure),
        )
    }
}

/// JSON-RPC error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    pub id: Option<RequestId>,
    pub error: RpcError,
}

impl JsonRpcError {
    pub fn new(id: Option<RequestId>, error: RpcError) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            id,
            error,
        }
    }

    pub fn method_not_found(id: Option<RequestId>, method: &str) -> Self {
        Self::new(id, RpcError::method_not_found(method))
    }
}

impl fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "JSON-RPC Error {}: {}",
            self.error.code.code(),
            self.error.message
        )
    }
}

impl std::error::Error for JsonRpcError {}

/// Failure returned by a procedure handler.
///
/// `Rpc` is the sanctioned way to report a problem to the client and is
/// always serialized into the response. `Unhandled` signals a programmer
/// error; the dispatcher either propagates it or downgrades it to
/// `MethodErrorUnhandled`, depending on `catch_unhandled`.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Unhandled(#[from] anyhow::Error),
}

impl HandlerError {
    /// Wrap any error as an unhandled failure.
    pub fn unhandled<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        HandlerError::Unhandled(anyhow::Error::new(error))
    }

    pub fn is_rpc(&self) -> bool {
        matches!(self, HandlerError::Rpc(_))
    }
}

/// Errors that escape `dispatch` instead of becoming a response
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unhandled error in method '{method}': {source:#}")]
    Unhandled {
        method: String,
        #[source]
        source: anyhow::Error,
    },
}

impl DispatchError {
    pub fn method(&self) -> &str {
        match self {
            DispatchError::Unhandled { method, .. } => method,
        }
    }
}
