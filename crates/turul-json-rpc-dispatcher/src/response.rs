use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{JsonRpcError, RpcError};
use crate::types::{JsonRpcVersion, RequestId};

/// A successful JSON-RPC response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    pub id: Option<RequestId>,
    pub result: Value,
}

impl JsonRpcResponse {
    pub fn new(id: Option<RequestId>, result: Value) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            id,
            result,
        }
    }
}

/// Either a successful response or an error response.
///
/// Keeping the two shapes as separate variants guarantees a response carries
/// exactly one of `result` and `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcMessage {
    /// Successful response with result field
    Response(JsonRpcResponse),
    /// Error response with error field
    Error(JsonRpcError),
}

impl JsonRpcMessage {
    /// Create a success message
    pub fn success(id: Option<RequestId>, result: Value) -> Self {
        Self::Response(JsonRpcResponse::new(id, result))
    }

    /// Create an error message
    pub fn error(id: Option<RequestId>, error: RpcError) -> Self {
        Self::Error(JsonRpcError::new(id, error))
    }

    /// Check if this is an error response
    pub fn is_error(&self) -> bool {
        matches!(self, JsonRpcMessage::Error(_))
    }

    /// Get the request ID from either response or error
    pub fn id(&self) -> Option<&RequestId> {
        match self {
            JsonRpcMessage::Response(resp) => resp.id.as_ref(),
            JsonRpcMessage::Error(err) => err.id.as_ref(),
        }
    }

    pub fn result(&self) -> Option<&Value> {
        match self {
            JsonRpcMessage::Response(resp) => Some(&resp.result),
            JsonRpcMessage::Error(_) => None,
        }
    }

    pub fn rpc_error(&self) -> Option<&RpcError> {
        match self {
            JsonRpcMessage::Response(_) => None,
            JsonRpcMessage::Error(err) => Some(&err.error),
        }
    }
}

impl From<JsonRpcResponse> for JsonRpcMessage {
    fn from(response: JsonRpcResponse) -> Self {
        Self::Response(response)
    }
}

impl From<JsonRpcError> for JsonRpcMessage {
    fn from(error: JsonRpcError) -> Self {
        Self::Error(error)
    }
}

/// Output of `dispatch`, mirroring the shape of its input: one response for
/// a single request, an ordered list for a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DispatchResponse {
    Single(JsonRpcMessage),
    Batch(Vec<JsonRpcMessage>),
}

impl DispatchResponse {
    pub fn is_batch(&self) -> bool {
        matches!(self, DispatchResponse::Batch(_))
    }

    pub fn as_single(&self) -> Option<&JsonRpcMessage> {
        match self {
            DispatchResponse::Single(message) => Some(message),
            DispatchResponse::Batch(_) => None,
        }
    }

    pub fn into_single(self) -> Option<JsonRpcMessage> {
        match self {
            DispatchResponse::Single(message) => Some(message),
            DispatchResponse::Batch(_) => None,
        }
    }

    pub fn into_batch(self) -> Option<Vec<JsonRpcMessage>> {
        match self {
            DispatchResponse::Single(_) => None,
            DispatchResponse::Batch(messages) => Some(messages),
        }
    }

    /// Number of responses carried
    pub fn len(&self) -> usize {
        match self {
            DispatchResponse::Single(_) => 1,
            DispatchResponse::Batch(messages) => messages.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<JsonRpcMessage> for DispatchResponse {
    fn from(message: JsonRpcMessage) -> Self {
        Self::Single(message)
    }
}

impl From<Vec<JsonRpcMessage>> for DispatchResponse {
    fn from(messages: Vec<JsonRpcMessage>) -> Self {
        Self::Batch(messages)
    }
}
