use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{JsonRpcVersion, RequestId};

/// A JSON-RPC request
///
/// Used by callers to build well-formed requests. The dispatcher itself works
/// on decoded `serde_json::Value`s so it can report malformed input instead of
/// failing to deserialize it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    pub id: Option<RequestId>,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: Option<RequestId>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            id,
            method: method.into(),
            params,
        }
    }

    /// Create a new request with no parameters
    pub fn new_no_params(id: impl Into<RequestId>, method: impl Into<String>) -> Self {
        Self::new(Some(id.into()), method, None)
    }

    /// Create a new request with parameters
    pub fn new_with_params(
        id: impl Into<RequestId>,
        method: impl Into<String>,
        params: Value,
    ) -> Self {
        Self::new(Some(id.into()), method, Some(params))
    }

    /// Get a parameter by name (if params are an object)
    pub fn get_param(&self, name: &str) -> Option<&Value> {
        self.params.as_ref()?.get(name)
    }

    /// Get a parameter by index (if params are an array)
    pub fn get_param_index(&self, index: usize) -> Option<&Value> {
        self.params.as_ref()?.get(index)
    }
}

impl From<JsonRpcRequest> for Value {
    fn from(request: JsonRpcRequest) -> Self {
        let mut fields = Map::new();
        fields.insert(
            "jsonrpc".to_string(),
            Value::String(request.version.as_str().to_string()),
        );
        fields.insert(
            "id".to_string(),
            request.id.as_ref().map_or(Value::Null, RequestId::to_value),
        );
        fields.insert("method".to_string(), Value::String(request.method));
        if let Some(params) = request.params {
            fields.insert("params".to_string(), params);
        }
        Value::Object(fields)
    }
}

/// A request that passed validation, taken apart for dispatch.
///
/// `method` stays a raw value: a non-string method is valid structurally but
/// can never name a registered procedure.
#[derive(Debug)]
pub(crate) struct IncomingCall {
    pub id: Option<RequestId>,
    pub method: Value,
    pub params: Option<Value>,
}

impl IncomingCall {
    /// Method name as reported in logs and error messages
    pub fn method_label(&self) -> String {
        match &self.method {
            Value::String(name) => name.clone(),
            other => other.to_string(),
        }
    }
}
