//! Structural validation of decoded JSON-RPC request objects.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. `jsonrpc` equals `"2.0"`
//! 2. `jsonrpc`, `method` and `id` are all present
//! 3. nothing besides those and `params` is present
//! 4. `id` is a string, a number or `null`

use serde_json::{Map, Value, json};

use crate::JSONRPC_VERSION;
use crate::error::RpcError;
use crate::request::IncomingCall;
use crate::types::RequestId;

pub const REQUIRED_ATTRIBUTES: [&str; 3] = ["jsonrpc", "method", "id"];
pub const OPTIONAL_ATTRIBUTES: [&str; 1] = ["params"];

/// Validate a decoded request, returning the first structural defect found.
pub fn validate_request(request: &Value) -> Result<(), RpcError> {
    validate_object(as_object(request)?)
}

/// Validate a decoded request and take it apart for dispatch.
pub(crate) fn accept(request: Value) -> Result<IncomingCall, RpcError> {
    validate_request(&request)?;
    let Value::Object(mut fields) = request else {
        return Err(not_an_object());
    };

    let id = fields
        .get("id")
        .map(RequestId::from_value)
        .and_then(Result::ok)
        .flatten();

    Ok(IncomingCall {
        id,
        method: fields.remove("method").unwrap_or(Value::Null),
        params: fields.remove("params"),
    })
}

fn as_object(request: &Value) -> Result<&Map<String, Value>, RpcError> {
    request.as_object().ok_or_else(not_an_object)
}

fn not_an_object() -> RpcError {
    RpcError::invalid_request("Request must be an object.", None)
}

fn validate_object(fields: &Map<String, Value>) -> Result<(), RpcError> {
    check_version(fields)?;
    check_required(fields)?;
    check_unrecognized(fields)?;
    check_id(fields)
}

fn check_version(fields: &Map<String, Value>) -> Result<(), RpcError> {
    match fields.get("jsonrpc") {
        Some(Value::String(version)) if version == JSONRPC_VERSION => Ok(()),
        received => {
            let received = received
                .map(Value::to_string)
                .unwrap_or_else(|| "null".to_string());
            Err(RpcError::invalid_request(
                format!(
                    "Incorrect protocol version; expected \"{}\", received {}.",
                    JSONRPC_VERSION, received
                ),
                Some(json!({ "required_protocol_version": JSONRPC_VERSION })),
            ))
        }
    }
}

fn check_required(fields: &Map<String, Value>) -> Result<(), RpcError> {
    let missing: Vec<&str> = REQUIRED_ATTRIBUTES
        .iter()
        .copied()
        .filter(|name| !fields.contains_key(*name))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(RpcError::invalid_request(
        format!("Missing attributes: {}.", quoted_list(&missing)),
        Some(json!(missing)),
    ))
}

fn check_unrecognized(fields: &Map<String, Value>) -> Result<(), RpcError> {
    let mut extra: Vec<&str> = fields
        .keys()
        .map(String::as_str)
        .filter(|name| !REQUIRED_ATTRIBUTES.contains(name) && !OPTIONAL_ATTRIBUTES.contains(name))
        .collect();

    if extra.is_empty() {
        return Ok(());
    }
    extra.sort_unstable();

    Err(RpcError::invalid_request(
        format!("Unrecognized attributes: {}.", quoted_list(&extra)),
        Some(json!(extra)),
    ))
}

fn check_id(fields: &Map<String, Value>) -> Result<(), RpcError> {
    match fields.get("id").map(RequestId::from_value) {
        Some(Err(_)) => Err(RpcError::invalid_request(
            "Request ID must be a string, a real number, or null.",
            None,
        )),
        _ => Ok(()),
    }
}

fn quoted_list(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("\"{}\"", name))
        .collect::<Vec<_>>()
        .join(",")
}
