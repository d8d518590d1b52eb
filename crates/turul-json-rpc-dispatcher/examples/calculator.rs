//! Calculator JSON-RPC Example
//!
//! Registers an `add` procedure and runs a handful of well-formed and
//! malformed requests through the dispatcher, printing each response.
//!
//! Run with `RUST_LOG=turul_json_rpc_dispatcher=debug` to see dispatch logs.

use serde_json::{Value, json};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use turul_json_rpc_dispatcher::prelude::*;

#[derive(Debug, Error)]
#[error("add() got an unexpected keyword argument '{0}'")]
struct UnexpectedArgument(String);

/// Adds the named parameters `x` and `y`
fn add(params: Option<Value>) -> HandlerResult {
    let params = params.unwrap_or_default();

    let mut sum = 0.0;
    for key in ["x", "y"] {
        let value = params
            .get(key)
            .ok_or_else(|| RpcError::invalid_params("Missing parameter", key))?;
        sum += value
            .as_f64()
            .ok_or_else(|| RpcError::invalid_params("Parameters must be numbers", key))?;
    }

    // Not a sanctioned error: surfaces as METHOD_ERROR_UNHANDLED when caught
    if let Some(extra) = params
        .as_object()
        .and_then(|fields| fields.keys().find(|k| !matches!(k.as_str(), "x" | "y")))
    {
        return Err(HandlerError::unhandled(UnexpectedArgument(extra.clone())));
    }

    Ok(json!(sum))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dispatcher = JsonRpcDispatcher::builder()
        .method("add", add)
        .catch_unhandled(true)
        .build();

    let requests = vec![
        // OK request
        json!({"jsonrpc": "2.0", "id": "123", "method": "add", "params": {"x": 1.7, "y": 10}}),
        // Invalid protocol
        json!({"jsonrpc": "1.0", "id": "123", "method": "add", "params": {"x": 1.7, "y": 10}}),
        // Missing ID
        json!({"jsonrpc": "2.0", "method": "add", "params": {"x": 1.7, "y": 10}}),
        // Unknown method
        json!({"jsonrpc": "2.0", "id": 4, "method": "multiply", "params": {"x": 1.7, "y": 10}}),
        // Invalid data
        json!({"jsonrpc": "2.0", "id": 5, "method": "add", "params": {"x": "1.7", "y": "10"}}),
        // Unexpected argument
        json!({"jsonrpc": "2.0", "id": 6, "method": "add", "params": {"x": 1, "y": 2, "z": 3}}),
    ];

    println!("Calculator JSON-RPC dispatcher example");

    for request in &requests {
        println!("==========");
        println!("{}", serde_json::to_string_pretty(request)?);
        let response = dispatcher.handle_request(request.clone())?;
        println!("{}", serde_json::to_string_pretty(&response)?);
    }

    println!("========== batch");
    let response = dispatcher.handle_request(Value::Array(requests))?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
