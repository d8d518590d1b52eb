//! End-to-end behaviour of the synchronous dispatcher on decoded requests.

use serde_json::{Value, json};
use turul_json_rpc_dispatcher::prelude::*;

fn add(params: Option<Value>) -> HandlerResult {
    let params = params.unwrap_or_default();

    let mut operands = Vec::with_capacity(2);
    for key in ["x", "y"] {
        let value = params
            .get(key)
            .ok_or_else(|| RpcError::invalid_params("Missing parameter", key))?;
        let number = value
            .as_f64()
            .ok_or_else(|| RpcError::invalid_params("Parameters must be numbers", key))?;
        operands.push(number);
    }

    if let Some(extra) = params
        .as_object()
        .and_then(|fields| fields.keys().find(|k| k.as_str() != "x" && k.as_str() != "y"))
    {
        return Err(anyhow::anyhow!("add() got an unexpected keyword argument '{}'", extra).into());
    }

    Ok(json!(operands[0] + operands[1]))
}

fn dispatcher() -> JsonRpcDispatcher {
    JsonRpcDispatcher::builder().method("add", add).build()
}

fn add_request(id: Value, params: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "method": "add", "params": params})
}

fn single(response: DispatchResponse) -> Value {
    serde_json::to_value(response.into_single().expect("single response")).unwrap()
}

#[test]
fn add_round_trip() {
    let response = dispatcher()
        .dispatch(add_request(json!("123"), json!({"x": 1.7, "y": 10})), false)
        .unwrap();

    assert_eq!(
        single(response),
        json!({"jsonrpc": "2.0", "id": "123", "result": 11.7})
    );
}

#[test]
fn typed_request_can_be_dispatched() {
    let request = JsonRpcRequest::new_with_params("123", "add", json!({"x": 2, "y": 3}));
    let response = dispatcher().dispatch(request, false).unwrap();
    assert_eq!(single(response)["result"], json!(5.0));
}

#[test]
fn missing_required_attributes_are_listed() {
    let cases = [
        (json!({"jsonrpc": "2.0", "id": 1}), vec!["method"]),
        (json!({"jsonrpc": "2.0", "method": "add"}), vec!["id"]),
        (json!({"jsonrpc": "2.0"}), vec!["method", "id"]),
    ];

    for (request, missing) in cases {
        let response = single(dispatcher().dispatch(request, false).unwrap());
        assert_eq!(response["id"], Value::Null);
        assert_eq!(response["error"]["code"], json!(INVALID_REQUEST));
        assert_eq!(response["error"]["data"], json!(missing));
    }
}

#[test]
fn missing_version_is_reported_as_version_mismatch() {
    let response = single(
        dispatcher()
            .dispatch(json!({"id": 1, "method": "add"}), false)
            .unwrap(),
    );
    assert_eq!(response["error"]["code"], json!(INVALID_REQUEST));
    assert_eq!(
        response["error"]["data"]["required_protocol_version"],
        json!("2.0")
    );
}

#[test]
fn wrong_version_names_required_version() {
    let mut request = add_request(json!("123"), json!({"x": 1.7, "y": 10}));
    request["jsonrpc"] = json!("1.0");

    let response = single(dispatcher().dispatch(request, false).unwrap());
    assert_eq!(response["id"], Value::Null);
    assert_eq!(response["error"]["code"], json!(INVALID_REQUEST));
    assert_eq!(
        response["error"]["data"]["required_protocol_version"],
        json!("2.0")
    );
}

#[test]
fn extra_attribute_is_invalid_request() {
    let mut request = add_request(json!(1), json!({"x": 1, "y": 2}));
    request["foo"] = json!("bar");

    let response = single(dispatcher().dispatch(request, false).unwrap());
    assert_eq!(response["error"]["code"], json!(INVALID_REQUEST));
}

/// The reported data for unrecognized attributes is the list of those
/// attributes, not the (empty) list of missing ones.
#[test]
fn extra_attribute_data_lists_unrecognized_names() {
    let mut request = add_request(json!(1), json!({"x": 1, "y": 2}));
    request["foo"] = json!("bar");

    let response = single(dispatcher().dispatch(request, false).unwrap());
    assert_eq!(response["error"]["data"], json!(["foo"]));
}

#[test]
fn id_type_rules() {
    for id in [json!(true), json!([1]), json!({"n": 1})] {
        let response = single(
            dispatcher()
                .dispatch(add_request(id, json!({"x": 1, "y": 2})), false)
                .unwrap(),
        );
        assert_eq!(response["error"]["code"], json!(INVALID_REQUEST));
        assert!(response["error"].get("data").is_none());
    }

    for id in [json!(null), json!(42), json!(4.5), json!("abc")] {
        let response = single(
            dispatcher()
                .dispatch(add_request(id.clone(), json!({"x": 1, "y": 2})), false)
                .unwrap(),
        );
        assert_eq!(response["id"], id);
        assert_eq!(response["result"], json!(3.0));
    }
}

#[test]
fn unknown_method_keeps_request_id() {
    let request = json!({"jsonrpc": "2.0", "id": 77, "method": "multiply", "params": {}});
    let response = single(dispatcher().dispatch(request, false).unwrap());

    assert_eq!(response["id"], json!(77));
    assert_eq!(response["error"]["code"], json!(METHOD_NOT_FOUND));
    assert_eq!(response["error"]["message"], json!("Method multiply not found."));
    assert!(response["error"].get("data").is_none());
}

#[test]
fn sanctioned_error_is_serialized() {
    let response = single(
        dispatcher()
            .dispatch(add_request(json!(1), json!({"y": 10})), false)
            .unwrap(),
    );
    assert_eq!(response["id"], json!(1));
    assert_eq!(response["error"]["code"], json!(INVALID_PARAMS));
    assert_eq!(response["error"]["data"], json!("x"));
    assert!(response.get("result").is_none());
}

#[test]
fn non_numeric_params_are_invalid_params() {
    let response = single(
        dispatcher()
            .dispatch(add_request(json!(1), json!({"x": "1.7", "y": "10"})), false)
            .unwrap(),
    );
    assert_eq!(response["error"]["code"], json!(INVALID_PARAMS));
    assert_eq!(response["error"]["data"], json!("x"));
}

#[test]
fn unhandled_error_caught_when_requested() {
    let response = single(
        dispatcher()
            .dispatch(add_request(json!(5), json!({"x": 1, "y": 2, "z": 3})), true)
            .unwrap(),
    );
    assert_eq!(response["id"], json!(5));
    assert_eq!(response["error"]["code"], json!(METHOD_ERROR_UNHANDLED));
    let data = response["error"]["data"].as_str().unwrap();
    assert!(!data.is_empty());
    assert!(data.contains('z'));
}

#[test]
fn unhandled_error_propagates_by_default() {
    let result = dispatcher().dispatch(add_request(json!(5), json!({"x": 1, "y": 2, "z": 3})), false);

    match result {
        Err(DispatchError::Unhandled { method, source }) => {
            assert_eq!(method, "add");
            assert!(source.to_string().contains("unexpected keyword argument 'z'"));
        }
        other => panic!("expected propagated failure, got {:?}", other),
    }
}

#[test]
fn dispatch_is_idempotent_for_pure_handlers() {
    let dispatcher = dispatcher();
    let request = add_request(json!("same"), json!({"x": 2, "y": 2}));

    let first = dispatcher.dispatch(request.clone(), false).unwrap();
    let second = dispatcher.dispatch(request, false).unwrap();
    assert_eq!(first, second);
}

#[test]
fn batch_equals_itemwise_dispatch() {
    let dispatcher = dispatcher();
    let r1 = add_request(json!(1), json!({"x": 1, "y": 2}));
    let r2 = json!({"jsonrpc": "2.0", "id": 2, "method": "nope"});
    let r3 = json!({"jsonrpc": "2.0", "method": "add"});

    let batch = dispatcher
        .dispatch(json!([r1.clone(), r2.clone(), r3.clone()]), false)
        .unwrap()
        .into_batch()
        .unwrap();

    let itemwise: Vec<JsonRpcMessage> = [r1, r2, r3]
        .into_iter()
        .map(|r| dispatcher.dispatch(r, false).unwrap().into_single().unwrap())
        .collect();

    assert_eq!(batch, itemwise);
}

#[test]
fn batch_items_are_independent() {
    let batch = json!([
        {"jsonrpc": "2.0", "id": 1, "method": "add", "params": {"x": 1}},
        "not a request",
        add_request(json!(3), json!({"x": 1, "y": 1})),
    ]);

    let messages = dispatcher()
        .dispatch(batch, false)
        .unwrap()
        .into_batch()
        .unwrap();

    assert_eq!(messages.len(), 3);
    assert_eq!(
        messages[0].rpc_error().map(|e| e.code),
        Some(JsonRpcErrorCode::InvalidParams)
    );
    assert_eq!(
        messages[1].rpc_error().map(|e| e.code),
        Some(JsonRpcErrorCode::InvalidRequest)
    );
    assert_eq!(messages[2].result(), Some(&json!(2.0)));
}

#[test]
fn empty_batch_yields_empty_batch() {
    let response = dispatcher().dispatch(json!([]), false).unwrap();
    assert!(response.is_batch());
    assert!(response.is_empty());
    assert_eq!(serde_json::to_value(&response).unwrap(), json!([]));
}
