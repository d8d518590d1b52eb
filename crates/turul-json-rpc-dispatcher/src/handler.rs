use serde_json::Value;

use crate::error::HandlerError;

pub type HandlerResult<T = Value> = Result<T, HandlerError>;

/// A registered procedure.
///
/// Receives the request's `params` untouched: `None` when the attribute was
/// omitted, `Some(Value::Null)` when it was sent as `null`.
pub trait JsonRpcHandler: Send + Sync {
    fn handle(&self, params: Option<Value>) -> HandlerResult;
}

/// Closures and functions are handlers. Any error type convertible into
/// `HandlerError` works, so `RpcError` and `anyhow::Error` can both be
/// returned directly.
impl<F, E> JsonRpcHandler for F
where
    F: Fn(Option<Value>) -> Result<Value, E> + Send + Sync,
    E: Into<HandlerError>,
{
    fn handle(&self, params: Option<Value>) -> HandlerResult {
        (self)(params).map_err(Into::into)
    }
}
