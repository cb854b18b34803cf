//! Request translation: validated arguments in, tool result out.

use serde_json::{Map, Value};

use super::registry::Route;
use super::result::ToolCallResult;
use crate::backend::{Backend, BackendRequest, HttpMethod};
use crate::error::BackendError;
use crate::json;

/// Builds the backend request for a route from validated arguments.
#[must_use]
pub fn build_request(route: &Route, arguments: &Map<String, Value>) -> BackendRequest {
    match route {
        Route::JsonBody { path } => BackendRequest::new(HttpMethod::Post, *path)
            .with_body(Value::Object(arguments.clone())),
        Route::Query { path } => {
            BackendRequest::new(HttpMethod::Get, *path).with_query(query_pairs(arguments))
        }
        Route::PathParam {
            method,
            prefix,
            param,
        } => {
            let segment = arguments
                .get(*param)
                .and_then(query_value)
                .unwrap_or_default();
            BackendRequest::new(*method, format!("{prefix}{segment}"))
        }
        Route::Fixed { method, path } => BackendRequest::new(*method, *path),
    }
}

/// Every argument with a defined value, string-converted, in argument order.
#[must_use]
pub fn query_pairs(arguments: &Map<String, Value>) -> Vec<(String, String)> {
    arguments
        .iter()
        .filter_map(|(key, value)| query_value(value).map(|v| (key.clone(), v)))
        .collect()
}

/// String form of a value as it appears in a URL. `None` for `null`.
///
/// Numbers print as JavaScript prints them (`5`, not `5.0`; `1e+21`) and
/// arrays are comma-joined.
#[must_use]
pub fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(json::number_string(n)),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| query_value(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

/// Sends the request and wraps the response body in a text envelope.
///
/// The body is forwarded whatever the HTTP status. Transport failures are
/// logged and returned unchanged.
///
/// # Errors
///
/// Returns the backend's error when the request cannot be completed.
pub async fn execute<B: Backend + ?Sized>(
    backend: &B,
    tool: &str,
    request: &BackendRequest,
) -> Result<ToolCallResult, BackendError> {
    match backend.send(request).await {
        Ok(body) => Ok(ToolCallResult::json(&body)),
        Err(e) => {
            tracing::error!(tool, error = %e, "Backend request failed");
            Err(e)
        }
    }
}
