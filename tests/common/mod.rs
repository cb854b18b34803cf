//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use semandoc_mcp::backend::{Backend, BackendRequest};
use semandoc_mcp::error::BackendError;
use serde_json::Value;

/// Records every request and answers with a canned body or failure.
#[derive(Clone)]
pub struct RecordingBackend {
    response: Result<Value, String>,
    requests: Arc<Mutex<Vec<BackendRequest>>>,
}

impl RecordingBackend {
    pub fn ok(body: Value) -> Self {
        Self {
            response: Ok(body),
            requests: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<BackendRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Backend for RecordingBackend {
    async fn send(&self, request: &BackendRequest) -> Result<Value, BackendError> {
        self.requests.lock().unwrap().push(request.clone());
        self.response
            .clone()
            .map_err(|message| BackendError::Unavailable { message })
    }
}

/// Builds one JSON-RPC line per message, newline-terminated.
pub fn session(messages: &[Value]) -> Vec<u8> {
    let mut input = String::new();
    for message in messages {
        input.push_str(&message.to_string());
        input.push('\n');
    }
    input.into_bytes()
}

/// The initialize request plus the initialized notification.
pub fn handshake() -> Vec<Value> {
    vec![
        serde_json::json!({
            "jsonrpc": "2.0",
            "id": 0,
            "method": "initialize",
            "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {"name": "test-client", "version": "1.0.0"}
            }
        }),
        serde_json::json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
    ]
}

/// A tools/call request.
pub fn call(id: i64, tool: &str, arguments: Value) -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": tool, "arguments": arguments}
    })
}

/// Parses every output line as JSON.
pub fn responses(output: &[u8]) -> Vec<Value> {
    String::from_utf8(output.to_vec())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}
