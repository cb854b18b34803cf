//! Integration tests for MCP protocol handling.
//!
//! These drive a complete server session over in-memory streams with a
//! recording backend, checking what reaches the backend and what the
//! client sees.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::{call, handshake, responses, session, RecordingBackend};
use semandoc_mcp::backend::{Backend, BackendRequest, HttpMethod};
use semandoc_mcp::error::BackendError;
use semandoc_mcp::mcp::server::ServerState;
use semandoc_mcp::mcp::{McpServer, StdioTransport};
use serde_json::{json, Value};
use tokio::sync::Notify;

async fn run_session(backend: RecordingBackend, messages: &[Value]) -> Vec<Value> {
    let input = session(messages);
    let transport = StdioTransport::new(input.as_slice(), Vec::new());
    let mut server = McpServer::with_transport(backend, transport);

    server.serve().await.unwrap();
    assert_eq!(server.state(), ServerState::ShuttingDown);

    responses(&server.into_transport().into_writer())
}

fn with_handshake(calls: Vec<Value>) -> Vec<Value> {
    let mut messages = handshake();
    messages.extend(calls);
    messages
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_initialize_response() {
    let out = run_session(RecordingBackend::ok(json!({})), &handshake()).await;

    // The notification gets no response
    assert_eq!(out.len(), 1);
    assert_eq!(out[0]["id"], 0);
    assert_eq!(out[0]["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(out[0]["result"]["serverInfo"]["name"], "semandoc-mcp");
}

#[tokio::test]
async fn test_tools_call_before_initialised() {
    let backend = RecordingBackend::ok(json!({}));
    let out = run_session(backend.clone(), &[call(1, "get_stats", json!({}))]).await;

    assert_eq!(out[0]["error"]["code"], -32600);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_malformed_line_then_ping() {
    let mut input = b"this is not json\n\n".to_vec();
    input.extend(session(&[json!({"jsonrpc": "2.0", "id": "p", "method": "ping"})]));

    let transport = StdioTransport::new(input.as_slice(), Vec::new());
    let mut server = McpServer::with_transport(RecordingBackend::ok(json!({})), transport);
    server.serve().await.unwrap();
    let out = responses(&server.into_transport().into_writer());

    assert_eq!(out.len(), 2);
    assert_eq!(out[0]["error"]["code"], -32700);
    assert_eq!(out[1], json!({"jsonrpc": "2.0", "id": "p", "result": {}}));
}

#[tokio::test]
async fn test_invalid_utf8_line_then_ping() {
    let mut input = b"\xff\xfe\n".to_vec();
    input.extend(session(&[json!({"jsonrpc": "2.0", "id": 1, "method": "ping"})]));

    let transport = StdioTransport::new(input.as_slice(), Vec::new());
    let mut server = McpServer::with_transport(RecordingBackend::ok(json!({})), transport);
    server.serve().await.unwrap();
    let out = responses(&server.into_transport().into_writer());

    assert_eq!(out.len(), 2);
    assert_eq!(out[0]["error"]["code"], -32700);
    assert_eq!(out[1], json!({"jsonrpc": "2.0", "id": 1, "result": {}}));
}

/// Accepts a request and never answers it.
struct StalledBackend {
    started: Arc<Notify>,
}

#[async_trait]
impl Backend for StalledBackend {
    async fn send(&self, _request: &BackendRequest) -> Result<Value, BackendError> {
        self.started.notify_one();
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_shutdown_during_stalled_tool_call() {
    let started = Arc::new(Notify::new());
    let backend = StalledBackend {
        started: Arc::clone(&started),
    };
    let input = session(&with_handshake(vec![
        call(1, "get_stats", json!({})),
        json!({"jsonrpc": "2.0", "id": 2, "method": "ping"}),
    ]));
    let transport = StdioTransport::new(input.as_slice(), Vec::new());
    let mut server = McpServer::with_transport(backend, transport);

    let shutdown = async move {
        started.notified().await;
        "test"
    };
    tokio::time::timeout(Duration::from_secs(5), server.serve_until(shutdown))
        .await
        .expect("shutdown did not interrupt the pending tool call")
        .unwrap();

    assert_eq!(server.state(), ServerState::ShuttingDown);

    // Only initialize was answered; the stalled call and the ping never were
    let out = responses(&server.into_transport().into_writer());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0]["id"], 0);
}

#[tokio::test]
async fn test_unknown_method() {
    let out = run_session(
        RecordingBackend::ok(json!({})),
        &[json!({"jsonrpc": "2.0", "id": 9, "method": "resources/list"})],
    )
    .await;
    assert_eq!(out[0]["error"]["code"], -32601);
}

// =============================================================================
// Tool listing
// =============================================================================

#[tokio::test]
async fn test_tools_list_schemas() {
    let out = run_session(
        RecordingBackend::ok(json!({})),
        &with_handshake(vec![json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"})]),
    )
    .await;

    let tools = out[1]["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        [
            "create_document",
            "search_documents",
            "get_document",
            "list_documents",
            "get_stats",
            "delete_document"
        ]
    );

    let search = &tools[1]["inputSchema"];
    assert_eq!(search["required"], json!(["query"]));
    assert_eq!(search["properties"]["k"]["default"], 5);

    let list = &tools[3]["inputSchema"];
    assert!(list.get("required").is_none());
    assert_eq!(list["properties"]["limit"]["default"], 100);
}

// =============================================================================
// Tool calls
// =============================================================================

#[tokio::test]
async fn test_get_document_round_trip() {
    let body = json!({"id": "abc123", "content": "hello", "metadata": {"tags": ["a"]}});
    let backend = RecordingBackend::ok(body.clone());
    let out = run_session(
        backend.clone(),
        &with_handshake(vec![call(1, "get_document", json!({"document_id": "abc123"}))]),
    )
    .await;

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[0].path, "/documents/abc123");
    assert!(requests[0].body.is_none());

    let result = &out[1]["result"];
    assert!(result.get("isError").is_none());
    assert_eq!(result["content"][0]["type"], "text");
    assert_eq!(result["content"][0]["text"], body.to_string());
}

#[tokio::test]
async fn test_create_document_missing_content() {
    let backend = RecordingBackend::ok(json!({}));
    let out = run_session(
        backend.clone(),
        &with_handshake(vec![call(
            1,
            "create_document",
            json!({"metadata": {"tags": ["x"]}}),
        )]),
    )
    .await;

    assert_eq!(out[1]["error"]["code"], -32602);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_create_document_body() {
    let backend = RecordingBackend::ok(json!({"id": "new"}));
    run_session(
        backend.clone(),
        &with_handshake(vec![call(
            1,
            "create_document",
            json!({"content": "text", "metadata": {"tags": ["t"], "categories": ["c"]}, "ignored": 1}),
        )]),
    )
    .await;

    let request = &backend.requests()[0];
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.path, "/documents/");
    assert_eq!(
        request.body,
        Some(json!({"content": "text", "metadata": {"tags": ["t"], "categories": ["c"]}}))
    );
}

#[tokio::test]
async fn test_search_defaults_k() {
    let backend = RecordingBackend::ok(json!([]));
    run_session(
        backend.clone(),
        &with_handshake(vec![
            call(1, "search_documents", json!({"query": "rust"})),
            call(2, "search_documents", json!({"query": "rust", "k": 2, "tags": ["x"]})),
        ]),
    )
    .await;

    let requests = backend.requests();
    assert_eq!(requests[0].path, "/documents/search/");
    assert_eq!(requests[0].body, Some(json!({"query": "rust", "k": 5})));
    assert_eq!(
        requests[1].body,
        Some(json!({"query": "rust", "k": 2, "tags": ["x"]}))
    );
}

#[tokio::test]
async fn test_list_documents_query() {
    let backend = RecordingBackend::ok(json!({"documents": []}));
    run_session(
        backend.clone(),
        &with_handshake(vec![
            call(1, "list_documents", json!({})),
            call(2, "list_documents", json!({"skip": 10, "tag": "ml", "category": "papers"})),
        ]),
    )
    .await;

    let requests = backend.requests();
    let pairs = |i: usize| -> Vec<(String, String)> { requests[i].query.clone() };
    let owned = |v: &[(&str, &str)]| -> Vec<(String, String)> {
        v.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    };

    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(pairs(0), owned(&[("skip", "0"), ("limit", "100")]));
    assert_eq!(
        pairs(1),
        owned(&[("skip", "10"), ("limit", "100"), ("tag", "ml"), ("category", "papers")])
    );
    assert!(requests.iter().all(|r| r.body.is_none()));
}

#[tokio::test]
async fn test_list_documents_rejects_null_filter() {
    let backend = RecordingBackend::ok(json!({}));
    let out = run_session(
        backend.clone(),
        &with_handshake(vec![call(1, "list_documents", json!({"tag": null}))]),
    )
    .await;

    assert_eq!(out[1]["error"]["code"], -32602);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_stats_and_delete() {
    let backend = RecordingBackend::ok(json!({"ok": true}));
    run_session(
        backend.clone(),
        &with_handshake(vec![
            call(1, "get_stats", json!({})),
            call(2, "delete_document", json!({"document_id": "d-1"})),
        ]),
    )
    .await;

    let requests = backend.requests();
    assert_eq!(requests[0].path, "/documents/stats/overview");
    assert_eq!(requests[1].method, HttpMethod::Delete);
    assert_eq!(requests[1].path, "/documents/d-1");
    assert!(requests[1].body.is_none());
}

#[tokio::test]
async fn test_backend_failure_keeps_serving() {
    let backend = RecordingBackend::failing("connection refused");
    let out = run_session(
        backend.clone(),
        &with_handshake(vec![
            call(1, "get_stats", json!({})),
            call(2, "get_document", json!({"document_id": "x"})),
            json!({"jsonrpc": "2.0", "id": 3, "method": "ping"}),
        ]),
    )
    .await;

    assert_eq!(out.len(), 4);
    for response in &out[1..3] {
        assert_eq!(response["result"]["isError"], true);
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("connection refused"));
    }
    assert_eq!(out[3]["result"], json!({}));
    assert_eq!(backend.call_count(), 2);
}
