//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes the knowledge base tools to AI assistants over the stdio
//! transport using JSON-RPC 2.0 messages.
//!
//! ```text
//! stdin ──▶ transport ──▶ server ──▶ tools ──▶ backend
//! stdout ◀── transport ◀── server ◀── result ◀──┘
//! ```
//!
//! Targets MCP protocol version 2024-11-05.

pub mod protocol;
pub mod server;
pub mod transport;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION};
pub use server::McpServer;
pub use transport::StdioTransport;
