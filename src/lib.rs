//! semandoc-mcp: MCP server for a SemanDoc document knowledge base
//!
//! This library exposes the knowledge base HTTP API as MCP tools so that an
//! AI assistant can create, search, fetch, list and delete documents and read
//! corpus statistics without knowing anything about HTTP.
//!
//! # Architecture
//!
//! ```text
//! agent ──stdio──▶ mcp::server ──▶ tools::registry ──▶ tools::translate ──▶ backend ──HTTP──▶ SemanDoc
//!                  (JSON-RPC)      (schema check)      (request/result)     (reqwest)
//! ```
//!
//! The server owns no state beyond the backend address, which is resolved
//! once at startup.
//!
//! # Modules
//!
//! - [`backend`]: Outbound HTTP requests
//! - [`config`]: Configuration loading and backend address resolution
//! - [`error`]: Error types
//! - [`json`]: JSON text with JavaScript number formatting
//! - [`mcp`]: MCP protocol implementation
//! - [`tools`]: Tool schemas, dispatch and request translation

pub mod backend;
pub mod config;
pub mod error;
pub mod json;
pub mod mcp;
pub mod tools;
