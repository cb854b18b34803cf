//! Outbound requests to the document backend.
//!
//! Tool handlers never talk HTTP directly. They build a [`BackendRequest`]
//! and hand it to a [`Backend`], which returns the parsed JSON body. The
//! production implementation is [`HttpBackend`]; tests substitute a
//! recording mock.

mod http;

pub use http::{resolve_url, HttpBackend};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::BackendError;

/// HTTP methods used by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST` with a JSON body.
    Post,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully translated request, relative to the backend base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path with parameters already substituted, e.g. `/documents/abc123`.
    pub path: String,
    /// Query parameters in append order.
    pub query: Vec<(String, String)>,
    /// JSON body, only ever set for `POST`.
    pub body: Option<Value>,
}

impl BackendRequest {
    /// A body-less request.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Sets the query parameters.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Something that can execute a [`BackendRequest`].
///
/// Implementations must parse the response body as JSON whatever the status
/// code. Only transport and decoding failures are errors.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Sends the request and returns the parsed response body.
    async fn send(&self, request: &BackendRequest) -> Result<Value, BackendError>;
}
