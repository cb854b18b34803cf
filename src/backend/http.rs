//! reqwest-backed [`Backend`] implementation.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use url::Url;

use super::{Backend, BackendRequest, HttpMethod};
use crate::config::BackendConfig;
use crate::error::BackendError;
use crate::json;

const USER_AGENT: &str = concat!("semandoc-mcp/", env!("CARGO_PKG_VERSION"));

/// Joins the base URL and request path, then appends the query parameters.
///
/// The path is used verbatim; only standard URL normalisation applies.
///
/// # Errors
///
/// Returns [`BackendError::InvalidUrl`] if the result is not a valid URL.
pub fn resolve_url(base_url: &str, request: &BackendRequest) -> Result<Url, BackendError> {
    let raw = format!("{base_url}{}", request.path);
    let mut url = Url::parse(&raw).map_err(|source| BackendError::InvalidUrl { url: raw, source })?;

    // query_pairs_mut() on an empty list would still leave a bare '?'
    if !request.query.is_empty() {
        url.query_pairs_mut().extend_pairs(
            request
                .query
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str())),
        );
    }

    Ok(url)
}

/// Sends requests to the document backend over HTTP.
///
/// One client is shared by every invocation. No timeout is configured, so a
/// backend that never answers blocks that invocation indefinitely.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: Arc<BackendConfig>,
}

impl HttpBackend {
    /// Creates a backend for the given address.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn new(config: Arc<BackendConfig>) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| BackendError::Request {
                url: config.base_url().to_string(),
                source,
            })?;
        Ok(Self { client, config })
    }

    /// The address this backend talks to.
    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn send(&self, request: &BackendRequest) -> Result<Value, BackendError> {
        let url = resolve_url(self.config.base_url(), request)?;
        let target = url.to_string();

        tracing::debug!(method = %request.method, url = %target, "Sending backend request");

        let builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Delete => self.client.delete(url),
        };
        let builder = match &request.body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(json::stringify(body)),
            None => builder,
        };

        let response = builder.send().await.map_err(|source| BackendError::Request {
            url: target.clone(),
            source,
        })?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| BackendError::Request {
                url: target.clone(),
                source,
            })?;

        tracing::debug!(status, bytes = bytes.len(), "Backend responded");

        serde_json::from_slice(&bytes).map_err(|source| BackendError::Decode {
            url: target,
            status,
            source,
        })
    }
}
