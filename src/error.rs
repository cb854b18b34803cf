//! Error types for semandoc-mcp.
//!
//! Three families exist, one per boundary:
//!
//! - [`ConfigError`]: startup configuration failures (fatal)
//! - [`BackendError`]: network or decoding failures talking to the document backend
//! - [`ToolError`]: everything a single tool invocation can fail with

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Errors raised while talking to the document backend.
///
/// Backend application errors (4xx/5xx with a JSON body) are not represented
/// here; those bodies are forwarded to the caller as ordinary results.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The base URL and path did not form a valid URL.
    #[error("invalid backend URL '{url}': {source}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The request could not be sent or the response could not be received.
    #[error("request to {url} failed: {source}")]
    Request {
        /// Target URL of the failed request.
        url: String,
        /// The underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not valid JSON.
    #[error("response from {url} (HTTP {status}) is not valid JSON: {source}")]
    Decode {
        /// Target URL of the request.
        url: String,
        /// HTTP status code of the response.
        status: u16,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Any other transport failure (used by non-HTTP backends and tests).
    #[error("backend unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },
}

/// Errors that can occur while invoking a tool.
#[derive(Error, Debug)]
pub enum ToolError {
    /// No tool with this name is registered.
    #[error("Tool {name} not found")]
    UnknownTool {
        /// The requested tool name.
        name: String,
    },

    /// The arguments did not satisfy the tool's parameter schema.
    #[error("Invalid arguments for tool {tool}: {message}")]
    InvalidArguments {
        /// The tool that rejected the arguments.
        tool: String,
        /// Which field failed and why.
        message: String,
    },

    /// The backend call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let error = ConfigError::NotFound {
            path: PathBuf::from("/path/to/config.json"),
        };
        let msg = error.to_string();
        assert!(msg.contains("not found"));
        assert!(msg.contains("config.json"));
    }

    #[test]
    fn validation_error_display() {
        let error = ConfigError::ValidationError {
            message: "invalid setting".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("invalid setting"));
    }

    #[test]
    fn invalid_arguments_display() {
        let error = ToolError::InvalidArguments {
            tool: "create_document".to_string(),
            message: "content: required field is missing".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("create_document"));
        assert!(msg.contains("content"));
    }

    #[test]
    fn backend_error_is_transparent() {
        let error = ToolError::from(BackendError::Unavailable {
            message: "connection refused".to_string(),
        });
        assert_eq!(error.to_string(), "backend unavailable: connection refused");
    }
}
