//! Configuration loading and backend address resolution.
//!
//! # Configuration File Locations
//!
//! The configuration file is optional. It is searched in the following order:
//!
//! 1. Path specified via `--config` CLI flag (must exist)
//! 2. Default location (skipped silently when absent):
//!    - **Linux/macOS:** `~/.semandoc-mcp/config.json`
//!    - **Windows:** `%USERPROFILE%\.semandoc-mcp\config.json`
//!
//! # Backend Address
//!
//! The backend base URL is resolved once at startup from, in order of
//! precedence, the `--host`/`--port` flags, the config file, and the
//! built-in defaults (`localhost:17548`).

mod settings;

pub use settings::{BackendSettings, Config, LoggingConfig, DEFAULT_HOST, DEFAULT_PORT};

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Returns the default configuration directory.
///
/// - **Linux/macOS:** `~/.semandoc-mcp/`
/// - **Windows:** `%USERPROFILE%\.semandoc-mcp\`
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".semandoc-mcp"))
}

/// Returns the platform-specific default configuration file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|p| p.join("config.json"))
}

/// Loads and parses the configuration file.
///
/// If `path` is `None`, the platform-specific default location is tried and
/// built-in defaults are returned when no file exists there.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given configuration file cannot be found
/// - The file cannot be read
/// - The JSON is malformed
/// - Required fields are missing or invalid
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::NotFound {
                    path: p.to_path_buf(),
                });
            }
            p.to_path_buf()
        }
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(Config::default()),
        },
    };

    let contents = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;

    let config: Config = serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: config_path.clone(),
        source: e,
    })?;

    config.validate()?;

    Ok(config)
}

/// Resolved address of the document backend.
///
/// Built once at startup and shared read-only for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: String,
}

impl BackendConfig {
    /// Builds `http://{host}:{port}` without validating either part.
    #[must_use]
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            base_url: format!("http://{host}:{port}"),
        }
    }

    /// Resolves the backend address from CLI overrides and file settings.
    #[must_use]
    pub fn resolve(host: Option<&str>, port: Option<u16>, settings: &BackendSettings) -> Self {
        Self::new(
            host.unwrap_or(&settings.host),
            port.unwrap_or(settings.port),
        )
    }

    /// The base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}
