// crates/fred-mcp/src/config.rs
// ============================================================================
// Module: fred-mcp Configuration
// Description: Configuration loading and validation for the MCP server.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from an optional TOML file with strict size
//! limits; every field has a built-in default so the server runs with no
//! file at all. Invalid configuration fails closed before the server starts.
//! The upstream credential is deliberately not part of the file; it comes
//! from the environment only (see [`crate::credential`]).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "fred-mcp.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "FRED_MCP_CONFIG";
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;
/// Default upstream base URL for the FRED API.
const DEFAULT_BASE_URL: &str = "https://api.stlouisfed.org/fred";
/// Default upstream request timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Minimum allowed upstream request timeout in milliseconds.
const MIN_TIMEOUT_MS: u64 = 1_000;
/// Maximum allowed upstream request timeout in milliseconds.
const MAX_TIMEOUT_MS: u64 = 120_000;
/// Default maximum upstream response size in bytes.
const DEFAULT_MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;
/// Maximum allowed upstream response size in bytes.
const MAX_MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;
/// Default user agent for upstream requests.
const DEFAULT_USER_AGENT: &str = "fred-mcp/0.1";
/// Default maximum JSON-RPC request body size in bytes.
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
/// Maximum allowed JSON-RPC request body size in bytes.
const MAX_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// fred-mcp server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FredMcpConfig {
    /// Server transport configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream API configuration.
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

/// Server transport selection and limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Transport used to serve JSON-RPC requests.
    #[serde(default)]
    pub transport: ServerTransport,
    /// Bind address for the HTTP transport.
    #[serde(default)]
    pub bind: Option<String>,
    /// Maximum allowed request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: ServerTransport::default(),
            bind: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Supported server transports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerTransport {
    /// Framed JSON-RPC over stdin/stdout.
    #[default]
    Stdio,
    /// JSON-RPC over HTTP POST.
    Http,
}

/// Upstream API client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the upstream API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
    /// User agent string for outbound requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Allow cleartext HTTP base URLs (disabled by default; loopback stubs).
    #[serde(default)]
    pub allow_http: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            allow_http: false,
        }
    }
}

// ============================================================================
// SECTION: Serde Defaults
// ============================================================================

/// Default for [`ServerConfig::max_body_bytes`].
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Default for [`UpstreamConfig::base_url`].
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Default for [`UpstreamConfig::timeout_ms`].
const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Default for [`UpstreamConfig::max_response_bytes`].
const fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

/// Default for [`UpstreamConfig::user_agent`].
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

// ============================================================================
// SECTION: Loading and Validation
// ============================================================================

impl FredMcpConfig {
    /// Loads configuration from an explicit path, the `FRED_MCP_CONFIG`
    /// override, or the default file; built-in defaults apply when no file
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a selected file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved: Option<PathBuf> = match path {
            Some(explicit) => Some(explicit.to_path_buf()),
            None => match env::var(CONFIG_ENV_VAR) {
                Ok(value) if !value.is_empty() => Some(PathBuf::from(value)),
                _ => {
                    let default = PathBuf::from(DEFAULT_CONFIG_NAME);
                    default.exists().then_some(default)
                }
            },
        };
        let Some(file) = resolved else {
            return Ok(Self::default());
        };
        Self::from_file(&file)
    }

    /// Loads and parses a configuration file with a strict size cap.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is missing, oversized, or not
    /// valid TOML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let metadata =
            fs::metadata(path).map_err(|err| ConfigError::Read(err.to_string()))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::TooLarge(metadata.len()));
        }
        let text = fs::read_to_string(path).map_err(|err| ConfigError::Read(err.to_string()))?;
        toml::from_str(&text).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Validates limits and transport requirements.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&self.upstream.timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "upstream.timeout_ms must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"
            )));
        }
        if self.upstream.max_response_bytes == 0
            || self.upstream.max_response_bytes > MAX_MAX_RESPONSE_BYTES
        {
            return Err(ConfigError::Invalid(format!(
                "upstream.max_response_bytes must be between 1 and {MAX_MAX_RESPONSE_BYTES}"
            )));
        }
        if self.upstream.user_agent.is_empty() {
            return Err(ConfigError::Invalid("upstream.user_agent must not be empty".to_string()));
        }
        let url = Url::parse(&self.upstream.base_url)
            .map_err(|_| ConfigError::Invalid("upstream.base_url is not a valid URL".to_string()))?;
        match url.scheme() {
            "https" => {}
            "http" if self.upstream.allow_http => {}
            _ => {
                return Err(ConfigError::Invalid(
                    "upstream.base_url must use https (or http with allow_http)".to_string(),
                ));
            }
        }
        if self.server.max_body_bytes == 0 || self.server.max_body_bytes > MAX_MAX_BODY_BYTES {
            return Err(ConfigError::Invalid(format!(
                "server.max_body_bytes must be between 1 and {MAX_MAX_BODY_BYTES}"
            )));
        }
        if self.server.transport == ServerTransport::Http {
            let bind = self.server.bind.as_ref().ok_or_else(|| {
                ConfigError::Invalid("server.bind is required for the http transport".to_string())
            })?;
            bind.parse::<SocketAddr>().map_err(|_| {
                ConfigError::Invalid("server.bind is not a valid socket address".to_string())
            })?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("config read failed: {0}")]
    Read(String),
    /// Config file exceeds the size cap.
    #[error("config file too large: {0} bytes")]
    TooLarge(u64),
    /// Config file is not valid TOML.
    #[error("config parse failed: {0}")]
    Parse(String),
    /// Config violates a validation rule.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
