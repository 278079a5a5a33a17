//! Configuration management for the MCP server.
//!
//! Configuration is read once at startup from environment variables, after an
//! optional `.env` file has been merged into the process environment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::{Error, Result};
use crate::domains::infakt::DEFAULT_BASE_URL;
use crate::domains::infakt::models::DEFAULT_PAGE_SIZE;

/// File name of the diagnostics trace when enabled without an explicit path.
const DEFAULT_TRACE_FILE: &str = ".infakt-mcp-debug.log";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// inFakt API access.
    pub api: ApiConfig,

    /// Optional diagnostics trace.
    pub diagnostics: DiagnosticsConfig,

    /// Problems found while loading, reported once logging is up.
    #[serde(skip)]
    warnings: Vec<String>,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported in logs.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// inFakt API access configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API key sent with every request.
    #[serde(skip_serializing, default)]
    pub api_key: String,

    /// Base URL of the REST API.
    pub base_url: String,

    /// Page size applied to list calls without an explicit `limit`.
    pub default_page_size: u32,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("default_page_size", &self.default_page_size)
            .finish()
    }
}

/// Diagnostics trace configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Append-only JSON-lines trace file. `None` disables the trace.
    pub trace_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails when `INFAKT_API_KEY` is missing or empty.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut warnings = Vec::new();

        let api_key = var("INFAKT_API_KEY")
            .ok_or_else(|| Error::config("INFAKT_API_KEY environment variable is required"))?;

        let base_url = var("INFAKT_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let default_page_size = match var("INFAKT_DEFAULT_PAGE_SIZE") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    warnings.push(format!(
                        "Invalid INFAKT_DEFAULT_PAGE_SIZE '{}', using {}",
                        raw, DEFAULT_PAGE_SIZE
                    ));
                    DEFAULT_PAGE_SIZE
                }
            },
            None => DEFAULT_PAGE_SIZE,
        };

        let trace_file = var("INFAKT_DEBUG_LOG").and_then(|value| {
            match value.trim().to_lowercase().as_str() {
                "0" | "false" | "off" => None,
                "1" | "true" | "on" => Some(
                    var("HOME")
                        .map(PathBuf::from)
                        .unwrap_or_default()
                        .join(DEFAULT_TRACE_FILE),
                ),
                _ => Some(PathBuf::from(value.trim())),
            }
        });

        Ok(Self {
            server: ServerConfig {
                name: var("MCP_SERVER_NAME").unwrap_or_else(|| "infakt-mcp".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: var("MCP_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            },
            api: ApiConfig {
                api_key,
                base_url,
                default_page_size,
            },
            diagnostics: DiagnosticsConfig { trace_file },
            warnings,
        })
    }

    /// Warnings collected while loading, such as ignored invalid values.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
