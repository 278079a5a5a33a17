//! inFakt MCP Server Entry Point
//!
//! Loads configuration, initializes logging and serves MCP over stdio.

use anyhow::{Context, Result};
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use infakt_mcp_server::core::{Config, McpServer, StdioTransport};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.logging.level);

    for warning in config.warnings() {
        warn!("{}", warning);
    }

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!("inFakt API: {}", config.api.base_url);
    if let Some(path) = &config.diagnostics.trace_file {
        info!("Diagnostics trace file: {}", path.display());
    }

    let server = McpServer::new(config).context("Failed to initialize server")?;

    info!(
        "Server initialized with {} tools",
        server.registry().tool_names().len()
    );

    StdioTransport::run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout carries the MCP protocol.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
