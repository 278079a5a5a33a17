//! inFakt MCP Server Library
//!
//! Exposes the inFakt invoicing REST API to Model Context Protocol clients as
//! a set of tools.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server handler and the
//!   stdio transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **infakt**: HTTP client, request payloads and line item pricing
//!   - **tools**: Tool definitions, registry and dispatch
//!
//! # Example
//!
//! ```rust,no_run
//! use infakt_mcp_server::core::{Config, McpServer, StdioTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config)?;
//!     StdioTransport::run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
