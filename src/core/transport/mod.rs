//! Transport layer for the MCP server.
//!
//! MCP clients launch this server as a subprocess and speak line-delimited
//! JSON-RPC over stdin/stdout. Logs therefore go to stderr only.

mod error;
pub mod stdio;

pub use error::{TransportError, TransportResult};
pub use stdio::StdioTransport;
