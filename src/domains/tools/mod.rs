//! Tools domain module.
//!
//! Every inFakt operation is exposed to MCP clients as a tool.
//!
//! ## Architecture
//!
//! - `definitions/` - Tool metadata and handlers, one file per resource
//! - `handlers.rs` - Typed handler adapter and response envelopes
//! - `registry.rs` - Name to handler lookup and dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add a name constant and an async handler to the resource file
//! 2. Register it in that file's `tools()`
//!
//! The registry and the server pick it up from `definitions::all_tools()`.

pub mod definitions;
mod error;
mod handlers;
mod registry;

pub use error::{ToolError, ToolResult};
pub use handlers::{ToolDefinition, ToolHandler, ToolOutput};
pub use registry::ToolRegistry;
