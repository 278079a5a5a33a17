//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A lookup table from tool name to handler
//! - Tool metadata for listing
//! - Dispatch that turns every failure into an error-flagged envelope

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use tracing::{info, instrument, warn};

use crate::domains::infakt::InfaktClient;

use super::definitions::all_tools;
use super::error::{ToolError, ToolResult};
use super::handlers::{ToolDefinition, ToolOutput};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    client: Arc<InfaktClient>,
    tools: HashMap<&'static str, ToolDefinition>,
}

impl ToolRegistry {
    /// Create a registry dispatching to the given client.
    pub fn new(client: Arc<InfaktClient>) -> Self {
        let tools = all_tools()
            .into_iter()
            .map(|definition| (definition.name(), definition))
            .collect();

        Self { client, tools }
    }

    /// Get all tool names, sorted.
    pub fn tool_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.tools.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Get all tools as Tool models (metadata), sorted by name.
    pub fn get_all_tools(&self) -> Vec<Tool> {
        self.tool_names()
            .into_iter()
            .filter_map(|name| self.tools.get(name))
            .map(|definition| definition.tool().clone())
            .collect()
    }

    /// Dispatch a tool call.
    ///
    /// Never fails: unknown tools, malformed arguments and API errors all come
    /// back as an error-flagged text envelope.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        info!("Tool called: {}", name);

        match self.dispatch(name, arguments.unwrap_or_default()).await {
            Ok(output) => output.into_result(),
            Err(e) => {
                warn!("Tool '{}' failed: {}", name, e);
                error_result(&e)
            }
        }
    }

    async fn dispatch(&self, name: &str, arguments: JsonObject) -> ToolResult<ToolOutput> {
        let definition = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::unknown_tool(name))?;

        definition.execute(self.client.clone(), arguments).await
    }
}

/// Render an error the way every tool reports it.
fn error_result(error: &ToolError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("Error: {}", error))])
}
