//! Tool handler plumbing.
//!
//! A [`ToolDefinition`] pairs the MCP tool metadata with a type-erased
//! [`ToolHandler`]. Definitions are built from plain async functions taking
//! the shared client and a typed parameter struct; the parameter type supplies
//! both the JSON Schema advertised to clients and the deserializer applied to
//! incoming arguments.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use rmcp::handler::server::tool::schema_for_type;
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domains::infakt::{InfaktClient, models::Record};

use super::error::{ToolError, ToolResult};

/// Output of a successful tool call, rendered into a text envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// A record or list of records, rendered as pretty JSON.
    Json(Value),
    /// A freshly created record.
    Created {
        resource: &'static str,
        record: Record,
    },
    /// An updated record.
    Updated {
        resource: &'static str,
        record: Record,
    },
    /// A deleted record.
    Deleted { resource: &'static str, id: u64 },
    /// An invoice handed to the backend for email delivery.
    Sent { id: u64 },
}

impl ToolOutput {
    /// Wrap a list of records.
    pub fn records(records: Vec<Record>) -> Self {
        Self::Json(Value::Array(records))
    }

    /// Render the text shown to the caller.
    pub fn render(&self) -> String {
        match self {
            Self::Json(value) => pretty(value),
            Self::Created { resource, record } => {
                format!("{} created successfully:\n{}", resource, pretty(record))
            }
            Self::Updated { resource, record } => {
                format!("{} updated successfully:\n{}", resource, pretty(record))
            }
            Self::Deleted { resource, id } => format!("{} {} deleted successfully", resource, id),
            Self::Sent { id } => format!("Invoice {} sent successfully via email", id),
        }
    }

    /// Convert into the MCP response envelope.
    pub fn into_result(self) -> CallToolResult {
        CallToolResult::success(vec![Content::text(self.render())])
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Type-erased tool handler.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with raw JSON arguments.
    async fn execute(
        &self,
        client: Arc<InfaktClient>,
        arguments: JsonObject,
    ) -> ToolResult<ToolOutput>;
}

/// Adapts an async function over typed parameters to [`ToolHandler`].
struct TypedHandler<P, F> {
    handler: F,
    _params: PhantomData<fn() -> P>,
}

#[async_trait::async_trait]
impl<P, F, Fut> ToolHandler for TypedHandler<P, F>
where
    P: DeserializeOwned + Send + 'static,
    F: Fn(Arc<InfaktClient>, P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ToolResult<ToolOutput>> + Send + 'static,
{
    async fn execute(
        &self,
        client: Arc<InfaktClient>,
        arguments: JsonObject,
    ) -> ToolResult<ToolOutput> {
        let params: P = serde_json::from_value(Value::Object(arguments))
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
        (self.handler)(client, params).await
    }
}

/// A registered tool: metadata plus handler.
#[derive(Clone)]
pub struct ToolDefinition {
    name: &'static str,
    tool: Tool,
    handler: Arc<dyn ToolHandler>,
}

impl ToolDefinition {
    /// Build a definition whose input schema is derived from `P`.
    pub fn new<P, F, Fut>(name: &'static str, description: &'static str, handler: F) -> Self
    where
        P: JsonSchema + DeserializeOwned + Send + 'static,
        F: Fn(Arc<InfaktClient>, P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ToolResult<ToolOutput>> + Send + 'static,
    {
        let tool = Tool {
            name: name.into(),
            description: Some(description.into()),
            input_schema: schema_for_type::<P>().into(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        };

        Self {
            name,
            tool,
            handler: Arc::new(TypedHandler {
                handler,
                _params: PhantomData,
            }),
        }
    }

    /// Tool name as registered in MCP.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Tool metadata.
    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    /// Run the handler.
    pub async fn execute(
        &self,
        client: Arc<InfaktClient>,
        arguments: JsonObject,
    ) -> ToolResult<ToolOutput> {
        self.handler.execute(client, arguments).await
    }
}

impl std::fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
