//! Tool-specific error types.

use thiserror::Error;

use crate::domains::infakt::InfaktError;

/// Result type for tool handlers.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors that can occur during tool dispatch.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Arguments did not match the tool's parameter schema.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The inFakt client failed.
    #[error(transparent)]
    Api(#[from] InfaktError),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ToolError::unknown_tool("foo").to_string(), "Unknown tool: foo");
        assert_eq!(
            ToolError::invalid_arguments("missing field `id`").to_string(),
            "Invalid arguments: missing field `id`"
        );

        let api: ToolError = InfaktError::backend(404, "Not found").into();
        assert_eq!(api.to_string(), "inFakt API error (404): Not found");
    }
}
