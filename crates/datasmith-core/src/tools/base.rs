//! Base trait and error type for tools

use crate::error::DatasmithError;
use crate::tools::types::{ToolCall, ToolResult, ToolSchema};
use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Error type for tool operations
///
/// Only unrecovered failures travel through this type (malformed source
/// files, filesystem errors, missing parameters). Recoverable conditions
/// such as a dataset that is not loaded or a filter expression that does
/// not parse are returned as ordinary failed [`ToolResult`]s instead, so
/// the caller can react to them as normal tool output.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Invalid arguments provided to the tool
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Tool execution failed
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// Tool not found
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ToolError> for DatasmithError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::NotFound(name) => DatasmithError::tool(name, "Tool not found"),
            other => DatasmithError::tool("unknown", other.to_string()),
        }
    }
}

/// Base trait for all tools
///
/// Each tool has a schema for validation and an execution entry point that
/// flattens its outcome to a single string-typed result.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's unique name
    ///
    /// Tool names must be unique within an executor and follow the pattern:
    /// lowercase with underscores (e.g., "load_csv").
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// Included in the caller's prompt so the agent knows when to use the
    /// tool.
    fn description(&self) -> &str;

    /// Get the tool's JSON schema for input parameters
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with the given arguments
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError>;

    /// Validate the tool call arguments
    ///
    /// Default implementation does nothing. Override for custom validation.
    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        let _ = call;
        Ok(())
    }

    /// Get the maximum execution time
    fn max_execution_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs(60))
    }

    /// Whether this tool only reads data (no registry mutation, no file
    /// writes)
    fn is_read_only(&self) -> bool {
        false
    }

    /// Render the tool result for display to the user
    fn render_result(&self, result: &ToolResult) -> String {
        if result.success {
            result.output.clone().unwrap_or_default()
        } else {
            format!("Error: {}", result.error.clone().unwrap_or_default())
        }
    }

    /// Execute the tool with timing and error handling
    ///
    /// Hard failures from [`Tool::execute`] are flattened into a failed
    /// result here; nothing escapes as a panic or raw error.
    async fn execute_with_timing(&self, call: &ToolCall) -> ToolResult {
        let start_time = Instant::now();

        if let Err(err) = self.validate(call) {
            return ToolResult::error(&call.id, self.name(), err.to_string())
                .with_execution_time(start_time.elapsed().as_millis() as u64);
        }

        match self.execute(call).await {
            Ok(mut result) => {
                result.execution_time_ms = Some(start_time.elapsed().as_millis() as u64);
                result
            }
            Err(err) => ToolResult::error(&call.id, self.name(), err.to_string())
                .with_execution_time(start_time.elapsed().as_millis() as u64),
        }
    }
}
