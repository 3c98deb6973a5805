//! Tool execution engine

use crate::error::{DatasmithError, DatasmithResult};
use crate::tools::base::Tool;
use crate::tools::types::{ToolCall, ToolResult, ToolSchema};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// Tool executor that manages and executes tools
///
/// Dispatch is strictly sequential: the surrounding loop issues one call at
/// a time, so there is no parallel path here.
pub struct ToolExecutor {
    tools: HashMap<String, Arc<dyn Tool>>,
    max_execution_time: Duration,
}

impl ToolExecutor {
    /// Create a new tool executor
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            max_execution_time: Duration::from_secs(60),
        }
    }

    /// Create a tool executor with a custom default timeout
    pub fn with_max_execution_time(max_execution_time: Duration) -> Self {
        Self {
            tools: HashMap::new(),
            max_execution_time,
        }
    }

    /// Register a tool
    pub fn register_tool(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Register multiple tools
    pub fn register_tools(&mut self, tools: Vec<Arc<dyn Tool>>) {
        for tool in tools {
            self.register_tool(tool);
        }
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Get all registered tool names, sorted for stable output
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a tool is registered
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Execute a single tool call
    pub async fn execute_tool(&self, call: &ToolCall) -> ToolResult {
        let tool = match self.tools.get(&call.name) {
            Some(tool) => tool,
            None => {
                return ToolResult::error(
                    &call.id,
                    &call.name,
                    format!("Tool '{}' not found", call.name),
                );
            }
        };

        debug!(tool = %call.name, call_id = %call.id, "dispatching tool call");

        let execution_timeout = tool
            .max_execution_duration()
            .unwrap_or(self.max_execution_time);

        match timeout(execution_timeout, tool.execute_with_timing(call)).await {
            Ok(result) => result,
            Err(_) => ToolResult::error(
                &call.id,
                &call.name,
                format!("Tool execution timed out after {execution_timeout:?}"),
            ),
        }
    }

    /// Execute multiple tool calls, one at a time, in order
    pub async fn execute_tools(&self, calls: &[ToolCall]) -> Vec<ToolResult> {
        let mut results = Vec::with_capacity(calls.len());

        for call in calls {
            let result = self.execute_tool(call).await;
            results.push(result);
        }

        results
    }

    /// Validate tool calls before dispatch
    pub fn validate_calls(&self, calls: &[ToolCall]) -> DatasmithResult<()> {
        for call in calls {
            let tool = self
                .tools
                .get(&call.name)
                .ok_or_else(|| DatasmithError::tool(&call.name, "Tool not found"))?;

            tool.validate(call)
                .map_err(|e| DatasmithError::tool(&call.name, e.to_string()))?;
        }

        Ok(())
    }

    /// Get tool schemas for all registered tools, sorted by name
    pub fn tool_schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self.tools.values().map(|tool| tool.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::base::ToolError;
    use crate::tools::types::ToolParameter;
    use async_trait::async_trait;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo back the 'message' argument"
        }

        fn schema(&self) -> ToolSchema {
            ToolSchema::new(
                self.name(),
                self.description(),
                vec![ToolParameter::string("message", "Text to echo")],
            )
        }

        fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
            call.get_string("message")
                .map(|_| ())
                .ok_or_else(|| ToolError::InvalidArguments("Missing 'message' parameter".into()))
        }

        async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
            let message = call
                .get_string("message")
                .ok_or_else(|| ToolError::InvalidArguments("Missing 'message' parameter".into()))?;
            Ok(ToolResult::success(&call.id, self.name(), message))
        }
    }

    fn call(id: &str, name: &str, args: serde_json::Value) -> ToolCall {
        let arguments = match args {
            serde_json::Value::Object(map) => map.into_iter().collect(),
            _ => HashMap::new(),
        };
        ToolCall::new(id.to_string(), name.to_string(), arguments)
    }

    #[tokio::test]
    async fn executes_registered_tool() {
        let mut executor = ToolExecutor::new();
        executor.register_tool(Arc::new(EchoTool));

        let result = executor
            .execute_tool(&call("c1", "echo", serde_json::json!({"message": "hi"})))
            .await;
        assert!(result.success);
        assert_eq!(result.output.as_deref(), Some("hi"));
        assert!(result.execution_time_ms.is_some());
    }

    #[tokio::test]
    async fn unknown_tool_yields_error_result() {
        let executor = ToolExecutor::new();
        let result = executor
            .execute_tool(&call("c1", "nope", serde_json::json!({})))
            .await;
        assert!(!result.success);
        assert!(result.error.as_deref().unwrap().contains("nope"));
    }

    #[tokio::test]
    async fn invalid_arguments_flatten_to_error_result() {
        let mut executor = ToolExecutor::new();
        executor.register_tool(Arc::new(EchoTool));

        let result = executor
            .execute_tool(&call("c1", "echo", serde_json::json!({})))
            .await;
        assert!(!result.success);
        assert!(result.error.as_deref().unwrap().contains("message"));
    }

    #[test]
    fn validate_calls_rejects_unknown_and_malformed() {
        let mut executor = ToolExecutor::new();
        executor.register_tool(Arc::new(EchoTool));

        assert!(
            executor
                .validate_calls(&[call("c1", "missing", serde_json::json!({}))])
                .is_err()
        );
        assert!(
            executor
                .validate_calls(&[call("c2", "echo", serde_json::json!({}))])
                .is_err()
        );
        assert!(
            executor
                .validate_calls(&[call("c3", "echo", serde_json::json!({"message": "ok"}))])
                .is_ok()
        );
    }

    #[tokio::test]
    async fn execute_tools_preserves_order() {
        let mut executor = ToolExecutor::new();
        executor.register_tool(Arc::new(EchoTool));

        let calls = vec![
            call("c1", "echo", serde_json::json!({"message": "one"})),
            call("c2", "echo", serde_json::json!({"message": "two"})),
        ];
        let results = executor.execute_tools(&calls).await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].output.as_deref(), Some("one"));
        assert_eq!(results[1].output.as_deref(), Some("two"));
    }
}
