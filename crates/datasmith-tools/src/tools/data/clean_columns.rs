//! Clean tool: normalize a dataset's column labels in place

use async_trait::async_trait;
use datasmith_core::store::DatasetStore;
use datasmith_core::tools::base::{Tool, ToolError};
use datasmith_core::tools::types::{ToolCall, ToolParameter, ToolResult, ToolSchema};
use std::sync::Arc;
use tracing::info;

use super::dataset_not_found;

/// Normalize a single column label: strip leading/trailing whitespace,
/// lowercase, and replace interior literal spaces with underscores. Tabs and
/// other whitespace inside the label are left alone.
fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "_")
}

/// Tool for rewriting a dataset's column names
///
/// The only operation that mutates a stored dataset: the renamed frame is
/// written back into the store under the same name. Applying it twice is a
/// no-op after the first pass.
pub struct CleanColumnNamesTool {
    store: Arc<DatasetStore>,
}

impl CleanColumnNamesTool {
    /// Create a new clean tool backed by the given store
    pub fn new(store: Arc<DatasetStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for CleanColumnNamesTool {
    fn name(&self) -> &str {
        "clean_column_names"
    }

    fn description(&self) -> &str {
        "Clean column names for a dataset: lowercased, stripped, and spaces replaced with \
         underscores. Useful as a first step before SQL/ETL."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![ToolParameter::string(
                "dataset_name",
                "Name of the dataset previously loaded in memory",
            )],
        )
    }

    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        call.get_string("dataset_name").map(|_| ()).ok_or_else(|| {
            ToolError::InvalidArguments("Missing 'dataset_name' parameter".to_string())
        })
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let dataset_name = call.get_string("dataset_name").ok_or_else(|| {
            ToolError::InvalidArguments("Missing 'dataset_name' parameter".to_string())
        })?;

        let Some(mut frame) = self.store.get(&dataset_name) else {
            return Ok(ToolResult::error(
                &call.id,
                self.name(),
                dataset_not_found(&dataset_name),
            ));
        };

        let cleaned: Vec<String> = frame
            .get_column_names_str()
            .iter()
            .map(|label| normalize_label(label))
            .collect();

        // Two distinct labels can collapse to the same cleaned name; polars
        // rejects the duplicate and the store is left untouched.
        frame.set_column_names(cleaned.clone()).map_err(|e| {
            ToolError::ExecutionFailed(format!(
                "Failed to rename columns of '{dataset_name}': {e}"
            ))
        })?;

        info!(dataset = %dataset_name, "cleaned column names");
        self.store.insert(&dataset_name, frame);

        Ok(ToolResult::success(
            &call.id,
            self.name(),
            format!(
                "Cleaned column names for dataset '{dataset_name}'. New columns: [{}]",
                cleaned.join(", ")
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn create_tool_call(id: &str, name: &str, args: serde_json::Value) -> ToolCall {
        let arguments = match args {
            serde_json::Value::Object(map) => map.into_iter().collect(),
            _ => HashMap::new(),
        };
        ToolCall::new(id.to_string(), name.to_string(), arguments)
    }

    #[test]
    fn label_normalization() {
        assert_eq!(normalize_label("Total Sales"), "total_sales");
        assert_eq!(normalize_label("Country "), "country");
        assert_eq!(normalize_label("  Mixed  Case  "), "mixed__case");
        // Only the literal space character is replaced
        assert_eq!(normalize_label("a\tb"), "a\tb");
    }

    #[tokio::test]
    async fn cleans_and_writes_back() {
        let store = Arc::new(DatasetStore::new());
        let frame = df!("Total Sales" => [1i64, 2], "Country " => ["USA", "DE"]).unwrap();
        store.insert("sales", frame);
        let tool = CleanColumnNamesTool::new(store.clone());

        let call = create_tool_call("c1", "clean_column_names", json!({"dataset_name": "sales"}));
        let result = tool.execute(&call).await.unwrap();

        assert!(result.success);
        assert!(
            result
                .output
                .as_deref()
                .unwrap()
                .contains("[total_sales, country]")
        );
        assert_eq!(
            store.get("sales").unwrap().get_column_names_str(),
            vec!["total_sales", "country"]
        );
    }

    #[tokio::test]
    async fn cleaning_twice_is_idempotent() {
        let store = Arc::new(DatasetStore::new());
        let frame = df!("Total Sales" => [1i64], "Country " => ["USA"]).unwrap();
        store.insert("sales", frame);
        let tool = CleanColumnNamesTool::new(store.clone());

        let call = create_tool_call("c2", "clean_column_names", json!({"dataset_name": "sales"}));
        tool.execute(&call).await.unwrap();
        let once = store.get("sales").unwrap().get_column_names_str().join(",");
        tool.execute(&call).await.unwrap();
        let twice = store.get("sales").unwrap().get_column_names_str().join(",");

        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn missing_dataset_yields_error_text_without_mutation() {
        let store = Arc::new(DatasetStore::new());
        let tool = CleanColumnNamesTool::new(store.clone());

        let call = create_tool_call("c3", "clean_column_names", json!({"dataset_name": "ghost"}));
        let result = tool.execute(&call).await.unwrap();

        assert!(!result.success);
        assert!(result.error.as_deref().unwrap().contains("'ghost'"));
        assert!(store.is_empty());
    }
}
