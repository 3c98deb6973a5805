//! Load tool: read a CSV file into the dataset store

use async_trait::async_trait;
use datasmith_core::store::DatasetStore;
use datasmith_core::tools::base::{Tool, ToolError};
use datasmith_core::tools::types::{ToolCall, ToolParameter, ToolResult, ToolSchema};
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// How many rows the CSV reader samples when inferring column types.
const INFER_SCHEMA_ROWS: usize = 10_000;

/// Tool for loading a delimited text file into the registry
///
/// Column types are inferred by the CSV reader: per column it tries integer,
/// then float, then boolean, then date/datetime (`try_parse_dates` is on),
/// and falls back to string. Loading under a name that is already taken
/// silently replaces the prior dataset.
pub struct LoadCsvTool {
    store: Arc<DatasetStore>,
}

impl LoadCsvTool {
    /// Create a new load tool backed by the given store
    pub fn new(store: Arc<DatasetStore>) -> Self {
        Self { store }
    }

    /// Read a CSV file with header and inferred column types.
    ///
    /// Parse failures are hard errors: the file exists but its content is
    /// malformed, which the caller cannot recover from by rephrasing.
    fn read_frame(path: &Path) -> Result<DataFrame, ToolError> {
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .map_parse_options(|opts| opts.with_try_parse_dates(true))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| {
                ToolError::ExecutionFailed(format!("Failed to open '{}': {e}", path.display()))
            })?
            .finish()
            .map_err(|e| {
                ToolError::ExecutionFailed(format!("Failed to parse '{}': {e}", path.display()))
            })
    }
}

#[async_trait]
impl Tool for LoadCsvTool {
    fn name(&self) -> &str {
        "load_csv"
    }

    fn description(&self) -> &str {
        "Load a CSV file from a given path and store it in memory under a dataset name. \
         Use this when the user wants to work with a specific CSV."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![
                ToolParameter::string(
                    "file_path",
                    "Path to the CSV file on disk, e.g. 'data/sales.csv'",
                ),
                ToolParameter::string(
                    "dataset_name",
                    "Name under which the dataset will be stored in memory",
                ),
            ],
        )
    }

    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        for param in ["file_path", "dataset_name"] {
            if call.get_string(param).is_none() {
                return Err(ToolError::InvalidArguments(format!(
                    "Missing '{param}' parameter"
                )));
            }
        }
        Ok(())
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let file_path = call.get_string("file_path").ok_or_else(|| {
            ToolError::InvalidArguments("Missing 'file_path' parameter".to_string())
        })?;
        let dataset_name = call.get_string("dataset_name").ok_or_else(|| {
            ToolError::InvalidArguments("Missing 'dataset_name' parameter".to_string())
        })?;

        let path = Path::new(&file_path);
        if !path.exists() {
            return Ok(ToolResult::error(
                &call.id,
                self.name(),
                format!("File not found: {file_path}"),
            ));
        }

        let frame = Self::read_frame(path)?;
        let (rows, cols) = frame.shape();
        info!(dataset = %dataset_name, rows, cols, "loaded dataset");
        self.store.insert(&dataset_name, frame);

        Ok(ToolResult::success(
            &call.id,
            self.name(),
            format!(
                "Loaded dataset '{dataset_name}' from '{file_path}' with shape ({rows}, {cols})."
            ),
        )
        .with_metadata("rows", rows as u64)
        .with_metadata("columns", cols as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn create_tool_call(id: &str, name: &str, args: serde_json::Value) -> ToolCall {
        let arguments = match args {
            serde_json::Value::Object(map) => map.into_iter().collect(),
            _ => HashMap::new(),
        };
        ToolCall::new(id.to_string(), name.to_string(), arguments)
    }

    fn write_sales_csv(dir: &TempDir) -> String {
        let path = dir.path().join("sales.csv");
        std::fs::write(
            &path,
            "Total,Country\n500,USA\n1500,Germany\n800,USA\n",
        )
        .unwrap();
        path.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn loads_csv_into_store() {
        let dir = TempDir::new().unwrap();
        let path = write_sales_csv(&dir);
        let store = Arc::new(DatasetStore::new());
        let tool = LoadCsvTool::new(store.clone());

        let call = create_tool_call(
            "t1",
            "load_csv",
            json!({"file_path": path, "dataset_name": "sales"}),
        );
        let result = tool.execute(&call).await.unwrap();

        assert!(result.success);
        assert!(result.output.as_deref().unwrap().contains("'sales'"));
        assert!(result.output.as_deref().unwrap().contains("(3, 2)"));

        let frame = store.get("sales").unwrap();
        assert_eq!(frame.shape(), (3, 2));
        // Numeric column inferred as integer, not text
        assert!(frame.column("Total").unwrap().dtype().is_integer());
    }

    #[tokio::test]
    async fn missing_file_is_reported_not_raised() {
        let store = Arc::new(DatasetStore::new());
        let tool = LoadCsvTool::new(store.clone());

        let call = create_tool_call(
            "t2",
            "load_csv",
            json!({"file_path": "/no/such/file.csv", "dataset_name": "sales"}),
        );
        let result = tool.execute(&call).await.unwrap();

        assert!(!result.success);
        assert!(
            result
                .error
                .as_deref()
                .unwrap()
                .contains("File not found: /no/such/file.csv")
        );
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn reloading_same_path_overwrites_entry() {
        let dir = TempDir::new().unwrap();
        let path = write_sales_csv(&dir);
        let store = Arc::new(DatasetStore::new());
        let tool = LoadCsvTool::new(store.clone());

        let call = create_tool_call(
            "t3",
            "load_csv",
            json!({"file_path": path, "dataset_name": "sales"}),
        );
        tool.execute(&call).await.unwrap();
        let first = store.get("sales").unwrap();
        tool.execute(&call).await.unwrap();
        let second = store.get("sales").unwrap();

        assert_eq!(store.len(), 1);
        assert!(first.equals(&second));
    }

    #[tokio::test]
    async fn validate_requires_both_parameters() {
        let store = Arc::new(DatasetStore::new());
        let tool = LoadCsvTool::new(store);

        let call = create_tool_call("t4", "load_csv", json!({"file_path": "x.csv"}));
        assert!(tool.validate(&call).is_err());

        let call = create_tool_call(
            "t5",
            "load_csv",
            json!({"file_path": "x.csv", "dataset_name": "d"}),
        );
        assert!(tool.validate(&call).is_ok());
    }
}
