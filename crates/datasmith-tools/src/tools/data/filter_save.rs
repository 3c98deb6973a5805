//! Filter tool: apply a boolean row filter and export the subset as CSV

use async_trait::async_trait;
use datasmith_core::store::DatasetStore;
use datasmith_core::tools::base::{Tool, ToolError};
use datasmith_core::tools::types::{ToolCall, ToolParameter, ToolResult, ToolSchema};
use polars::prelude::*;
use polars::sql::sql_expr;
use std::fs::File;
use std::sync::Arc;
use tracing::info;

use super::dataset_not_found;

/// Tool for filtering a dataset and saving the result to a new CSV file
///
/// The filter is a SQL-style boolean expression over the dataset's column
/// names (comparisons, AND/OR/NOT, string literals), e.g.
/// `Total > 1000 AND Country = 'USA'`. An expression that does not parse or
/// does not evaluate against the dataset is reported as an error-text result
/// that quotes the expression; no file is written in that case and the stored
/// dataset is never mutated.
pub struct FilterSaveTool {
    store: Arc<DatasetStore>,
}

impl FilterSaveTool {
    /// Create a new filter tool backed by the given store
    pub fn new(store: Arc<DatasetStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for FilterSaveTool {
    fn name(&self) -> &str {
        "filter_and_save"
    }

    fn description(&self) -> &str {
        "Filter a dataset using a SQL-style boolean expression and save the result to a new \
         CSV file. Use this when the user wants a subset of the data exported."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![
                ToolParameter::string("dataset_name", "Name of the dataset to filter"),
                ToolParameter::string(
                    "query",
                    "Boolean filter expression over column names, e.g. \
                     \"Total > 1000 AND Country = 'USA'\"",
                ),
                ToolParameter::string(
                    "output_path",
                    "Path where the filtered CSV will be saved, e.g. 'data/high_value_sales.csv'",
                ),
            ],
        )
    }

    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        for param in ["dataset_name", "query", "output_path"] {
            if call.get_string(param).is_none() {
                return Err(ToolError::InvalidArguments(format!(
                    "Missing '{param}' parameter"
                )));
            }
        }
        Ok(())
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let dataset_name = call.get_string("dataset_name").ok_or_else(|| {
            ToolError::InvalidArguments("Missing 'dataset_name' parameter".to_string())
        })?;
        let query = call
            .get_string("query")
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'query' parameter".to_string()))?;
        let output_path = call.get_string("output_path").ok_or_else(|| {
            ToolError::InvalidArguments("Missing 'output_path' parameter".to_string())
        })?;

        let Some(frame) = self.store.get(&dataset_name) else {
            return Ok(ToolResult::error(
                &call.id,
                self.name(),
                dataset_not_found(&dataset_name),
            ));
        };

        // Parse and evaluation failures are both recoverable: the caller can
        // rephrase the expression, so they flatten to error text rather than
        // a hard failure. The output file is only created after both succeed.
        let expr = match sql_expr(&query) {
            Ok(expr) => expr,
            Err(e) => {
                return Ok(ToolResult::error(
                    &call.id,
                    self.name(),
                    format!("Error applying filter '{query}': {e}"),
                ));
            }
        };

        let mut filtered = match frame.clone().lazy().filter(expr).collect() {
            Ok(filtered) => filtered,
            Err(e) => {
                return Ok(ToolResult::error(
                    &call.id,
                    self.name(),
                    format!("Error applying filter '{query}': {e}"),
                ));
            }
        };

        let mut file = File::create(&output_path).map_err(|e| {
            ToolError::ExecutionFailed(format!("Failed to create '{output_path}': {e}"))
        })?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut filtered)
            .map_err(|e| {
                ToolError::ExecutionFailed(format!("Failed to write '{output_path}': {e}"))
            })?;

        let rows = filtered.height();
        info!(dataset = %dataset_name, rows, output = %output_path, "saved filtered subset");

        Ok(ToolResult::success(
            &call.id,
            self.name(),
            format!("Saved filtered data from '{dataset_name}' ({rows} rows) to '{output_path}'."),
        )
        .with_metadata("rows", rows as u64))
    }
}
