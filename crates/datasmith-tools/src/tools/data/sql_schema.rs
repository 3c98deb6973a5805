//! Schema tool: emit a CREATE TABLE statement for a loaded dataset

use async_trait::async_trait;
use datasmith_core::store::DatasetStore;
use datasmith_core::tools::base::{Tool, ToolError};
use datasmith_core::tools::types::{ToolCall, ToolParameter, ToolResult, ToolSchema};
use polars::prelude::*;
use std::sync::Arc;

use super::dataset_not_found;

/// Fixed mapping from an inferred column type to a SQL type keyword.
///
/// Integers map to INT, floats to FLOAT, booleans to BOOLEAN, dates and
/// datetimes to TIMESTAMP; everything else, strings included, falls back to
/// TEXT.
fn sql_type(dtype: &DataType) -> &'static str {
    if dtype.is_integer() {
        "INT"
    } else if dtype.is_float() {
        "FLOAT"
    } else {
        match dtype {
            DataType::Boolean => "BOOLEAN",
            DataType::Date | DataType::Datetime(_, _) => "TIMESTAMP",
            _ => "TEXT",
        }
    }
}

/// Tool for generating a SQL CREATE TABLE statement from a dataset's schema
///
/// Read-only, no file I/O: the statement is returned as text. Literal spaces
/// in column names are replaced with underscores so the identifiers stay
/// usable unquoted.
pub struct SqlSchemaTool {
    store: Arc<DatasetStore>,
}

impl SqlSchemaTool {
    /// Create a new schema tool backed by the given store
    pub fn new(store: Arc<DatasetStore>) -> Self {
        Self { store }
    }

    fn create_table_statement(frame: &DataFrame) -> String {
        let columns: Vec<String> = frame
            .get_columns()
            .iter()
            .map(|column| {
                let safe_name = column.name().as_str().replace(' ', "_");
                format!("    {safe_name} {}", sql_type(column.dtype()))
            })
            .collect();

        format!("CREATE TABLE my_table (\n{}\n);", columns.join(",\n"))
    }
}

#[async_trait]
impl Tool for SqlSchemaTool {
    fn name(&self) -> &str {
        "generate_sql_schema"
    }

    fn description(&self) -> &str {
        "Generate a SQL CREATE TABLE statement based on a dataset's columns and inferred \
         types. Use this to prepare ETL table creation."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![ToolParameter::string(
                "dataset_name",
                "Name of the dataset in memory",
            )],
        )
    }

    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        call.get_string("dataset_name").map(|_| ()).ok_or_else(|| {
            ToolError::InvalidArguments("Missing 'dataset_name' parameter".to_string())
        })
    }

    fn is_read_only(&self) -> bool {
        true
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let dataset_name = call.get_string("dataset_name").ok_or_else(|| {
            ToolError::InvalidArguments("Missing 'dataset_name' parameter".to_string())
        })?;

        let Some(frame) = self.store.get(&dataset_name) else {
            return Ok(ToolResult::error(
                &call.id,
                self.name(),
                dataset_not_found(&dataset_name),
            ));
        };

        Ok(ToolResult::success(
            &call.id,
            self.name(),
            Self::create_table_statement(&frame),
        ))
    }
}
