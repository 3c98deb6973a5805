//! Tabular data tools
//!
//! The operation surface exposed to the agent loop. Every tool takes only
//! required string parameters and returns a single flattened text result;
//! all of them except `load_csv` require their target dataset to already be
//! in the store and report absence as an error-text result.

pub mod clean_columns;
pub mod describe;
pub mod filter_save;
pub mod load_csv;
pub mod sql_schema;

pub use clean_columns::CleanColumnNamesTool;
pub use describe::DescribeTool;
pub use filter_save::FilterSaveTool;
pub use load_csv::LoadCsvTool;
pub use sql_schema::SqlSchemaTool;

use datasmith_core::store::DatasetStore;
use datasmith_core::tools::Tool;
use std::sync::Arc;

/// Get all data tools, wired to the given dataset store
pub fn data_tools(store: Arc<DatasetStore>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(LoadCsvTool::new(store.clone())),
        Arc::new(DescribeTool::new(store.clone())),
        Arc::new(CleanColumnNamesTool::new(store.clone())),
        Arc::new(FilterSaveTool::new(store.clone())),
        Arc::new(SqlSchemaTool::new(store)),
    ]
}

/// Error-text result message for a dataset name that is not in the store.
///
/// Shared by every tool except `load_csv` so the caller always sees the same
/// recovery hint.
pub(crate) fn dataset_not_found(name: &str) -> String {
    format!("Dataset '{name}' not found. Load it first with load_csv.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tool_set_has_five_operations() {
        let store = Arc::new(DatasetStore::new());
        let tools = data_tools(store);
        let mut names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "clean_column_names",
                "describe_data",
                "filter_and_save",
                "generate_sql_schema",
                "load_csv",
            ]
        );
    }
}
