//! Datasmith tools, organized by category
//!
//! - `data`: the tabular data operations (load, describe, clean, filter,
//!   schema)

pub mod data;

pub use data::{CleanColumnNamesTool, DescribeTool, FilterSaveTool, LoadCsvTool, SqlSchemaTool};

use datasmith_core::store::DatasetStore;
use datasmith_core::tools::Tool;
use std::sync::Arc;

/// Get all default tools, wired to the given dataset store
pub fn default_tools(store: Arc<DatasetStore>) -> Vec<Arc<dyn Tool>> {
    data::data_tools(store)
}
