//! Tool implementations for datasmith
//!
//! Five operations over the shared [`DatasetStore`]: load a CSV into the
//! registry, describe a loaded dataset, normalize its column names, filter
//! rows out to a new CSV, and emit a SQL CREATE TABLE statement for it.

pub mod tools;

pub use tools::data::{
    CleanColumnNamesTool, DescribeTool, FilterSaveTool, LoadCsvTool, SqlSchemaTool,
};
pub use tools::default_tools;
