//! Describe tool: structured summary of a loaded dataset

use async_trait::async_trait;
use datasmith_core::store::DatasetStore;
use datasmith_core::tools::base::{Tool, ToolError};
use datasmith_core::tools::types::{ToolCall, ToolParameter, ToolResult, ToolSchema};
use polars::prelude::*;
use std::fmt::Write as _;
use std::sync::Arc;

use super::dataset_not_found;

/// How many leading rows the report shows as records.
const HEAD_ROWS: usize = 5;

/// Per-column summary statistics, pandas `describe(include="all")` style.
///
/// Numeric columns get the full spread; other columns get count, unique and
/// the most frequent value. Anything not applicable stays `None` and renders
/// as an empty cell.
#[derive(Debug, Default)]
struct ColumnSummary {
    count: usize,
    unique: Option<usize>,
    mean: Option<f64>,
    std: Option<f64>,
    min: Option<f64>,
    q25: Option<f64>,
    median: Option<f64>,
    q75: Option<f64>,
    max: Option<f64>,
    top: Option<String>,
}

/// Tool for inspecting a loaded dataset
///
/// Read-only: reports columns, inferred types, null counts, shape, the first
/// five rows, and summary statistics.
pub struct DescribeTool {
    store: Arc<DatasetStore>,
}

impl DescribeTool {
    /// Create a new describe tool backed by the given store
    pub fn new(store: Arc<DatasetStore>) -> Self {
        Self { store }
    }

    fn summarize_column(frame: &DataFrame, series: &Series) -> PolarsResult<ColumnSummary> {
        let name = series.name().as_str();
        let mut summary = ColumnSummary {
            count: series.len() - series.null_count(),
            unique: series.n_unique().ok(),
            ..ColumnSummary::default()
        };

        let dtype = series.dtype();
        if dtype.is_integer() || dtype.is_float() {
            summary.mean = series.mean();
            summary.std = series.std(1);
            summary.min = series.min::<f64>()?;
            summary.max = series.max::<f64>()?;
            summary.median = series.median();

            let quartiles = frame
                .clone()
                .lazy()
                .select([
                    col(name)
                        .quantile(lit(0.25), QuantileMethod::Linear)
                        .alias("q25"),
                    col(name)
                        .quantile(lit(0.75), QuantileMethod::Linear)
                        .alias("q75"),
                ])
                .collect()?;
            summary.q25 = quartiles
                .column("q25")?
                .as_materialized_series()
                .get(0)?
                .try_extract::<f64>()
                .ok();
            summary.q75 = quartiles
                .column("q75")?
                .as_materialized_series()
                .get(0)?
                .try_extract::<f64>()
                .ok();
        } else {
            summary.top = Self::most_frequent(frame, name)?;
        }

        Ok(summary)
    }

    /// Most frequent value of a column, if the column has any non-null rows.
    fn most_frequent(frame: &DataFrame, name: &str) -> PolarsResult<Option<String>> {
        let modes = frame
            .clone()
            .lazy()
            .select([col(name).drop_nulls().mode().first().alias("top")])
            .collect()?;
        if modes.height() == 0 {
            return Ok(None);
        }
        let value = modes.column("top")?.as_materialized_series().get(0)?;
        Ok(match value {
            AnyValue::Null => None,
            // Strings render without the debug quotes
            AnyValue::String(s) => Some(s.to_string()),
            AnyValue::StringOwned(s) => Some(s.to_string()),
            value => Some(value.to_string()),
        })
    }

    fn report(frame: &DataFrame, dataset_name: &str) -> PolarsResult<String> {
        let (rows, cols) = frame.shape();
        let mut out = String::new();
        let _ = writeln!(out, "Dataset '{dataset_name}': {rows} rows x {cols} columns");

        let names = frame.get_column_names_str();
        let name_width = names.iter().map(|n| n.len()).max().unwrap_or(6).max(6);

        out.push_str("\nColumns:\n");
        for column in frame.get_columns() {
            let _ = writeln!(
                out,
                "  {:<name_width$}  {:<14}  {} null",
                column.name().as_str(),
                format!("{}", column.dtype()),
                column.null_count(),
            );
        }

        out.push_str("\nHead (first 5 rows):\n");
        if frame.height() == 0 {
            out.push_str("  (empty)\n");
        }
        for row in 0..frame.height().min(HEAD_ROWS) {
            let mut record = String::from("  {");
            for (idx, column) in frame.get_columns().iter().enumerate() {
                if idx > 0 {
                    record.push_str(", ");
                }
                let value = column.as_materialized_series().get(row)?;
                let _ = write!(record, "{}: {value}", column.name());
            }
            record.push('}');
            out.push_str(&record);
            out.push('\n');
        }

        out.push_str("\nSummary statistics:\n");
        let _ = writeln!(
            out,
            "  {:<name_width$}  {:>7}  {:>7}  {:>10}  {:>10}  {:>9}  {:>9}  {:>9}  {:>9}  {:>9}  {}",
            "column", "count", "unique", "mean", "std", "min", "25%", "50%", "75%", "max", "top",
        );
        for column in frame.get_columns() {
            let series = column.as_materialized_series();
            let summary = Self::summarize_column(frame, series)?;
            let _ = writeln!(
                out,
                "  {:<name_width$}  {:>7}  {:>7}  {:>10}  {:>10}  {:>9}  {:>9}  {:>9}  {:>9}  {:>9}  {}",
                column.name().as_str(),
                summary.count,
                summary.unique.map(|u| u.to_string()).unwrap_or_default(),
                fmt_stat(summary.mean),
                fmt_stat(summary.std),
                fmt_stat(summary.min),
                fmt_stat(summary.q25),
                fmt_stat(summary.median),
                fmt_stat(summary.q75),
                fmt_stat(summary.max),
                summary.top.unwrap_or_default(),
            );
        }

        Ok(out)
    }
}

/// Render an optional statistic; missing cells become empty strings.
fn fmt_stat(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{v:.0}"),
        Some(v) => format!("{v:.4}"),
        None => String::new(),
    }
}

#[async_trait]
impl Tool for DescribeTool {
    fn name(&self) -> &str {
        "describe_data"
    }

    fn description(&self) -> &str {
        "Get high-level info and statistics for a dataset already loaded in memory. \
         Use this to understand columns, types, nulls, shape, and basic stats."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![ToolParameter::string(
                "dataset_name",
                "Name of the dataset previously loaded via load_csv",
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

        let report = Self::report(&frame, &dataset_name)
            .map_err(|e| ToolError::ExecutionFailed(format!("Failed to summarize: {e}")))?;

        let (rows, cols) = frame.shape();
        Ok(ToolResult::success(&call.id, self.name(), report)
            .with_metadata("rows", rows as u64)
            .with_metadata("columns", cols as u64))
    }
}
