//! Core library for datasmith.
//!
//! This crate provides the shared abstractions that the data tools and the
//! CLI are built on:
//!
//! - [`error`]: the unified error type for non-tool surfaces
//! - [`store`]: the in-memory dataset registry shared by all tools
//! - [`tools`]: the typed tool-call contract (trait, call/result types,
//!   executor)
//!
//! The tool implementations themselves live in the `datasmith-tools` crate.

pub mod error;
pub mod store;
pub mod tools;

pub use error::{DatasmithError, DatasmithResult};
pub use store::DatasetStore;
pub use tools::{Tool, ToolCall, ToolError, ToolExecutor, ToolResult, ToolSchema};
