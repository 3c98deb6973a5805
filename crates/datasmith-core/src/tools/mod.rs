//! Tool system for datasmith
//!
//! Tools are the fixed operation surface this core exposes to its caller
//! (normally an LLM agent loop, in tests and the bundled CLI an ordinary
//! dispatcher). Each tool declares a JSON parameter schema, validates its
//! call before executing, and flattens every outcome into a single
//! string-typed [`ToolResult`].

pub mod base;
pub mod executor;
pub mod types;

pub use base::{Tool, ToolError};
pub use executor::ToolExecutor;
pub use types::{ToolCall, ToolParameter, ToolResult, ToolSchema};
