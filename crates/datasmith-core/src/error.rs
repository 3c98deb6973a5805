//! Core error types for datasmith

use thiserror::Error;

/// Result type alias for datasmith operations
pub type DatasmithResult<T> = Result<T, DatasmithError>;

/// Main error type for datasmith
///
/// Recoverable, user-facing conditions (a dataset name that is not loaded, a
/// filter expression that does not evaluate) never surface through this type;
/// tools flatten those into ordinary text results. This enum covers the
/// surfaces around the tools: the CLI, call validation, and unrecovered I/O.
#[derive(Error, Debug, Clone)]
pub enum DatasmithError {
    /// Tool execution errors
    #[error("Tool error: {tool_name}: {message}")]
    Tool { tool_name: String, message: String },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Generic error with context
    #[error("Error: {message}")]
    Other { message: String },
}

impl DatasmithError {
    /// Create a tool error
    pub fn tool(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Create an IO error with an associated path
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for DatasmithError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_error_display_includes_tool_name() {
        let err = DatasmithError::tool("load_csv", "boom");
        assert_eq!(err.to_string(), "Tool error: load_csv: boom");
    }

    #[test]
    fn io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: DatasmithError = io.into();
        assert!(matches!(err, DatasmithError::Io { .. }));
        assert!(err.to_string().contains("gone"));
    }
}
