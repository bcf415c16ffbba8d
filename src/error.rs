//! Error taxonomy shared by both front-ends.

use thiserror::Error;

/// Failure of a single automation action.
///
/// The `Display` text is what users see: the CLI prints it after `Error: `,
/// and the MCP server returns it as the `details` of a tool error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AutomationError {
    /// Coordinate was non-numeric, negative, or out of range
    #[error("{0}")]
    InvalidCoordinate(String),

    /// Smooth-move duration was not a positive number of seconds
    #[error("{0}")]
    InvalidDuration(String),

    #[error("cannot type an empty string")]
    EmptyInput,

    /// Opaque failure reported by the input backend
    #[error("{0}")]
    NativeCallFailure(String),

    #[error("operation cancelled")]
    Cancelled,
}

impl AutomationError {
    /// Wrap a backend error, prefixed with the operation that failed.
    pub fn native(operation: &str, err: anyhow::Error) -> Self {
        Self::NativeCallFailure(format!("{operation} failed: {err:#}"))
    }
}

pub type Result<T> = std::result::Result<T, AutomationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_failure_names_operation() {
        let err = AutomationError::native("mouse move", anyhow::anyhow!("no display"));
        assert_eq!(err.to_string(), "mouse move failed: no display");
    }

    #[test]
    fn empty_input_message() {
        assert_eq!(
            AutomationError::EmptyInput.to_string(),
            "cannot type an empty string"
        );
    }
}
