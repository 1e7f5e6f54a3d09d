//! Error taxonomy for tool registration and invocation.

use std::time::Duration;

use thiserror::Error;

/// Boxed error raised by a tool's own logic.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while registering, decoding or invoking tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A required argument was expected but the supplied sequence was empty.
    #[error("No arguments supplied")]
    NoArguments,

    /// Arguments were supplied but none of them is of the expected kind.
    #[error("Invalid argument type: expected `{expected}`")]
    InvalidArgumentType { expected: String },

    /// More than one argument of the expected kind was supplied.
    #[error("Ambiguous arguments: {count} arguments of kind `{kind}`")]
    AmbiguousArgument { kind: String, count: usize },

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    #[error("Tool {name} timed out after {timeout:?}")]
    Timeout { name: String, timeout: Duration },

    /// The tool returned a value JSON cannot carry losslessly.
    #[error("Tool {name} returned an unrepresentable output: {output}")]
    UnrepresentableOutput { name: String, output: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error raised by the tool's own logic, passed through unchanged.
    #[error("Tool execution error: {0}")]
    Execution(#[source] BoxError),
}

impl ToolError {
    /// Wrap a domain error raised inside a tool.
    pub fn execution<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        ToolError::Execution(error.into())
    }

    pub(crate) fn invalid_argument_type(expected: impl Into<String>) -> Self {
        ToolError::InvalidArgumentType {
            expected: expected.into(),
        }
    }

    /// Downcast an [`ToolError::Execution`] payload to the tool's concrete error type.
    pub fn downcast_execution<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            ToolError::Execution(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}
