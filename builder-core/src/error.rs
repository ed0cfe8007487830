//! Error types for builder operations.

use thiserror::Error;

/// Result type for builder operations.
pub type BuilderResult<T> = Result<T, BuilderError>;

/// Errors that can occur while editing the canvas.
///
/// None of these are fatal to an editing session: callers log or ignore them
/// and keep the previous state.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// Element not found on the canvas.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Element type name outside the supported set.
    #[error("Unknown element type: {0}")]
    UnknownElementType(String),

    /// Rejected property value; the prior value is retained.
    #[error("Invalid value for {field}: {value:?}")]
    InvalidInput {
        /// Property that was being edited.
        field: &'static str,
        /// Raw input that was rejected.
        value: String,
    },

    /// Malformed element identifier.
    #[error("Invalid element id: {0}")]
    InvalidId(String),

    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
