//! Renderer error types.

use builder_core::BuilderError;
use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur before rendering starts.
///
/// Rendering and export themselves never fail; these cover decoding the
/// input handed to the renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Input JSON could not be decoded.
    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// The builder rejected an operation.
    #[error("Builder error: {0}")]
    Builder(#[from] BuilderError),
}
