//! Render errors.

use thiserror::Error;

/// Errors raised while writing a workbook to a sink.
#[derive(Debug, Error)]
pub enum RenderError {
    // ========== Sink Errors ==========
    /// Writing to the underlying stream failed.
    #[error("Failed to write workbook: {0}")]
    Io(#[from] std::io::Error),

    /// Workbook could not be serialized.
    #[error("Failed to serialize workbook: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RenderError {
    /// Returns the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "RENDER_IO_ERROR",
            Self::Serialization(_) => "RENDER_SERIALIZATION_ERROR",
        }
    }
}
