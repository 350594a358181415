//! Error types for the export pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering, printing, or exporting an invoice
#[derive(Error, Debug)]
pub enum Error {
    /// The expected container or template node is absent from the document
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The isolated print surface could not be opened
    #[error("Print surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// The bitmap-capture step failed
    #[error("Rasterization failed: {0}")]
    Rasterization(String),

    /// PDF assembly failed
    #[error("PDF assembly failed: {0}")]
    Pdf(String),

    /// Image encoding failed
    #[error("Image encoding failed: {0}")]
    Encode(String),

    /// Filesystem error while writing an artifact
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Operation timed out
    #[error("Operation timed out after {0}ms")]
    Timeout(u64),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
