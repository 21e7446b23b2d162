//! Error types for document generation.
//!
//! Validation problems are raised before any drawing happens, so a failed
//! call never produces partial output. Missing assets are deliberately *not*
//! errors: they degrade to a visual fallback and are only logged.

/// Result type alias for document generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while generating a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input document is not renderable (missing client, empty items,
    /// missing number). Raised before any output is produced.
    #[error("invalid document: {0}")]
    Validation(String),

    /// A pagination configuration that cannot place a single item per page.
    #[error("invalid pagination config: {0}")]
    Pagination(String),

    /// Failure while assembling the output buffer.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
