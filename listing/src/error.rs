//! Error types for list decoding.

use thiserror::Error;

/// Listing error
#[derive(Debug, Error)]
pub enum ListingError {
    /// JSON could not be read as records
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload was neither an array nor an object with a `data` array
    #[error("Expected a record list, got {0}")]
    NotAList(&'static str),

    /// An untyped record had no usable key field
    #[error("Record is missing key field '{0}'")]
    MissingKey(String),
}

/// Result type for listing operations
pub type Result<T> = std::result::Result<T, ListingError>;
