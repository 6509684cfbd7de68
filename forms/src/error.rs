//! Error types for forms and drafts.
//!
//! Validation failures are not errors; they are [`ValidationResult`] values.
//!
//! [`ValidationResult`]: crate::validation::ValidationResult

use thiserror::Error;

/// Form error
#[derive(Debug, Error)]
pub enum FormError {
    /// A value was set for a field the schema does not declare
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A pattern validator was declared with an invalid expression
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Draft blob could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Draft file I/O failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for form operations
pub type Result<T> = std::result::Result<T, FormError>;
