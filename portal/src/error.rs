//! Error types for the portal client.

use erp_forms::ServerErrors;
use thiserror::Error;

/// Portal error
#[derive(Debug, Error)]
pub enum PortalError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// List payload could not be read
    #[error("Listing error: {0}")]
    Listing(#[from] erp_listing::ListingError),

    /// Sale could not be prepared
    #[error("POS error: {0}")]
    Pos(#[from] erp_pos::PosError),

    /// Server returned an error
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Endpoint not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server rejected a submission with field errors
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(ServerErrors),

    /// Client configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for portal operations
pub type Result<T> = std::result::Result<T, PortalError>;
