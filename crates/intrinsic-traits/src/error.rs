//! Error types for trait operations.

use intrinsic_core::IntrinsicError;
use thiserror::Error;

/// Common error type for trait operations.
#[derive(Debug, Error)]
pub enum TraitError {
    /// Requested resource not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Source not available
    #[error("source not available: {0}")]
    SourceNotAvailable(String),

    /// Parse/deserialization error
    #[error("parse error: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Data was read but does not form valid input
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<std::io::Error> for TraitError {
    fn from(e: std::io::Error) -> Self {
        TraitError::IoError(e.to_string())
    }
}

impl From<IntrinsicError> for TraitError {
    fn from(e: IntrinsicError) -> Self {
        TraitError::InvalidInput(e.to_string())
    }
}
