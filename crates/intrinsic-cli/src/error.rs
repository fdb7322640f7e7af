//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Assumption outside the configured range.
    #[error("Assumption out of range: {0}. Pass --allow-out-of-range to value anyway.")]
    OutOfRange(String),

    /// Refusing to overwrite a file.
    #[error("{} already exists. Use --force to overwrite.", .0.display())]
    FileExists(PathBuf),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
