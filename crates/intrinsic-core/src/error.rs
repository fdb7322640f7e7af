//! Error types for the Intrinsic library.
//!
//! Valuation failures fall into two kinds: the inputs are malformed (`Input`), or the inputs are
//! well formed but the model is undefined for them (`Domain`). Both are deterministic for a given
//! input set, so callers should surface them rather than retry.

use thiserror::Error;

/// A specialized Result type for Intrinsic operations.
pub type IntrinsicResult<T> = Result<T, IntrinsicError>;

/// The main error type for Intrinsic operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntrinsicError {
    /// Malformed input: empty history, duplicate years, non-finite figures, bad constants.
    #[error("Invalid input: {reason}")]
    Input {
        /// Description of what is wrong with the input.
        reason: String,
    },

    /// The valuation is undefined for the given assumptions.
    ///
    /// Raised when the discount rate does not exceed the terminal growth rate, or when a
    /// computed quantity is not finite.
    #[error("Domain error: {reason}")]
    Domain {
        /// Description of the violated constraint.
        reason: String,
    },
}

impl IntrinsicError {
    /// Creates an input error.
    #[must_use]
    pub fn input(reason: impl Into<String>) -> Self {
        Self::Input {
            reason: reason.into(),
        }
    }

    /// Creates a domain error.
    #[must_use]
    pub fn domain(reason: impl Into<String>) -> Self {
        Self::Domain {
            reason: reason.into(),
        }
    }

    /// Returns true for input errors.
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input { .. })
    }

    /// Returns true for domain errors.
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }
}
