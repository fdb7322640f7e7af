//! # Intrinsic Core
//!
//! Core types and error definitions for the Intrinsic DCF valuation library.
//!
//! This crate provides the foundational building blocks used throughout Intrinsic:
//!
//! - **Types**: `HistoricalSeries`, `Assumptions`, `ValuationConstants`, `Comparison`
//! - **Errors**: `IntrinsicError` separating malformed inputs from undefined valuations
//!
//! ## Design Philosophy
//!
//! - **Validated Construction**: A `HistoricalSeries` is always sorted, non-empty and free of
//!   duplicate years, so the forecast anchor is well defined
//! - **Configuration Over Literals**: Net debt, share count and horizon travel as data
//! - **Explicit Over Implicit**: Undefined valuations are errors, never NaN
//!
//! ## Example
//!
//! ```rust
//! use intrinsic_core::prelude::*;
//!
//! let history = HistoricalSeries::from_pairs([(2021, 1000.0), (2022, 1100.0), (2023, 1200.0)])?;
//! assert_eq!(history.latest().year, 2023);
//!
//! let assumptions = Assumptions::new(0.12, 0.08, 0.025)?;
//! assert!(assumptions.discount_rate > assumptions.terminal_growth_rate);
//! # Ok::<(), intrinsic_core::IntrinsicError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{IntrinsicError, IntrinsicResult};
    pub use crate::types::{
        Assumptions, Comparison, FcfObservation, HistoricalSeries, ValuationConstants,
    };
}

// Re-export commonly used types at crate root
pub use error::{IntrinsicError, IntrinsicResult};
pub use types::{Assumptions, Comparison, FcfObservation, HistoricalSeries, ValuationConstants};
