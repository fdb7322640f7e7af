//! # Intrinsic Analytics
//!
//! Discounted cash flow valuation for the Intrinsic library.
//!
//! The engine takes a validated [`HistoricalSeries`](intrinsic_core::HistoricalSeries), three
//! rate [`Assumptions`](intrinsic_core::Assumptions) and company
//! [`ValuationConstants`](intrinsic_core::ValuationConstants), and runs a single linear pipeline:
//!
//! ```text
//! latest FCF -> forecast -> discount -> terminal value -> enterprise value
//!            -> equity value -> implied share price -> (optional) market comparison
//! ```
//!
//! ## Modules
//!
//! - [`dcf::forecast`]: Compounded FCF projection and discount factors
//! - [`dcf::terminal`]: Gordon-growth terminal value
//! - [`dcf::engine`]: [`ValuationEngine`] and its result types
//! - [`dcf::series`]: Chart-ready historical plus forecast series
//!
//! ## Example
//!
//! ```rust
//! use intrinsic_analytics::prelude::*;
//! use intrinsic_core::prelude::*;
//!
//! let history = HistoricalSeries::from_pairs([(2021, 1000.0), (2022, 1100.0), (2023, 1200.0)])?;
//! let assumptions = Assumptions::new(0.12, 0.08, 0.025)?;
//! let constants = ValuationConstants::new(-3000.0, 2_550_000_000.0)?;
//!
//! let engine = ValuationEngine::new(constants)?;
//! let valuation = engine.compute(&history, &assumptions, Some(25.0))?;
//!
//! assert_eq!(valuation.forecast.len(), 5);
//! assert_eq!(valuation.forecast[0].year, 2024);
//! assert!(valuation.result.equity_value > valuation.result.enterprise_value);
//! # Ok::<(), IntrinsicError>(())
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

pub mod dcf;

pub use dcf::{
    compute, ForecastPoint, MarketComparison, SeriesKind, SeriesPoint, Valuation,
    ValuationEngine, ValuationResult,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::dcf::{
        chart_series, compute, ForecastPoint, MarketComparison, SeriesKind, SeriesPoint,
        Valuation, ValuationEngine, ValuationResult,
    };
}
