//! # Intrinsic Ext File
//!
//! File-based historical and market data for the Intrinsic valuation engine.
//!
//! This crate provides default implementations for offline use and tests:
//! - CSV-based historical FCF source (`Year,FCF` columns)
//! - CSV-based price source (`ticker,price[,as_of]` columns)
//! - Static and empty price sources
//!
//! Live prices come from `intrinsic-ext-http`.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod history;
mod market_data;

pub use history::*;
pub use market_data::*;
