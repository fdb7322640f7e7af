//! # Intrinsic Traits
//!
//! Trait definitions for the collaborators around the valuation engine.
//!
//! This crate contains ONLY trait definitions and the plain data they exchange.
//! Implementations live in extension crates such as `intrinsic-ext-file`.
//!
//! ## Module Structure
//!
//! - [`history`]: Sources of historical free cash flow
//! - [`market_data`]: Sources of current market prices
//!
//! ## Dependency Injection
//!
//! Front ends hold sources as trait objects and pass their output to the engine as data:
//!
//! ```ignore
//! let history = history_source.load_history().await?;
//! let quote = price_source.latest_price(&ticker).await?;
//! engine.compute(&history, &assumptions, quote.map(|q| q.price))?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod history;
pub mod ids;
pub mod market_data;

// Re-export commonly used types
pub use error::TraitError;
pub use history::HistoricalDataSource;
pub use ids::Ticker;
pub use market_data::{MarketQuote, PriceSource, SourceType};
