//! # Intrinsic Ext HTTP
//!
//! Live market prices for the Intrinsic valuation engine.
//!
//! - [`YahooPriceSource`]: latest close from the Yahoo Finance chart API
//! - [`HttpClient`]: transport seam, with a reqwest implementation
//!
//! Prices are fetched here and handed to the engine as plain data.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
mod yahoo;

pub use client::{HttpClient, HttpResponse, ReqwestHttpClient, DEFAULT_TIMEOUT};
pub use yahoo::{YahooPriceSource, YAHOO_BASE_URL};
