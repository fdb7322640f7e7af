//! Intrinsic Configuration Layer
//!
//! This crate provides configuration management for the Intrinsic DCF valuation library:
//! the company constants that feed the equity bridge, the default assumptions and the
//! assumption ranges a front end offers.
//!
//! # Features
//!
//! - **Company Constants**: Net debt, shares outstanding, forecast horizon, unit scale
//! - **Default Assumptions**: Growth, WACC and terminal growth starting points
//! - **Assumption Bounds**: Slider-style ranges with step sizes
//! - **File Formats**: TOML and JSON, selected by extension
//! - **Validation**: Every loaded configuration is checked through [`Validate`]
//!
//! # Example
//!
//! ```rust
//! use intrinsic_config::{ValuationConfig, Validate};
//!
//! let config = ValuationConfig::from_toml_str(r#"
//!     name = "Acme Corp"
//!     ticker = "ACME"
//!     net_debt = 1200.0
//!     shares_outstanding = 4.0e8
//!
//!     [defaults]
//!     growth_rate = 0.08
//!     discount_rate = 0.09
//!     terminal_growth_rate = 0.02
//! "#).unwrap();
//!
//! assert!(config.is_valid());
//! assert_eq!(config.constants().forecast_horizon_years, 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod bounds;
mod error;
mod valuation;

// Re-export core types
pub use bounds::{AssumptionBounds, RangeBound};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use valuation::ValuationConfig;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bounds::{AssumptionBounds, RangeBound};
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::valuation::ValuationConfig;
}
