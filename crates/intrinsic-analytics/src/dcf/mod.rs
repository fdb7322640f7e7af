//! Discounted cash flow valuation.
//!
//! The pipeline is split by stage so each formula can be checked on its own:
//!
//! | Stage | Formula |
//! |-------|---------|
//! | Forecast | `FCF_i = FCF_last × (1 + g)^i` |
//! | Discount | `DF_i = 1 / (1 + r)^i` |
//! | Terminal | `TV = FCF_N × (1 + g_t) / (r − g_t)` |
//! | Enterprise | `EV = Σ FCF_i × DF_i + TV / (1 + r)^N` |
//! | Equity | `E = EV − net debt` |
//! | Per share | `P = E × scale / shares` |

pub mod engine;
pub mod forecast;
pub mod series;
pub mod terminal;

pub use engine::{compute, MarketComparison, Valuation, ValuationEngine, ValuationResult};
pub use forecast::{discount_factor, project_cash_flows, ForecastPoint};
pub use series::{chart_series, SeriesKind, SeriesPoint};
pub use terminal::{discounted_terminal_value, gordon_growth_terminal_value};
