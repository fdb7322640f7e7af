//! DCF valuation engine.
//!
//! [`ValuationEngine`] holds only the company constants and is otherwise stateless: every call
//! to [`ValuationEngine::compute`] is independent, so one engine can be shared across threads
//! without locking.

use log::debug;
use serde::{Deserialize, Serialize};

use intrinsic_core::{
    Assumptions, Comparison, HistoricalSeries, IntrinsicError, IntrinsicResult,
    ValuationConstants,
};

use super::forecast::{project_cash_flows, ForecastPoint};
use super::terminal::{discounted_terminal_value, gordon_growth_terminal_value};

/// Market price set against the implied share price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketComparison {
    /// Externally supplied market price per share
    pub current_market_price: f64,
    /// `current_market_price − implied_share_price`
    pub price_difference: f64,
    /// `price_difference / implied_share_price × 100`
    pub percent_difference: f64,
    /// `Above` iff `price_difference > 0`
    pub comparison: Comparison,
}

impl MarketComparison {
    /// Compares a market price to an implied share price.
    ///
    /// The percent difference is relative to the implied price, so an implied price of zero is
    /// a domain error rather than an infinite percentage.
    pub fn new(current_market_price: f64, implied_share_price: f64) -> IntrinsicResult<Self> {
        if !current_market_price.is_finite() || current_market_price <= 0.0 {
            return Err(IntrinsicError::input(format!(
                "market price must be positive and finite, got {current_market_price}"
            )));
        }
        if implied_share_price == 0.0 {
            return Err(IntrinsicError::domain(
                "implied share price is zero; percent difference is undefined",
            ));
        }

        let price_difference = current_market_price - implied_share_price;
        let percent_difference = price_difference / implied_share_price * 100.0;
        if !price_difference.is_finite() || !percent_difference.is_finite() {
            return Err(IntrinsicError::domain(format!(
                "comparison against implied share price {implied_share_price} is not finite \
                 (difference {price_difference}, percent {percent_difference})"
            )));
        }

        Ok(Self {
            current_market_price,
            price_difference,
            percent_difference,
            comparison: Comparison::from_difference(price_difference),
        })
    }
}

/// Headline valuation figures.
///
/// Values are in the series unit (millions) except the per-share figures, which are in
/// currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Sum of discounted forecast FCF
    pub sum_of_discounted_fcf: f64,
    /// Undiscounted Gordon-growth terminal value
    pub terminal_value: f64,
    /// Terminal value discounted over the horizon
    pub discounted_terminal_value: f64,
    /// Sum of discounted FCF plus discounted terminal value
    pub enterprise_value: f64,
    /// Enterprise value minus net debt
    pub equity_value: f64,
    /// Equity value per share, in currency units
    pub implied_share_price: f64,
    /// Present when a market price was supplied
    pub market: Option<MarketComparison>,
}

impl ValuationResult {
    /// Market price, if one was supplied.
    pub fn current_market_price(&self) -> Option<f64> {
        self.market.map(|m| m.current_market_price)
    }

    /// Market minus implied price.
    pub fn price_difference(&self) -> Option<f64> {
        self.market.map(|m| m.price_difference)
    }

    /// Price difference as a percentage of the implied price.
    pub fn percent_difference(&self) -> Option<f64> {
        self.market.map(|m| m.percent_difference)
    }

    /// Whether the market trades above or below the implied price.
    pub fn comparison(&self) -> Option<Comparison> {
        self.market.map(|m| m.comparison)
    }
}

/// Output of a valuation run: headline figures plus the forecast used to produce them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    /// Headline figures
    pub result: ValuationResult,
    /// One point per forecast year, ascending
    pub forecast: Vec<ForecastPoint>,
}

/// Discounted cash flow valuation engine.
///
/// # Example
///
/// ```rust
/// use intrinsic_analytics::ValuationEngine;
/// use intrinsic_core::prelude::*;
///
/// let engine = ValuationEngine::new(ValuationConstants::new(-3000.0, 2_550_000_000.0)?)?;
/// let history = HistoricalSeries::from_pairs([(2023, 1200.0)])?;
///
/// let err = engine
///     .compute(&history, &Assumptions { growth_rate: 0.1, discount_rate: 0.03, terminal_growth_rate: 0.03 }, None)
///     .unwrap_err();
/// assert!(err.is_domain());
/// # Ok::<(), IntrinsicError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuationEngine {
    constants: ValuationConstants,
}

impl ValuationEngine {
    /// Creates an engine for the given company constants.
    pub fn new(constants: ValuationConstants) -> IntrinsicResult<Self> {
        constants.validate()?;
        Ok(Self { constants })
    }

    /// The constants this engine values with.
    pub fn constants(&self) -> &ValuationConstants {
        &self.constants
    }

    /// Runs the full valuation.
    ///
    /// `market_price`, when given, is compared against the implied share price.
    pub fn compute(
        &self,
        history: &HistoricalSeries,
        assumptions: &Assumptions,
        market_price: Option<f64>,
    ) -> IntrinsicResult<Valuation> {
        assumptions.validate()?;

        let horizon = self.constants.forecast_horizon_years;
        let anchor = history.latest();
        debug!(
            "valuing from {} FCF {} over {} years (g={}, r={}, g_t={})",
            anchor.year,
            anchor.fcf,
            horizon,
            assumptions.growth_rate,
            assumptions.discount_rate,
            assumptions.terminal_growth_rate
        );

        let forecast = project_cash_flows(
            anchor,
            assumptions.growth_rate,
            assumptions.discount_rate,
            horizon,
        )?;

        // horizon >= 1 is checked in ValuationConstants::validate
        let final_fcf = forecast
            .last()
            .map(|p| p.fcf)
            .ok_or_else(|| IntrinsicError::input("forecast horizon is empty"))?;

        let terminal_value = gordon_growth_terminal_value(
            final_fcf,
            assumptions.discount_rate,
            assumptions.terminal_growth_rate,
        )?;
        let discounted_tv =
            discounted_terminal_value(terminal_value, assumptions.discount_rate, horizon);

        let sum_of_discounted_fcf: f64 = forecast.iter().map(|p| p.discounted_fcf).sum();
        let enterprise_value = sum_of_discounted_fcf + discounted_tv;
        let equity_value = enterprise_value - self.constants.net_debt;
        let implied_share_price =
            equity_value * self.constants.unit_scale / self.constants.shares_outstanding;

        debug!(
            "terminal value {terminal_value}, enterprise value {enterprise_value}, \
             equity value {equity_value}, implied price {implied_share_price}"
        );

        for (name, value) in [
            ("sum of discounted FCF", sum_of_discounted_fcf),
            ("enterprise value", enterprise_value),
            ("equity value", equity_value),
            ("implied share price", implied_share_price),
        ] {
            if !value.is_finite() {
                return Err(IntrinsicError::domain(format!("{name} is not finite ({value})")));
            }
        }

        let market = market_price
            .map(|price| MarketComparison::new(price, implied_share_price))
            .transpose()?;

        Ok(Valuation {
            result: ValuationResult {
                sum_of_discounted_fcf,
                terminal_value,
                discounted_terminal_value: discounted_tv,
                enterprise_value,
                equity_value,
                implied_share_price,
                market,
            },
            forecast,
        })
    }
}

/// One-shot valuation without keeping an engine around.
pub fn compute(
    history: &HistoricalSeries,
    assumptions: &Assumptions,
    constants: &ValuationConstants,
    market_price: Option<f64>,
) -> IntrinsicResult<Valuation> {
    ValuationEngine::new(*constants)?.compute(history, assumptions, market_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn meta_history() -> HistoricalSeries {
        HistoricalSeries::from_pairs([(2021, 1000.0), (2022, 1100.0), (2023, 1200.0)]).unwrap()
    }

    fn meta_constants() -> ValuationConstants {
        ValuationConstants::new(-3000.0, 2_550_000_000.0).unwrap()
    }

    fn base_assumptions() -> Assumptions {
        Assumptions::new(0.12, 0.08, 0.025).unwrap()
    }

    #[test]
    fn test_reference_scenario_chain() {
        let valuation =
            compute(&meta_history(), &base_assumptions(), &meta_constants(), None).unwrap();
        let r = valuation.result;

        // Replay the formula chain step by step in the same operation order.
        let mut sum = 0.0;
        let mut last = 0.0;
        for i in 1..=5u32 {
            let fcf = 1200.0 * (1.0f64 + 0.12).powf(f64::from(i));
            let df = 1.0 / (1.0f64 + 0.08).powf(f64::from(i));
            sum += fcf * df;
            last = fcf;
        }
        let tv = last * (1.0 + 0.025) / (0.08 - 0.025);
        let dtv = tv / (1.0f64 + 0.08).powf(5.0);
        let ev = sum + dtv;
        let equity = ev - (-3000.0);
        let price = equity * 1_000_000.0 / 2_550_000_000.0;

        assert_relative_eq!(valuation.forecast[0].fcf, 1344.0, epsilon = 1e-9);
        assert_relative_eq!(valuation.forecast[0].discounted_fcf, 1244.44, epsilon = 0.01);
        assert_eq!(r.terminal_value, tv);
        assert_eq!(r.discounted_terminal_value, dtv);
        assert_eq!(r.enterprise_value, ev);
        assert_eq!(r.equity_value, equity);
        assert_eq!(r.implied_share_price, price);
        assert!(r.market.is_none());
    }

    #[test]
    fn test_net_cash_raises_equity_exactly() {
        let v = compute(&meta_history(), &base_assumptions(), &meta_constants(), None).unwrap();
        assert_eq!(v.result.equity_value, v.result.enterprise_value + 3000.0);
    }

    #[test]
    fn test_net_debt_shift() {
        let history = meta_history();
        let a = base_assumptions();
        let base = compute(&history, &a, &ValuationConstants::new(0.0, 1e9).unwrap(), None).unwrap();
        let levered =
            compute(&history, &a, &ValuationConstants::new(500.0, 1e9).unwrap(), None).unwrap();

        assert_eq!(base.result.enterprise_value, levered.result.enterprise_value);
        assert_relative_eq!(
            base.result.equity_value - levered.result.equity_value,
            500.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_shares_scale_price_inversely() {
        let history = meta_history();
        let a = base_assumptions();
        let one = compute(&history, &a, &ValuationConstants::new(0.0, 1e9).unwrap(), None).unwrap();
        let two = compute(&history, &a, &ValuationConstants::new(0.0, 2e9).unwrap(), None).unwrap();

        assert_relative_eq!(
            one.result.implied_share_price,
            2.0 * two.result.implied_share_price,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_market_comparison_above() {
        let v = compute(&meta_history(), &base_assumptions(), &meta_constants(), Some(500.0))
            .unwrap();
        let implied = v.result.implied_share_price;
        let market = v.result.market.unwrap();

        assert_eq!(market.price_difference, 500.0 - implied);
        assert_eq!(market.percent_difference, (500.0 - implied) / implied * 100.0);
        assert_eq!(market.comparison, Comparison::Above);
        assert_eq!(v.result.current_market_price(), Some(500.0));
    }

    #[test]
    fn test_market_comparison_below() {
        let v =
            compute(&meta_history(), &base_assumptions(), &meta_constants(), Some(1.0)).unwrap();
        assert_eq!(v.result.comparison(), Some(Comparison::Below));
        assert!(v.result.price_difference().unwrap() < 0.0);
    }

    #[test]
    fn test_exact_tie_is_below() {
        let m = MarketComparison::new(42.0, 42.0).unwrap();
        assert_eq!(m.price_difference, 0.0);
        assert_eq!(m.comparison, Comparison::Below);
    }

    #[test]
    fn test_zero_implied_price() {
        let err = MarketComparison::new(10.0, 0.0).unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn test_vanishing_implied_price() {
        let err = MarketComparison::new(1e10, 2.79e-300).unwrap_err();
        assert!(err.is_domain());

        let constants = ValuationConstants::new(0.0, 1e300).unwrap().with_unit_scale(1.0);
        let history = HistoricalSeries::from_pairs([(2023, 1.0)]).unwrap();
        let err = compute(&history, &base_assumptions(), &constants, Some(1e10)).unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn test_invalid_market_price() {
        assert!(MarketComparison::new(f64::NAN, 10.0).unwrap_err().is_input());
        assert!(MarketComparison::new(-1.0, 10.0).unwrap_err().is_input());
    }

    #[test]
    fn test_equal_rates_domain_error() {
        let a = Assumptions {
            growth_rate: 0.12,
            discount_rate: 0.03,
            terminal_growth_rate: 0.03,
        };
        let err = compute(&meta_history(), &a, &meta_constants(), None).unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn test_inverted_rates_domain_error() {
        let a = Assumptions {
            growth_rate: 0.12,
            discount_rate: 0.02,
            terminal_growth_rate: 0.03,
        };
        assert!(compute(&meta_history(), &a, &meta_constants(), None)
            .unwrap_err()
            .is_domain());
    }

    #[test]
    fn test_invalid_constants_rejected() {
        let constants = ValuationConstants {
            shares_outstanding: 0.0,
            ..ValuationConstants::default()
        };
        assert!(ValuationEngine::new(constants).unwrap_err().is_input());
    }

    #[test]
    fn test_custom_horizon() {
        let constants = meta_constants().with_horizon(10);
        let v = compute(&meta_history(), &base_assumptions(), &constants, None).unwrap();
        assert_eq!(v.forecast.len(), 10);
        assert_eq!(v.forecast.last().unwrap().year, 2033);
    }

    #[test]
    fn test_engine_is_reusable() {
        let engine = ValuationEngine::new(meta_constants()).unwrap();
        let history = meta_history();
        let first = engine.compute(&history, &base_assumptions(), None).unwrap();
        let second = engine.compute(&history, &base_assumptions(), None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_result_serializes() {
        let v = compute(&meta_history(), &base_assumptions(), &meta_constants(), Some(500.0))
            .unwrap();
        let json = serde_json::to_value(&v.result).unwrap();
        assert_eq!(json["market"]["comparison"], "above");
    }
}
