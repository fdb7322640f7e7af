//! Property and reference tests for the DCF engine.

use approx::assert_relative_eq;
use intrinsic_analytics::{compute, ValuationEngine};
use intrinsic_core::prelude::*;
use proptest::prelude::*;

fn history(last_fcf: f64) -> HistoricalSeries {
    HistoricalSeries::from_pairs([(2021, last_fcf * 0.8), (2022, last_fcf * 0.9), (2023, last_fcf)])
        .unwrap()
}

fn meta_constants() -> ValuationConstants {
    ValuationConstants::new(-3000.0, 2_550_000_000.0).unwrap()
}

#[test]
fn reference_scenario() {
    let history =
        HistoricalSeries::from_pairs([(2021, 1000.0), (2022, 1100.0), (2023, 1200.0)]).unwrap();
    let assumptions = Assumptions::new(0.12, 0.08, 0.025).unwrap();

    let v = compute(&history, &assumptions, &meta_constants(), None).unwrap();
    let r = v.result;

    assert_relative_eq!(v.forecast[0].fcf, 1344.0, max_relative = 1e-14);
    assert_relative_eq!(v.forecast[0].discounted_fcf, 1244.4444444444446, max_relative = 1e-14);
    assert_relative_eq!(r.terminal_value, 39412.368551563646, max_relative = 1e-14);
    assert_relative_eq!(r.discounted_terminal_value, 26823.39579149573, max_relative = 1e-14);
    assert_relative_eq!(r.enterprise_value, 33523.91239530395, max_relative = 1e-14);
    assert_relative_eq!(r.equity_value, 36523.91239530395, max_relative = 1e-14);
    assert_relative_eq!(r.implied_share_price, 14.323102900119197, max_relative = 1e-14);
}

#[test]
fn unsorted_input_uses_latest_year() {
    let sorted =
        HistoricalSeries::from_pairs([(2021, 1000.0), (2022, 1100.0), (2023, 1200.0)]).unwrap();
    let shuffled =
        HistoricalSeries::from_pairs([(2023, 1200.0), (2021, 1000.0), (2022, 1100.0)]).unwrap();
    let a = Assumptions::new(0.12, 0.08, 0.025).unwrap();

    let x = compute(&sorted, &a, &meta_constants(), None).unwrap();
    let y = compute(&shuffled, &a, &meta_constants(), None).unwrap();
    assert_eq!(x, y);
}

#[test]
fn engine_shared_across_threads() {
    let engine = ValuationEngine::new(meta_constants()).unwrap();
    let history = history(1200.0);

    let prices: Vec<f64> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let engine = &engine;
                let history = &history;
                s.spawn(move || {
                    let a = Assumptions::new(0.05 + 0.01 * f64::from(i), 0.08, 0.025).unwrap();
                    engine.compute(history, &a, None).unwrap().result.implied_share_price
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(prices.windows(2).all(|w| w[0] < w[1]));
}

proptest! {
    #[test]
    fn valid_inputs_are_finite(
        last_fcf in 1.0f64..1e5,
        growth in 0.05f64..0.20,
        wacc in 0.05f64..0.12,
        terminal in 0.01f64..0.04,
        price in 1.0f64..1000.0,
    ) {
        let a = Assumptions::new(growth, wacc, terminal).unwrap();
        let result = compute(&history(last_fcf), &a, &meta_constants(), Some(price));
        prop_assert!(result.is_ok(), "valid inputs failed: {:?}", result);

        let r = result.unwrap().result;
        let m = r.market.unwrap();
        for value in [
            r.sum_of_discounted_fcf,
            r.terminal_value,
            r.discounted_terminal_value,
            r.enterprise_value,
            r.equity_value,
            r.implied_share_price,
            m.current_market_price,
            m.price_difference,
            m.percent_difference,
        ] {
            prop_assert!(value.is_finite());
        }
    }

    #[test]
    fn negative_fcf_is_finite_or_domain_error(
        last_fcf in -1e5f64..0.0,
        growth in 0.05f64..0.20,
        price in 1.0f64..1000.0,
    ) {
        let a = Assumptions::new(growth, 0.08, 0.025).unwrap();
        match compute(&history(last_fcf), &a, &meta_constants(), Some(price)) {
            Ok(v) => {
                let m = v.result.market.unwrap();
                prop_assert!(v.result.implied_share_price.is_finite());
                prop_assert!(m.percent_difference.is_finite());
            }
            Err(e) => prop_assert!(e.is_domain()),
        }
    }

    #[test]
    fn growth_increases_enterprise_value(
        last_fcf in 1.0f64..1e5,
        growth in 0.0f64..0.30,
        bump in 0.001f64..0.05,
        wacc in 0.05f64..0.12,
        terminal in 0.0f64..0.04,
    ) {
        let low = Assumptions::new(growth, wacc, terminal).unwrap();
        let high = low.with_growth_rate(growth + bump);
        let constants = meta_constants();

        let ev_low = compute(&history(last_fcf), &low, &constants, None).unwrap().result.enterprise_value;
        let ev_high = compute(&history(last_fcf), &high, &constants, None).unwrap().result.enterprise_value;
        prop_assert!(ev_high > ev_low);
    }

    #[test]
    fn discount_rate_decreases_enterprise_value(
        last_fcf in 1.0f64..1e5,
        growth in 0.0f64..0.30,
        wacc in 0.05f64..0.12,
        bump in 0.001f64..0.05,
        terminal in 0.0f64..0.04,
    ) {
        let low = Assumptions::new(growth, wacc, terminal).unwrap();
        let high = low.with_discount_rate(wacc + bump);
        let constants = meta_constants();

        let ev_low = compute(&history(last_fcf), &low, &constants, None).unwrap().result.enterprise_value;
        let ev_high = compute(&history(last_fcf), &high, &constants, None).unwrap().result.enterprise_value;
        prop_assert!(ev_high < ev_low);
    }

    #[test]
    fn net_cash_adds_exactly(net_cash in 0.0f64..1e6) {
        let a = Assumptions::new(0.12, 0.08, 0.025).unwrap();
        let constants = ValuationConstants::new(-net_cash, 1e9).unwrap();
        let r = compute(&history(1200.0), &a, &constants, None).unwrap().result;
        prop_assert_eq!(r.equity_value, r.enterprise_value + net_cash);
    }
}

#[test]
fn equal_rates_raise_domain_error() {
    let a = Assumptions {
        growth_rate: 0.12,
        discount_rate: 0.04,
        terminal_growth_rate: 0.04,
    };
    let err = compute(&history(1200.0), &a, &meta_constants(), None).unwrap_err();
    assert!(matches!(err, IntrinsicError::Domain { .. }));
}

#[test]
fn empty_history_raises_input_error() {
    let err = HistoricalSeries::new(Vec::new()).unwrap_err();
    assert!(matches!(err, IntrinsicError::Input { .. }));
}
