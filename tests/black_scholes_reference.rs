//! Reference values and no-arbitrage identities for the analytic
//! Black-Scholes engine. Scenario: S0=100, K=100, T=1, r=0.05, q=0.02,
//! sigma=0.20, notional=1.

use std::sync::Arc;

use riskforge::core::{OptionType, PricingResult};
use riskforge::engines::Engine;
use riskforge::engines::analytic::BlackScholesAnalyticEngine;
use riskforge::instruments::VanillaOption;
use riskforge::market::MarketView;
use riskforge::models::BlackScholesModel;
use riskforge::pricers::{PricingContext, PricingSettings};

const S0: f64 = 100.0;
const K: f64 = 100.0;
const T: f64 = 1.0;
const R: f64 = 0.05;
const Q: f64 = 0.02;
const SIGMA: f64 = 0.20;

fn context_with_spot(spot: f64) -> PricingContext {
    PricingContext::new(
        MarketView::default(),
        PricingSettings::default(),
        Arc::new(BlackScholesModel::new(spot, R, Q, SIGMA)),
    )
}

fn price_at_spot(option_type: OptionType, spot: f64) -> PricingResult {
    let ctx = context_with_spot(spot);
    let option = match option_type {
        OptionType::Call => VanillaOption::european_call(K, T),
        OptionType::Put => VanillaOption::european_put(K, T),
    };
    BlackScholesAnalyticEngine::new(&ctx)
        .price_vanilla(&option)
        .expect("analytic pricing succeeds")
}

fn call() -> PricingResult {
    price_at_spot(OptionType::Call, S0)
}

fn put() -> PricingResult {
    price_at_spot(OptionType::Put, S0)
}

#[test]
fn call_reference_values() {
    let res = call();
    assert!((res.npv - 9.22701).abs() < 1e-5, "npv {}", res.npv);
    assert!((res.greeks.delta.unwrap().value - 0.586851).abs() < 1e-4);
    assert!((res.greeks.gamma.unwrap().value - 0.0189506).abs() < 1e-4);
    assert!((res.greeks.vega.unwrap().value - 37.9012).abs() < 1e-4);
    assert!((res.greeks.theta.unwrap().value - (-5.08932)).abs() < 1e-4);
    assert!((res.greeks.rho.unwrap().value - 49.4581).abs() < 1e-4);
    assert_eq!(res.mc_std_error, 0.0);
}

#[test]
fn put_reference_values() {
    let res = put();
    assert!((res.npv - 6.33008).abs() < 1e-5, "npv {}", res.npv);
    assert!((res.greeks.delta.unwrap().value - (-0.393348)).abs() < 1e-4);
    assert!((res.greeks.gamma.unwrap().value - 0.0189506).abs() < 1e-4);
    assert!((res.greeks.vega.unwrap().value - 37.9012).abs() < 1e-4);
    assert!((res.greeks.theta.unwrap().value - (-2.29357)).abs() < 1e-4);
    assert!((res.greeks.rho.unwrap().value - (-45.6648)).abs() < 1e-4);
}

#[test]
fn call_put_parity() {
    let lhs = call().npv - put().npv;
    let rhs = S0 * (-Q * T).exp() - K * (-R * T).exp();
    assert!((lhs - rhs).abs() < 1e-10, "parity violated: {lhs} vs {rhs}");
}

#[test]
fn arbitrage_bounds() {
    let disc_s = S0 * (-Q * T).exp();
    let disc_k = K * (-R * T).exp();

    let c = call().npv;
    assert!(c >= (disc_s - disc_k).max(0.0));
    assert!(c <= disc_s);

    let p = put().npv;
    assert!(p >= (disc_k - disc_s).max(0.0));
    assert!(p <= disc_k);
}

#[test]
fn delta_parity() {
    let diff = call().greeks.delta.unwrap().value - put().greeks.delta.unwrap().value;
    assert!(
        (diff - (-Q * T).exp()).abs() < 1e-10,
        "delta parity violated: {diff}"
    );
}

#[test]
fn rho_parity() {
    let diff = call().greeks.rho.unwrap().value - put().greeks.rho.unwrap().value;
    let expected = T * K * (-R * T).exp();
    assert!(
        (diff - expected).abs() < 1e-10,
        "rho parity violated: {diff} vs {expected}"
    );
}

#[test]
fn gamma_and_vega_are_side_independent() {
    let c = call();
    let p = put();
    assert!(
        (c.greeks.gamma.unwrap().value - p.greeks.gamma.unwrap().value).abs() < 1e-12
    );
    assert!(
        (c.greeks.vega.unwrap().value - p.greeks.vega.unwrap().value).abs() < 1e-12
    );
}

#[test]
fn call_price_is_strictly_increasing_in_spot() {
    let mut prev = f64::NEG_INFINITY;
    for spot in [60.0, 80.0, 90.0, 100.0, 110.0, 120.0, 150.0] {
        let npv = price_at_spot(OptionType::Call, spot).npv;
        assert!(npv > prev, "call price not increasing at spot {spot}");
        prev = npv;
    }
}

#[test]
fn reported_delta_matches_central_difference_of_the_price() {
    let h = 0.01;
    let reported = call().greeks.delta.unwrap().value;
    let fd = (price_at_spot(OptionType::Call, S0 + h).npv
        - price_at_spot(OptionType::Call, S0 - h).npv)
        / (2.0 * h);
    assert!(
        (fd - reported).abs() < 1e-6,
        "fd delta {fd} vs reported {reported}"
    );
}
