//! Monte Carlo convergence, determinism, and estimator quality against the
//! analytic engine.

use std::sync::Arc;

use riskforge::core::PricingResult;
use riskforge::engines::Engine;
use riskforge::engines::analytic::BlackScholesAnalyticEngine;
use riskforge::engines::monte_carlo::VanillaMonteCarloEngine;
use riskforge::instruments::VanillaOption;
use riskforge::market::MarketView;
use riskforge::models::BlackScholesModel;
use riskforge::pricers::{PricingContext, PricingSettings};

fn context(paths: usize, seed: u64, antithetic: bool) -> PricingContext {
    PricingContext::new(
        MarketView::default(),
        PricingSettings {
            mc_paths: paths,
            mc_seed: seed,
            mc_antithetic: antithetic,
            ..PricingSettings::default()
        },
        Arc::new(BlackScholesModel::new(100.0, 0.05, 0.02, 0.20)),
    )
}

fn mc_call(paths: usize, seed: u64, antithetic: bool) -> PricingResult {
    let ctx = context(paths, seed, antithetic);
    VanillaMonteCarloEngine::new(&ctx)
        .price_vanilla(&VanillaOption::european_call(100.0, 1.0))
        .expect("mc pricing succeeds")
}

fn analytic_call() -> PricingResult {
    let ctx = context(1, 1, false);
    BlackScholesAnalyticEngine::new(&ctx)
        .price_vanilla(&VanillaOption::european_call(100.0, 1.0))
        .expect("analytic pricing succeeds")
}

#[test]
fn large_run_lands_within_three_standard_errors() {
    let mc = mc_call(1_000_000, 1, true);
    let reference = analytic_call().npv;

    assert!(mc.mc_std_error > 0.0, "standard error must be reported");
    assert!(
        (mc.npv - reference).abs() <= 3.0 * mc.mc_std_error,
        "mc {} vs analytic {} stderr {}",
        mc.npv,
        reference,
        mc.mc_std_error
    );
}

#[test]
fn standard_error_shrinks_roughly_as_inverse_sqrt_of_paths() {
    let coarse = mc_call(10_000, 21, false);
    let fine = mc_call(160_000, 21, false);

    // 16x the paths should cut the standard error about 4x.
    let ratio = coarse.mc_std_error / fine.mc_std_error;
    assert!(
        ratio > 2.5 && ratio < 6.0,
        "stderr ratio {ratio} outside the 1/sqrt(N) band"
    );
}

#[test]
fn identical_configurations_are_bit_for_bit_identical() {
    let a = mc_call(100_000, 1, true);
    let b = mc_call(100_000, 1, true);

    assert_eq!(a.npv.to_bits(), b.npv.to_bits());
    assert_eq!(a.mc_std_error.to_bits(), b.mc_std_error.to_bits());
    for (ga, gb) in [
        (a.greeks.delta, b.greeks.delta),
        (a.greeks.gamma, b.greeks.gamma),
        (a.greeks.vega, b.greeks.vega),
        (a.greeks.theta, b.greeks.theta),
        (a.greeks.rho, b.greeks.rho),
    ] {
        let (ga, gb) = (ga.unwrap(), gb.unwrap());
        assert_eq!(ga.value.to_bits(), gb.value.to_bits());
        assert_eq!(
            ga.std_error.unwrap().to_bits(),
            gb.std_error.unwrap().to_bits()
        );
    }
}

#[test]
fn every_greek_carries_a_standard_error() {
    let mc = mc_call(50_000, 4, true);
    for greek in [
        mc.greeks.delta,
        mc.greeks.gamma,
        mc.greeks.vega,
        mc.greeks.theta,
        mc.greeks.rho,
    ] {
        let g = greek.expect("mc reports all five greeks");
        assert!(g.value.is_finite());
        assert!(g.std_error.expect("estimator stderr present") >= 0.0);
    }
}

#[test]
fn estimator_greeks_agree_with_closed_forms() {
    let mc = mc_call(400_000, 2, true);
    let reference = analytic_call();

    let checks = [
        (mc.greeks.delta, reference.greeks.delta, 1e-3),
        (mc.greeks.gamma, reference.greeks.gamma, 1e-3),
        (mc.greeks.vega, reference.greeks.vega, 0.3),
        (mc.greeks.theta, reference.greeks.theta, 0.1),
        (mc.greeks.rho, reference.greeks.rho, 0.3),
    ];
    for (estimated, exact, slack) in checks {
        let estimated = estimated.unwrap();
        let exact = exact.unwrap().value;
        let band = 4.0 * estimated.std_error.unwrap() + slack;
        assert!(
            (estimated.value - exact).abs() <= band,
            "estimator {} vs closed form {} (band {band})",
            estimated.value,
            exact
        );
    }
}

#[test]
fn antithetic_halving_keeps_the_estimate_unbiased() {
    let plain = mc_call(200_000, 17, false);
    let anti = mc_call(200_000, 17, true);
    let reference = analytic_call().npv;

    assert!((plain.npv - reference).abs() <= 4.0 * plain.mc_std_error);
    assert!((anti.npv - reference).abs() <= 4.0 * anti.mc_std_error);
    assert!(anti.mc_std_error < plain.mc_std_error);
}
