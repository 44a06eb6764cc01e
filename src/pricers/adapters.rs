//! Adapters from flat input records to instrument/model/context triples.
//!
//! Each adapter owns one instrument family: it builds the instrument and the
//! model, wires the numerical settings, picks the concrete engine for the
//! requested [`EngineKind`], and runs the double dispatch.

use std::sync::Arc;

use crate::core::{OptionType, PricingError, PricingResult};
use crate::engines::analytic::{
    ArithmeticAsianAnalyticEngine, BlackScholesAnalyticEngine, EquityFutureAnalyticEngine,
    FlatRateBondAnalyticEngine, GeometricAsianAnalyticEngine,
};
use crate::engines::monte_carlo::{AsianMonteCarloEngine, VanillaMonteCarloEngine};
use crate::engines::pde::CrankNicolsonEngine;
use crate::engines::tree::{BinomialTreeEngine, TrinomialTreeEngine};
use crate::engines::price;
use crate::instruments::{
    AsianOption, EquityFuture, FixedRateBond, Instrument, VanillaOption, ZeroCouponBond,
};
use crate::market::{DiscountCurve, MarketView};
use crate::models::{BlackScholesModel, FlatRateModel};
use crate::pricers::inputs::{
    AmericanVanillaBsInput, AsianBsInput, EquityFutureInput, FixedRateBondInput, VanillaBsInput,
    ZeroCouponBondInput,
};
use crate::pricers::registry::EngineKind;
use crate::pricers::{PricingContext, PricingSettings};

fn option_type(is_call: bool) -> OptionType {
    if is_call {
        OptionType::Call
    } else {
        OptionType::Put
    }
}

/// Prices a European vanilla under flat Black–Scholes with the requested
/// engine.
pub fn price_equity_vanilla_bs(
    input: &VanillaBsInput,
    engine: EngineKind,
) -> Result<PricingResult, PricingError> {
    let mut option = VanillaOption::european_call(input.strike, input.maturity);
    option.payoff.option_type = option_type(input.is_call);
    let instrument = Instrument::Vanilla(option);

    let model = Arc::new(BlackScholesModel::new(
        input.spot,
        input.rate,
        input.dividend,
        input.vol,
    ));
    let settings = PricingSettings {
        mc_paths: input.n_paths,
        mc_seed: input.seed,
        mc_antithetic: input.mc_antithetic,
        tree_steps: input.tree_steps,
        pde_space_steps: input.pde_space_steps,
        pde_time_steps: input.pde_time_steps,
    };
    let ctx = PricingContext::new(MarketView::default(), settings, model);

    match engine {
        EngineKind::Analytic => price(&instrument, &BlackScholesAnalyticEngine::new(&ctx)),
        EngineKind::MonteCarlo => price(&instrument, &VanillaMonteCarloEngine::new(&ctx)),
        EngineKind::BinomialTree => price(&instrument, &BinomialTreeEngine::new(&ctx)),
        EngineKind::TrinomialTree => price(&instrument, &TrinomialTreeEngine::new(&ctx)),
        EngineKind::PdeFiniteDifference => price(&instrument, &CrankNicolsonEngine::new(&ctx)),
    }
}

/// Prices an American vanilla under flat Black–Scholes on a lattice.
pub fn price_equity_vanilla_american_bs(
    input: &AmericanVanillaBsInput,
    engine: EngineKind,
) -> Result<PricingResult, PricingError> {
    let mut option = VanillaOption::american_call(input.strike, input.maturity);
    option.payoff.option_type = option_type(input.is_call);
    let instrument = Instrument::Vanilla(option);

    let model = Arc::new(BlackScholesModel::new(
        input.spot,
        input.rate,
        input.dividend,
        input.vol,
    ));
    let settings = PricingSettings {
        tree_steps: input.tree_steps,
        pde_space_steps: input.pde_space_steps,
        pde_time_steps: input.pde_time_steps,
        ..PricingSettings::default()
    };
    let ctx = PricingContext::new(MarketView::default(), settings, model);

    match engine {
        EngineKind::BinomialTree => price(&instrument, &BinomialTreeEngine::new(&ctx)),
        EngineKind::TrinomialTree => price(&instrument, &TrinomialTreeEngine::new(&ctx)),
        _ => Err(PricingError::UnsupportedInstrument(
            "American vanillas are priced on lattice engines only".to_string(),
        )),
    }
}

/// Prices a European Asian under flat Black–Scholes.
pub fn price_equity_asian_bs(
    input: &AsianBsInput,
    engine: EngineKind,
) -> Result<PricingResult, PricingError> {
    let option = AsianOption::new(
        option_type(input.is_call),
        input.strike,
        input.maturity,
        input.average_type,
    );
    let average_type = option.average_type;
    let instrument = Instrument::Asian(option);

    let model = Arc::new(BlackScholesModel::new(
        input.spot,
        input.rate,
        input.dividend,
        input.vol,
    ));
    let settings = PricingSettings {
        mc_paths: input.n_paths,
        mc_seed: input.seed,
        mc_antithetic: input.mc_antithetic,
        ..PricingSettings::default()
    };
    let ctx = PricingContext::new(MarketView::default(), settings, model);

    match engine {
        EngineKind::MonteCarlo => price(&instrument, &AsianMonteCarloEngine::new(&ctx)),
        EngineKind::Analytic => match average_type {
            crate::core::Averaging::Arithmetic => {
                price(&instrument, &ArithmeticAsianAnalyticEngine::new(&ctx))
            }
            crate::core::Averaging::Geometric => {
                price(&instrument, &GeometricAsianAnalyticEngine::new(&ctx))
            }
        },
        _ => Err(PricingError::UnsupportedInstrument(
            "Asian options are priced analytically or by Monte Carlo only".to_string(),
        )),
    }
}

/// Prices an equity future off the carry forward.
pub fn price_equity_future_bs(input: &EquityFutureInput) -> Result<PricingResult, PricingError> {
    let instrument = Instrument::Future(EquityFuture::new(
        input.strike,
        input.maturity,
        input.notional,
    ));

    // The forward needs spot, rate and dividend only; volatility is inert.
    let model = Arc::new(BlackScholesModel::new(
        input.spot,
        input.rate,
        input.dividend,
        0.0,
    ));
    let ctx = PricingContext::new(MarketView::default(), PricingSettings::default(), model);

    price(&instrument, &EquityFutureAnalyticEngine::new(&ctx))
}

fn bond_market(
    times: &[f64],
    factors: &[f64],
) -> Result<MarketView, PricingError> {
    if times.is_empty() && factors.is_empty() {
        Ok(MarketView::default())
    } else {
        let curve = DiscountCurve::from_table(times.to_vec(), factors.to_vec())?;
        Ok(MarketView::with_discount(curve))
    }
}

/// Prices a zero-coupon bond under a flat rate or a supplied curve.
pub fn price_zero_coupon_bond_flat(
    input: &ZeroCouponBondInput,
) -> Result<PricingResult, PricingError> {
    let instrument = Instrument::ZeroCoupon(ZeroCouponBond::new(input.maturity, input.notional));
    let market = bond_market(&input.discount_times, &input.discount_factors)?;
    let ctx = PricingContext::new(
        market,
        PricingSettings::default(),
        Arc::new(FlatRateModel::new(input.rate)),
    );
    price(&instrument, &FlatRateBondAnalyticEngine::new(&ctx))
}

/// Prices a fixed-rate bullet bond under a flat rate or a supplied curve.
pub fn price_fixed_rate_bond_flat(
    input: &FixedRateBondInput,
) -> Result<PricingResult, PricingError> {
    let instrument = Instrument::FixedRate(FixedRateBond::new(
        input.coupon_rate,
        input.maturity,
        input.coupon_frequency,
        input.notional,
    ));
    let market = bond_market(&input.discount_times, &input.discount_factors)?;
    let ctx = PricingContext::new(
        market,
        PricingSettings::default(),
        Arc::new(FlatRateModel::new(input.rate)),
    );
    price(&instrument, &FlatRateBondAnalyticEngine::new(&ctx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vanilla_adapter_routes_all_engines() {
        let input = VanillaBsInput {
            spot: 100.0,
            strike: 100.0,
            maturity: 1.0,
            rate: 0.05,
            dividend: 0.02,
            vol: 0.20,
            is_call: true,
            n_paths: 20_000,
            ..VanillaBsInput::default()
        };

        let analytic = price_equity_vanilla_bs(&input, EngineKind::Analytic).unwrap();
        for kind in [
            EngineKind::MonteCarlo,
            EngineKind::BinomialTree,
            EngineKind::TrinomialTree,
            EngineKind::PdeFiniteDifference,
        ] {
            let res = price_equity_vanilla_bs(&input, kind).unwrap();
            assert!(
                (res.npv - analytic.npv).abs() < 0.2,
                "{kind:?} npv {} vs analytic {}",
                res.npv,
                analytic.npv
            );
        }
    }

    #[test]
    fn american_adapter_rejects_pde() {
        let input = AmericanVanillaBsInput {
            spot: 100.0,
            strike: 100.0,
            maturity: 1.0,
            rate: 0.05,
            dividend: 0.02,
            vol: 0.20,
            is_call: false,
            ..AmericanVanillaBsInput::default()
        };
        assert!(matches!(
            price_equity_vanilla_american_bs(&input, EngineKind::PdeFiniteDifference),
            Err(PricingError::UnsupportedInstrument(_))
        ));
        assert!(price_equity_vanilla_american_bs(&input, EngineKind::BinomialTree).is_ok());
    }

    #[test]
    fn bond_adapter_validates_curve_arrays() {
        let input = ZeroCouponBondInput {
            maturity: 2.0,
            rate: 0.03,
            notional: 1000.0,
            discount_times: vec![1.0, 2.0],
            discount_factors: vec![0.97],
        };
        assert!(matches!(
            price_zero_coupon_bond_flat(&input),
            Err(PricingError::InvalidInput(_))
        ));
    }
}
