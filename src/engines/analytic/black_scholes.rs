//! Analytic Black–Scholes engine for European vanilla options.
//!
//! Prices off the forward `F = S0 * exp((r - q) * T)` and reports the full
//! closed-form Greek set with continuous cost of carry `q`.
//! References: Hull (11th ed.) Ch. 15, Black and Scholes (1973).

use crate::core::{GreekValue, Greeks, OptionType, PricingError, PricingResult};
use crate::engines::Engine;
use crate::instruments::VanillaOption;
use crate::math::{normal_cdf, normal_pdf};
use crate::pricers::PricingContext;

/// Closed-form Black–Scholes engine (European exercise only).
#[derive(Debug)]
pub struct BlackScholesAnalyticEngine<'a> {
    ctx: &'a PricingContext,
}

impl<'a> BlackScholesAnalyticEngine<'a> {
    pub fn new(ctx: &'a PricingContext) -> Self {
        Self { ctx }
    }
}

#[inline]
pub(crate) fn d1_d2(forward: f64, strike: f64, stddev: f64) -> (f64, f64) {
    let d1 = ((forward / strike).ln() + 0.5 * stddev * stddev) / stddev;
    (d1, d1 - stddev)
}

/// Undiscounted Black formula on a forward.
#[inline]
pub(crate) fn black_formula(option_type: OptionType, forward: f64, strike: f64, stddev: f64) -> f64 {
    let (d1, d2) = d1_d2(forward, strike, stddev);
    match option_type {
        OptionType::Call => forward * normal_cdf(d1) - strike * normal_cdf(d2),
        OptionType::Put => strike * normal_cdf(-d2) - forward * normal_cdf(-d1),
    }
}

pub(crate) fn require_european(opt: &VanillaOption, engine: &str) -> Result<(), PricingError> {
    if !opt.exercise.is_european() {
        return Err(PricingError::InvalidInput(format!(
            "{engine} supports European exercise only"
        )));
    }
    Ok(())
}

impl Engine for BlackScholesAnalyticEngine<'_> {
    fn name(&self) -> &'static str {
        "BlackScholesAnalyticEngine"
    }

    fn price_vanilla(&self, opt: &VanillaOption) -> Result<PricingResult, PricingError> {
        opt.validate()?;
        require_european(opt, self.name())?;
        let m = self.ctx.require_local_vol(self.name())?;

        let s0 = m.spot0();
        let r = m.rate_r();
        let q = m.yield_q();
        let vol = m.vol_sigma();

        let t = opt.expiry();
        let k = opt.strike();
        let notional = opt.notional;

        let df_r = (-r * t).exp();
        let df_q = (-q * t).exp();
        let forward = s0 * df_q / df_r;

        let sqrt_t = t.sqrt();
        let stddev = vol * sqrt_t;

        if stddev <= 0.0 {
            // Deterministic terminal spot: discounted intrinsic against the forward.
            let npv = notional * df_r * opt.payoff.value(forward);
            return Ok(PricingResult::deterministic(
                npv,
                "Black-Scholes analytic European vanilla (flat r, q, sigma), zero-vol intrinsic",
            ));
        }

        let (d1, d2) = d1_d2(forward, k, stddev);
        let nd1 = normal_cdf(d1);
        let nd2 = normal_cdf(d2);
        let pdf_d1 = normal_pdf(d1);

        let (npv, delta, theta, rho) = match opt.option_type() {
            OptionType::Call => {
                let npv = df_r * (forward * nd1 - k * nd2);
                let delta = df_q * nd1;
                let theta = -(s0 * df_q * pdf_d1 * vol) / (2.0 * sqrt_t) - r * k * df_r * nd2
                    + q * s0 * df_q * nd1;
                let rho = t * k * df_r * nd2;
                (npv, delta, theta, rho)
            }
            OptionType::Put => {
                let nmd1 = 1.0 - nd1;
                let nmd2 = 1.0 - nd2;
                let npv = df_r * (k * nmd2 - forward * nmd1);
                let delta = df_q * (nd1 - 1.0);
                let theta = -(s0 * df_q * pdf_d1 * vol) / (2.0 * sqrt_t) + r * k * df_r * nmd2
                    - q * s0 * df_q * nmd1;
                let rho = -t * k * df_r * nmd2;
                (npv, delta, theta, rho)
            }
        };

        let gamma = df_q * pdf_d1 / (s0 * stddev);
        let vega = s0 * df_q * pdf_d1 * sqrt_t;

        Ok(PricingResult {
            npv: notional * npv,
            greeks: Greeks {
                delta: Some(GreekValue::exact(notional * delta)),
                gamma: Some(GreekValue::exact(notional * gamma)),
                vega: Some(GreekValue::exact(notional * vega)),
                theta: Some(GreekValue::exact(notional * theta)),
                rho: Some(GreekValue::exact(notional * rho)),
            },
            diagnostics: "Black-Scholes analytic European vanilla (flat r, q, sigma)".to_string(),
            mc_std_error: 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::price;
    use crate::instruments::Instrument;
    use crate::models::BlackScholesModel;
    use crate::pricers::PricingSettings;
    use crate::market::MarketView;
    use approx::assert_abs_diff_eq;
    use std::sync::Arc;

    fn bs_context() -> PricingContext {
        PricingContext::new(
            MarketView::default(),
            PricingSettings::default(),
            Arc::new(BlackScholesModel::new(100.0, 0.05, 0.02, 0.20)),
        )
    }

    #[test]
    fn atm_call_matches_reference_values() {
        let ctx = bs_context();
        let engine = BlackScholesAnalyticEngine::new(&ctx);
        let res = engine
            .price_vanilla(&VanillaOption::european_call(100.0, 1.0))
            .expect("analytic pricing succeeds");

        assert_abs_diff_eq!(res.npv, 9.22701, epsilon = 1e-5);
        assert_abs_diff_eq!(res.greeks.delta.unwrap().value, 0.586851, epsilon = 1e-4);
        assert_abs_diff_eq!(res.greeks.gamma.unwrap().value, 0.0189506, epsilon = 1e-4);
        assert_abs_diff_eq!(res.greeks.vega.unwrap().value, 37.9012, epsilon = 1e-4);
        assert_abs_diff_eq!(res.greeks.theta.unwrap().value, -5.08932, epsilon = 1e-4);
        assert_abs_diff_eq!(res.greeks.rho.unwrap().value, 49.4581, epsilon = 1e-4);
        assert_eq!(res.mc_std_error, 0.0);
    }

    #[test]
    fn american_exercise_is_invalid_input() {
        let ctx = bs_context();
        let engine = BlackScholesAnalyticEngine::new(&ctx);
        let err = engine
            .price_vanilla(&VanillaOption::american_put(100.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    #[test]
    fn asian_dispatch_is_unsupported() {
        use crate::core::{Averaging, OptionType};
        use crate::instruments::AsianOption;

        let ctx = bs_context();
        let engine = BlackScholesAnalyticEngine::new(&ctx);
        let asian = Instrument::Asian(AsianOption::new(
            OptionType::Call,
            100.0,
            1.0,
            Averaging::Arithmetic,
        ));
        assert!(matches!(
            price(&asian, &engine),
            Err(PricingError::UnsupportedInstrument(_))
        ));
    }

    #[test]
    fn flat_rate_model_lacks_local_vol() {
        use crate::models::FlatRateModel;

        let ctx = PricingContext::new(
            MarketView::default(),
            PricingSettings::default(),
            Arc::new(FlatRateModel::new(0.05)),
        );
        let engine = BlackScholesAnalyticEngine::new(&ctx);
        assert!(matches!(
            engine.price_vanilla(&VanillaOption::european_call(100.0, 1.0)),
            Err(PricingError::InvalidInput(_))
        ));
    }
}
