//! Boyle trinomial tree engine.
//!
//! References: Boyle (1986), Hull (11th ed.) Ch. 21.
//!
//! Nodes at step `i` are indexed `j in [-i, i]` with spot `S0 * u^j`,
//! `u = exp(sigma * sqrt(3 dt))`. Greeks follow the same revaluation scheme
//! as the binomial engine: spot-rescaled trees for delta/gamma, a
//! `sigma + 0.01` rebuild for vega, and a one-fewer-step rebuild for theta.

use crate::core::{GreekValue, Greeks, PricingError, PricingResult};
use crate::engines::Engine;
use crate::instruments::{Payoff, VanillaOption};
use crate::pricers::PricingContext;

/// Boyle trinomial engine; step count comes from `settings.tree_steps`.
#[derive(Debug)]
pub struct TrinomialTreeEngine<'a> {
    ctx: &'a PricingContext,
}

impl<'a> TrinomialTreeEngine<'a> {
    pub fn new(ctx: &'a PricingContext) -> Self {
        Self { ctx }
    }
}

#[derive(Clone, Copy)]
struct BoyleParams {
    u: f64,
    pu: f64,
    pm: f64,
    pd: f64,
    disc: f64,
    steps: usize,
}

impl BoyleParams {
    fn build(
        sigma: f64,
        rate: f64,
        dividend: f64,
        expiry: f64,
        steps: usize,
    ) -> Result<Self, PricingError> {
        let dt = expiry / steps as f64;
        let nu = rate - dividend - 0.5 * sigma * sigma;
        let dx = sigma * (3.0 * dt).sqrt();

        let diffusion = (sigma * sigma * dt + nu * nu * dt * dt) / (dx * dx);
        let shift = nu * dt / dx;
        let pu = 0.5 * (diffusion + shift);
        let pd = 0.5 * (diffusion - shift);
        let pm = 1.0 - pu - pd;

        for p in [pu, pm, pd] {
            if !(0.0..=1.0).contains(&p) || !p.is_finite() {
                return Err(PricingError::InvalidInput(
                    "trinomial probabilities are outside [0, 1]; tree parameters incoherent"
                        .to_string(),
                ));
            }
        }

        Ok(Self {
            u: dx.exp(),
            pu,
            pm,
            pd,
            disc: (-rate * dt).exp(),
            steps,
        })
    }
}

/// Backward induction through one trinomial lattice.
fn roll_tree(payoff: &Payoff, spot: f64, params: &BoyleParams, american: bool) -> f64 {
    let BoyleParams {
        u,
        pu,
        pm,
        pd,
        disc,
        steps,
    } = *params;

    let mut values = vec![0.0_f64; 2 * steps + 1];
    for j in -(steps as isize)..=(steps as isize) {
        let st = spot * u.powi(j as i32);
        values[(j + steps as isize) as usize] = payoff.value(st);
    }

    for i in (0..steps).rev() {
        let mut level = vec![0.0_f64; 2 * i + 1];
        for j in -(i as isize)..=(i as isize) {
            // Children in the step-(i+1) layer sit at offsets j-1, j, j+1.
            let up = values[(j + 1 + (i as isize + 1)) as usize];
            let mid = values[(j + (i as isize + 1)) as usize];
            let down = values[(j - 1 + (i as isize + 1)) as usize];
            let continuation = disc * (pu * up + pm * mid + pd * down);

            let idx = (j + i as isize) as usize;
            level[idx] = if american {
                let st = spot * u.powi(j as i32);
                continuation.max(payoff.value(st))
            } else {
                continuation
            };
        }
        values = level;
    }

    values[0]
}

impl Engine for TrinomialTreeEngine<'_> {
    fn name(&self) -> &'static str {
        "TrinomialTreeEngine"
    }

    fn price_vanilla(&self, opt: &VanillaOption) -> Result<PricingResult, PricingError> {
        opt.validate()?;
        let m = self.ctx.require_local_vol(self.name())?;

        let steps = self.ctx.settings.tree_steps;
        if steps < 1 {
            return Err(PricingError::InvalidInput(
                "trinomial tree requires steps >= 1".to_string(),
            ));
        }

        let s0 = m.spot0();
        let r = m.rate_r();
        let q = m.yield_q();
        let sigma = m.vol_sigma();

        let t = opt.expiry();
        let american = opt.exercise.is_american();
        let payoff = &opt.payoff;
        let notional = opt.notional;

        let params = BoyleParams::build(sigma, r, q, t, steps)?;
        let npv = roll_tree(payoff, s0, &params, american);

        let ds = 0.01 * s0;
        let npv_up = roll_tree(payoff, s0 + ds, &params, american);
        let npv_dn = roll_tree(payoff, s0 - ds, &params, american);
        let delta = (npv_up - npv_dn) / (2.0 * ds);
        let gamma = (npv_up - 2.0 * npv + npv_dn) / (ds * ds);

        let dsigma = 0.01;
        let params_vega = BoyleParams::build(sigma + dsigma, r, q, t, steps)?;
        let vega = (roll_tree(payoff, s0, &params_vega, american) - npv) / dsigma;

        let dt = t / steps as f64;
        let theta = if steps > 1 {
            let params_theta = BoyleParams::build(sigma, r, q, t - dt, steps - 1)?;
            let npv_theta = roll_tree(payoff, s0, &params_theta, american);
            Some(GreekValue::exact(-notional * (npv - npv_theta) / dt))
        } else {
            None
        };

        let exercise_label = if american { "American" } else { "European" };
        Ok(PricingResult {
            npv: notional * npv,
            greeks: Greeks {
                delta: Some(GreekValue::exact(notional * delta)),
                gamma: Some(GreekValue::exact(notional * gamma)),
                vega: Some(GreekValue::exact(notional * vega)),
                theta,
                rho: None,
            },
            diagnostics: format!("Boyle trinomial tree, {exercise_label} vanilla, {steps} steps"),
            mc_std_error: 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::analytic::BlackScholesAnalyticEngine;
    use crate::engines::tree::binomial::BinomialTreeEngine;
    use crate::market::MarketView;
    use crate::models::BlackScholesModel;
    use crate::pricers::PricingSettings;
    use std::sync::Arc;

    fn context(steps: usize) -> PricingContext {
        PricingContext::new(
            MarketView::default(),
            PricingSettings {
                tree_steps: steps,
                ..PricingSettings::default()
            },
            Arc::new(BlackScholesModel::new(100.0, 0.05, 0.02, 0.20)),
        )
    }

    #[test]
    fn european_call_matches_analytic_closely() {
        let ctx = context(200);
        let option = VanillaOption::european_call(100.0, 1.0);
        let tri = TrinomialTreeEngine::new(&ctx).price_vanilla(&option).unwrap();
        let analytic = BlackScholesAnalyticEngine::new(&ctx)
            .price_vanilla(&option)
            .unwrap();

        assert!(
            (tri.npv - analytic.npv).abs() < 0.02,
            "trinomial {} vs analytic {}",
            tri.npv,
            analytic.npv
        );
    }

    #[test]
    fn agrees_with_binomial_at_matching_depth() {
        let ctx = context(100);
        let option = VanillaOption::american_put(100.0, 1.0);
        let tri = TrinomialTreeEngine::new(&ctx).price_vanilla(&option).unwrap();
        let bin = BinomialTreeEngine::new(&ctx).price_vanilla(&option).unwrap();

        assert!(
            (tri.npv - bin.npv).abs() < 0.05,
            "trinomial {} vs binomial {}",
            tri.npv,
            bin.npv
        );
    }

    #[test]
    fn coarse_high_drift_grid_is_rejected() {
        let ctx = PricingContext::new(
            MarketView::default(),
            PricingSettings {
                tree_steps: 1,
                ..PricingSettings::default()
            },
            Arc::new(BlackScholesModel::new(100.0, 3.0, 0.0, 0.05)),
        );
        assert!(matches!(
            TrinomialTreeEngine::new(&ctx)
                .price_vanilla(&VanillaOption::european_call(100.0, 1.0)),
            Err(PricingError::InvalidInput(_))
        ));
    }
}
