//! Cox–Ross–Rubinstein binomial tree engine.
//!
//! References: Cox, Ross and Rubinstein (1979), Hull (11th ed.) Ch. 13.
//!
//! Handles European and American vanillas. Greeks come from parallel tree
//! revaluations: delta/gamma rescale the spot by +/-1% on the same tree
//! geometry, vega rebuilds the lattice at `sigma + 0.01`, theta rebuilds it
//! with one fewer step. Every revaluation applies the same early-exercise
//! rule as the base roll.

use crate::core::{GreekValue, Greeks, PricingError, PricingResult};
use crate::engines::Engine;
use crate::instruments::{Payoff, VanillaOption};
use crate::pricers::PricingContext;

/// CRR binomial engine; step count comes from `settings.tree_steps`.
#[derive(Debug)]
pub struct BinomialTreeEngine<'a> {
    ctx: &'a PricingContext,
}

impl<'a> BinomialTreeEngine<'a> {
    pub fn new(ctx: &'a PricingContext) -> Self {
        Self { ctx }
    }
}

#[derive(Clone, Copy)]
struct CrrParams {
    u: f64,
    d: f64,
    p: f64,
    disc: f64,
    steps: usize,
}

impl CrrParams {
    fn build(
        sigma: f64,
        rate: f64,
        dividend: f64,
        expiry: f64,
        steps: usize,
    ) -> Result<Self, PricingError> {
        let dt = expiry / steps as f64;
        let u = (sigma * dt.sqrt()).exp();
        let d = 1.0 / u;
        let growth = ((rate - dividend) * dt).exp();
        let p = (growth - d) / (u - d);
        if !(0.0..=1.0).contains(&p) || !p.is_finite() {
            return Err(PricingError::InvalidInput(
                "risk-neutral probability is outside [0, 1]; tree parameters incoherent"
                    .to_string(),
            ));
        }
        Ok(Self {
            u,
            d,
            p,
            disc: (-rate * dt).exp(),
            steps,
        })
    }
}

/// Backward induction through one CRR lattice.
fn roll_tree(payoff: &Payoff, spot: f64, params: &CrrParams, american: bool) -> f64 {
    let CrrParams {
        u, d, p, disc, steps,
    } = *params;
    let ratio = u / d;
    let disc_p = disc * p;
    let disc_1mp = disc * (1.0 - p);

    // Terminal layer: spot * u^j * d^(steps-j) via multiplicative recurrence.
    let mut values = vec![0.0_f64; steps + 1];
    let mut st = spot * d.powi(steps as i32);
    for value in values.iter_mut() {
        *value = payoff.value(st);
        st *= ratio;
    }

    let mut base = spot * d.powi(steps as i32 - 1);
    for i in (0..steps).rev() {
        if american {
            let mut st = base;
            for j in 0..=i {
                let continuation = disc_p * values[j + 1] + disc_1mp * values[j];
                values[j] = continuation.max(payoff.value(st));
                st *= ratio;
            }
        } else {
            for j in 0..=i {
                values[j] = disc_p * values[j + 1] + disc_1mp * values[j];
            }
        }
        base *= u;
    }

    values[0]
}

impl Engine for BinomialTreeEngine<'_> {
    fn name(&self) -> &'static str {
        "BinomialTreeEngine"
    }

    fn price_vanilla(&self, opt: &VanillaOption) -> Result<PricingResult, PricingError> {
        opt.validate()?;
        let m = self.ctx.require_local_vol(self.name())?;

        let steps = self.ctx.settings.tree_steps;
        if steps < 1 {
            return Err(PricingError::InvalidInput(
                "binomial tree requires steps >= 1".to_string(),
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

        let params = CrrParams::build(sigma, r, q, t, steps)?;
        let npv = roll_tree(payoff, s0, &params, american);

        // Delta and gamma from spot-rescaled trees on the same geometry.
        let ds = 0.01 * s0;
        let npv_up = roll_tree(payoff, s0 + ds, &params, american);
        let npv_dn = roll_tree(payoff, s0 - ds, &params, american);
        let delta = (npv_up - npv_dn) / (2.0 * ds);
        let gamma = (npv_up - 2.0 * npv + npv_dn) / (ds * ds);

        // Vega from a lattice rebuilt at sigma + 0.01.
        let dsigma = 0.01;
        let params_vega = CrrParams::build(sigma + dsigma, r, q, t, steps)?;
        let vega = (roll_tree(payoff, s0, &params_vega, american) - npv) / dsigma;

        // Theta from a lattice with one fewer step.
        let dt = t / steps as f64;
        let theta = if steps > 1 {
            let params_theta = CrrParams::build(sigma, r, q, t - dt, steps - 1)?;
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
            diagnostics: format!("CRR binomial tree, {exercise_label} vanilla, {steps} steps"),
            mc_std_error: 0.0,
        })
    }
}
