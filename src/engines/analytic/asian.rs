//! Analytic Asian engines: Turnbull–Wakeman moment matching for arithmetic
//! averages and the closed form for geometric averages.
//!
//! References: Turnbull and Wakeman (1991), Kemna and Vorst (1990),
//! Hull (11th ed.) Ch. 26.
//!
//! The arithmetic engine matches the first two moments of the continuous
//! arithmetic average to a lognormal and then prices with the Black formula.
//! One pricing kernel serves both the reported NPV and the central-difference
//! vega/rho/theta bumps, so bumped prices stay on the same formulation as the
//! base price. Degenerate regimes (sigma -> 0, drift -> 0, moment ratio <= 1)
//! collapse to discounted intrinsic against the forward average instead of
//! producing NaNs.

use crate::core::{GreekValue, Greeks, OptionType, PricingError, PricingResult};
use crate::engines::Engine;
use crate::engines::analytic::black_scholes::{black_formula, d1_d2};
use crate::instruments::AsianOption;
use crate::math::{normal_cdf, normal_pdf};
use crate::pricers::PricingContext;

/// Turnbull–Wakeman approximation for arithmetic-average Asian options.
#[derive(Debug)]
pub struct ArithmeticAsianAnalyticEngine<'a> {
    ctx: &'a PricingContext,
}

impl<'a> ArithmeticAsianAnalyticEngine<'a> {
    pub fn new(ctx: &'a PricingContext) -> Self {
        Self { ctx }
    }
}

/// Forward of the continuous arithmetic average, `E[A] = S0 (e^{mu T} - 1)/(mu T)`.
#[inline]
fn average_forward(s0: f64, mu: f64, t: f64) -> f64 {
    if mu.abs() < 1e-12 {
        s0
    } else {
        s0 * (mu * t).exp_m1() / (mu * t)
    }
}

/// Effective total stddev of the lognormal matched to the average.
///
/// Returns 0 when the moment ratio degenerates (`ln M <= 0`).
fn average_stddev(s0: f64, mu: f64, sigma: f64, t: f64, ea: f64) -> f64 {
    let alpha = mu;
    let beta = sigma * sigma;
    let big_b = 2.0 * alpha + beta;

    let t1 = if big_b.abs() < 1e-16 {
        t
    } else {
        (big_b * t).exp_m1() / big_b
    };
    let t2 = if alpha.abs() < 1e-16 {
        t
    } else {
        (alpha * t).exp_m1() / alpha
    };

    let ea2 = (2.0 * s0 * s0 / (t * t * (alpha + beta))) * (t1 - t2);
    if !(ea > 0.0) || !(ea2 > 0.0) || !ea2.is_finite() {
        return 0.0;
    }

    let log_m = (ea2 / (ea * ea)).ln();
    if log_m > 0.0 { log_m.sqrt() } else { 0.0 }
}

/// Single Turnbull–Wakeman pricing kernel, shared by the base NPV and the
/// finite-difference bumps.
fn turnbull_wakeman_npv(
    option_type: OptionType,
    s0: f64,
    strike: f64,
    dividend: f64,
    notional: f64,
    rate: f64,
    sigma: f64,
    t: f64,
) -> f64 {
    let intrinsic = |x: f64| match option_type {
        OptionType::Call => (x - strike).max(0.0),
        OptionType::Put => (strike - x).max(0.0),
    };

    if !(t > 0.0) {
        return notional * intrinsic(s0);
    }

    let mu = rate - dividend;
    let forward = average_forward(s0, mu, t);
    let df = (-rate * t).exp();

    if sigma <= 0.0 || !(forward > 0.0) {
        return notional * df * intrinsic(forward);
    }

    let stddev = average_stddev(s0, mu, sigma, t, forward);
    if stddev <= 1e-14 {
        return notional * df * intrinsic(forward);
    }

    notional * df * black_formula(option_type, forward, strike, stddev)
}

impl Engine for ArithmeticAsianAnalyticEngine<'_> {
    fn name(&self) -> &'static str {
        "ArithmeticAsianAnalyticEngine"
    }

    fn price_asian(&self, opt: &AsianOption) -> Result<PricingResult, PricingError> {
        opt.validate()?;
        let m = self.ctx.require_local_vol(self.name())?;

        let s0 = m.spot0();
        let r = m.rate_r();
        let q = m.yield_q();
        let sigma = m.vol_sigma();

        let t = opt.expiry();
        let k = opt.strike();
        let notional = opt.notional;
        let option_type = opt.option_type();

        let diagnostics =
            "Turnbull-Wakeman approximation, arithmetic Asian (flat r, q, sigma)".to_string();

        let npv = turnbull_wakeman_npv(option_type, s0, k, q, notional, r, sigma, t);

        let mu = r - q;
        let forward = average_forward(s0, mu, t);
        let stddev = average_stddev(s0, mu, sigma, t, forward);
        if sigma <= 0.0 || stddev <= 1e-14 {
            // Average is deterministic; NPV is discounted intrinsic, Greeks
            // are not reported.
            return Ok(PricingResult {
                npv,
                greeks: Greeks::none(),
                diagnostics,
                mc_std_error: 0.0,
            });
        }

        let df = (-r * t).exp();
        let (d1, _) = d1_d2(forward, k, stddev);
        let df_ds = forward / s0;

        // Chain rule on F = E[A] = S0 * g(mu, T): dF/dS0 = F/S0 and the
        // Black deltas in forward space carry through.
        let delta = match option_type {
            OptionType::Call => notional * df * normal_cdf(d1) * df_ds,
            OptionType::Put => notional * df * (normal_cdf(d1) - 1.0) * df_ds,
        };
        let gamma = notional * df * normal_pdf(d1) * df_ds / (s0 * stddev);

        let reprice = |rate_p: f64, sigma_p: f64, t_p: f64| {
            turnbull_wakeman_npv(option_type, s0, k, q, notional, rate_p, sigma_p, t_p)
        };

        let eps_sigma = (sigma * 1e-3).abs().max(1e-6);
        let vega = (reprice(r, sigma + eps_sigma, t) - reprice(r, sigma - eps_sigma, t))
            / (2.0 * eps_sigma);

        let eps_r = (r * 1e-3).abs().max(1e-6);
        let rho = (reprice(r + eps_r, sigma, t) - reprice(r - eps_r, sigma, t)) / (2.0 * eps_r);

        let eps_t = 1.0 / 365.0;
        let t_minus = (t - eps_t).max(1e-8);
        // Theta per year as calendar time passes (maturity shrinks).
        let theta = (reprice(r, sigma, t_minus) - reprice(r, sigma, t + eps_t)) / (2.0 * eps_t);

        Ok(PricingResult {
            npv,
            greeks: Greeks {
                delta: Some(GreekValue::exact(delta)),
                gamma: Some(GreekValue::exact(gamma)),
                vega: Some(GreekValue::exact(vega)),
                theta: Some(GreekValue::exact(theta)),
                rho: Some(GreekValue::exact(rho)),
            },
            diagnostics,
            mc_std_error: 0.0,
        })
    }
}

/// Closed-form engine for geometric-average Asian options.
///
/// Under Black–Scholes the geometric average of a lognormal path is again
/// lognormal with volatility `sigma / sqrt(3)` and drift
/// `(r - q - sigma^2/2)/2 + sigma_G^2/2`, so the Black formula applies
/// directly.
#[derive(Debug)]
pub struct GeometricAsianAnalyticEngine<'a> {
    ctx: &'a PricingContext,
}

impl<'a> GeometricAsianAnalyticEngine<'a> {
    pub fn new(ctx: &'a PricingContext) -> Self {
        Self { ctx }
    }
}

impl Engine for GeometricAsianAnalyticEngine<'_> {
    fn name(&self) -> &'static str {
        "GeometricAsianAnalyticEngine"
    }

    fn price_asian(&self, opt: &AsianOption) -> Result<PricingResult, PricingError> {
        opt.validate()?;
        let m = self.ctx.require_local_vol(self.name())?;

        let s0 = m.spot0();
        let r = m.rate_r();
        let q = m.yield_q();
        let sigma = m.vol_sigma();

        let t = opt.expiry();
        let k = opt.strike();
        let notional = opt.notional;

        let diagnostics =
            "Closed-form geometric Asian (flat r, q, sigma)".to_string();

        let sigma_g = sigma / 3.0_f64.sqrt();
        let carry = r - q;
        let b_g = (carry - 0.5 * sigma * sigma) / 2.0 + 0.5 * sigma_g * sigma_g;

        let df_r = (-r * t).exp();
        let df_q = (-q * t).exp();
        let forward = s0 * (b_g * t).exp();

        let sqrt_t = t.sqrt();
        let stddev = sigma_g * sqrt_t;

        if stddev <= 1e-14 {
            // Deterministic average: discounted intrinsic against the forward.
            let npv = notional * df_r * opt.payoff.value(forward);
            return Ok(PricingResult {
                npv,
                greeks: Greeks::none(),
                diagnostics,
                mc_std_error: 0.0,
            });
        }

        let (d1, d2) = d1_d2(forward, k, stddev);
        let nd1 = normal_cdf(d1);
        let pdf_d1 = normal_pdf(d1);

        let (npv, delta, theta, rho) = match opt.option_type() {
            OptionType::Call => {
                let npv = df_r * (forward * nd1 - k * normal_cdf(d2));
                let delta = df_q * nd1;
                let theta = -(s0 * df_q * pdf_d1 * sigma_g) / (2.0 * sqrt_t)
                    - r * k * df_r * normal_cdf(d2)
                    + q * s0 * df_q * nd1;
                let rho = t * k * df_r * normal_cdf(d2);
                (npv, delta, theta, rho)
            }
            OptionType::Put => {
                let nmd1 = normal_cdf(-d1);
                let npv = df_r * (k * normal_cdf(-d2) - forward * nmd1);
                let delta = df_q * (nd1 - 1.0);
                let theta = -(s0 * df_q * pdf_d1 * sigma_g) / (2.0 * sqrt_t)
                    + r * k * df_r * normal_cdf(-d2)
                    - q * s0 * df_q * nmd1;
                let rho = -t * k * df_r * normal_cdf(-d2);
                (npv, delta, theta, rho)
            }
        };

        let gamma = df_q * pdf_d1 / (s0 * stddev);
        let vega = s0 * df_q * pdf_d1 * t / 3.0;

        Ok(PricingResult {
            npv: notional * npv,
            greeks: Greeks {
                delta: Some(GreekValue::exact(notional * delta)),
                gamma: Some(GreekValue::exact(notional * gamma)),
                vega: Some(GreekValue::exact(notional * vega)),
                theta: Some(GreekValue::exact(notional * theta)),
                rho: Some(GreekValue::exact(notional * rho)),
            },
            diagnostics,
            mc_std_error: 0.0,
        })
    }
}
