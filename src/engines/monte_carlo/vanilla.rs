//! Monte Carlo engine for European vanillas with estimator-based Greeks.
//!
//! References: Glasserman (2004) Ch. 4 and 7 for pathwise and
//! likelihood-ratio estimators, Hull (11th ed.) Ch. 21 for the terminal-spot
//! scheme.
//!
//! One standard normal `z` drives five valuations per path: the base payoff,
//! the spot-bumped payoffs for gamma, and the maturity-bumped terminals for
//! theta (common random numbers). Delta is pathwise, vega and rho are
//! likelihood-ratio estimators, gamma and theta are central differences.
//! Every statistic runs through the shared Welford accumulator, and results
//! are bit-for-bit reproducible for a fixed `(seed, paths, antithetic)`.

use crate::core::{GreekValue, Greeks, OptionType, PricingError, PricingResult};
use crate::engines::Engine;
use crate::engines::analytic::black_scholes::require_european;
use crate::instruments::VanillaOption;
use crate::math::{NormalBoxMuller, RngFactory, Welford};
use crate::pricers::PricingContext;

/// Terminal-spot Monte Carlo engine for European vanillas.
#[derive(Debug)]
pub struct VanillaMonteCarloEngine<'a> {
    ctx: &'a PricingContext,
}

impl<'a> VanillaMonteCarloEngine<'a> {
    pub fn new(ctx: &'a PricingContext) -> Self {
        Self { ctx }
    }
}

const THETA_BUMP: f64 = 1.0 / 365.0;

/// Per-draw statistics produced from one standard normal.
#[derive(Clone, Copy)]
struct PathValues {
    payoff: f64,
    delta: f64,
    vega: f64,
    rho: f64,
    payoff_s_up: f64,
    payoff_s_dn: f64,
    payoff_t_up: f64,
    payoff_t_dn: f64,
}

impl PathValues {
    fn average(a: Self, b: Self) -> Self {
        Self {
            payoff: 0.5 * (a.payoff + b.payoff),
            delta: 0.5 * (a.delta + b.delta),
            vega: 0.5 * (a.vega + b.vega),
            rho: 0.5 * (a.rho + b.rho),
            payoff_s_up: 0.5 * (a.payoff_s_up + b.payoff_s_up),
            payoff_s_dn: 0.5 * (a.payoff_s_dn + b.payoff_s_dn),
            payoff_t_up: 0.5 * (a.payoff_t_up + b.payoff_t_up),
            payoff_t_dn: 0.5 * (a.payoff_t_dn + b.payoff_t_dn),
        }
    }
}

#[derive(Default)]
struct Accumulators {
    payoff: Welford,
    delta: Welford,
    vega: Welford,
    rho: Welford,
    gamma: Welford,
    theta: Welford,
}

impl Engine for VanillaMonteCarloEngine<'_> {
    fn name(&self) -> &'static str {
        "VanillaMonteCarloEngine"
    }

    fn price_vanilla(&self, opt: &VanillaOption) -> Result<PricingResult, PricingError> {
        opt.validate()?;
        require_european(opt, self.name())?;
        let m = self.ctx.require_local_vol(self.name())?;

        let settings = self.ctx.settings;
        if settings.mc_paths < 1 {
            return Err(PricingError::InvalidInput(
                "Monte Carlo requires mc_paths >= 1".to_string(),
            ));
        }

        let s0 = m.spot0();
        let r = m.rate_r();
        let q = m.yield_q();
        let sigma = m.vol_sigma();

        let t = opt.expiry();
        let k = opt.strike();
        let option_type = opt.option_type();
        let payoff = opt.payoff;
        let notional = opt.notional;

        let sqrt_t = t.sqrt();
        let root_variance = sigma * sqrt_t;
        let ito_correction = -0.5 * sigma * sigma;
        let moved_spot = s0 * ((r - q + ito_correction) * t).exp();
        let df = (-r * t).exp();

        // Bumped-scenario constants for the common-random-number FD Greeks.
        let ds = 0.01 * s0;
        let factor_up = (s0 + ds) / s0;
        let factor_dn = (s0 - ds) / s0;
        let t_up = t + THETA_BUMP;
        let t_dn = (t - THETA_BUMP).max(1e-8);
        let root_variance_t_up = sigma * t_up.sqrt();
        let root_variance_t_dn = sigma * t_dn.sqrt();
        let moved_spot_t_up = s0 * ((r - q + ito_correction) * t_up).exp();
        let moved_spot_t_dn = s0 * ((r - q + ito_correction) * t_dn).exp();
        let df_t_up = (-r * t_up).exp();
        let df_t_dn = (-r * t_dn).exp();

        // Likelihood-ratio scores degenerate as sigma -> 0; fall back to zero
        // scores rather than dividing by sigma.
        let lrm_enabled = sigma > 1e-10;

        let path_values = |z: f64| -> PathValues {
            let st = moved_spot * (root_variance * z).exp();
            let payoff_val = payoff.value(st);

            // Pathwise delta: indicator of exercise times dS_T/dS0, discounted.
            let delta = match option_type {
                OptionType::Call if st > k => df * (st / s0),
                OptionType::Put if st < k => -df * (st / s0),
                _ => 0.0,
            };

            let (score_sigma, score_r) = if lrm_enabled {
                ((z * z - 1.0) / sigma, z * sqrt_t / sigma)
            } else {
                (0.0, 0.0)
            };
            let vega = payoff_val * score_sigma;
            let rho = -t * payoff_val + payoff_val * score_r;

            let st_t_up = moved_spot_t_up * (root_variance_t_up * z).exp();
            let st_t_dn = moved_spot_t_dn * (root_variance_t_dn * z).exp();

            PathValues {
                payoff: payoff_val,
                delta,
                vega,
                rho,
                payoff_s_up: payoff.value(st * factor_up),
                payoff_s_dn: payoff.value(st * factor_dn),
                payoff_t_up: payoff.value(st_t_up),
                payoff_t_dn: payoff.value(st_t_dn),
            }
        };

        let mut acc = Accumulators::default();
        let mut push = |v: PathValues| {
            acc.payoff.update(v.payoff);
            acc.delta.update(v.delta);
            acc.vega.update(v.vega);
            acc.rho.update(v.rho);

            let gamma = df * (v.payoff_s_up - 2.0 * v.payoff + v.payoff_s_dn) / (ds * ds);
            let theta = (df_t_dn * v.payoff_t_dn - df_t_up * v.payoff_t_up) / (2.0 * THETA_BUMP);
            acc.gamma.update(gamma);
            acc.theta.update(theta);
        };

        let rng_factory = RngFactory::new(settings.mc_seed);
        let mut rng = rng_factory.make(0);
        let mut gauss = NormalBoxMuller::new();

        if settings.mc_antithetic {
            let pairs = settings.mc_paths / 2;
            let has_odd = settings.mc_paths % 2 != 0;
            for _ in 0..pairs {
                let z = gauss.next(&mut rng);
                push(PathValues::average(path_values(z), path_values(-z)));
            }
            if has_odd {
                let z = gauss.next(&mut rng);
                push(path_values(z));
            }
        } else {
            for _ in 0..settings.mc_paths {
                let z = gauss.next(&mut rng);
                push(path_values(z));
            }
        }

        let npv = notional * df * acc.payoff.mean();
        let mc_std_error = notional * df * acc.payoff.std_error();

        let greeks = Greeks {
            delta: Some(GreekValue::estimated(
                notional * acc.delta.mean(),
                notional * acc.delta.std_error(),
            )),
            gamma: Some(GreekValue::estimated(
                notional * acc.gamma.mean(),
                notional * acc.gamma.std_error(),
            )),
            vega: Some(GreekValue::estimated(
                notional * df * acc.vega.mean(),
                notional * df * acc.vega.std_error(),
            )),
            theta: Some(GreekValue::estimated(
                notional * acc.theta.mean(),
                notional * acc.theta.std_error(),
            )),
            rho: Some(GreekValue::estimated(
                notional * df * acc.rho.mean(),
                notional * df * acc.rho.std_error(),
            )),
        };

        let diagnostics = if settings.mc_antithetic {
            format!(
                "Black-Scholes Monte Carlo European vanilla, {} paths, antithetic",
                settings.mc_paths
            )
        } else {
            format!(
                "Black-Scholes Monte Carlo European vanilla, {} paths",
                settings.mc_paths
            )
        };

        Ok(PricingResult {
            npv,
            greeks,
            diagnostics,
            mc_std_error,
        })
    }
}
