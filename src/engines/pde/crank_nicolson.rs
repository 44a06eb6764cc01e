//! Crank–Nicolson finite-difference engine for European vanillas.
//!
//! Works in log-moneyness `x = ln(S/K)` on the fixed band `[-1, 1]`, where
//! the Black–Scholes PDE becomes constant-coefficient:
//! `dV/dtau = 0.5 sigma^2 V_xx + (r - q - 0.5 sigma^2) V_x - r V`.
//! Each step solves `(I - 0.5 dt L) V^n = (I + 0.5 dt L) V^{n+1}` with a
//! three-point central stencil and Dirichlet boundaries, via the Thomas
//! algorithm. Spot sensitivities re-run the full solver with every grid-node
//! spot rescaled by `(S0 +/- dS)/S0`; the strike and the read-out abscissa
//! stay fixed.

use crate::core::{GreekValue, Greeks, OptionType, PricingError, PricingResult};
use crate::engines::Engine;
use crate::engines::analytic::black_scholes::require_european;
use crate::instruments::{Payoff, VanillaOption};
use crate::pricers::PricingContext;

/// Crank–Nicolson engine; grid sizes come from
/// `settings.pde_space_steps` / `settings.pde_time_steps`.
#[derive(Debug)]
pub struct CrankNicolsonEngine<'a> {
    ctx: &'a PricingContext,
}

impl<'a> CrankNicolsonEngine<'a> {
    pub fn new(ctx: &'a PricingContext) -> Self {
        Self { ctx }
    }
}

const X_MIN: f64 = -1.0;
const X_MAX: f64 = 1.0;

/// Thomas algorithm for a tridiagonal system; `lower[0]` and
/// `upper[n-1]` are ignored.
fn solve_tridiagonal(
    lower: &[f64],
    diag: &[f64],
    upper: &[f64],
    rhs: &[f64],
    c_star: &mut [f64],
    d_star: &mut [f64],
    x: &mut [f64],
) {
    let n = diag.len();

    c_star[0] = upper[0] / diag[0];
    d_star[0] = rhs[0] / diag[0];
    for i in 1..n {
        let denom = diag[i] - lower[i] * c_star[i - 1];
        c_star[i] = if i < n - 1 { upper[i] / denom } else { 0.0 };
        d_star[i] = (rhs[i] - lower[i] * d_star[i - 1]) / denom;
    }

    x[n - 1] = d_star[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d_star[i] - c_star[i] * x[i + 1];
    }
}

struct GridSpec {
    strike: f64,
    rate: f64,
    dividend: f64,
    sigma: f64,
    expiry: f64,
    space_steps: usize,
    time_steps: usize,
}

/// Runs one full backward sweep and returns the value interpolated at `x0`.
///
/// `spot_scale` rescales every grid-node spot (and the upper boundary) and is
/// 1 for the base valuation.
fn solve_grid(spec: &GridSpec, payoff: &Payoff, x0: f64, spot_scale: f64) -> f64 {
    let m = spec.space_steps;
    let n_t = spec.time_steps;
    let dx = (X_MAX - X_MIN) / m as f64;
    let dt = spec.expiry / n_t as f64;

    let alpha = 0.5 * spec.sigma * spec.sigma;
    let drift = spec.rate - spec.dividend - alpha;
    let lambda = dt / (dx * dx);
    let mu = dt / (2.0 * dx);

    // Spatial operator weights: L = alpha d_xx + drift d_x - r.
    let w_dn = alpha * lambda - drift * mu;
    let w_up = alpha * lambda + drift * mu;
    let w_diag = -2.0 * alpha * lambda - spec.rate * dt;

    let interior = m - 1;
    let mut lhs_lower = vec![0.0_f64; interior];
    let mut lhs_diag = vec![0.0_f64; interior];
    let mut lhs_upper = vec![0.0_f64; interior];
    for k in 0..interior {
        lhs_lower[k] = -0.5 * w_dn;
        lhs_diag[k] = 1.0 - 0.5 * w_diag;
        lhs_upper[k] = -0.5 * w_up;
    }

    // Node spots and terminal condition.
    let mut spots = vec![0.0_f64; m + 1];
    let mut values = vec![0.0_f64; m + 1];
    for j in 0..=m {
        let x = X_MIN + j as f64 * dx;
        spots[j] = spot_scale * spec.strike * x.exp();
        values[j] = payoff.value(spots[j]);
    }

    let mut rhs = vec![0.0_f64; interior];
    let mut c_star = vec![0.0_f64; interior];
    let mut d_star = vec![0.0_f64; interior];
    let mut solution = vec![0.0_f64; interior];

    for n in (0..n_t).rev() {
        // Remaining maturity at the level being solved.
        let tau = spec.expiry - n as f64 * dt;
        let df = (-spec.rate * tau).exp();
        let (lower_bc, upper_bc) = match payoff.option_type {
            OptionType::Call => (0.0, (spots[m] - spec.strike * df).max(0.0)),
            OptionType::Put => (spec.strike * df, 0.0),
        };

        for k in 0..interior {
            let j = k + 1;
            rhs[k] = 0.5 * w_dn * values[j - 1]
                + (1.0 + 0.5 * w_diag) * values[j]
                + 0.5 * w_up * values[j + 1];
        }
        rhs[0] -= lhs_lower[0] * lower_bc;
        rhs[interior - 1] -= lhs_upper[interior - 1] * upper_bc;

        solve_tridiagonal(
            &lhs_lower, &lhs_diag, &lhs_upper, &rhs, &mut c_star, &mut d_star, &mut solution,
        );

        values[0] = lower_bc;
        values[m] = upper_bc;
        values[1..m].copy_from_slice(&solution);
    }

    if x0 <= X_MIN {
        values[0]
    } else if x0 >= X_MAX {
        values[m]
    } else {
        let pos = (x0 - X_MIN) / dx;
        let j = pos.floor() as usize;
        let w = pos - j as f64;
        (1.0 - w) * values[j] + w * values[j + 1]
    }
}

impl Engine for CrankNicolsonEngine<'_> {
    fn name(&self) -> &'static str {
        "CrankNicolsonEngine"
    }

    fn price_vanilla(&self, opt: &VanillaOption) -> Result<PricingResult, PricingError> {
        opt.validate()?;
        require_european(opt, self.name())?;
        let m_model = self.ctx.require_local_vol(self.name())?;

        let space_steps = self.ctx.settings.pde_space_steps;
        let time_steps = self.ctx.settings.pde_time_steps;
        if space_steps < 2 {
            return Err(PricingError::InvalidInput(
                "PDE requires space_steps >= 2".to_string(),
            ));
        }
        if time_steps < 1 {
            return Err(PricingError::InvalidInput(
                "PDE requires time_steps >= 1".to_string(),
            ));
        }

        let s0 = m_model.spot0();
        let spec = GridSpec {
            strike: opt.strike(),
            rate: m_model.rate_r(),
            dividend: m_model.yield_q(),
            sigma: m_model.vol_sigma(),
            expiry: opt.expiry(),
            space_steps,
            time_steps,
        };

        let x0 = (s0 / spec.strike).ln();
        let npv = solve_grid(&spec, &opt.payoff, x0, 1.0);

        // Delta and gamma from full re-solves with rescaled node spots.
        let ds = 0.01 * s0;
        let npv_up = solve_grid(&spec, &opt.payoff, x0, (s0 + ds) / s0);
        let npv_dn = solve_grid(&spec, &opt.payoff, x0, (s0 - ds) / s0);
        let delta = (npv_up - npv_dn) / (2.0 * ds);
        let gamma = (npv_up - 2.0 * npv + npv_dn) / (ds * ds);

        let notional = opt.notional;
        Ok(PricingResult {
            npv: notional * npv,
            greeks: Greeks {
                delta: Some(GreekValue::exact(notional * delta)),
                gamma: Some(GreekValue::exact(notional * gamma)),
                vega: None,
                theta: None,
                rho: None,
            },
            diagnostics: format!(
                "Crank-Nicolson log-moneyness PDE, European vanilla, {space_steps}x{time_steps} grid"
            ),
            mc_std_error: 0.0,
        })
    }
}
