//! Flat per-instrument input records accepted by the registry.
//!
//! These are the wire-facing shapes a hosting layer fills in; the adapters
//! turn them into instruments, models, and contexts. Engine knobs default to
//! `n_paths = 200_000`, `seed = 1`, antithetic sampling on, 100 tree steps,
//! and a 100x100 PDE grid.

use serde::{Deserialize, Serialize};

use crate::core::Averaging;

/// European vanilla option under flat Black–Scholes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VanillaBsInput {
    pub spot: f64,
    pub strike: f64,
    pub maturity: f64,
    pub rate: f64,
    pub dividend: f64,
    pub vol: f64,
    pub is_call: bool,

    pub n_paths: usize,
    pub seed: u64,
    pub mc_antithetic: bool,
    pub tree_steps: usize,
    pub pde_space_steps: usize,
    pub pde_time_steps: usize,
}

impl Default for VanillaBsInput {
    fn default() -> Self {
        Self {
            spot: 0.0,
            strike: 0.0,
            maturity: 0.0,
            rate: 0.0,
            dividend: 0.0,
            vol: 0.0,
            is_call: true,
            n_paths: 200_000,
            seed: 1,
            mc_antithetic: true,
            tree_steps: 100,
            pde_space_steps: 100,
            pde_time_steps: 100,
        }
    }
}

/// American vanilla option under flat Black–Scholes (lattice engines only,
/// so the Monte Carlo knobs are absent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmericanVanillaBsInput {
    pub spot: f64,
    pub strike: f64,
    pub maturity: f64,
    pub rate: f64,
    pub dividend: f64,
    pub vol: f64,
    pub is_call: bool,

    pub tree_steps: usize,
    pub pde_space_steps: usize,
    pub pde_time_steps: usize,
}

impl Default for AmericanVanillaBsInput {
    fn default() -> Self {
        Self {
            spot: 0.0,
            strike: 0.0,
            maturity: 0.0,
            rate: 0.0,
            dividend: 0.0,
            vol: 0.0,
            is_call: true,
            tree_steps: 100,
            pde_space_steps: 100,
            pde_time_steps: 100,
        }
    }
}

/// European Asian option under flat Black–Scholes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsianBsInput {
    pub spot: f64,
    pub strike: f64,
    pub maturity: f64,
    pub rate: f64,
    pub dividend: f64,
    pub vol: f64,
    pub is_call: bool,
    pub average_type: Averaging,

    pub n_paths: usize,
    pub seed: u64,
    pub mc_antithetic: bool,
}

impl Default for AsianBsInput {
    fn default() -> Self {
        Self {
            spot: 0.0,
            strike: 0.0,
            maturity: 0.0,
            rate: 0.0,
            dividend: 0.0,
            vol: 0.0,
            is_call: true,
            average_type: Averaging::Arithmetic,
            n_paths: 200_000,
            seed: 1,
            mc_antithetic: true,
        }
    }
}

/// Equity future priced off continuous cost of carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquityFutureInput {
    pub spot: f64,
    pub strike: f64,
    pub maturity: f64,
    pub rate: f64,
    pub dividend: f64,
    pub notional: f64,
}

/// Zero-coupon bond under a flat rate, optionally discounted off a curve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZeroCouponBondInput {
    pub maturity: f64,
    pub rate: f64,
    pub notional: f64,
    /// Optional curve knots; leave both empty for flat-rate discounting.
    pub discount_times: Vec<f64>,
    pub discount_factors: Vec<f64>,
}

/// Fixed-rate bullet bond under a flat rate, optionally discounted off a
/// curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedRateBondInput {
    pub maturity: f64,
    pub rate: f64,
    pub coupon_rate: f64,
    pub coupon_frequency: u32,
    pub notional: f64,
    pub discount_times: Vec<f64>,
    pub discount_factors: Vec<f64>,
}

impl Default for FixedRateBondInput {
    fn default() -> Self {
        Self {
            maturity: 0.0,
            rate: 0.0,
            coupon_rate: 0.0,
            coupon_frequency: 1,
            notional: 0.0,
            discount_times: Vec::new(),
            discount_factors: Vec::new(),
        }
    }
}
