//! Market models and the capability traits engines program against.
//!
//! Engines never depend on a concrete model type. An equity engine asks its
//! context for the [`LocalVol`] capability (spot, rate, dividend yield,
//! volatility at spot/t=0); a bond engine asks for [`FlatRate`]. A model that
//! lacks the requested capability fails the pricing call with
//! `InvalidInput` at dispatch time, before any numerics run.

use std::fmt;

/// Base trait implemented by every market model.
pub trait Model: fmt::Debug + Send + Sync {
    /// Model identifier used in capability-mismatch diagnostics.
    fn model_name(&self) -> &'static str;

    /// Local-volatility capability, if the model offers one.
    fn as_local_vol(&self) -> Option<&dyn LocalVol> {
        None
    }

    /// Flat-rate capability, if the model offers one.
    fn as_flat_rate(&self) -> Option<&dyn FlatRate> {
        None
    }
}

/// Deterministic-volatility equity dynamics: everything the analytic,
/// lattice, PDE, and Monte Carlo equity engines need.
pub trait LocalVol {
    /// Initial spot price.
    fn spot0(&self) -> f64;
    /// Continuously compounded risk-free rate.
    fn rate_r(&self) -> f64;
    /// Continuously compounded dividend yield.
    fn yield_q(&self) -> f64;
    /// Volatility at spot and t = 0.
    fn vol_sigma(&self) -> f64;
}

/// Single continuously compounded rate.
pub trait FlatRate {
    fn rate(&self) -> f64;
}

/// Black–Scholes model with flat volatility.
///
/// Flat in both time and spot, so it satisfies [`LocalVol`] trivially and can
/// feed analytic, tree, PDE, and Monte Carlo engines alike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesModel {
    pub spot: f64,
    pub rate: f64,
    pub dividend_yield: f64,
    pub vol: f64,
}

impl BlackScholesModel {
    pub fn new(spot: f64, rate: f64, dividend_yield: f64, vol: f64) -> Self {
        Self {
            spot,
            rate,
            dividend_yield,
            vol,
        }
    }
}

impl Model for BlackScholesModel {
    fn model_name(&self) -> &'static str {
        "BlackScholesModel"
    }

    fn as_local_vol(&self) -> Option<&dyn LocalVol> {
        Some(self)
    }
}

impl LocalVol for BlackScholesModel {
    fn spot0(&self) -> f64 {
        self.spot
    }

    fn rate_r(&self) -> f64 {
        self.rate
    }

    fn yield_q(&self) -> f64 {
        self.dividend_yield
    }

    fn vol_sigma(&self) -> f64 {
        self.vol
    }
}

/// Flat continuously compounded rate model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatRateModel {
    pub rate: f64,
}

impl FlatRateModel {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl Model for FlatRateModel {
    fn model_name(&self) -> &'static str {
        "FlatRateModel"
    }

    fn as_flat_rate(&self) -> Option<&dyn FlatRate> {
        Some(self)
    }
}

impl FlatRate for FlatRateModel {
    fn rate(&self) -> f64 {
        self.rate
    }
}
