//! Library-wide result and error structures.

use serde::{Deserialize, Serialize};

/// A single sensitivity: value plus an optional Monte Carlo standard error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreekValue {
    pub value: f64,
    /// Present only for sampling-based estimators.
    pub std_error: Option<f64>,
}

impl GreekValue {
    pub fn exact(value: f64) -> Self {
        Self {
            value,
            std_error: None,
        }
    }

    pub fn estimated(value: f64, std_error: f64) -> Self {
        Self {
            value,
            std_error: Some(std_error),
        }
    }
}

/// Standardized Greeks container used by engine results.
///
/// Each entry is optional: engines report only the sensitivities they
/// actually compute, and absence means "not produced", never zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// First derivative to spot.
    pub delta: Option<GreekValue>,
    /// Second derivative to spot.
    pub gamma: Option<GreekValue>,
    /// First derivative to volatility.
    pub vega: Option<GreekValue>,
    /// First derivative to calendar time.
    pub theta: Option<GreekValue>,
    /// First derivative to the risk-free rate.
    pub rho: Option<GreekValue>,
}

impl Greeks {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Unified engine result payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Present value.
    pub npv: f64,
    /// Greeks when available from the engine.
    pub greeks: Greeks,
    /// Engine-specific human-readable summary.
    pub diagnostics: String,
    /// Standard error of the price estimate; 0 for deterministic engines.
    pub mc_std_error: f64,
}

impl PricingResult {
    pub fn deterministic(npv: f64, diagnostics: impl Into<String>) -> Self {
        Self {
            npv,
            greeks: Greeks::none(),
            diagnostics: diagnostics.into(),
            mc_std_error: 0.0,
        }
    }
}

/// Failure surface of a pricing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingError {
    /// A precondition on the input data was violated.
    InvalidInput(String),
    /// The requested instrument/model/engine combination is not priced.
    UnsupportedInstrument(String),
}

impl PricingError {
    pub(crate) fn unsupported(engine: &str, what: &str) -> Self {
        Self::UnsupportedInstrument(format!("{engine} does not support {what}"))
    }
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::UnsupportedInstrument(msg) => write!(f, "unsupported instrument: {msg}"),
        }
    }
}

impl std::error::Error for PricingError {}
