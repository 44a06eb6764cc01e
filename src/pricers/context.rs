//! Pricing context: market view, numerical settings, and the model handle.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::PricingError;
use crate::market::MarketView;
use crate::models::{FlatRate, LocalVol, Model};

/// Numerical knobs consumed by the engines.
///
/// Each field must be >= 1 when the engine that reads it runs; the engines
/// validate on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Monte Carlo path count.
    pub mc_paths: usize,
    /// Monte Carlo master seed.
    pub mc_seed: u64,
    /// Antithetic variance reduction toggle.
    pub mc_antithetic: bool,
    /// Lattice step count.
    pub tree_steps: usize,
    /// PDE space-grid intervals.
    pub pde_space_steps: usize,
    /// PDE time-grid intervals.
    pub pde_time_steps: usize,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            mc_paths: 200_000,
            mc_seed: 1,
            mc_antithetic: true,
            tree_steps: 100,
            pde_space_steps: 100,
            pde_time_steps: 100,
        }
    }
}

/// Everything an engine borrows for the duration of one pricing call.
///
/// The context owns its model behind an `Arc`; engines hold `&PricingContext`
/// and never mutate it, so concurrent pricing calls need no synchronization.
#[derive(Debug, Clone)]
pub struct PricingContext {
    pub market: MarketView,
    pub settings: PricingSettings,
    pub model: Arc<dyn Model>,
}

impl PricingContext {
    pub fn new(market: MarketView, settings: PricingSettings, model: Arc<dyn Model>) -> Self {
        Self {
            market,
            settings,
            model,
        }
    }

    /// Resolves the local-volatility capability or fails with `InvalidInput`.
    pub fn require_local_vol(&self, engine: &str) -> Result<&dyn LocalVol, PricingError> {
        self.model.as_local_vol().ok_or_else(|| {
            PricingError::InvalidInput(format!(
                "{engine} requires a local-volatility model, got {}",
                self.model.model_name()
            ))
        })
    }

    /// Resolves the flat-rate capability or fails with `InvalidInput`.
    pub fn require_flat_rate(&self, engine: &str) -> Result<&dyn FlatRate, PricingError> {
        self.model.as_flat_rate().ok_or_else(|| {
            PricingError::InvalidInput(format!(
                "{engine} requires a flat-rate model, got {}",
                self.model.model_name()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlackScholesModel, FlatRateModel};

    #[test]
    fn capability_mismatch_is_invalid_input() {
        let ctx = PricingContext::new(
            MarketView::default(),
            PricingSettings::default(),
            Arc::new(FlatRateModel::new(0.03)),
        );

        match ctx.require_local_vol("TestEngine") {
            Err(err) => {
                assert!(matches!(err, PricingError::InvalidInput(_)));
                assert!(err.to_string().contains("FlatRateModel"));
            }
            Ok(_) => panic!("expected capability mismatch error"),
        }

        let ctx = PricingContext::new(
            MarketView::default(),
            PricingSettings::default(),
            Arc::new(BlackScholesModel::new(100.0, 0.05, 0.0, 0.2)),
        );
        assert!(ctx.require_local_vol("TestEngine").is_ok());
        assert!(ctx.require_flat_rate("TestEngine").is_err());
    }

    #[test]
    fn settings_defaults_match_documented_knobs() {
        let s = PricingSettings::default();
        assert_eq!(s.mc_paths, 200_000);
        assert_eq!(s.mc_seed, 1);
        assert!(s.mc_antithetic);
        assert_eq!(s.tree_steps, 100);
        assert_eq!(s.pde_space_steps, 100);
        assert_eq!(s.pde_time_steps, 100);
    }
}
