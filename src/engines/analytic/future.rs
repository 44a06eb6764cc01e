//! Analytic equity-future engine under continuous cost of carry.

use crate::core::{PricingError, PricingResult};
use crate::engines::Engine;
use crate::instruments::EquityFuture;
use crate::pricers::PricingContext;

/// Prices an equity future as the discounted difference between the carry
/// forward `S0 * exp((r - q) T)` and the delivery price.
#[derive(Debug)]
pub struct EquityFutureAnalyticEngine<'a> {
    ctx: &'a PricingContext,
}

impl<'a> EquityFutureAnalyticEngine<'a> {
    pub fn new(ctx: &'a PricingContext) -> Self {
        Self { ctx }
    }
}

impl Engine for EquityFutureAnalyticEngine<'_> {
    fn name(&self) -> &'static str {
        "EquityFutureAnalyticEngine"
    }

    fn price_future(&self, fut: &EquityFuture) -> Result<PricingResult, PricingError> {
        fut.validate()?;
        let m = self.ctx.require_local_vol(self.name())?;

        let s0 = m.spot0();
        let r = m.rate_r();
        let q = m.yield_q();
        let t = fut.maturity;

        let forward = s0 * ((r - q) * t).exp();
        let df = (-r * t).exp();

        Ok(PricingResult::deterministic(
            fut.notional * (forward - fut.strike) * df,
            "Equity future analytic (cost of carry)",
        ))
    }
}
