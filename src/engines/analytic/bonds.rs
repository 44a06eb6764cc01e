//! Flat-rate analytic bond engine.
//!
//! Discounts cash flows off the context's discount curve when one is
//! supplied, otherwise off the flat-rate model (`DF(t) = exp(-r t)`).

use crate::core::{PricingError, PricingResult};
use crate::engines::Engine;
use crate::instruments::{FixedRateBond, ZeroCouponBond};
use crate::pricers::PricingContext;

/// Analytic engine for zero-coupon and fixed-rate bullet bonds.
#[derive(Debug)]
pub struct FlatRateBondAnalyticEngine<'a> {
    ctx: &'a PricingContext,
}

impl<'a> FlatRateBondAnalyticEngine<'a> {
    pub fn new(ctx: &'a PricingContext) -> Self {
        Self { ctx }
    }

    fn discount(&self, rate: f64, t: f64) -> f64 {
        match &self.ctx.market.discount {
            Some(curve) => curve.discount(t),
            None => (-rate * t).exp(),
        }
    }
}

impl Engine for FlatRateBondAnalyticEngine<'_> {
    fn name(&self) -> &'static str {
        "FlatRateBondAnalyticEngine"
    }

    fn price_zero_coupon_bond(&self, bond: &ZeroCouponBond) -> Result<PricingResult, PricingError> {
        bond.validate()?;
        let m = self.ctx.require_flat_rate(self.name())?;

        let df = self.discount(m.rate(), bond.maturity);
        Ok(PricingResult::deterministic(
            bond.notional * df,
            "Flat-rate analytic zero-coupon bond",
        ))
    }

    fn price_fixed_rate_bond(&self, bond: &FixedRateBond) -> Result<PricingResult, PricingError> {
        bond.validate()?;
        let m = self.ctx.require_flat_rate(self.name())?;
        let r = m.rate();

        let t = bond.maturity;
        let n = ((t * f64::from(bond.coupon_frequency)).round() as usize).max(1);
        let dt = t / n as f64;
        let coupon = bond.notional * bond.coupon_rate * dt;

        let mut pv_coupons = 0.0;
        for i in 1..=n {
            pv_coupons += coupon * self.discount(r, dt * i as f64);
        }
        let pv_principal = bond.notional * self.discount(r, t);

        Ok(PricingResult::deterministic(
            pv_coupons + pv_principal,
            "Flat-rate analytic fixed-rate bond",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{DiscountCurve, MarketView};
    use crate::models::FlatRateModel;
    use crate::pricers::PricingSettings;
    use approx::assert_abs_diff_eq;
    use std::sync::Arc;

    fn flat_context(rate: f64, market: MarketView) -> PricingContext {
        PricingContext::new(
            market,
            PricingSettings::default(),
            Arc::new(FlatRateModel::new(rate)),
        )
    }

    #[test]
    fn zero_coupon_discounts_at_flat_rate() {
        let ctx = flat_context(0.03, MarketView::default());
        let res = FlatRateBondAnalyticEngine::new(&ctx)
            .price_zero_coupon_bond(&ZeroCouponBond::new(2.0, 1000.0))
            .unwrap();
        assert_abs_diff_eq!(res.npv, 1000.0 * (-0.06_f64).exp(), epsilon = 1e-10);
    }

    #[test]
    fn fixed_rate_bond_uses_supplied_curve() {
        let curve = DiscountCurve::from_table(vec![1.0], vec![0.96]).unwrap();
        let ctx = flat_context(0.02, MarketView::with_discount(curve));

        let res = FlatRateBondAnalyticEngine::new(&ctx)
            .price_fixed_rate_bond(&FixedRateBond::new(0.05, 1.0, 1, 100.0))
            .unwrap();

        // One coupon of 5 plus principal, both discounted at the 0.96 knot.
        assert_abs_diff_eq!(res.npv, 100.8, epsilon = 1e-10);
    }

    #[test]
    fn semiannual_coupons_are_spread_across_the_schedule() {
        let ctx = flat_context(0.03, MarketView::default());
        let res = FlatRateBondAnalyticEngine::new(&ctx)
            .price_fixed_rate_bond(&FixedRateBond::new(0.04, 2.0, 2, 100.0))
            .unwrap();

        let mut expected = 0.0;
        for i in 1..=4 {
            let t = 0.5 * i as f64;
            expected += 100.0 * 0.04 * 0.5 * (-0.03 * t).exp();
        }
        expected += 100.0 * (-0.06_f64).exp();
        assert_abs_diff_eq!(res.npv, expected, epsilon = 1e-12);
    }
}
