//! Pricing engines and the engine/instrument double dispatch.
//!
//! Every engine implements [`Engine`], which carries one pricing operation
//! per instrument variant; variants an engine does not price fall through to
//! a default that fails with `UnsupportedInstrument`. The instrument half of
//! the dispatch is the pattern match in [`price`].

pub mod analytic;
pub mod monte_carlo;
pub mod pde;
pub mod tree;

use crate::core::{PricingError, PricingResult};
use crate::instruments::{
    AsianOption, EquityFuture, FixedRateBond, Instrument, VanillaOption, ZeroCouponBond,
};

/// Visitor contract implemented by every pricing engine.
pub trait Engine {
    /// Engine identifier used in diagnostics and error messages.
    fn name(&self) -> &'static str;

    fn price_vanilla(&self, _opt: &VanillaOption) -> Result<PricingResult, PricingError> {
        Err(PricingError::unsupported(self.name(), "vanilla options"))
    }

    fn price_asian(&self, _opt: &AsianOption) -> Result<PricingResult, PricingError> {
        Err(PricingError::unsupported(self.name(), "Asian options"))
    }

    fn price_future(&self, _fut: &EquityFuture) -> Result<PricingResult, PricingError> {
        Err(PricingError::unsupported(self.name(), "equity futures"))
    }

    fn price_zero_coupon_bond(&self, _bond: &ZeroCouponBond) -> Result<PricingResult, PricingError> {
        Err(PricingError::unsupported(self.name(), "zero-coupon bonds"))
    }

    fn price_fixed_rate_bond(&self, _bond: &FixedRateBond) -> Result<PricingResult, PricingError> {
        Err(PricingError::unsupported(self.name(), "fixed-rate bonds"))
    }
}

/// Routes an instrument to the matching operation of `engine`.
pub fn price(instrument: &Instrument, engine: &dyn Engine) -> Result<PricingResult, PricingError> {
    match instrument {
        Instrument::Vanilla(opt) => engine.price_vanilla(opt),
        Instrument::Asian(opt) => engine.price_asian(opt),
        Instrument::Future(fut) => engine.price_future(fut),
        Instrument::ZeroCoupon(bond) => engine.price_zero_coupon_bond(bond),
        Instrument::FixedRate(bond) => engine.price_fixed_rate_bond(bond),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::ZeroCouponBond;

    struct NothingEngine;

    impl Engine for NothingEngine {
        fn name(&self) -> &'static str {
            "NothingEngine"
        }
    }

    #[test]
    fn default_visitor_methods_reject_every_variant() {
        let bond = Instrument::ZeroCoupon(ZeroCouponBond::new(1.0, 100.0));
        let err = price(&bond, &NothingEngine).unwrap_err();
        assert!(matches!(err, PricingError::UnsupportedInstrument(_)));
        assert!(err.to_string().contains("zero-coupon bonds"));
    }
}
