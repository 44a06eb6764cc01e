//! Bullet bond instruments: zero-coupon and fixed-rate.

use serde::{Deserialize, Serialize};

use crate::core::PricingError;

/// Zero-coupon bond paying `notional` at maturity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZeroCouponBond {
    /// Maturity in years.
    pub maturity: f64,
    /// Redemption amount; may be negative for a short position.
    pub notional: f64,
}

impl ZeroCouponBond {
    pub fn new(maturity: f64, notional: f64) -> Self {
        Self { maturity, notional }
    }

    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.maturity > 0.0) {
            return Err(PricingError::InvalidInput(
                "zero-coupon bond maturity must be > 0".to_string(),
            ));
        }
        if self.notional == 0.0 {
            return Err(PricingError::InvalidInput(
                "zero-coupon bond notional must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fixed-rate bullet bond with evenly spaced coupons and final redemption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedRateBond {
    /// Maturity in years.
    pub maturity: f64,
    /// Annual coupon rate (e.g. 0.05 for 5%).
    pub coupon_rate: f64,
    /// Coupons per year.
    pub coupon_frequency: u32,
    /// Face amount; may be negative for a short position.
    pub notional: f64,
}

impl FixedRateBond {
    pub fn new(coupon_rate: f64, maturity: f64, coupon_frequency: u32, notional: f64) -> Self {
        Self {
            maturity,
            coupon_rate,
            coupon_frequency,
            notional,
        }
    }

    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.maturity > 0.0) {
            return Err(PricingError::InvalidInput(
                "fixed-rate bond maturity must be > 0".to_string(),
            ));
        }
        if self.notional == 0.0 {
            return Err(PricingError::InvalidInput(
                "fixed-rate bond notional must be non-zero".to_string(),
            ));
        }
        if !(self.coupon_rate >= 0.0) {
            return Err(PricingError::InvalidInput(
                "fixed-rate bond coupon rate must be >= 0".to_string(),
            ));
        }
        if self.coupon_frequency < 1 {
            return Err(PricingError::InvalidInput(
                "fixed-rate bond coupon frequency must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_coupon_validation() {
        assert!(ZeroCouponBond::new(2.0, 1000.0).validate().is_ok());
        assert!(ZeroCouponBond::new(-1.0, 1000.0).validate().is_err());
        assert!(ZeroCouponBond::new(2.0, 0.0).validate().is_err());
    }

    #[test]
    fn fixed_rate_validation() {
        assert!(FixedRateBond::new(0.05, 1.0, 1, 100.0).validate().is_ok());
        assert!(FixedRateBond::new(-0.01, 1.0, 1, 100.0).validate().is_err());
        assert!(FixedRateBond::new(0.05, 1.0, 0, 100.0).validate().is_err());
    }
}
