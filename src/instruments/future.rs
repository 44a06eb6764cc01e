use serde::{Deserialize, Serialize};

use crate::core::PricingError;

/// Equity futures position priced under continuous cost of carry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityFuture {
    /// Delivery price agreed at inception.
    pub strike: f64,
    /// Maturity in years.
    pub maturity: f64,
    /// Signed position size.
    pub notional: f64,
}

impl EquityFuture {
    pub fn new(strike: f64, maturity: f64, notional: f64) -> Self {
        Self {
            strike,
            maturity,
            notional,
        }
    }

    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.strike > 0.0) {
            return Err(PricingError::InvalidInput(
                "future strike must be > 0".to_string(),
            ));
        }
        if !(self.maturity > 0.0) {
            return Err(PricingError::InvalidInput(
                "future maturity must be > 0".to_string(),
            ));
        }
        if self.notional == 0.0 {
            return Err(PricingError::InvalidInput(
                "future notional must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
