use serde::{Deserialize, Serialize};

use crate::core::{OptionType, PricingError};

/// Plain call/put payoff applied to a pricing observable.
///
/// The observable is the terminal spot for vanillas and the realized
/// arithmetic or geometric average for Asians; the payoff itself is the same
/// `max(x - K, 0)` / `max(K - x, 0)` either way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Payoff {
    /// Call or put.
    pub option_type: OptionType,
    /// Strike level.
    pub strike: f64,
}

impl Payoff {
    pub fn call(strike: f64) -> Self {
        Self {
            option_type: OptionType::Call,
            strike,
        }
    }

    pub fn put(strike: f64) -> Self {
        Self {
            option_type: OptionType::Put,
            strike,
        }
    }

    /// Evaluates the payoff at observable level `x`.
    #[inline]
    pub fn value(&self, x: f64) -> f64 {
        match self.option_type {
            OptionType::Call => (x - self.strike).max(0.0),
            OptionType::Put => (self.strike - x).max(0.0),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), PricingError> {
        if !(self.strike > 0.0) {
            return Err(PricingError::InvalidInput(
                "payoff strike must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_and_put_payoffs() {
        let call = Payoff::call(100.0);
        assert_eq!(call.value(110.0), 10.0);
        assert_eq!(call.value(90.0), 0.0);

        let put = Payoff::put(100.0);
        assert_eq!(put.value(110.0), 0.0);
        assert_eq!(put.value(90.0), 10.0);
    }

    #[test]
    fn non_positive_strike_is_rejected() {
        assert!(Payoff::call(0.0).validate().is_err());
        assert!(Payoff::put(-1.0).validate().is_err());
        assert!(Payoff::call(100.0).validate().is_ok());
    }
}
