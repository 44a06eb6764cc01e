//! Plain-vanilla option contract definition.
//!
//! [`VanillaOption`] stores payoff, exercise rights (European/American with a
//! single maturity in year fractions), and a notional. This is the canonical
//! input for the analytic, lattice, PDE, and Monte Carlo equity engines.

use serde::{Deserialize, Serialize};

use crate::core::{Exercise, OptionType, PricingError};
use crate::instruments::Payoff;

/// Vanilla option contract.
///
/// # Examples
/// ```
/// use riskforge::core::Exercise;
/// use riskforge::instruments::{Payoff, VanillaOption};
///
/// let option = VanillaOption {
///     payoff: Payoff::call(100.0),
///     exercise: Exercise::european(1.0),
///     notional: 1.0,
/// };
/// assert!(option.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VanillaOption {
    /// Call/put payoff with strike.
    pub payoff: Payoff,
    /// Exercise style and maturity.
    pub exercise: Exercise,
    /// Trade notional.
    pub notional: f64,
}

impl VanillaOption {
    /// Builds a European call with unit notional.
    pub fn european_call(strike: f64, expiry: f64) -> Self {
        Self {
            payoff: Payoff::call(strike),
            exercise: Exercise::european(expiry),
            notional: 1.0,
        }
    }

    /// Builds a European put with unit notional.
    pub fn european_put(strike: f64, expiry: f64) -> Self {
        Self {
            payoff: Payoff::put(strike),
            exercise: Exercise::european(expiry),
            notional: 1.0,
        }
    }

    /// Builds an American call with unit notional.
    pub fn american_call(strike: f64, expiry: f64) -> Self {
        Self {
            payoff: Payoff::call(strike),
            exercise: Exercise::american(expiry),
            notional: 1.0,
        }
    }

    /// Builds an American put with unit notional.
    pub fn american_put(strike: f64, expiry: f64) -> Self {
        Self {
            payoff: Payoff::put(strike),
            exercise: Exercise::american(expiry),
            notional: 1.0,
        }
    }

    pub fn option_type(&self) -> OptionType {
        self.payoff.option_type
    }

    pub fn strike(&self) -> f64 {
        self.payoff.strike
    }

    pub fn expiry(&self) -> f64 {
        self.exercise.expiry
    }

    /// Validates instrument fields.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] when the strike or notional is
    /// not strictly positive or the maturity is not strictly positive.
    pub fn validate(&self) -> Result<(), PricingError> {
        self.payoff.validate()?;
        if !(self.exercise.expiry > 0.0) {
            return Err(PricingError::InvalidInput(
                "vanilla maturity must be > 0".to_string(),
            ));
        }
        if !(self.notional > 0.0) {
            return Err(PricingError::InvalidInput(
                "vanilla notional must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ExerciseStyle;

    #[test]
    fn constructors_set_style_and_side() {
        let call = VanillaOption::european_call(100.0, 1.0);
        assert_eq!(call.option_type(), OptionType::Call);
        assert_eq!(call.exercise.style, ExerciseStyle::European);

        let put = VanillaOption::american_put(95.0, 0.5);
        assert_eq!(put.option_type(), OptionType::Put);
        assert!(put.exercise.is_american());
    }

    #[test]
    fn validation_rejects_bad_fields() {
        let mut opt = VanillaOption::european_call(100.0, 1.0);
        assert!(opt.validate().is_ok());

        opt.payoff.strike = 0.0;
        assert!(opt.validate().is_err());

        opt.payoff.strike = 100.0;
        opt.exercise.expiry = 0.0;
        assert!(opt.validate().is_err());

        opt.exercise.expiry = 1.0;
        opt.notional = -5.0;
        assert!(opt.validate().is_err());
    }
}
