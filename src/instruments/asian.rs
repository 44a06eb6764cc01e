//! Asian option contract schema and validation rules.
//!
//! [`AsianOption`] couples a call/put payoff with an averaging convention
//! (arithmetic or geometric over the monitoring window). Exercise is
//! European only; the engines price fixed-strike averages against the strike
//! carried by the payoff.

use serde::{Deserialize, Serialize};

use crate::core::{Averaging, Exercise, OptionType, PricingError};
use crate::instruments::Payoff;

/// Asian option instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsianOption {
    /// Call/put payoff applied to the realized average.
    pub payoff: Payoff,
    /// Exercise terms; must be European.
    pub exercise: Exercise,
    /// Arithmetic or geometric averaging.
    pub average_type: Averaging,
    /// Trade notional.
    pub notional: f64,
}

impl AsianOption {
    pub fn new(
        option_type: OptionType,
        strike: f64,
        expiry: f64,
        average_type: Averaging,
    ) -> Self {
        Self {
            payoff: Payoff {
                option_type,
                strike,
            },
            exercise: Exercise::european(expiry),
            average_type,
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
    pub fn validate(&self) -> Result<(), PricingError> {
        self.payoff.validate()?;
        if !self.exercise.is_european() {
            return Err(PricingError::InvalidInput(
                "asian options support European exercise only".to_string(),
            ));
        }
        if !(self.exercise.expiry > 0.0) {
            return Err(PricingError::InvalidInput(
                "asian maturity must be > 0".to_string(),
            ));
        }
        if !(self.notional > 0.0) {
            return Err(PricingError::InvalidInput(
                "asian notional must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
