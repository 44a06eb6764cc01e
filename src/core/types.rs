use serde::{Deserialize, Serialize};

/// Plain-vanilla option side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option payoff profile.
    Call,
    /// Put option payoff profile.
    Put,
}

impl OptionType {
    /// Returns +1.0 for calls and -1.0 for puts.
    pub fn sign(self) -> f64 {
        match self {
            Self::Call => 1.0,
            Self::Put => -1.0,
        }
    }
}

/// Exercise rights for an option contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExerciseStyle {
    /// Exercise only at expiry.
    European,
    /// Exercise at any time up to expiry.
    American,
}

/// Exercise terms: style plus a single maturity in year fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// European or American.
    pub style: ExerciseStyle,
    /// Maturity in years.
    pub expiry: f64,
}

impl Exercise {
    pub fn european(expiry: f64) -> Self {
        Self {
            style: ExerciseStyle::European,
            expiry,
        }
    }

    pub fn american(expiry: f64) -> Self {
        Self {
            style: ExerciseStyle::American,
            expiry,
        }
    }

    pub fn is_european(&self) -> bool {
        self.style == ExerciseStyle::European
    }

    pub fn is_american(&self) -> bool {
        self.style == ExerciseStyle::American
    }
}

/// Averaging method for Asian options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Averaging {
    /// Arithmetic averaging.
    Arithmetic,
    /// Geometric averaging.
    Geometric,
}
