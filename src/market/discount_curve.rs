//! Discount-factor term structure with log-linear interpolation.

use serde::{Deserialize, Serialize};

use crate::core::PricingError;

/// Discount curve backed either by a flat continuously compounded rate or by
/// a table of `(time, discount factor)` knots.
///
/// Table lookups interpolate log-linearly between knots and extrapolate flat
/// outside them; `discount(t)` is 1 for `t <= 0` in both modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DiscountCurve {
    /// `DF(t) = exp(-r * t)`.
    Flat { rate: f64 },
    /// Strictly increasing times (> 0) with positive discount factors.
    Table { times: Vec<f64>, dfs: Vec<f64> },
}

impl DiscountCurve {
    pub fn flat(rate: f64) -> Self {
        Self::Flat { rate }
    }

    /// Builds a tabulated curve, validating the knots.
    ///
    /// # Errors
    /// [`PricingError::InvalidInput`] when the arrays are empty or of
    /// mismatched length, times are not strictly increasing and positive, or
    /// any discount factor is not strictly positive.
    pub fn from_table(times: Vec<f64>, dfs: Vec<f64>) -> Result<Self, PricingError> {
        if times.is_empty() || dfs.is_empty() || times.len() != dfs.len() {
            return Err(PricingError::InvalidInput(
                "discount curve requires matching non-empty times and discount factors".to_string(),
            ));
        }

        let mut prev = 0.0;
        for (&t, &df) in times.iter().zip(dfs.iter()) {
            if !(t > prev) {
                return Err(PricingError::InvalidInput(
                    "discount curve times must be strictly increasing and > 0".to_string(),
                ));
            }
            if !(df > 0.0) {
                return Err(PricingError::InvalidInput(
                    "discount curve discount factors must be > 0".to_string(),
                ));
            }
            prev = t;
        }

        Ok(Self::Table { times, dfs })
    }

    /// Discount factor at time `t` in years.
    pub fn discount(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 1.0;
        }

        match self {
            Self::Flat { rate } => (-rate * t).exp(),
            Self::Table { times, dfs } => {
                if t <= times[0] {
                    return dfs[0];
                }
                let last = times.len() - 1;
                if t >= times[last] {
                    return dfs[last];
                }

                let idx = times.partition_point(|&knot| knot <= t);
                let (t1, t2) = (times[idx - 1], times[idx]);
                let (df1, df2) = (dfs[idx - 1], dfs[idx]);
                let w = (t - t1) / (t2 - t1);

                ((1.0 - w) * df1.ln() + w * df2.ln()).exp()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn flat_curve_discounts_exponentially() {
        let curve = DiscountCurve::flat(0.03);
        assert_relative_eq!(curve.discount(2.0), (-0.06_f64).exp(), epsilon = 1e-15);
        assert_eq!(curve.discount(0.0), 1.0);
        assert_eq!(curve.discount(-1.0), 1.0);
    }

    #[test]
    fn table_interpolates_log_linearly() {
        let curve = DiscountCurve::from_table(vec![1.0, 2.0], vec![0.97, 0.93]).unwrap();

        assert_relative_eq!(curve.discount(1.0), 0.97, epsilon = 1e-15);
        assert_relative_eq!(curve.discount(2.0), 0.93, epsilon = 1e-15);

        let expected = (0.5 * 0.97_f64.ln() + 0.5 * 0.93_f64.ln()).exp();
        assert_relative_eq!(curve.discount(1.5), expected, epsilon = 1e-15);
    }

    #[test]
    fn table_extrapolates_flat() {
        let curve = DiscountCurve::from_table(vec![1.0, 2.0], vec![0.97, 0.93]).unwrap();
        assert_relative_eq!(curve.discount(0.25), 0.97, epsilon = 1e-15);
        assert_relative_eq!(curve.discount(10.0), 0.93, epsilon = 1e-15);
    }

    #[test]
    fn invalid_tables_are_rejected() {
        assert!(DiscountCurve::from_table(vec![], vec![]).is_err());
        assert!(DiscountCurve::from_table(vec![1.0], vec![0.97, 0.93]).is_err());
        assert!(DiscountCurve::from_table(vec![1.0, 1.0], vec![0.97, 0.93]).is_err());
        assert!(DiscountCurve::from_table(vec![2.0, 1.0], vec![0.97, 0.93]).is_err());
        assert!(DiscountCurve::from_table(vec![-1.0, 1.0], vec![0.97, 0.93]).is_err());
        assert!(DiscountCurve::from_table(vec![1.0, 2.0], vec![0.97, 0.0]).is_err());
    }

    #[test]
    fn single_knot_round_trips() {
        let curve = DiscountCurve::from_table(vec![1.0], vec![0.96]).unwrap();
        assert_relative_eq!(curve.discount(1.0), 0.96, epsilon = 1e-10);
    }
}
