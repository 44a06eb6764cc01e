//! Market data snapshot shared with pricing engines.

pub mod discount_curve;

pub use discount_curve::DiscountCurve;

/// Immutable market view attached to a pricing context.
///
/// Currently a discount curve is the only quoted object; engines that price
/// off model parameters alone ignore it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketView {
    /// Optional discount curve overriding model-implied discounting.
    pub discount: Option<DiscountCurve>,
}

impl MarketView {
    pub fn with_discount(curve: DiscountCurve) -> Self {
        Self {
            discount: Some(curve),
        }
    }
}
