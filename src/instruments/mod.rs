//! Instrument value types and the closed instrument sum consumed by the
//! dispatch layer.

pub mod asian;
pub mod bond;
pub mod future;
pub mod payoff;
pub mod vanilla;

pub use asian::AsianOption;
pub use bond::{FixedRateBond, ZeroCouponBond};
pub use future::EquityFuture;
pub use payoff::Payoff;
pub use vanilla::VanillaOption;

use serde::{Deserialize, Serialize};

/// Closed sum of every priceable instrument.
///
/// Pattern matching on this enum is the instrument half of the
/// engine/instrument double dispatch; the engine half is the per-variant
/// methods on [`crate::engines::Engine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instrument {
    Vanilla(VanillaOption),
    Asian(AsianOption),
    Future(EquityFuture),
    ZeroCoupon(ZeroCouponBond),
    FixedRate(FixedRateBond),
}

impl Instrument {
    /// Short type identifier for diagnostics.
    pub fn instrument_type(&self) -> &'static str {
        match self {
            Self::Vanilla(_) => "VanillaOption",
            Self::Asian(_) => "AsianOption",
            Self::Future(_) => "EquityFuture",
            Self::ZeroCoupon(_) => "ZeroCouponBond",
            Self::FixedRate(_) => "FixedRateBond",
        }
    }
}
