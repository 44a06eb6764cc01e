//! Closed-form pricing engines.

pub mod asian;
pub mod black_scholes;
pub mod bonds;
pub mod future;

pub use asian::{ArithmeticAsianAnalyticEngine, GeometricAsianAnalyticEngine};
pub use black_scholes::BlackScholesAnalyticEngine;
pub use bonds::FlatRateBondAnalyticEngine;
pub use future::EquityFutureAnalyticEngine;
