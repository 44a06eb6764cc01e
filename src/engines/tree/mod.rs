//! Lattice engines with early-exercise handling.

pub mod binomial;
pub mod trinomial;

pub use binomial::BinomialTreeEngine;
pub use trinomial::TrinomialTreeEngine;
