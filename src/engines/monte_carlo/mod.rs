//! Monte Carlo engines with variance-reduced Greek estimators.

pub mod asian;
pub mod vanilla;

pub use asian::AsianMonteCarloEngine;
pub use vanilla::VanillaMonteCarloEngine;
