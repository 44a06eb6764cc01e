//! RiskForge is a derivatives pricing library for single-equity options,
//! equity futures, and flat-rate bonds, with first- and second-order risk
//! sensitivities alongside every price.
//!
//! The crate combines closed forms (Black-Scholes, Turnbull-Wakeman and
//! geometric-Asian formulas, cost-of-carry futures, bond discounting),
//! lattice methods (CRR binomial and Boyle trinomial trees with early
//! exercise), a Crank-Nicolson finite-difference solver in log-moneyness, and
//! Monte Carlo simulation with antithetic variates, pathwise/likelihood-ratio
//! Greeks, and common-random-number finite differences.
//!
//! References used across modules include:
//! - Hull, *Options, Futures, and Other Derivatives* (11th ed.), Ch. 13, 15,
//!   21, 26.
//! - Glasserman (2004) for Monte Carlo estimators and variance reduction.
//! - Cox, Ross and Rubinstein (1979) and Boyle (1986) for the lattices.
//! - Turnbull and Wakeman (1991) for the arithmetic-Asian moment matching.
//!
//! Numerical considerations:
//! - Monte Carlo runs are bit-for-bit reproducible for a fixed
//!   `(seed, paths, antithetic)` triple; one normal draw drives the base and
//!   every bumped revaluation of a path.
//! - Degenerate regimes (zero vol, vanishing drift, collapsed moment ratio)
//!   return deterministic intrinsic values instead of NaNs.
//! - Lattice and PDE engines reject incoherent discretizations
//!   (risk-neutral probabilities outside `[0, 1]`, degenerate grids) before
//!   any rollback starts.
//!
//! A pricing call is strictly single-threaded and allocation-scoped: the
//! caller owns instruments, models, and curves; engines borrow them for one
//! call and share nothing mutable. Parallelism, if desired, is achieved by
//! pricing from independent threads against the shared read-only registry.
//!
//! # Quick Start
//! Price a Black-Scholes call through an engine:
//! ```rust
//! use riskforge::engines::Engine;
//! use riskforge::engines::analytic::BlackScholesAnalyticEngine;
//! use riskforge::instruments::VanillaOption;
//! use riskforge::market::MarketView;
//! use riskforge::models::BlackScholesModel;
//! use riskforge::pricers::{PricingContext, PricingSettings};
//! use std::sync::Arc;
//!
//! let ctx = PricingContext::new(
//!     MarketView::default(),
//!     PricingSettings::default(),
//!     Arc::new(BlackScholesModel::new(100.0, 0.05, 0.02, 0.20)),
//! );
//! let engine = BlackScholesAnalyticEngine::new(&ctx);
//! let result = engine
//!     .price_vanilla(&VanillaOption::european_call(100.0, 1.0))
//!     .unwrap();
//! assert!(result.npv > 9.0 && result.npv < 10.0);
//! assert!(result.greeks.delta.is_some());
//! ```
//!
//! Or go through the registry with a flat input record:
//! ```rust
//! use riskforge::pricers::{
//!     EngineKind, InstrumentKind, ModelKind, PricingInput, PricingRequest, VanillaBsInput,
//!     price_request,
//! };
//!
//! let request = PricingRequest {
//!     instrument: InstrumentKind::EquityVanillaOption,
//!     model: ModelKind::BlackScholes,
//!     engine: EngineKind::Analytic,
//!     input: PricingInput::Vanilla(VanillaBsInput {
//!         spot: 100.0,
//!         strike: 100.0,
//!         maturity: 1.0,
//!         rate: 0.05,
//!         dividend: 0.02,
//!         vol: 0.20,
//!         is_call: true,
//!         ..VanillaBsInput::default()
//!     }),
//! };
//! let result = price_request(&request).unwrap();
//! assert!((result.npv - 9.227).abs() < 1e-2);
//! ```

pub mod core;
pub mod engines;
pub mod instruments;
pub mod market;
pub mod math;
pub mod models;
pub mod pricers;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::*;
    pub use crate::engines::{Engine, price};
    pub use crate::instruments::*;
    pub use crate::market::*;
    pub use crate::models::*;
    pub use crate::pricers::*;
}
