//! Process-wide pricing registry.
//!
//! The registry maps an `(instrument, model, engine)` triple to a factory
//! closure that builds the engine, fuses it with the input record, and
//! returns a [`PricingResult`]. The default registry is built lazily on
//! first access behind a `OnceLock` and is read-only afterwards, so
//! concurrent callers share it without further synchronization.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::core::{PricingError, PricingResult};
use crate::pricers::adapters::{
    price_equity_asian_bs, price_equity_future_bs, price_equity_vanilla_american_bs,
    price_equity_vanilla_bs, price_fixed_rate_bond_flat, price_zero_coupon_bond_flat,
};
use crate::pricers::inputs::{
    AmericanVanillaBsInput, AsianBsInput, EquityFutureInput, FixedRateBondInput, VanillaBsInput,
    ZeroCouponBondInput,
};

/// Instrument families addressable through the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentKind {
    EquityVanillaOption,
    EquityAmericanVanillaOption,
    EquityAsianOption,
    EquityFuture,
    ZeroCouponBond,
    FixedRateBond,
}

/// Market models addressable through the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    BlackScholes,
    FlatRate,
}

/// Engine families addressable through the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineKind {
    Analytic,
    MonteCarlo,
    BinomialTree,
    TrinomialTree,
    PdeFiniteDifference,
}

/// Input payload carried by a [`PricingRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum PricingInput {
    Vanilla(VanillaBsInput),
    AmericanVanilla(AmericanVanillaBsInput),
    Asian(AsianBsInput),
    Future(EquityFutureInput),
    ZeroCouponBond(ZeroCouponBondInput),
    FixedRateBond(FixedRateBondInput),
}

/// One pricing call: the triple plus the matching input record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub instrument: InstrumentKind,
    pub model: ModelKind,
    pub engine: EngineKind,
    pub input: PricingInput,
}

/// Registry lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistryKey {
    pub instrument: InstrumentKind,
    pub model: ModelKind,
    pub engine: EngineKind,
}

/// Pricing closure stored per registry cell; captures no mutable state.
pub type PricingFn =
    Box<dyn Fn(&PricingRequest) -> Result<PricingResult, PricingError> + Send + Sync>;

/// Read-mostly mapping from a triple to its pricing closure.
#[derive(Default)]
pub struct PricingRegistry {
    registry: HashMap<RegistryKey, PricingFn>,
}

impl PricingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: RegistryKey, pricer: PricingFn) {
        self.registry.insert(key, pricer);
    }

    pub fn is_registered(&self, key: &RegistryKey) -> bool {
        self.registry.contains_key(key)
    }

    /// Registered `(instrument, model, engine)` cells.
    pub fn keys(&self) -> impl Iterator<Item = &RegistryKey> {
        self.registry.keys()
    }

    /// Looks up the requested triple and runs its pricer.
    ///
    /// # Errors
    /// [`PricingError::UnsupportedInstrument`] when the triple is not
    /// registered; any error the pricer itself raises otherwise.
    pub fn price(&self, request: &PricingRequest) -> Result<PricingResult, PricingError> {
        let key = RegistryKey {
            instrument: request.instrument,
            model: request.model,
            engine: request.engine,
        };
        match self.registry.get(&key) {
            Some(pricer) => pricer(request),
            None => Err(PricingError::UnsupportedInstrument(format!(
                "no pricer registered for {:?}/{:?}/{:?}",
                request.instrument, request.model, request.engine
            ))),
        }
    }
}

fn payload_mismatch(expected: &str) -> PricingError {
    PricingError::InvalidInput(format!(
        "request input payload does not match the instrument kind; expected {expected}"
    ))
}

fn build_default_registry() -> PricingRegistry {
    let mut registry = PricingRegistry::new();

    for engine in [
        EngineKind::Analytic,
        EngineKind::MonteCarlo,
        EngineKind::BinomialTree,
        EngineKind::TrinomialTree,
        EngineKind::PdeFiniteDifference,
    ] {
        registry.register(
            RegistryKey {
                instrument: InstrumentKind::EquityVanillaOption,
                model: ModelKind::BlackScholes,
                engine,
            },
            Box::new(move |request| match &request.input {
                PricingInput::Vanilla(input) => price_equity_vanilla_bs(input, engine),
                _ => Err(payload_mismatch("PricingInput::Vanilla")),
            }),
        );
    }

    for engine in [EngineKind::BinomialTree, EngineKind::TrinomialTree] {
        registry.register(
            RegistryKey {
                instrument: InstrumentKind::EquityAmericanVanillaOption,
                model: ModelKind::BlackScholes,
                engine,
            },
            Box::new(move |request| match &request.input {
                PricingInput::AmericanVanilla(input) => {
                    price_equity_vanilla_american_bs(input, engine)
                }
                _ => Err(payload_mismatch("PricingInput::AmericanVanilla")),
            }),
        );
    }

    for engine in [EngineKind::Analytic, EngineKind::MonteCarlo] {
        registry.register(
            RegistryKey {
                instrument: InstrumentKind::EquityAsianOption,
                model: ModelKind::BlackScholes,
                engine,
            },
            Box::new(move |request| match &request.input {
                PricingInput::Asian(input) => price_equity_asian_bs(input, engine),
                _ => Err(payload_mismatch("PricingInput::Asian")),
            }),
        );
    }

    registry.register(
        RegistryKey {
            instrument: InstrumentKind::EquityFuture,
            model: ModelKind::BlackScholes,
            engine: EngineKind::Analytic,
        },
        Box::new(|request| match &request.input {
            PricingInput::Future(input) => price_equity_future_bs(input),
            _ => Err(payload_mismatch("PricingInput::Future")),
        }),
    );

    registry.register(
        RegistryKey {
            instrument: InstrumentKind::ZeroCouponBond,
            model: ModelKind::FlatRate,
            engine: EngineKind::Analytic,
        },
        Box::new(|request| match &request.input {
            PricingInput::ZeroCouponBond(input) => price_zero_coupon_bond_flat(input),
            _ => Err(payload_mismatch("PricingInput::ZeroCouponBond")),
        }),
    );

    registry.register(
        RegistryKey {
            instrument: InstrumentKind::FixedRateBond,
            model: ModelKind::FlatRate,
            engine: EngineKind::Analytic,
        },
        Box::new(|request| match &request.input {
            PricingInput::FixedRateBond(input) => price_fixed_rate_bond_flat(input),
            _ => Err(payload_mismatch("PricingInput::FixedRateBond")),
        }),
    );

    registry
}

/// Shared default registry, built once on first use.
pub fn default_registry() -> &'static PricingRegistry {
    static REGISTRY: OnceLock<PricingRegistry> = OnceLock::new();
    REGISTRY.get_or_init(build_default_registry)
}

/// Prices a request against the default registry.
pub fn price_request(request: &PricingRequest) -> Result<PricingResult, PricingError> {
    default_registry().price(request)
}
