//! Dispatch layer: input records, adapters, context, and the registry.

pub mod adapters;
pub mod context;
pub mod inputs;
pub mod registry;

pub use context::{PricingContext, PricingSettings};
pub use inputs::{
    AmericanVanillaBsInput, AsianBsInput, EquityFutureInput, FixedRateBondInput, VanillaBsInput,
    ZeroCouponBondInput,
};
pub use registry::{
    EngineKind, InstrumentKind, ModelKind, PricingInput, PricingRegistry, PricingRequest,
    RegistryKey, default_registry, price_request,
};
