//! Core domain types, result payloads, and error structures.

pub mod engine;
pub mod serialization;
pub mod types;

pub use engine::{GreekValue, Greeks, PricingError, PricingResult};
pub use serialization::{from_json, to_json, to_json_pretty};
pub use types::{Averaging, Exercise, ExerciseStyle, OptionType};
