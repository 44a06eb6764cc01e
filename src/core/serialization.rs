//! JSON transport helpers for requests and results.
//!
//! Thin wrappers over `serde_json` so hosting layers (services, script
//! runtimes) can move [`crate::pricers::PricingRequest`] and
//! [`crate::core::PricingResult`] payloads around without depending on the
//! serializer directly.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serializes any library payload to pretty-printed JSON.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Serializes any library payload to compact JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Deserializes a library payload from JSON.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(json)
}
