//! Stable serde payloads for transporting pricing inputs and outputs.
//!
//! # Examples
//! ```rust
//! use ferrofd::core::{from_json, to_json_pretty, PricingRequest};
//! use ferrofd::engines::pde::FdScheme;
//! use ferrofd::instruments::VanillaOption;
//! use ferrofd::market::Market;
//!
//! let request = PricingRequest {
//!     option: VanillaOption::european_put(95.0, 0.5),
//!     market: Market::builder()
//!         .spot(100.0)
//!         .rate(0.03)
//!         .flat_vol(0.22)
//!         .build()
//!         .unwrap(),
//!     scheme: FdScheme::CrankNicolson,
//!     time_steps: 500,
//!     half_width: 120,
//! };
//!
//! let json = to_json_pretty(&request).expect("json serialization");
//! let decoded: PricingRequest = from_json(&json).expect("json deserialization");
//! assert_eq!(decoded, request);
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::{Greeks, PricingError};
use crate::engines::pde::FdScheme;
use crate::instruments::VanillaOption;
use crate::market::Market;

/// One grid-pricing job: instrument, market snapshot, scheme, and grid sizes.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PricingRequest {
    pub option: VanillaOption,
    pub market: Market,
    pub scheme: FdScheme,
    pub time_steps: usize,
    pub half_width: usize,
}

/// Pricing output payload mirroring a [`crate::core::PricingResult`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PricingReport {
    pub scheme: FdScheme,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeks: Option<Greeks>,
}

/// Serializes a payload to compact JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, PricingError> {
    serde_json::to_string(value)
        .map_err(|err| PricingError::InvalidInput(format!("json serialization failed: {err}")))
}

/// Serializes a payload to pretty-printed JSON.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, PricingError> {
    serde_json::to_string_pretty(value)
        .map_err(|err| PricingError::InvalidInput(format!("json serialization failed: {err}")))
}

/// Deserializes a payload from JSON.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, PricingError> {
    serde_json::from_str(json)
        .map_err(|err| PricingError::InvalidInput(format!("json deserialization failed: {err}")))
}
