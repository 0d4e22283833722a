//! Core traits, common domain types, and library-wide result/error structures.

use crate::market::Market;

pub mod diagnostics;
pub mod serialization;
pub mod types;

pub use diagnostics::{DiagKey, Diagnostics};
pub use serialization::{from_json, to_json, to_json_pretty, PricingReport, PricingRequest};
pub use types::*;

/// Standardized Greeks container used by engine results.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Greeks {
    /// First derivative to spot.
    pub delta: f64,
    /// Second derivative to spot.
    pub gamma: f64,
    /// First derivative to volatility.
    pub vega: f64,
    /// First derivative to calendar time.
    pub theta: f64,
    /// First derivative to rate.
    pub rho: f64,
}

/// Common trait implemented by every priceable instrument.
pub trait Instrument: std::fmt::Debug {
    /// Returns a short type identifier for diagnostics and bindings.
    fn instrument_type(&self) -> &str;
}

/// Pricing engine abstraction over an instrument type.
pub trait PricingEngine<I: Instrument> {
    /// Prices an instrument under the provided market state.
    fn price(&self, instrument: &I, market: &Market) -> Result<PricingResult, PricingError>;
}

/// Unified engine result payload.
#[derive(Debug, Clone)]
pub struct PricingResult {
    /// Present value.
    pub price: f64,
    /// Greeks when available from the engine.
    pub greeks: Option<Greeks>,
    /// Engine-specific scalar diagnostics.
    pub diagnostics: Diagnostics,
}

/// Engine and solver errors surfaced by the API.
///
/// Every variant is a deterministic precondition violation; nothing here is
/// transient, so callers should fix inputs rather than retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Instrument or market validation error.
    InvalidInput(String),
    /// Non-positive or non-finite grid parameters.
    InvalidGrid(String),
    /// Unrecognized finite-difference scheme tag.
    InvalidScheme(String),
    /// Tridiagonal pivot degenerated below tolerance.
    SingularSystem(String),
    /// Non-positive or domain-violating sensitivity perturbation.
    InvalidBump(String),
    /// Explicit-scheme spacing below the stability bound.
    UnstableGrid(String),
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::InvalidGrid(msg) => write!(f, "invalid grid: {msg}"),
            Self::InvalidScheme(msg) => write!(f, "invalid scheme: {msg}"),
            Self::SingularSystem(msg) => write!(f, "singular system: {msg}"),
            Self::InvalidBump(msg) => write!(f, "invalid bump: {msg}"),
            Self::UnstableGrid(msg) => write!(f, "unstable grid: {msg}"),
        }
    }
}

impl std::error::Error for PricingError {}
