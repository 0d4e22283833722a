//! Finite-difference PDE pricing engines on a log-price grid.

pub mod crank_nicolson;
pub mod explicit_fd;
mod fd_common;
pub mod grid;
pub mod implicit_fd;

pub use crank_nicolson::CrankNicolsonEngine;
pub use explicit_fd::ExplicitFdEngine;
pub use grid::LogGridSpec;
pub use implicit_fd::ImplicitFdEngine;

use crate::core::{PricingEngine, PricingError, PricingResult};
use crate::instruments::VanillaOption;
use crate::market::Market;

/// Time-stepping scheme for the Black-Scholes PDE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FdScheme {
    /// Forward Euler; conditionally stable, `dx >= sigma * sqrt(3 dt)`.
    Explicit,
    /// Backward Euler; unconditionally stable, first-order in time.
    Implicit,
    /// Trapezoidal average; unconditionally stable, second-order in time.
    CrankNicolson,
}

impl FdScheme {
    pub const ALL: [FdScheme; 3] = [Self::Explicit, Self::Implicit, Self::CrankNicolson];

    /// Canonical snake_case tag, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Implicit => "implicit",
            Self::CrankNicolson => "crank_nicolson",
        }
    }
}

impl std::fmt::Display for FdScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FdScheme {
    type Err = PricingError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "explicit" => Ok(Self::Explicit),
            "implicit" => Ok(Self::Implicit),
            "crank_nicolson" => Ok(Self::CrankNicolson),
            other => Err(PricingError::InvalidScheme(format!(
                "unrecognized scheme tag `{other}`; expected explicit, implicit, or crank_nicolson"
            ))),
        }
    }
}

/// Prices a European vanilla with the selected scheme and grid sizes.
///
/// Tagged-variant entry point over the three engines; equivalent to
/// constructing the engine directly.
pub fn price_european(
    scheme: FdScheme,
    time_steps: usize,
    half_width: usize,
    option: &VanillaOption,
    market: &Market,
) -> Result<PricingResult, PricingError> {
    match scheme {
        FdScheme::Explicit => {
            ExplicitFdEngine::new(time_steps, half_width).price(option, market)
        }
        FdScheme::Implicit => {
            ImplicitFdEngine::new(time_steps, half_width).price(option, market)
        }
        FdScheme::CrankNicolson => {
            CrankNicolsonEngine::new(time_steps, half_width).price(option, market)
        }
    }
}
