//! Bump-and-reprice sensitivities for the grid engines.
//!
//! Every sensitivity is a finite difference of full pricings run against the
//! *same* engine, so base and bumped values share the scheme and the
//! grid-construction policy. Mixing policies between the base and bumped
//! calls lets discretization noise dominate the true sensitivity at small
//! bump sizes.
//!
//! Theta is reported as the calendar-time derivative `(V(T - dt) - V(T)) / dt`
//! without a sign flip, so a long option shows the usual negative decay.

use crate::core::{Greeks, Instrument, PricingEngine, PricingError, PricingResult};
use crate::instruments::VanillaOption;
use crate::market::Market;

/// Perturbation sizes for the five sensitivities.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BumpSpec {
    /// Spot bump for Delta and Gamma, in spot units.
    pub spot: f64,
    /// Maturity bump for Theta, in years.
    pub maturity: f64,
    /// Volatility bump for Vega, absolute.
    pub vol: f64,
    /// Rate bump for Rho, absolute.
    pub rate: f64,
}

impl Default for BumpSpec {
    /// Bumps sized for grid pricers: large enough that the finite-difference
    /// signal dominates the discretization noise of the underlying solver.
    fn default() -> Self {
        Self {
            spot: 0.5,
            maturity: 1.0 / 365.0,
            vol: 0.005,
            rate: 0.0005,
        }
    }
}

impl BumpSpec {
    fn validate(&self, option: &VanillaOption, market: &Market) -> Result<(), PricingError> {
        for (name, bump) in [
            ("spot", self.spot),
            ("maturity", self.maturity),
            ("vol", self.vol),
            ("rate", self.rate),
        ] {
            if !bump.is_finite() || bump <= 0.0 {
                return Err(PricingError::InvalidBump(format!(
                    "{name} bump must be finite and > 0, got {bump}"
                )));
            }
        }
        if market.spot - self.spot <= 0.0 {
            return Err(PricingError::InvalidBump(format!(
                "spot bump {} drives spot {} non-positive",
                self.spot, market.spot
            )));
        }
        if option.expiry - self.maturity <= 0.0 {
            return Err(PricingError::InvalidBump(format!(
                "maturity bump {} drives expiry {} non-positive",
                self.maturity, option.expiry
            )));
        }
        Ok(())
    }
}

/// Computes Delta, Gamma, Theta, Vega, and Rho by bump-and-reprice.
///
/// Six independent pricings: base, spot up/down (central Delta and Gamma),
/// shortened maturity (Theta), volatility up (Vega), rate up (Rho). With the
/// `parallel` feature the six run on the Rayon pool; they share no state, so
/// results are identical either way.
///
/// # Errors
/// [`PricingError::InvalidBump`] when a bump is non-positive, non-finite, or
/// drives spot/maturity non-positive; any engine error is passed through.
pub fn finite_difference_greeks<E>(
    engine: &E,
    option: &VanillaOption,
    market: &Market,
    bumps: &BumpSpec,
) -> Result<Greeks, PricingError>
where
    E: PricingEngine<VanillaOption> + Sync,
{
    option.validate()?;
    bumps.validate(option, market)?;

    let scenarios: [(VanillaOption, Market); 6] = [
        (option.clone(), market.clone()),
        (
            option.clone(),
            Market {
                spot: market.spot + bumps.spot,
                ..market.clone()
            },
        ),
        (
            option.clone(),
            Market {
                spot: market.spot - bumps.spot,
                ..market.clone()
            },
        ),
        (
            VanillaOption {
                expiry: option.expiry - bumps.maturity,
                ..option.clone()
            },
            market.clone(),
        ),
        (
            option.clone(),
            Market {
                vol: market.vol + bumps.vol,
                ..market.clone()
            },
        ),
        (
            option.clone(),
            Market {
                rate: market.rate + bumps.rate,
                ..market.clone()
            },
        ),
    ];

    let prices = price_scenarios(engine, &scenarios)?;
    let [base, s_up, s_dn, t_dn, v_up, r_up] = prices;

    Ok(Greeks {
        delta: (s_up - s_dn) / (2.0 * bumps.spot),
        gamma: (s_up - 2.0 * base + s_dn) / (bumps.spot * bumps.spot),
        theta: (t_dn - base) / bumps.maturity,
        vega: (v_up - base) / bumps.vol,
        rho: (r_up - base) / bumps.rate,
    })
}

/// Prices the instrument and attaches bump-and-reprice Greeks to the result.
pub fn price_with_greeks<E>(
    engine: &E,
    option: &VanillaOption,
    market: &Market,
    bumps: &BumpSpec,
) -> Result<PricingResult, PricingError>
where
    E: PricingEngine<VanillaOption> + Sync,
{
    let greeks = finite_difference_greeks(engine, option, market, bumps)?;
    let mut result = engine.price(option, market)?;
    result.greeks = Some(greeks);
    Ok(result)
}

#[cfg(not(feature = "parallel"))]
fn price_scenarios<E, I>(engine: &E, scenarios: &[(I, Market); 6]) -> Result<[f64; 6], PricingError>
where
    E: PricingEngine<I> + Sync,
    I: Instrument + Sync,
{
    let mut prices = [0.0_f64; 6];
    for (slot, (instrument, market)) in prices.iter_mut().zip(scenarios) {
        *slot = engine.price(instrument, market)?.price;
    }
    Ok(prices)
}

#[cfg(feature = "parallel")]
fn price_scenarios<E, I>(engine: &E, scenarios: &[(I, Market); 6]) -> Result<[f64; 6], PricingError>
where
    E: PricingEngine<I> + Sync,
    I: Instrument + Sync,
{
    use rayon::prelude::*;

    let priced: Vec<f64> = scenarios
        .as_slice()
        .par_iter()
        .map(|(instrument, market)| engine.price(instrument, market).map(|result| result.price))
        .collect::<Result<_, _>>()?;

    let mut prices = [0.0_f64; 6];
    prices.copy_from_slice(&priced);
    Ok(prices)
}
