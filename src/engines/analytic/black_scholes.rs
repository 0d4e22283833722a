//! Analytic Black-Scholes-Merton price and Greeks for European vanillas.
//!
//! The grid engines are validated against these closed forms; they are not a
//! pricing path of their own beyond that role.

use crate::core::{Greeks, OptionType, PricingEngine, PricingError, PricingResult};
use crate::instruments::VanillaOption;
use crate::market::Market;
use crate::math::{normal_cdf, normal_pdf};

/// Analytic Black-Scholes engine for European vanilla options.
#[derive(Debug, Clone, Default)]
pub struct BlackScholesEngine;

impl BlackScholesEngine {
    /// Creates a Black-Scholes engine instance.
    pub fn new() -> Self {
        Self
    }
}

#[inline]
fn intrinsic(option_type: OptionType, spot: f64, strike: f64) -> f64 {
    match option_type {
        OptionType::Call => (spot - strike).max(0.0),
        OptionType::Put => (strike - spot).max(0.0),
    }
}

#[inline]
fn d1_d2(
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> (f64, f64) {
    let sig_sqrt_t = vol * expiry.sqrt();
    let d1 =
        ((spot / strike).ln() + (rate - dividend_yield + 0.5 * vol * vol) * expiry) / sig_sqrt_t;
    (d1, d1 - sig_sqrt_t)
}

/// Black-Scholes-Merton price with continuous dividend yield.
#[inline]
pub fn bs_price(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    if expiry <= 0.0 {
        return intrinsic(option_type, spot, strike);
    }
    let df_r = (-rate * expiry).exp();
    let df_q = (-dividend_yield * expiry).exp();
    if vol <= 0.0 {
        return match option_type {
            OptionType::Call => (spot * df_q - strike * df_r).max(0.0),
            OptionType::Put => (strike * df_r - spot * df_q).max(0.0),
        };
    }

    let (d1, d2) = d1_d2(spot, strike, rate, dividend_yield, vol, expiry);
    match option_type {
        OptionType::Call => spot * df_q * normal_cdf(d1) - strike * df_r * normal_cdf(d2),
        OptionType::Put => strike * df_r * normal_cdf(-d2) - spot * df_q * normal_cdf(-d1),
    }
}

/// Closed-form BSM Greeks with continuous dividend yield.
///
/// Theta follows the calendar-time convention `dV/dt` and is typically
/// negative for long positions.
pub fn black_scholes_greeks(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> Greeks {
    if spot <= 0.0 || strike <= 0.0 || expiry <= 0.0 || vol <= 0.0 {
        return Greeks {
            delta: 0.0,
            gamma: 0.0,
            vega: 0.0,
            theta: 0.0,
            rho: 0.0,
        };
    }

    let (d1, d2) = d1_d2(spot, strike, rate, dividend_yield, vol, expiry);
    let sqrt_t = expiry.sqrt();
    let df_q = (-dividend_yield * expiry).exp();
    let df_r = (-rate * expiry).exp();

    let delta = match option_type {
        OptionType::Call => df_q * normal_cdf(d1),
        OptionType::Put => df_q * (normal_cdf(d1) - 1.0),
    };

    let gamma = df_q * normal_pdf(d1) / (spot * vol * sqrt_t);
    let vega = spot * df_q * normal_pdf(d1) * sqrt_t;

    let theta = match option_type {
        OptionType::Call => {
            -spot * df_q * normal_pdf(d1) * vol / (2.0 * sqrt_t)
                - rate * strike * df_r * normal_cdf(d2)
                + dividend_yield * spot * df_q * normal_cdf(d1)
        }
        OptionType::Put => {
            -spot * df_q * normal_pdf(d1) * vol / (2.0 * sqrt_t)
                + rate * strike * df_r * normal_cdf(-d2)
                - dividend_yield * spot * df_q * normal_cdf(-d1)
        }
    };

    let rho = match option_type {
        OptionType::Call => strike * expiry * df_r * normal_cdf(d2),
        OptionType::Put => -strike * expiry * df_r * normal_cdf(-d2),
    };

    Greeks {
        delta,
        gamma,
        vega,
        theta,
        rho,
    }
}

impl PricingEngine<VanillaOption> for BlackScholesEngine {
    fn price(
        &self,
        instrument: &VanillaOption,
        market: &Market,
    ) -> Result<PricingResult, PricingError> {
        instrument.validate()?;

        let price = bs_price(
            instrument.option_type,
            market.spot,
            instrument.strike,
            market.rate,
            market.dividend_yield,
            market.vol,
            instrument.expiry,
        );

        Ok(PricingResult {
            price,
            greeks: None,
            diagnostics: crate::core::Diagnostics::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn atm_call_matches_textbook_value() {
        // Hull's canonical example: S=K=100, r=5%, vol=20%, T=1 -> 10.4506.
        let px = bs_price(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 0.20, 1.0);
        assert_abs_diff_eq!(px, 10.4506, epsilon = 5e-4);
    }

    #[test]
    fn put_call_parity_holds() {
        let (s, k, r, q, vol, t) = (100.0, 95.0, 0.04, 0.015, 0.3, 0.75);
        let call = bs_price(OptionType::Call, s, k, r, q, vol, t);
        let put = bs_price(OptionType::Put, s, k, r, q, vol, t);
        let forward = s * (-q * t).exp() - k * (-r * t).exp();
        assert_abs_diff_eq!(call - put, forward, epsilon = 1e-10);
    }

    #[test]
    fn expired_option_prices_at_intrinsic() {
        assert_eq!(bs_price(OptionType::Call, 110.0, 100.0, 0.05, 0.0, 0.2, 0.0), 10.0);
        assert_eq!(bs_price(OptionType::Put, 110.0, 100.0, 0.05, 0.0, 0.2, 0.0), 0.0);
    }

    #[test]
    fn greeks_match_quantlib_style_references() {
        // S=100, K=100, r=0.05, q=0, vol=0.20, T=1.
        let g = black_scholes_greeks(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 0.20, 1.0);
        assert_abs_diff_eq!(g.delta, 0.6368, epsilon = 5e-4);
        assert_abs_diff_eq!(g.gamma, 0.01876, epsilon = 5e-5);
        assert_abs_diff_eq!(g.theta, -6.414, epsilon = 5e-3);
        assert_abs_diff_eq!(g.vega, 37.524, epsilon = 5e-3);
        assert_abs_diff_eq!(g.rho, 53.232, epsilon = 0.1);
    }

    #[test]
    fn engine_wraps_closed_form() {
        let option = VanillaOption::european_call(100.0, 1.0);
        let market = Market::builder()
            .spot(100.0)
            .rate(0.05)
            .flat_vol(0.20)
            .build()
            .unwrap();
        let result = BlackScholesEngine::new().price(&option, &market).unwrap();
        assert_abs_diff_eq!(
            result.price,
            bs_price(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 0.20, 1.0),
            epsilon = 1e-12
        );
    }
}
