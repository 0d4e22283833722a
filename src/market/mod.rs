//! Market data container shared by all pricing engines.

use crate::core::PricingError;

/// Market snapshot used by all pricing engines.
///
/// Volatility is flat; the PDE coefficients are constant in log-space, which
/// is what makes the grid transition weights time- and space-homogeneous.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Market {
    /// Spot price.
    pub spot: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Continuously compounded dividend yield.
    pub dividend_yield: f64,
    /// Flat annualized volatility.
    pub vol: f64,
}

impl Market {
    /// Starts a market builder.
    #[inline]
    pub fn builder() -> MarketBuilder {
        MarketBuilder::default()
    }

    /// Risk-neutral log-space drift `r - q - sigma^2 / 2`.
    #[inline]
    pub fn log_drift(&self) -> f64 {
        self.rate - self.dividend_yield - 0.5 * self.vol * self.vol
    }
}

/// Builder for [`Market`].
#[derive(Debug, Clone, Default)]
pub struct MarketBuilder {
    spot: Option<f64>,
    rate: Option<f64>,
    dividend_yield: Option<f64>,
    flat_vol: Option<f64>,
}

impl MarketBuilder {
    /// Sets the spot price.
    #[inline]
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the flat risk-free rate.
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Sets the continuous dividend yield.
    #[inline]
    pub fn dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = Some(dividend_yield);
        self
    }

    /// Sets the flat volatility.
    #[inline]
    pub fn flat_vol(mut self, vol: f64) -> Self {
        self.flat_vol = Some(vol);
        self
    }

    /// Validates and builds a [`Market`].
    ///
    /// Rate defaults to 0 and dividend yield to 0 when unset. Spot and
    /// volatility are required and must be positive; the dividend yield must
    /// be non-negative.
    pub fn build(self) -> Result<Market, PricingError> {
        let spot = self
            .spot
            .ok_or_else(|| PricingError::InvalidInput("market spot is required".to_string()))?;
        if !spot.is_finite() || spot <= 0.0 {
            return Err(PricingError::InvalidInput(
                "market spot must be finite and > 0".to_string(),
            ));
        }

        let rate = self.rate.unwrap_or(0.0);
        if !rate.is_finite() {
            return Err(PricingError::InvalidInput(
                "market rate must be finite".to_string(),
            ));
        }

        let dividend_yield = self.dividend_yield.unwrap_or(0.0);
        if !dividend_yield.is_finite() || dividend_yield < 0.0 {
            return Err(PricingError::InvalidInput(
                "market dividend_yield must be finite and >= 0".to_string(),
            ));
        }

        let vol = self
            .flat_vol
            .ok_or_else(|| PricingError::InvalidInput("market flat_vol is required".to_string()))?;
        if !vol.is_finite() || vol <= 0.0 {
            return Err(PricingError::InvalidInput(
                "market flat_vol must be finite and > 0".to_string(),
            ));
        }

        Ok(Market {
            spot,
            rate,
            dividend_yield,
            vol,
        })
    }
}
