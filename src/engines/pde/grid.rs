//! Log-price grid construction and sizing policies for the FD engines.

use crate::core::PricingError;
use crate::market::Market;

use super::FdScheme;

/// Ratio below which a caller-chosen explicit spacing is rejected as unstable.
const CFL_SLACK: f64 = 1.0 - 1.0e-10;

/// Width policy for default implicit/Crank-Nicolson grids, in standard
/// deviations of the terminal log-price distribution.
const DEFAULT_WIDTH_STDDEVS: f64 = 5.0;

/// Discretization of the log-price/time domain for one pricing run.
///
/// Nodes sit at `x_j = ln(spot) + j * dx` for `j in [-half_width, half_width]`,
/// so the center node always coincides with the initial spot and the price is
/// read off without interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogGridSpec {
    /// Scheme the spacing was derived for.
    pub scheme: FdScheme,
    /// Number of backward time steps `N`.
    pub time_steps: usize,
    /// Number of spatial steps on each side of the center node `Nj`.
    pub half_width: usize,
    /// Time step `T / N`.
    pub dt: f64,
    /// Log-price spacing.
    pub dx: f64,
    /// Risk-neutral log-space drift `r - q - sigma^2 / 2`.
    pub drift: f64,
}

impl LogGridSpec {
    /// Builds a grid with the scheme's own spacing rule.
    ///
    /// Explicit uses `dx = sigma * sqrt(3 dt)`, the smallest spacing that
    /// satisfies the stability bound; implicit and Crank-Nicolson use
    /// `dx = sigma * sqrt(dt)`.
    pub fn build(
        scheme: FdScheme,
        time_steps: usize,
        half_width: usize,
        market: &Market,
        expiry: f64,
    ) -> Result<Self, PricingError> {
        let dt = Self::time_step(time_steps, half_width, market, expiry)?;
        let dx = match scheme {
            FdScheme::Explicit => market.vol * (3.0 * dt).sqrt(),
            FdScheme::Implicit | FdScheme::CrankNicolson => market.vol * dt.sqrt(),
        };
        Self::assemble(scheme, time_steps, half_width, market, dt, dx)
    }

    /// Builds a grid with a caller-chosen log-price spacing.
    ///
    /// # Errors
    /// For the explicit scheme, a spacing below `sigma * sqrt(3 dt)` fails
    /// with [`PricingError::UnstableGrid`]: the forward-Euler update would
    /// oscillate and diverge rather than converge.
    pub fn build_with_space_step(
        scheme: FdScheme,
        time_steps: usize,
        half_width: usize,
        market: &Market,
        expiry: f64,
        space_step: f64,
    ) -> Result<Self, PricingError> {
        let dt = Self::time_step(time_steps, half_width, market, expiry)?;
        if !space_step.is_finite() || space_step <= 0.0 {
            return Err(PricingError::InvalidGrid(
                "space_step must be finite and > 0".to_string(),
            ));
        }

        if scheme == FdScheme::Explicit {
            let dx_min = market.vol * (3.0 * dt).sqrt();
            if space_step < dx_min * CFL_SLACK {
                return Err(PricingError::UnstableGrid(format!(
                    "explicit spacing dx={space_step:.6e} violates dx >= sigma*sqrt(3 dt) = {dx_min:.6e}; \
                     widen dx or increase time_steps"
                )));
            }
        }

        Self::assemble(scheme, time_steps, half_width, market, dt, space_step)
    }

    /// Derives grid sizes from a target truncation error `epsilon`.
    ///
    /// Explicit: `dt = eps / (1 + 3 sigma^2)`, `N = ceil(T / dt)`,
    /// `dx = sigma * sqrt(3 dt)`, `Nj = ceil(sigma * sqrt(T) / dx)`.
    /// Implicit/Crank-Nicolson: `dt = sqrt(eps)`, `N = ceil(T / dt)`,
    /// `dx = sigma * sqrt(dt)`, and the width covers five standard deviations,
    /// `Nj = ceil(5 sigma * sqrt(T) / dx)`.
    pub fn for_target_accuracy(
        scheme: FdScheme,
        epsilon: f64,
        market: &Market,
        expiry: f64,
    ) -> Result<Self, PricingError> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(PricingError::InvalidGrid(
                "epsilon must be finite and > 0".to_string(),
            ));
        }
        if !expiry.is_finite() || expiry <= 0.0 {
            return Err(PricingError::InvalidGrid(
                "expiry must be finite and > 0".to_string(),
            ));
        }
        let vol = market.vol;
        if !vol.is_finite() || vol <= 0.0 {
            return Err(PricingError::InvalidGrid(
                "volatility must be finite and > 0".to_string(),
            ));
        }

        let dt_target = match scheme {
            FdScheme::Explicit => epsilon / (1.0 + 3.0 * vol * vol),
            FdScheme::Implicit | FdScheme::CrankNicolson => epsilon.sqrt(),
        };
        let time_steps = ((expiry / dt_target).ceil() as usize).max(1);
        let dt = expiry / time_steps as f64;

        let (dx, width_stddevs) = match scheme {
            FdScheme::Explicit => (vol * (3.0 * dt).sqrt(), 1.0),
            FdScheme::Implicit | FdScheme::CrankNicolson => {
                (vol * dt.sqrt(), DEFAULT_WIDTH_STDDEVS)
            }
        };
        let half_width = ((width_stddevs * vol * expiry.sqrt() / dx).ceil() as usize).max(1);

        Self::assemble(scheme, time_steps, half_width, market, dt, dx)
    }

    fn time_step(
        time_steps: usize,
        half_width: usize,
        market: &Market,
        expiry: f64,
    ) -> Result<f64, PricingError> {
        if time_steps < 1 {
            return Err(PricingError::InvalidGrid(
                "time_steps must be >= 1".to_string(),
            ));
        }
        if half_width < 1 {
            return Err(PricingError::InvalidGrid(
                "half_width must be >= 1".to_string(),
            ));
        }
        if !market.vol.is_finite() || market.vol <= 0.0 {
            return Err(PricingError::InvalidGrid(
                "volatility must be finite and > 0".to_string(),
            ));
        }
        if !expiry.is_finite() || expiry <= 0.0 {
            return Err(PricingError::InvalidGrid(
                "expiry must be finite and > 0".to_string(),
            ));
        }
        Ok(expiry / time_steps as f64)
    }

    fn assemble(
        scheme: FdScheme,
        time_steps: usize,
        half_width: usize,
        market: &Market,
        dt: f64,
        dx: f64,
    ) -> Result<Self, PricingError> {
        let drift = market.log_drift();
        if !dt.is_finite() || dt <= 0.0 || !dx.is_finite() || dx <= 0.0 || !drift.is_finite() {
            return Err(PricingError::InvalidGrid(format!(
                "grid derivation produced dt={dt:.6e}, dx={dx:.6e}, drift={drift:.6e}"
            )));
        }
        Ok(Self {
            scheme,
            time_steps,
            half_width,
            dt,
            dx,
            drift,
        })
    }

    /// Number of spatial nodes, `2 * half_width + 1`.
    #[inline]
    pub fn node_count(&self) -> usize {
        2 * self.half_width + 1
    }

    /// Spot values at the grid nodes, `spot * exp(j * dx)` in ascending order.
    pub fn spot_nodes(&self, spot: f64) -> Vec<f64> {
        let nj = self.half_width as i64;
        (-nj..=nj)
            .map(|j| spot * (j as f64 * self.dx).exp())
            .collect()
    }
}
