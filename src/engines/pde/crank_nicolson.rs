//! Crank-Nicolson finite-difference solver.
//!
//! Trapezoidal average of the forward- and backward-Euler operators: the
//! right-hand side applies the explicit half-step to the known slice, the
//! tridiagonal solve applies the implicit half-step to the unknown one.
//! Second-order accurate in time, unconditionally stable.

use crate::core::{DiagKey, Diagnostics, PricingEngine, PricingError, PricingResult};
use crate::instruments::VanillaOption;
use crate::market::Market;
use crate::math::tridiagonal;

use super::fd_common::{boundary_values, terminal_payoff};
use super::grid::LogGridSpec;
use super::FdScheme;

/// Crank-Nicolson finite-difference engine.
#[derive(Debug, Clone)]
pub struct CrankNicolsonEngine {
    /// Number of time steps.
    pub time_steps: usize,
    /// Number of spatial steps on each side of the center node.
    pub half_width: usize,
    /// Optional log-price spacing override; `None` uses `sigma * sqrt(dt)`.
    pub space_step: Option<f64>,
}

impl Default for CrankNicolsonEngine {
    fn default() -> Self {
        Self {
            time_steps: 400,
            half_width: 150,
            space_step: None,
        }
    }
}

impl CrankNicolsonEngine {
    /// Creates a Crank-Nicolson engine with the given time/space resolution.
    pub fn new(time_steps: usize, half_width: usize) -> Self {
        Self {
            time_steps,
            half_width,
            space_step: None,
        }
    }

    /// Overrides the log-price spacing.
    pub fn with_space_step(mut self, space_step: f64) -> Self {
        self.space_step = Some(space_step);
        self
    }

    fn grid(&self, market: &Market, expiry: f64) -> Result<LogGridSpec, PricingError> {
        match self.space_step {
            Some(dx) => LogGridSpec::build_with_space_step(
                FdScheme::CrankNicolson,
                self.time_steps,
                self.half_width,
                market,
                expiry,
                dx,
            ),
            None => LogGridSpec::build(
                FdScheme::CrankNicolson,
                self.time_steps,
                self.half_width,
                market,
                expiry,
            ),
        }
    }
}

impl PricingEngine<VanillaOption> for CrankNicolsonEngine {
    fn price(
        &self,
        instrument: &VanillaOption,
        market: &Market,
    ) -> Result<PricingResult, PricingError> {
        instrument.validate()?;

        if instrument.expiry == 0.0 {
            return Ok(PricingResult {
                price: instrument.intrinsic(market.spot),
                greeks: None,
                diagnostics: Diagnostics::new(),
            });
        }

        let grid = self.grid(market, instrument.expiry)?;
        let n_t = grid.time_steps;
        let m = grid.node_count();
        let (dt, dx, nu) = (grid.dt, grid.dx, grid.drift);

        // Half-weighted transition coefficients; `a` multiplies the lower
        // neighbor, `c` the upper, `b` the node itself (discounting included).
        let sig2 = (market.vol / dx) * (market.vol / dx);
        let a = 0.25 * dt * (sig2 - nu / dx);
        let c = 0.25 * dt * (sig2 + nu / dx);
        let b = 0.5 * dt * (sig2 + market.rate);

        let nodes = grid.spot_nodes(market.spot);
        let s_min = nodes[0];
        let s_max = nodes[m - 1];

        let mut values = terminal_payoff(instrument.option_type, instrument.strike, &nodes);
        let mut next_values = vec![0.0_f64; m];

        let interior = m - 2;
        let mut lhs_lower = vec![-a; interior];
        let mut lhs_upper = vec![-c; interior];
        lhs_lower[0] = 0.0;
        lhs_upper[interior - 1] = 0.0;
        let lhs_diag = vec![1.0 + b; interior];
        let rhs_diag = 1.0 - b;

        let mut rhs = vec![0.0_f64; interior];
        let mut c_star = vec![0.0_f64; interior];
        let mut d_star = vec![0.0_f64; interior];

        for n in (0..n_t).rev() {
            let tau = instrument.expiry - n as f64 * dt;
            let (lower_bv, upper_bv) = boundary_values(
                instrument.option_type,
                instrument.strike,
                market.rate,
                market.dividend_yield,
                s_min,
                s_max,
                tau,
            );

            for k in 0..interior {
                let i = k + 1;
                rhs[k] = rhs_diag.mul_add(values[i], a.mul_add(values[i - 1], c * values[i + 1]));
            }
            rhs[0] += a * lower_bv;
            rhs[interior - 1] += c * upper_bv;

            next_values[0] = lower_bv;
            next_values[m - 1] = upper_bv;
            tridiagonal::solve_inplace(
                &lhs_lower,
                &lhs_diag,
                &lhs_upper,
                &rhs,
                &mut c_star,
                &mut d_star,
                &mut next_values[1..m - 1],
            )?;

            std::mem::swap(&mut values, &mut next_values);
        }

        let price = values[grid.half_width].max(0.0);

        let mut diagnostics = Diagnostics::new();
        diagnostics.insert(DiagKey::NumTimeSteps, n_t as f64);
        diagnostics.insert(DiagKey::NumSpaceSteps, m as f64);
        diagnostics.insert(DiagKey::Dt, dt);
        diagnostics.insert(DiagKey::Dx, dx);
        diagnostics.insert(DiagKey::Drift, nu);
        diagnostics.insert(DiagKey::Vol, market.vol);

        Ok(PricingResult {
            price,
            greeks: None,
            diagnostics,
        })
    }
}
