//! Closed-form engines, used as verification references for the grid solvers.

pub mod black_scholes;

pub use black_scholes::{black_scholes_greeks, bs_price, BlackScholesEngine};
