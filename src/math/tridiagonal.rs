//! Thomas-algorithm solver for tridiagonal linear systems.
//!
//! Forward elimination followed by back substitution, O(n) time and scratch
//! space. The implicit and Crank-Nicolson steppers call [`solve_inplace`]
//! once per time step with pre-allocated buffers; [`solve`] is the allocating
//! convenience wrapper.

use crate::core::PricingError;

/// Pivots at or below this magnitude abort the elimination.
pub const PIVOT_TOLERANCE: f64 = 1.0e-14;

/// Solves `A x = rhs` for a tridiagonal `A`, allocating the output.
///
/// `lower[i]` multiplies `x[i - 1]` (entry 0 is ignored), `diag[i]` multiplies
/// `x[i]`, and `upper[i]` multiplies `x[i + 1]` (the last entry is ignored).
///
/// # Errors
/// [`PricingError::SingularSystem`] when a pivot degenerates below
/// [`PIVOT_TOLERANCE`], [`PricingError::InvalidInput`] on length mismatch.
pub fn solve(
    lower: &[f64],
    diag: &[f64],
    upper: &[f64],
    rhs: &[f64],
) -> Result<Vec<f64>, PricingError> {
    let n = diag.len();
    let mut c_star = vec![0.0_f64; n];
    let mut d_star = vec![0.0_f64; n];
    let mut x = vec![0.0_f64; n];
    solve_inplace(lower, diag, upper, rhs, &mut c_star, &mut d_star, &mut x)?;
    Ok(x)
}

/// In-place tridiagonal solve using caller-provided scratch buffers.
///
/// Writes the solution into `x`; `c_star` and `d_star` are scratch space.
pub fn solve_inplace(
    lower: &[f64],
    diag: &[f64],
    upper: &[f64],
    rhs: &[f64],
    c_star: &mut [f64],
    d_star: &mut [f64],
    x: &mut [f64],
) -> Result<(), PricingError> {
    let n = diag.len();
    if n == 0 {
        return Ok(());
    }
    if lower.len() != n
        || upper.len() != n
        || rhs.len() != n
        || c_star.len() != n
        || d_star.len() != n
        || x.len() != n
    {
        return Err(PricingError::InvalidInput(
            "tridiagonal input lengths must match".to_string(),
        ));
    }

    if diag[0].abs() <= PIVOT_TOLERANCE {
        return Err(PricingError::SingularSystem(
            "tridiagonal pivot below tolerance at row 0".to_string(),
        ));
    }
    c_star[0] = if n > 1 { upper[0] / diag[0] } else { 0.0 };
    d_star[0] = rhs[0] / diag[0];

    for i in 1..n {
        // denom = diag[i] - lower[i] * c_star[i-1]
        let denom = (-lower[i]).mul_add(c_star[i - 1], diag[i]);
        if denom.abs() <= PIVOT_TOLERANCE {
            return Err(PricingError::SingularSystem(format!(
                "tridiagonal pivot below tolerance at row {i}"
            )));
        }
        c_star[i] = if i < n - 1 { upper[i] / denom } else { 0.0 };
        d_star[i] = (-lower[i]).mul_add(d_star[i - 1], rhs[i]) / denom;
    }

    x[n - 1] = d_star[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = (-c_star[i]).mul_add(x[i + 1], d_star[i]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn multiply(lower: &[f64], diag: &[f64], upper: &[f64], x: &[f64]) -> Vec<f64> {
        let n = diag.len();
        (0..n)
            .map(|i| {
                let mut acc = diag[i] * x[i];
                if i > 0 {
                    acc += lower[i] * x[i - 1];
                }
                if i < n - 1 {
                    acc += upper[i] * x[i + 1];
                }
                acc
            })
            .collect()
    }

    #[test]
    fn solves_known_three_by_three_system() {
        // [2 1 0; 1 3 1; 0 1 2] x = [4; 10; 8] has solution [1; 2; 3].
        let lower = [0.0, 1.0, 1.0];
        let diag = [2.0, 3.0, 2.0];
        let upper = [1.0, 1.0, 0.0];
        let rhs = [4.0, 10.0, 8.0];

        let x = solve(&lower, &diag, &upper, &rhs).unwrap();
        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[2], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn random_diagonally_dominant_system_roundtrips() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let n = 64;

        let mut lower = vec![0.0_f64; n];
        let mut diag = vec![0.0_f64; n];
        let mut upper = vec![0.0_f64; n];
        let mut rhs = vec![0.0_f64; n];
        for i in 0..n {
            if i > 0 {
                lower[i] = rng.gen_range(-1.0..1.0);
            }
            if i < n - 1 {
                upper[i] = rng.gen_range(-1.0..1.0);
            }
            diag[i] = rng.gen_range(2.5..3.5);
            rhs[i] = rng.gen_range(-10.0..10.0);
        }

        let x = solve(&lower, &diag, &upper, &rhs).unwrap();
        let reproduced = multiply(&lower, &diag, &upper, &x);
        for (lhs, want) in reproduced.iter().zip(&rhs) {
            assert_abs_diff_eq!(*lhs, *want, epsilon = 1e-9);
        }
    }

    #[test]
    fn degenerate_pivot_is_reported_as_singular() {
        // Elimination at row 1 yields denom = 1 - 1 * (1 / 1) = 0.
        let lower = [0.0, 1.0, 1.0];
        let diag = [1.0, 1.0, 2.0];
        let upper = [1.0, 1.0, 0.0];
        let rhs = [1.0, 1.0, 1.0];

        match solve(&lower, &diag, &upper, &rhs) {
            Err(PricingError::SingularSystem(msg)) => {
                assert!(msg.contains("row 1"), "unexpected message: {msg}");
            }
            other => panic!("expected SingularSystem, got {other:?}"),
        }
    }

    #[test]
    fn zero_leading_pivot_is_rejected() {
        let lower = [0.0, 1.0];
        let diag = [0.0, 1.0];
        let upper = [1.0, 0.0];
        let rhs = [1.0, 1.0];
        assert!(matches!(
            solve(&lower, &diag, &upper, &rhs),
            Err(PricingError::SingularSystem(_))
        ));
    }

    #[test]
    fn mismatched_lengths_are_invalid_input() {
        let mut c_star = vec![0.0; 2];
        let mut d_star = vec![0.0; 2];
        let mut x = vec![0.0; 2];
        let result = solve_inplace(
            &[0.0, 1.0],
            &[2.0, 2.0],
            &[1.0],
            &[1.0, 1.0],
            &mut c_star,
            &mut d_star,
            &mut x,
        );
        assert!(matches!(result, Err(PricingError::InvalidInput(_))));
    }
}
