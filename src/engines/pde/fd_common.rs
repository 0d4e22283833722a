use crate::core::OptionType;

#[inline]
pub(super) fn intrinsic(option_type: OptionType, spot: f64, strike: f64) -> f64 {
    match option_type {
        OptionType::Call => (spot - strike).max(0.0),
        OptionType::Put => (strike - spot).max(0.0),
    }
}

/// Terminal condition at expiry: the payoff evaluated on every node.
pub(super) fn terminal_payoff(option_type: OptionType, strike: f64, nodes: &[f64]) -> Vec<f64> {
    nodes
        .iter()
        .map(|&s| intrinsic(option_type, s, strike))
        .collect()
}

/// Dirichlet boundary values at the grid edges, `tau` years before expiry.
///
/// Deep in the money the option converges to the discounted forward payoff;
/// deep out of the money it converges to zero. The European identities are
/// `S e^{-q tau} - K e^{-r tau}` for a call at the upper edge and
/// `K e^{-r tau} - S e^{-q tau}` for a put at the lower edge.
pub(super) fn boundary_values(
    option_type: OptionType,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    s_min: f64,
    s_max: f64,
    tau: f64,
) -> (f64, f64) {
    let df_r = (-rate * tau).exp();
    let df_q = (-dividend_yield * tau).exp();
    match option_type {
        OptionType::Call => (0.0, (s_max * df_q - strike * df_r).max(0.0)),
        OptionType::Put => ((strike * df_r - s_min * df_q).max(0.0), 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn terminal_payoff_kinks_at_strike() {
        let nodes = [80.0, 90.0, 100.0, 110.0, 120.0];
        let call = terminal_payoff(OptionType::Call, 100.0, &nodes);
        assert_eq!(call, vec![0.0, 0.0, 0.0, 10.0, 20.0]);

        let put = terminal_payoff(OptionType::Put, 100.0, &nodes);
        assert_eq!(put, vec![20.0, 10.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn call_boundaries_follow_discounted_forward() {
        let (lower, upper) = boundary_values(OptionType::Call, 100.0, 0.05, 0.02, 20.0, 400.0, 1.0);
        assert_eq!(lower, 0.0);
        assert_relative_eq!(
            upper,
            400.0 * (-0.02_f64).exp() - 100.0 * (-0.05_f64).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn put_boundaries_follow_discounted_strike() {
        let (lower, upper) = boundary_values(OptionType::Put, 100.0, 0.05, 0.02, 20.0, 400.0, 1.0);
        assert_relative_eq!(
            lower,
            100.0 * (-0.05_f64).exp() - 20.0 * (-0.02_f64).exp(),
            epsilon = 1e-12
        );
        assert_eq!(upper, 0.0);
    }

    #[test]
    fn boundaries_never_go_negative() {
        // Narrow grid: the whole domain is out of the money for the call.
        let (_, upper) = boundary_values(OptionType::Call, 100.0, 0.05, 0.0, 10.0, 44.0, 1.0);
        assert_eq!(upper, 0.0);
    }
}
