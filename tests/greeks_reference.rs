use ferrofd::core::{OptionType, PricingError};
use ferrofd::engines::analytic::black_scholes_greeks;
use ferrofd::engines::pde::CrankNicolsonEngine;
use ferrofd::greeks::{finite_difference_greeks, price_with_greeks, BumpSpec};
use ferrofd::instruments::VanillaOption;
use ferrofd::market::Market;

fn reference_market() -> Market {
    Market::builder()
        .spot(100.0)
        .rate(0.05)
        .dividend_yield(0.02)
        .flat_vol(0.25)
        .build()
        .expect("valid market")
}

fn reference_engine() -> CrankNicolsonEngine {
    CrankNicolsonEngine::new(2_000, 250)
}

fn reference_bumps() -> BumpSpec {
    BumpSpec {
        spot: 1.0,
        maturity: 1.0 / 365.0,
        vol: 0.005,
        rate: 0.0005,
    }
}

#[test]
fn grid_greeks_track_closed_form_references() {
    let option = VanillaOption::european_call(100.0, 1.0);
    let market = reference_market();

    let fd = finite_difference_greeks(
        &reference_engine(),
        &option,
        &market,
        &reference_bumps(),
    )
    .expect("greeks");
    let cf = black_scholes_greeks(OptionType::Call, 100.0, 100.0, 0.05, 0.02, 0.25, 1.0);

    assert!(
        (fd.delta - cf.delta).abs() <= 5.0e-3,
        "delta: fd={} cf={}",
        fd.delta,
        cf.delta
    );
    assert!(
        (fd.gamma - cf.gamma).abs() <= 4.0e-3,
        "gamma: fd={} cf={}",
        fd.gamma,
        cf.gamma
    );
    assert!(
        (fd.theta - cf.theta).abs() <= 0.25,
        "theta: fd={} cf={}",
        fd.theta,
        cf.theta
    );
    assert!(
        (fd.vega - cf.vega).abs() <= 1.0,
        "vega: fd={} cf={}",
        fd.vega,
        cf.vega
    );
    assert!(
        (fd.rho - cf.rho).abs() <= 1.0,
        "rho: fd={} cf={}",
        fd.rho,
        cf.rho
    );
}

#[test]
fn put_greeks_carry_the_expected_signs() {
    let option = VanillaOption::european_put(100.0, 1.0);
    let market = reference_market();

    let fd = finite_difference_greeks(
        &reference_engine(),
        &option,
        &market,
        &reference_bumps(),
    )
    .expect("greeks");

    assert!(fd.delta < 0.0 && fd.delta > -1.0, "put delta: {}", fd.delta);
    assert!(fd.gamma > 0.0, "put gamma: {}", fd.gamma);
    assert!(fd.vega > 0.0, "put vega: {}", fd.vega);
    assert!(fd.rho < 0.0, "put rho: {}", fd.rho);
}

#[test]
fn gamma_is_consistent_with_the_delta_slope() {
    let option = VanillaOption::european_call(100.0, 1.0);
    let market = reference_market();
    let engine = reference_engine();
    let bumps = reference_bumps();
    let shift = 1.0;

    let base = finite_difference_greeks(&engine, &option, &market, &bumps).expect("base greeks");

    let up = finite_difference_greeks(
        &engine,
        &option,
        &Market {
            spot: market.spot + shift,
            ..market.clone()
        },
        &bumps,
    )
    .expect("shifted greeks");
    let down = finite_difference_greeks(
        &engine,
        &option,
        &Market {
            spot: market.spot - shift,
            ..market.clone()
        },
        &bumps,
    )
    .expect("shifted greeks");

    let delta_slope = (up.delta - down.delta) / (2.0 * shift);
    assert!(
        (delta_slope - base.gamma).abs() <= 5.0e-3,
        "gamma {} should match d(delta)/dS {}",
        base.gamma,
        delta_slope
    );
}

#[test]
fn bumps_must_leave_the_domain_valid() {
    let option = VanillaOption::european_call(100.0, 0.002);
    let market = reference_market();
    let engine = CrankNicolsonEngine::new(50, 40);

    // The default 1-day maturity bump exceeds this option's lifetime.
    let err = finite_difference_greeks(&engine, &option, &market, &BumpSpec::default())
        .expect_err("expected bump rejection");
    assert!(matches!(err, PricingError::InvalidBump(_)));
}

#[test]
fn attached_greeks_match_standalone_computation() {
    let option = VanillaOption::european_call(105.0, 0.75);
    let market = reference_market();
    let engine = CrankNicolsonEngine::new(500, 150);
    let bumps = reference_bumps();

    let standalone = finite_difference_greeks(&engine, &option, &market, &bumps).expect("greeks");
    let attached = price_with_greeks(&engine, &option, &market, &bumps)
        .expect("priced with greeks")
        .greeks
        .expect("greeks present");

    assert_eq!(standalone, attached);
}
