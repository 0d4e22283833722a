use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ferrofd::core::PricingEngine;
use ferrofd::engines::pde::{CrankNicolsonEngine, ExplicitFdEngine, ImplicitFdEngine};
use ferrofd::greeks::{finite_difference_greeks, BumpSpec};
use ferrofd::instruments::VanillaOption;
use ferrofd::market::Market;
use std::hint::black_box;

fn benchmark_market() -> Market {
    Market::builder()
        .spot(100.0)
        .rate(0.05)
        .dividend_yield(0.02)
        .flat_vol(0.25)
        .build()
        .expect("benchmark market should be valid")
}

fn bench_explicit_fd(c: &mut Criterion) {
    let market = benchmark_market();
    let option = VanillaOption::european_call(100.0, 1.0);
    let engine = ExplicitFdEngine::new(1_000, 100);

    c.bench_function("explicit_fd_european_call", |b| {
        b.iter(|| {
            let px = engine
                .price(black_box(&option), black_box(&market))
                .expect("pricing should succeed")
                .price;
            black_box(px)
        })
    });
}

fn bench_implicit_fd(c: &mut Criterion) {
    let market = benchmark_market();
    let option = VanillaOption::european_call(100.0, 1.0);
    let engine = ImplicitFdEngine::new(1_000, 100);

    c.bench_function("implicit_fd_european_call", |b| {
        b.iter(|| {
            let px = engine
                .price(black_box(&option), black_box(&market))
                .expect("pricing should succeed")
                .price;
            black_box(px)
        })
    });
}

fn bench_crank_nicolson_steps(c: &mut Criterion) {
    let market = benchmark_market();
    let option = VanillaOption::european_call(100.0, 1.0);

    let mut group = c.benchmark_group("crank_nicolson_european_call");
    for steps in [200_usize, 500, 1_000] {
        let engine = CrankNicolsonEngine::new(steps, 150);
        group.bench_with_input(BenchmarkId::from_parameter(steps), &engine, |b, engine| {
            b.iter(|| {
                let px = engine
                    .price(black_box(&option), black_box(&market))
                    .expect("pricing should succeed")
                    .price;
                black_box(px)
            })
        });
    }
    group.finish();
}

fn bench_bump_and_reprice_greeks(c: &mut Criterion) {
    let market = benchmark_market();
    let option = VanillaOption::european_call(100.0, 1.0);
    let engine = CrankNicolsonEngine::new(500, 150);
    let bumps = BumpSpec::default();

    c.bench_function("crank_nicolson_greeks", |b| {
        b.iter(|| {
            let greeks = finite_difference_greeks(
                black_box(&engine),
                black_box(&option),
                black_box(&market),
                black_box(&bumps),
            )
            .expect("greeks should succeed");
            black_box(greeks)
        })
    });
}

criterion_group!(
    benches,
    bench_explicit_fd,
    bench_implicit_fd,
    bench_crank_nicolson_steps,
    bench_bump_and_reprice_greeks
);
criterion_main!(benches);
