//! Benchmarks for the fairval valuation engines.
//!
//! Run with: cargo bench -p fairval-analytics
//! Parallel batches: cargo bench -p fairval-analytics --features parallel

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use fairval_analytics::batch::{fair_values, greeks_for, DcfRequest};
use fairval_analytics::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn create_request(id: usize) -> DcfRequest {
    let growth = [0.02, 0.05, 0.08, 0.1246, 0.15];
    let rates = [0.05, 0.06, 0.065, 0.07, 0.075, 0.08, 0.085];
    let inputs = ValuationInputs::new(
        1e9 + (id as f64) * 1e7,
        5e8,
        8e8,
        1e8,
        rates[id % rates.len()],
    );
    let schedule = GrowthSchedule::from_short_term(growth[id % growth.len()], 0.04).unwrap();
    DcfRequest::new(inputs, schedule)
}

fn create_underlyings(n: usize) -> Vec<Underlying> {
    (0..n)
        .map(|i| Underlying::new(50.0 + (i % 100) as f64, 0.15 + (i % 10) as f64 * 0.03))
        .collect()
}

fn create_options(underlyings: &[Underlying]) -> Vec<FinancialOption<'_>> {
    underlyings
        .iter()
        .enumerate()
        .map(|(i, u)| {
            let option_type = if i % 2 == 0 { OptionType::Call } else { OptionType::Put };
            FinancialOption::european(u, 75.0, 0.25 + (i % 8) as f64 * 0.25, option_type)
        })
        .collect()
}

fn engine() -> BlackScholesEngine {
    BlackScholesEngine::new(PricingContext::new(
        Date::from_ymd(2025, 6, 15).unwrap(),
        0.045,
    ))
}

// =============================================================================
// SINGLE VALUATION BENCHMARKS
// =============================================================================

fn bench_single_dcf(c: &mut Criterion) {
    let request = create_request(3);
    let engine = DcfEngine::new(request.schedule);

    c.bench_function("dcf_fair_value", |b| {
        b.iter(|| engine.fair_value(black_box(&request.inputs)))
    });
    c.bench_function("dcf_valuation_breakdown", |b| {
        b.iter(|| engine.valuation(black_box(&request.inputs)))
    });
}

fn bench_single_option(c: &mut Criterion) {
    let bs = engine();
    let stock = Underlying::new(42.0, 0.2).with_dividend_yield(0.01);
    let call = FinancialOption::european_call(&stock, 40.0, 0.5);

    c.bench_function("black_scholes_price", |b| {
        b.iter(|| bs.price(black_box(&call)))
    });
    c.bench_function("black_scholes_greeks", |b| {
        b.iter(|| bs.greeks(black_box(&call)))
    });
    c.bench_function("black_scholes_parity", |b| {
        b.iter(|| bs.parity_price(black_box(&call), black_box(4.76)))
    });
}

// =============================================================================
// BATCH BENCHMARKS
// =============================================================================

fn bench_dcf_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dcf_batch");
    group.sample_size(50);

    for size in [10, 100, 1000] {
        let requests: Vec<_> = (0..size).map(create_request).collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &requests, |b, requests| {
            b.iter(|| fair_values(black_box(requests)))
        });
    }
    group.finish();
}

fn bench_greeks_batch(c: &mut Criterion) {
    let bs = engine();
    let mut group = c.benchmark_group("greeks_batch");
    group.sample_size(50);

    for size in [10, 100, 1000, 10_000] {
        let underlyings = create_underlyings(size);
        let options = create_options(&underlyings);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &options, |b, options| {
            b.iter(|| greeks_for(&bs, black_box(options)))
        });
    }
    group.finish();
}

// =============================================================================
// CRITERION GROUPS
// =============================================================================

criterion_group!(single, bench_single_dcf, bench_single_option);

criterion_group!(batch, bench_dcf_batch, bench_greeks_batch);

criterion_main!(single, batch);
