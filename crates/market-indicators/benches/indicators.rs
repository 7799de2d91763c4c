//! Benchmarks for indicator implementations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use market_indicators::{calculate_ema, calculate_rsi, DEFAULT_RSI_PERIOD};

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn benchmark_ema(c: &mut Criterion) {
    let mut group = c.benchmark_group("EMA");

    for size in [20, 50, 1000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("ema20", size), &data, |b, data| {
            b.iter(|| calculate_ema(black_box(data), black_box(20)))
        });
    }

    group.finish();
}

fn benchmark_rsi(c: &mut Criterion) {
    let mut group = c.benchmark_group("RSI");

    for size in [15, 100, 1000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("rsi14", size), &data, |b, data| {
            b.iter(|| calculate_rsi(black_box(data), black_box(DEFAULT_RSI_PERIOD)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_ema, benchmark_rsi);
criterion_main!(benches);
