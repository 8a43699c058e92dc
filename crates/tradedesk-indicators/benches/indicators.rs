//! Benchmarks for indicator implementations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tradedesk_core::traits::Indicator;
use tradedesk_core::types::{Bar, BarSeries, BarSize};
use tradedesk_indicators::{Ema, IndicatorEngine, Rsi, Sma};

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn generate_series(size: usize) -> BarSeries {
    let bars = generate_test_data(size)
        .into_iter()
        .enumerate()
        .map(|(i, c)| Bar::new(i as i64 * 60_000, c, c + 0.5, c - 0.5, c, 100 + (i % 50) as u64))
        .collect();
    BarSeries::new("BENCH", BarSize::Minute1, bars).unwrap()
}

fn benchmark_moving_averages(c: &mut Criterion) {
    let mut group = c.benchmark_group("MovingAverage");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("sma", size), &data, |b, data| {
            let sma = Sma::new(14);
            b.iter(|| sma.calculate(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("ema", size), &data, |b, data| {
            let ema = Ema::new(14);
            b.iter(|| ema.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_rsi(c: &mut Criterion) {
    let mut group = c.benchmark_group("RSI");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("warm_up_window", size), &data, |b, data| {
            let rsi = Rsi::new(14);
            b.iter(|| rsi.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("Engine");

    for size in [390, 1950, 23400].iter() {
        let series = generate_series(*size);

        group.bench_with_input(BenchmarkId::new("snapshot", size), &series, |b, series| {
            let engine = IndicatorEngine::default();
            b.iter(|| engine.compute(black_box(series)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_moving_averages, benchmark_rsi, benchmark_engine);
criterion_main!(benches);
