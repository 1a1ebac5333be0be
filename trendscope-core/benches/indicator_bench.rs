//! Criterion benchmarks for indicator hot paths.
//!
//! Benchmarks:
//! 1. Rolling primitives (mean, weighted mean, mean absolute deviation)
//! 2. Recursive smoothing compositions (EMA, MACD, RSI, TSI)
//! 3. Sequential Parabolic SAR scan
//! 4. Ichimoku (three rolling channels plus shifts)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use trendscope_core::domain::{Bar, BarSeries};
use trendscope_core::indicator::Indicator;
use trendscope_core::indicators::{
    rolling_mean, rolling_mean_abs_dev, rolling_weighted_mean, Cci, Ema, Ichimoku, Macd,
    ParabolicSar, Rsi, Sma, Tsi, Wma,
};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_series(n: usize) -> BarSeries {
    let base = chrono::NaiveDate::from_ymd_opt(2020, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let bars = (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            let open = close - 0.3;
            Bar::new(
                base + chrono::Duration::days(i as i64),
                open,
                close + 1.5,
                close - 1.5,
                close,
                1_000_000.0 + (i % 500_000) as f64,
            )
        })
        .collect();
    BarSeries::new("BENCH", bars).unwrap()
}

const BAR_COUNTS: [usize; 3] = [252, 1260, 2520];

// ── 1. Rolling primitives ────────────────────────────────────────────

fn bench_rolling(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling");

    for &bar_count in &BAR_COUNTS {
        let closes = make_series(bar_count).closes();
        group.bench_with_input(BenchmarkId::new("mean_20", bar_count), &closes, |b, v| {
            b.iter(|| rolling_mean(black_box(v), 20));
        });
        group.bench_with_input(
            BenchmarkId::new("weighted_mean_20", bar_count),
            &closes,
            |b, v| {
                b.iter(|| rolling_weighted_mean(black_box(v), 20));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("mean_abs_dev_20", bar_count),
            &closes,
            |b, v| {
                b.iter(|| rolling_mean_abs_dev(black_box(v), 20));
            },
        );
    }

    group.finish();
}

// ── 2. Smoothing compositions ────────────────────────────────────────

fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("smoothing");

    for &bar_count in &BAR_COUNTS {
        let series = make_series(bar_count);
        group.bench_with_input(BenchmarkId::new("macd_12_26_9", bar_count), &series, |b, s| {
            b.iter(|| Macd::default().compute(black_box(s)));
        });
        group.bench_with_input(BenchmarkId::new("tsi_25_13_13", bar_count), &series, |b, s| {
            b.iter(|| Tsi::default().compute(black_box(s)));
        });

        // Single-series stack evaluated through the trait
        let stack: Vec<Box<dyn Indicator>> = vec![
            Box::new(Sma::default()),
            Box::new(Ema::default()),
            Box::new(Wma::default()),
            Box::new(Cci::default()),
            Box::new(Rsi::default()),
        ];
        group.bench_with_input(BenchmarkId::new("single_stack_5", bar_count), &series, |b, s| {
            b.iter(|| {
                for indicator in &stack {
                    let _ = indicator.compute(black_box(s));
                }
            });
        });
    }

    group.finish();
}

// ── 3. Parabolic SAR ─────────────────────────────────────────────────

fn bench_parabolic_sar(c: &mut Criterion) {
    let mut group = c.benchmark_group("parabolic_sar");

    for &bar_count in &BAR_COUNTS {
        let series = make_series(bar_count);
        group.bench_with_input(BenchmarkId::new("default", bar_count), &series, |b, s| {
            b.iter(|| ParabolicSar::default().compute(black_box(s)));
        });
    }

    group.finish();
}

// ── 4. Ichimoku ──────────────────────────────────────────────────────

fn bench_ichimoku(c: &mut Criterion) {
    let mut group = c.benchmark_group("ichimoku");

    for &bar_count in &BAR_COUNTS {
        let series = make_series(bar_count);
        group.bench_with_input(BenchmarkId::new("9_26", bar_count), &series, |b, s| {
            b.iter(|| Ichimoku::default().compute(black_box(s)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_rolling,
    bench_smoothing,
    bench_parabolic_sar,
    bench_ichimoku
);
criterion_main!(benches);
