//! Look-ahead contamination tests for every indicator.
//!
//! Invariant: no indicator value at bar t may depend on price data from bar
//! t+1 or later. The one deliberate exception is Ichimoku's Chikou span, which
//! is the close plotted `kijun` bars in the past.
//!
//! Method: compute on a truncated series (bars 0..100) and the full series
//! (bars 0..200). Assert bars 0..100 are identical between both runs. Any
//! difference means the indicator is leaking future data into past values.

use chrono::NaiveDate;
use trendscope_core::domain::{Bar, BarSeries};
use trendscope_core::indicator::Indicator;
use trendscope_core::indicators::*;

const FULL: usize = 200;
const TRUNCATED: usize = 100;

/// Generate N bars of synthetic OHLCV data with realistic variation.
fn make_test_bars(n: usize) -> BarSeries {
    let base = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let mut bars = Vec::with_capacity(n);
    let mut price = 100.0;

    for i in 0..n {
        // Deterministic pseudo-random walk using a simple LCG
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed % 200) as f64 - 100.0) * 0.05; // -5.0 to +5.0
        price += change;
        price = f64::max(price, 10.0); // floor at 10

        let open = price - 0.5;
        let close = price + 0.3;
        let high = open.max(close) + 2.0;
        let low = open.min(close) - 2.0;

        bars.push(Bar::new(
            base + chrono::Duration::days(i as i64),
            open,
            high,
            low,
            close,
            1000.0 + i as f64 * 100.0,
        ));
    }

    BarSeries::new("TEST", bars).unwrap()
}

fn truncate(series: &BarSeries, len: usize) -> BarSeries {
    BarSeries::new(series.symbol(), series.bars()[..len].to_vec()).unwrap()
}

/// Assert the first `truncated.len()` values agree, NaN for NaN.
fn assert_prefix_eq(name: &str, truncated: &[f64], full: &[f64]) {
    assert_eq!(truncated.len(), TRUNCATED, "{name}: truncated result length mismatch");
    assert_eq!(full.len(), FULL, "{name}: full result length mismatch");

    for i in 0..truncated.len() {
        let t = truncated[i];
        let f = full[i];

        if t.is_nan() && f.is_nan() {
            continue;
        }

        assert!(
            !t.is_nan() && !f.is_nan(),
            "{name}: NaN mismatch at bar {i} (truncated={t}, full={f})"
        );

        assert!(
            (t - f).abs() < 1e-10,
            "{name}: look-ahead contamination at bar {i}: truncated={t}, full={f}, diff={}",
            (t - f).abs()
        );
    }
}

fn assert_no_lookahead(indicator: &dyn Indicator, full_bars: &BarSeries) {
    let truncated = truncate(full_bars, TRUNCATED);
    let full_result = indicator.compute(full_bars).unwrap();
    let truncated_result = indicator.compute(&truncated).unwrap();
    assert_prefix_eq(&indicator.name(), &truncated_result, &full_result);
}

#[test]
fn lookahead_sma() {
    let bars = make_test_bars(FULL);
    assert_no_lookahead(&Sma::new(10), &bars);
    assert_no_lookahead(&Sma::new(20), &bars);
}

#[test]
fn lookahead_ema() {
    let bars = make_test_bars(FULL);
    assert_no_lookahead(&Ema::new(10), &bars);
    assert_no_lookahead(&Ema::new(26), &bars);
}

#[test]
fn lookahead_wma() {
    let bars = make_test_bars(FULL);
    assert_no_lookahead(&Wma::new(9), &bars);
    assert_no_lookahead(&Wma::new(30), &bars);
}

#[test]
fn lookahead_cci() {
    let bars = make_test_bars(FULL);
    assert_no_lookahead(&Cci::default(), &bars);
    assert_no_lookahead(&Cci::new(7, DEFAULT_CCI_CONSTANT), &bars);
}

#[test]
fn lookahead_rsi() {
    let bars = make_test_bars(FULL);
    assert_no_lookahead(&Rsi::new(14), &bars);
    assert_no_lookahead(&Rsi::new(7), &bars);
}

#[test]
fn lookahead_crossover() {
    let bars = make_test_bars(FULL);
    let xo = MaCrossover::new(5, 20);
    let full = xo.compute(&bars).unwrap();
    let truncated = xo.compute(&truncate(&bars, TRUNCATED)).unwrap();

    assert_prefix_eq("crossover.fast", &truncated.fast, &full.fast);
    assert_prefix_eq("crossover.slow", &truncated.slow, &full.slow);
    assert_eq!(truncated.signal[..], full.signal[..TRUNCATED]);
}

#[test]
fn lookahead_macd() {
    let bars = make_test_bars(FULL);
    let macd = Macd::default();
    let full = macd.compute(&bars).unwrap();
    let truncated = macd.compute(&truncate(&bars, TRUNCATED)).unwrap();

    assert_prefix_eq("macd.line", &truncated.line, &full.line);
    assert_prefix_eq("macd.signal", &truncated.signal, &full.signal);
}

#[test]
fn lookahead_ichimoku_excluding_chikou() {
    let bars = make_test_bars(FULL);
    for shift_cloud in [false, true] {
        let ichimoku = Ichimoku::new(9, 26, shift_cloud);
        let full = ichimoku.compute(&bars).unwrap();
        let truncated = ichimoku.compute(&truncate(&bars, TRUNCATED)).unwrap();

        assert_prefix_eq("ichimoku.tenkan", &truncated.tenkan, &full.tenkan);
        assert_prefix_eq("ichimoku.kijun", &truncated.kijun, &full.kijun);
        assert_prefix_eq("ichimoku.span_a", &truncated.span_a, &full.span_a);
        assert_prefix_eq("ichimoku.span_b", &truncated.span_b, &full.span_b);
    }
}

#[test]
fn chikou_reads_the_future() {
    let bars = make_test_bars(FULL);
    let ichimoku = Ichimoku::default();
    let full = ichimoku.compute(&bars).unwrap();
    let truncated = ichimoku.compute(&truncate(&bars, TRUNCATED)).unwrap();

    // The last `kijun` bars of the truncated run have no future close yet.
    assert!(truncated.chikou[TRUNCATED - 26..].iter().all(|v| v.is_nan()));
    assert!(full.chikou[TRUNCATED - 26..TRUNCATED].iter().all(|v| !v.is_nan()));
}

#[test]
fn lookahead_parabolic_sar() {
    let bars = make_test_bars(FULL);
    let psar = ParabolicSar::default();
    let full = psar.compute(&bars).unwrap();
    let truncated = psar.compute(&truncate(&bars, TRUNCATED)).unwrap();

    assert_prefix_eq("psar.sar", &truncated.sar, &full.sar);
    assert_prefix_eq("psar.up", &truncated.up, &full.up);
    assert_prefix_eq("psar.down", &truncated.down, &full.down);
    assert_eq!(truncated.trend[..], full.trend[..TRUNCATED]);
    let early: Vec<usize> = full
        .reversals
        .iter()
        .copied()
        .filter(|&i| i < TRUNCATED)
        .collect();
    assert_eq!(truncated.reversals, early);
}

#[test]
fn lookahead_tsi() {
    let bars = make_test_bars(FULL);
    let tsi = Tsi::new(25, 13, 7);
    let full = tsi.compute(&bars).unwrap();
    let truncated = tsi.compute(&truncate(&bars, TRUNCATED)).unwrap();

    assert_prefix_eq("tsi", &truncated.tsi, &full.tsi);
    assert_prefix_eq("tsi.signal", &truncated.signal, &full.signal);
}
