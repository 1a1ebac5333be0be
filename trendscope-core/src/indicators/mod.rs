//! Concrete indicator implementations.
//!
//! Single-series indicators (SMA, EMA, WMA, CCI, RSI) implement the
//! [`Indicator`](crate::indicator::Indicator) trait. Multi-output indicators
//! (crossover, MACD, Ichimoku, Parabolic SAR, TSI) expose an inherent `compute`
//! returning a named output struct whose series all share the input's index.
//!
//! Everything is built from two primitive families: the rolling reductions in
//! [`rolling`] and the mean-seeded recursive smoothing in [`ema`].

pub mod cci;
pub mod crossover;
pub mod ema;
pub mod ichimoku;
pub mod macd;
pub mod parabolic_sar;
pub mod rolling;
pub mod rsi;
pub mod sma;
pub mod tsi;
pub mod wma;

pub use cci::{Cci, DEFAULT_CCI_CONSTANT};
pub use crossover::{crossover_signals, CrossSignal, MaCrossover, MaCrossoverOutput};
pub use ema::{ema, ema_of_series, smoothing_factor, Ema};
pub use ichimoku::{Ichimoku, IchimokuOutput};
pub use macd::{macd_of_series, Macd, MacdOutput};
pub use parabolic_sar::{ParabolicSar, ParabolicSarOutput, SarState, Trend};
pub use rolling::{
    linear_weights, rolling, rolling_max, rolling_mean, rolling_mean_abs_dev, rolling_min,
    rolling_weighted_mean, Reduction,
};
pub use rsi::{rsi_of_series, Rsi, RsiZone};
pub use sma::Sma;
pub use tsi::{tsi_of_series, Tsi, TsiOutput};
pub use wma::Wma;

/// Create a synthetic bar series from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0 (at least half of
/// min(open,close), so lows stay positive), volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> crate::domain::BarSeries {
    use crate::domain::{Bar, BarSeries};
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = (open.min(close) - 1.0).max(open.min(close) * 0.5);
            Bar::new(
                base + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                1000.0,
            )
        })
        .collect();
    BarSeries::new("TEST", bars).unwrap()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
