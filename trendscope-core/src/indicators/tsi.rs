//! True Strength Index (TSI).
//!
//! momentum = x[t] - x[t-1]
//! TSI      = 100 * EMA_short(EMA_long(momentum)) / EMA_short(EMA_long(|momentum|))
//! signal   = EMA(TSI, signal span)
//! trend    = TSI > signal
//!
//! A zero denominator (no movement over the whole smoothing memory) is NaN.

use serde::{Deserialize, Serialize};

use super::ema::ema_of_series;
use crate::domain::{BarSeries, PriceField};
use crate::indicator::{require_window, require_window_fits, IndicatorError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tsi {
    /// First (slow) smoothing span.
    pub long: usize,
    /// Second (fast) smoothing span.
    pub short: usize,
    pub signal: usize,
    pub source: PriceField,
}

impl Tsi {
    pub fn new(long: usize, short: usize, signal: usize) -> Self {
        Self {
            long,
            short,
            signal,
            source: PriceField::Close,
        }
    }

    pub fn name(&self) -> String {
        format!("tsi_{}_{}_{}", self.long, self.short, self.signal)
    }

    /// Index of the first defined TSI value.
    pub fn lookback(&self) -> usize {
        self.long + self.short - 1
    }

    pub fn validate(&self) -> Result<(), IndicatorError> {
        require_window("tsi", "long", self.long)?;
        require_window("tsi", "short", self.short)?;
        require_window("tsi", "signal", self.signal)
    }

    pub fn compute(&self, bars: &BarSeries) -> Result<TsiOutput, IndicatorError> {
        self.validate()?;
        require_window_fits("tsi", "long", self.long, bars.len())?;
        Ok(tsi_of_series(
            &bars.column(self.source),
            self.long,
            self.short,
            self.signal,
        ))
    }
}

impl Default for Tsi {
    fn default() -> Self {
        Self::new(25, 13, 13)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TsiOutput {
    #[serde(with = "crate::domain::undefined::nan_as_null")]
    pub tsi: Vec<f64>,
    #[serde(with = "crate::domain::undefined::nan_as_null")]
    pub signal: Vec<f64>,
    /// TSI above its signal line; false where either is undefined.
    pub trend: Vec<bool>,
}

fn double_smooth(values: &[f64], long: usize, short: usize) -> Vec<f64> {
    ema_of_series(&ema_of_series(values, long), short)
}

/// TSI over a pre-extracted series.
pub fn tsi_of_series(values: &[f64], long: usize, short: usize, signal: usize) -> TsiOutput {
    let n = values.len();
    let mut momentum = vec![f64::NAN; n];
    for i in 1..n {
        momentum[i] = values[i] - values[i - 1];
    }
    let magnitude: Vec<f64> = momentum.iter().map(|m| m.abs()).collect();

    let numerator = double_smooth(&momentum, long, short);
    let denominator = double_smooth(&magnitude, long, short);

    let tsi: Vec<f64> = numerator
        .iter()
        .zip(&denominator)
        .map(|(num, den)| {
            if *den == 0.0 {
                f64::NAN
            } else {
                100.0 * num / den
            }
        })
        .collect();
    let signal = ema_of_series(&tsi, signal);
    let trend = tsi.iter().zip(&signal).map(|(t, s)| t > s).collect();

    TsiOutput { tsi, signal, trend }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn tsi_warmup_regions() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.4).sin() * 3.0).collect();
        let tsi = Tsi::new(5, 3, 4);
        let out = tsi.compute(&make_bars(&closes)).unwrap();

        // momentum from 1, long seed at 5, short seed at 7
        assert_eq!(tsi.lookback(), 7);
        assert!(out.tsi[..7].iter().all(|v| v.is_nan()));
        assert!(!out.tsi[7].is_nan());
        assert!(out.signal[..10].iter().all(|v| v.is_nan()));
        assert!(!out.signal[10].is_nan());
        assert!(!out.trend[..10].iter().any(|t| *t));
    }

    #[test]
    fn tsi_steady_rise_is_100() {
        let closes: Vec<f64> = (0..30).map(|i| 50.0 + 0.5 * i as f64).collect();
        let out = tsi_of_series(&closes, 5, 3, 3);
        for v in &out.tsi[7..] {
            assert_approx(*v, 100.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn tsi_steady_fall_is_minus_100() {
        let closes: Vec<f64> = (0..30).map(|i| 80.0 - 0.5 * i as f64).collect();
        let out = tsi_of_series(&closes, 5, 3, 3);
        for v in &out.tsi[7..] {
            assert_approx(*v, -100.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn tsi_is_bounded() {
        let closes: Vec<f64> = (0..80)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 8.0 + (i as f64 * 1.7).cos())
            .collect();
        let out = tsi_of_series(&closes, 10, 5, 5);
        for v in out.tsi.iter().filter(|v| !v.is_nan()) {
            assert!((-100.0 - 1e-9..=100.0 + 1e-9).contains(v));
        }
    }

    #[test]
    fn tsi_trend_flag_follows_signal() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.25).sin() * 5.0).collect();
        let out = tsi_of_series(&closes, 8, 4, 4);
        for i in 0..60 {
            let expected = !out.tsi[i].is_nan() && !out.signal[i].is_nan() && out.tsi[i] > out.signal[i];
            assert_eq!(out.trend[i], expected);
        }
    }

    #[test]
    fn tsi_flat_prices_are_undefined() {
        let out = tsi_of_series(&[10.0; 20], 4, 2, 2);
        assert!(out.tsi.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn tsi_long_span_longer_than_series_is_error() {
        assert!(Tsi::default().compute(&make_bars(&[1.0, 2.0, 3.0])).is_err());
    }
}
