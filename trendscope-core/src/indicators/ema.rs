//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (span + 1)
//! Seed: EMA[span-1] = SMA of the first `span` values.
//! Lookback: span - 1.

use serde::{Deserialize, Serialize};

use crate::domain::{BarSeries, PriceField};
use crate::indicator::{require_window, require_window_fits, Indicator, IndicatorError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ema {
    pub period: usize,
    pub source: PriceField,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            source: PriceField::Close,
        }
    }

    pub fn with_source(mut self, source: PriceField) -> Self {
        self.source = source;
        self
    }
}

impl Default for Ema {
    fn default() -> Self {
        Self::new(26)
    }
}

impl Indicator for Ema {
    fn name(&self) -> String {
        format!("ema_{}", self.period)
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn validate(&self) -> Result<(), IndicatorError> {
        require_window("ema", "period", self.period)
    }

    fn compute(&self, bars: &BarSeries) -> Result<Vec<f64>, IndicatorError> {
        require_window_fits("ema", "period", self.period, bars.len())?;
        Ok(ema_of_series(&bars.column(self.source), self.period))
    }
}

/// Smoothing factor `2 / (span + 1)`.
pub fn smoothing_factor(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Validated EMA over an arbitrary series.
pub fn ema(values: &[f64], span: usize) -> Result<Vec<f64>, IndicatorError> {
    require_window_fits("ema", "span", span, values.len())?;
    Ok(ema_of_series(values, span))
}

/// Compute raw EMA values from a pre-extracted f64 slice.
///
/// Used by composed indicators (MACD, TSI, RSI) that smooth derived series with
/// a leading undefined region: the recursion starts at the first non-NaN value,
/// seeds `span - 1` positions later with the mean of those `span` values, and
/// any NaN after that start taints every later position.
pub fn ema_of_series(values: &[f64], span: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if span == 0 {
        return result;
    }

    let Some(start) = values.iter().position(|v| !v.is_nan()) else {
        return result;
    };
    let seed_at = start + span - 1;
    if seed_at >= n {
        return result;
    }

    // Seed: SMA of first `span` defined values
    let seed_window = &values[start..=seed_at];
    if seed_window.iter().any(|v| v.is_nan()) {
        return result; // NaN in seed window → all NaN after seed
    }
    let seed = seed_window.iter().sum::<f64>() / span as f64;
    result[seed_at] = seed;

    let alpha = smoothing_factor(span);
    let mut prev = seed;
    for i in (seed_at + 1)..n {
        if values[i].is_nan() {
            // NaN propagates: once we see NaN, subsequent values are tainted
            for val in result.iter_mut().skip(i) {
                *val = f64::NAN;
            }
            return result;
        }
        let ema = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = ema;
        prev = ema;
    }

    result
}
