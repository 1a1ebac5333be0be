//! Fixed-window rolling reductions.
//!
//! Position `i` is defined once `window` consecutive positions ending at `i`
//! exist (i.e. `i >= window - 1`) and none of them is NaN.
//! Lookback: window - 1.

use serde::{Deserialize, Serialize};

use crate::indicator::{require_window_fits, IndicatorError};

/// Reduction applied to each window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reduction {
    Mean,
    /// Linear weights `1..=w` normalized to sum 1; the latest sample weighs `w`.
    WeightedMean,
    Min,
    Max,
    /// Mean absolute deviation from the window's own mean.
    MeanAbsDev,
}

impl Reduction {
    fn name(self) -> &'static str {
        match self {
            Reduction::Mean => "rolling_mean",
            Reduction::WeightedMean => "rolling_weighted_mean",
            Reduction::Min => "rolling_min",
            Reduction::Max => "rolling_max",
            Reduction::MeanAbsDev => "rolling_mean_abs_dev",
        }
    }

    /// Reduce one NaN-free window.
    pub fn apply(self, window: &[f64]) -> f64 {
        let n = window.len() as f64;
        match self {
            Reduction::Mean => window.iter().sum::<f64>() / n,
            Reduction::WeightedMean => linear_weights(window.len())
                .iter()
                .zip(window)
                .map(|(w, v)| w * v)
                .sum(),
            Reduction::Min => window.iter().copied().fold(f64::INFINITY, f64::min),
            Reduction::Max => window.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Reduction::MeanAbsDev => {
                let mean = window.iter().sum::<f64>() / n;
                window.iter().map(|v| (v - mean).abs()).sum::<f64>() / n
            }
        }
    }
}

/// Normalized linear weights for a window of `window` samples, oldest first.
pub fn linear_weights(window: usize) -> Vec<f64> {
    let denom = (window * (window + 1)) as f64 / 2.0;
    (1..=window).map(|k| k as f64 / denom).collect()
}

/// Validated rolling reduction.
///
/// `window == 0` or `window > values.len()` is a configuration error.
pub fn rolling(
    values: &[f64],
    window: usize,
    reduction: Reduction,
) -> Result<Vec<f64>, IndicatorError> {
    require_window_fits(reduction.name(), "window", window, values.len())?;
    Ok(rolling_of_series(values, window, reduction))
}

pub fn rolling_mean(values: &[f64], window: usize) -> Result<Vec<f64>, IndicatorError> {
    rolling(values, window, Reduction::Mean)
}

pub fn rolling_weighted_mean(values: &[f64], window: usize) -> Result<Vec<f64>, IndicatorError> {
    rolling(values, window, Reduction::WeightedMean)
}

pub fn rolling_min(values: &[f64], window: usize) -> Result<Vec<f64>, IndicatorError> {
    rolling(values, window, Reduction::Min)
}

pub fn rolling_max(values: &[f64], window: usize) -> Result<Vec<f64>, IndicatorError> {
    rolling(values, window, Reduction::Max)
}

pub fn rolling_mean_abs_dev(values: &[f64], window: usize) -> Result<Vec<f64>, IndicatorError> {
    rolling(values, window, Reduction::MeanAbsDev)
}

/// Unvalidated rolling reduction used by composed indicators.
///
/// Too-short input (or a zero window) yields an all-NaN series instead of an error.
pub fn rolling_of_series(values: &[f64], window: usize, reduction: Reduction) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if window == 0 || n < window {
        return result;
    }

    for i in (window - 1)..n {
        let slice = &values[(i + 1 - window)..=i];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = reduction.apply(slice);
    }

    result
}

/// Midpoint of the rolling high/low channel: `(max(high) + min(low)) / 2`.
pub fn rolling_midpoint(highs: &[f64], lows: &[f64], window: usize) -> Vec<f64> {
    let upper = rolling_of_series(highs, window, Reduction::Max);
    let lower = rolling_of_series(lows, window, Reduction::Min);
    upper
        .iter()
        .zip(&lower)
        .map(|(h, l)| (h + l) / 2.0)
        .collect()
}
