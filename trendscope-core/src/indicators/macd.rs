//! Moving Average Convergence/Divergence (MACD).
//!
//! line      = EMA(fast) - EMA(slow)
//! signal    = EMA(line, signal span), seeded once `signal` line values exist
//! histogram = line - signal (derived on demand)
//! Lookback: max(fast, slow) - 1 for the line, + signal - 1 for the signal.

use serde::{Deserialize, Serialize};

use super::ema::ema_of_series;
use crate::domain::{BarSeries, PriceField};
use crate::indicator::{require_window, require_window_fits, IndicatorError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Macd {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
    pub source: PriceField,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            fast,
            slow,
            signal,
            source: PriceField::Close,
        }
    }

    pub fn name(&self) -> String {
        format!("macd_{}_{}_{}", self.fast, self.slow, self.signal)
    }

    pub fn validate(&self) -> Result<(), IndicatorError> {
        require_window("macd", "fast", self.fast)?;
        require_window("macd", "slow", self.slow)?;
        require_window("macd", "signal", self.signal)
    }

    pub fn compute(&self, bars: &BarSeries) -> Result<MacdOutput, IndicatorError> {
        self.validate()?;
        require_window_fits("macd", "fast", self.fast, bars.len())?;
        require_window_fits("macd", "slow", self.slow, bars.len())?;
        Ok(macd_of_series(
            &bars.column(self.source),
            self.fast,
            self.slow,
            self.signal,
        ))
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    #[serde(with = "crate::domain::undefined::nan_as_null")]
    pub line: Vec<f64>,
    #[serde(with = "crate::domain::undefined::nan_as_null")]
    pub signal: Vec<f64>,
}

impl MacdOutput {
    /// `line - signal`, NaN where either is undefined.
    pub fn histogram(&self) -> Vec<f64> {
        self.line
            .iter()
            .zip(&self.signal)
            .map(|(l, s)| l - s)
            .collect()
    }
}

/// MACD over a pre-extracted series.
pub fn macd_of_series(values: &[f64], fast: usize, slow: usize, signal: usize) -> MacdOutput {
    let fast_ema = ema_of_series(values, fast);
    let slow_ema = ema_of_series(values, slow);
    let line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal = ema_of_series(&line, signal);
    MacdOutput { line, signal }
}
