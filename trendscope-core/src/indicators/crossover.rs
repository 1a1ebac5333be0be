//! Moving average crossover: golden cross and death cross detection.
//!
//! Fast and slow SMAs over the same price column. Per bar:
//! - `+1` when fast crosses from at-or-below slow to strictly above it
//! - `-1` for the mirror case
//! - `0` otherwise
//!
//! Equality is neither above nor below, so a bar where fast == slow never emits
//! a signal on its own. Any undefined operand makes the bar undefined.

use serde::{Deserialize, Serialize};

use super::rolling::{rolling_of_series, Reduction};
use crate::domain::{BarSeries, PriceField};
use crate::indicator::{require_window, require_window_fits, IndicatorError};

/// Crossover signal at one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossSignal {
    /// Fast crossed above slow (+1).
    Bullish,
    /// No crossing (0).
    Neutral,
    /// Fast crossed below slow (-1).
    Bearish,
}

impl CrossSignal {
    pub fn as_i8(self) -> i8 {
        match self {
            CrossSignal::Bullish => 1,
            CrossSignal::Neutral => 0,
            CrossSignal::Bearish => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaCrossover {
    pub fast: usize,
    pub slow: usize,
    pub source: PriceField,
}

impl MaCrossover {
    pub fn new(fast: usize, slow: usize) -> Self {
        Self {
            fast,
            slow,
            source: PriceField::Close,
        }
    }

    pub fn name(&self) -> String {
        format!("ma_crossover_{}_{}", self.fast, self.slow)
    }

    pub fn validate(&self) -> Result<(), IndicatorError> {
        require_window("ma_crossover", "fast", self.fast)?;
        require_window("ma_crossover", "slow", self.slow)
    }

    pub fn compute(&self, bars: &BarSeries) -> Result<MaCrossoverOutput, IndicatorError> {
        require_window_fits("ma_crossover", "fast", self.fast, bars.len())?;
        require_window_fits("ma_crossover", "slow", self.slow, bars.len())?;

        let prices = bars.column(self.source);
        let fast = rolling_of_series(&prices, self.fast, Reduction::Mean);
        let slow = rolling_of_series(&prices, self.slow, Reduction::Mean);
        let signal = crossover_signals(&fast, &slow);

        Ok(MaCrossoverOutput { fast, slow, signal })
    }
}

impl Default for MaCrossover {
    fn default() -> Self {
        Self::new(9, 26)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaCrossoverOutput {
    #[serde(with = "crate::domain::undefined::nan_as_null")]
    pub fast: Vec<f64>,
    #[serde(with = "crate::domain::undefined::nan_as_null")]
    pub slow: Vec<f64>,
    pub signal: Vec<Option<CrossSignal>>,
}

impl MaCrossoverOutput {
    /// Signal as `+1 / 0 / -1`, NaN where undefined.
    pub fn signal_values(&self) -> Vec<f64> {
        self.signal
            .iter()
            .map(|s| s.map_or(f64::NAN, |s| f64::from(s.as_i8())))
            .collect()
    }

    /// Direction of the most recent crossing, carried forward bar by bar.
    ///
    /// `None` until the first non-neutral signal.
    pub fn regime(&self) -> Vec<Option<CrossSignal>> {
        let mut current = None;
        self.signal
            .iter()
            .map(|s| {
                if let Some(s @ (CrossSignal::Bullish | CrossSignal::Bearish)) = s {
                    current = Some(*s);
                }
                current
            })
            .collect()
    }

    /// Fast strictly above slow; `None` where either is undefined.
    pub fn fast_above_slow(&self) -> Vec<Option<bool>> {
        self.fast
            .iter()
            .zip(&self.slow)
            .map(|(f, s)| {
                if f.is_nan() || s.is_nan() {
                    None
                } else {
                    Some(f > s)
                }
            })
            .collect()
    }
}

/// Crossing signal for two aligned series.
pub fn crossover_signals(fast: &[f64], slow: &[f64]) -> Vec<Option<CrossSignal>> {
    let n = fast.len().min(slow.len());
    let mut result = vec![None; n];

    for i in 1..n {
        let (fast_cur, slow_cur) = (fast[i], slow[i]);
        let (fast_prev, slow_prev) = (fast[i - 1], slow[i - 1]);

        if fast_cur.is_nan() || slow_cur.is_nan() || fast_prev.is_nan() || slow_prev.is_nan() {
            continue;
        }

        result[i] = Some(if fast_cur > slow_cur && fast_prev <= slow_prev {
            CrossSignal::Bullish
        } else if fast_cur < slow_cur && fast_prev >= slow_prev {
            CrossSignal::Bearish
        } else {
            CrossSignal::Neutral
        });
    }

    result
}
