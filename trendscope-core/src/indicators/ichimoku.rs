//! Ichimoku Kinko Hyo (cloud).
//!
//! tenkan = midpoint of the rolling high/low over `tenkan` bars
//! kijun  = midpoint of the rolling high/low over `kijun` bars
//! span_a = (tenkan + kijun) / 2
//! span_b = midpoint of the rolling high/low over `2 * kijun` bars
//! chikou = close shifted back by `kijun` bars
//!
//! With `shift_cloud` the two spans are moved forward by `kijun` bars, so the
//! cloud at bar t is the one computed at bar t - kijun. Positions that fall
//! off either end of the series are dropped (NaN).
//!
//! Chikou reads `kijun` bars into the future by construction; it is the only
//! output in this crate that does.

use serde::{Deserialize, Serialize};

use super::rolling::rolling_midpoint;
use crate::domain::BarSeries;
use crate::indicator::{require_window, require_window_fits, IndicatorError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ichimoku {
    pub tenkan: usize,
    pub kijun: usize,
    pub shift_cloud: bool,
}

impl Ichimoku {
    pub fn new(tenkan: usize, kijun: usize, shift_cloud: bool) -> Self {
        Self {
            tenkan,
            kijun,
            shift_cloud,
        }
    }

    pub fn name(&self) -> String {
        format!("ichimoku_{}_{}", self.tenkan, self.kijun)
    }

    pub fn validate(&self) -> Result<(), IndicatorError> {
        require_window("ichimoku", "tenkan", self.tenkan)?;
        require_window("ichimoku", "kijun", self.kijun)
    }

    pub fn compute(&self, bars: &BarSeries) -> Result<IchimokuOutput, IndicatorError> {
        require_window_fits("ichimoku", "tenkan", self.tenkan, bars.len())?;
        require_window_fits("ichimoku", "kijun", self.kijun, bars.len())?;

        let highs = bars.highs();
        let lows = bars.lows();

        let tenkan = rolling_midpoint(&highs, &lows, self.tenkan);
        let kijun = rolling_midpoint(&highs, &lows, self.kijun);
        let span_a: Vec<f64> = tenkan
            .iter()
            .zip(&kijun)
            .map(|(t, k)| (t + k) / 2.0)
            .collect();
        let span_b = rolling_midpoint(&highs, &lows, 2 * self.kijun);
        let chikou = shift_back(&bars.closes(), self.kijun);

        let (span_a, span_b) = if self.shift_cloud {
            (
                shift_forward(&span_a, self.kijun),
                shift_forward(&span_b, self.kijun),
            )
        } else {
            (span_a, span_b)
        };

        Ok(IchimokuOutput {
            tenkan,
            kijun,
            span_a,
            span_b,
            chikou,
        })
    }
}

impl Default for Ichimoku {
    fn default() -> Self {
        Self::new(9, 26, true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IchimokuOutput {
    #[serde(with = "crate::domain::undefined::nan_as_null")]
    pub tenkan: Vec<f64>,
    #[serde(with = "crate::domain::undefined::nan_as_null")]
    pub kijun: Vec<f64>,
    #[serde(with = "crate::domain::undefined::nan_as_null")]
    pub span_a: Vec<f64>,
    #[serde(with = "crate::domain::undefined::nan_as_null")]
    pub span_b: Vec<f64>,
    #[serde(with = "crate::domain::undefined::nan_as_null")]
    pub chikou: Vec<f64>,
}

impl IchimokuOutput {
    /// Span A above Span B (bullish cloud); `None` where either is undefined.
    pub fn cloud_bullish(&self) -> Vec<Option<bool>> {
        self.span_a
            .iter()
            .zip(&self.span_b)
            .map(|(a, b)| {
                if a.is_nan() || b.is_nan() {
                    None
                } else {
                    Some(a > b)
                }
            })
            .collect()
    }
}

/// `out[i] = values[i - by]`.
fn shift_forward(values: &[f64], by: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    for i in by..n {
        result[i] = values[i - by];
    }
    result
}

/// `out[i] = values[i + by]`.
fn shift_back(values: &[f64], by: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    for i in 0..n.saturating_sub(by) {
        result[i] = values[i + by];
    }
    result
}
