//! Simple Moving Average (SMA).
//!
//! Rolling mean of a price column over a lookback window.
//! Lookback: period - 1 (first valid value at index period-1).

use serde::{Deserialize, Serialize};

use super::rolling::{rolling_of_series, Reduction};
use crate::domain::{BarSeries, PriceField};
use crate::indicator::{require_window, require_window_fits, Indicator, IndicatorError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sma {
    pub period: usize,
    pub source: PriceField,
}

impl Sma {
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

impl Default for Sma {
    fn default() -> Self {
        Self::new(21)
    }
}

impl Indicator for Sma {
    fn name(&self) -> String {
        format!("sma_{}", self.period)
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn validate(&self) -> Result<(), IndicatorError> {
        require_window("sma", "period", self.period)
    }

    fn compute(&self, bars: &BarSeries) -> Result<Vec<f64>, IndicatorError> {
        require_window_fits("sma", "period", self.period, bars.len())?;
        Ok(rolling_of_series(
            &bars.column(self.source),
            self.period,
            Reduction::Mean,
        ))
    }
}
