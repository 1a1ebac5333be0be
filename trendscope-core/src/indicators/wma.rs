//! Weighted Moving Average (WMA).
//!
//! Linear weights 1..=period normalized to sum 1, heaviest on the latest bar.
//! Lookback: period - 1.

use serde::{Deserialize, Serialize};

use super::rolling::{rolling_of_series, Reduction};
use crate::domain::{BarSeries, PriceField};
use crate::indicator::{require_window, require_window_fits, Indicator, IndicatorError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wma {
    pub period: usize,
    pub source: PriceField,
}

impl Wma {
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

impl Default for Wma {
    fn default() -> Self {
        Self::new(9)
    }
}

impl Indicator for Wma {
    fn name(&self) -> String {
        format!("wma_{}", self.period)
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn validate(&self) -> Result<(), IndicatorError> {
        require_window("wma", "period", self.period)
    }

    fn compute(&self, bars: &BarSeries) -> Result<Vec<f64>, IndicatorError> {
        require_window_fits("wma", "period", self.period, bars.len())?;
        Ok(rolling_of_series(
            &bars.column(self.source),
            self.period,
            Reduction::WeightedMean,
        ))
    }
}
