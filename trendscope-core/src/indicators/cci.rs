//! Commodity Channel Index (CCI).
//!
//! typical = (H + L + C) / 3
//! CCI     = (typical - SMA(typical)) / (constant * MAD(typical))
//! A window with zero mean absolute deviation is undefined (NaN), not infinite.
//! Lookback: period - 1.

use serde::{Deserialize, Serialize};

use super::rolling::{rolling_of_series, Reduction};
use crate::domain::{BarSeries, PriceField};
use crate::indicator::{require_window, require_window_fits, Indicator, IndicatorError};

/// Lambert's scaling constant; roughly 70-80% of values then fall in ±100.
pub const DEFAULT_CCI_CONSTANT: f64 = 0.015;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cci {
    pub period: usize,
    pub constant: f64,
}

impl Cci {
    pub fn new(period: usize, constant: f64) -> Self {
        Self { period, constant }
    }
}

impl Default for Cci {
    fn default() -> Self {
        Self::new(20, DEFAULT_CCI_CONSTANT)
    }
}

impl Indicator for Cci {
    fn name(&self) -> String {
        format!("cci_{}", self.period)
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn validate(&self) -> Result<(), IndicatorError> {
        require_window("cci", "period", self.period)?;
        if !(self.constant.is_finite() && self.constant > 0.0) {
            return Err(IndicatorError::InvalidParameter {
                indicator: "cci",
                parameter: "constant",
                value: self.constant,
                reason: "must be finite and > 0",
            });
        }
        Ok(())
    }

    fn compute(&self, bars: &BarSeries) -> Result<Vec<f64>, IndicatorError> {
        self.validate()?;
        require_window_fits("cci", "period", self.period, bars.len())?;

        let typical = bars.column(PriceField::Typical);
        let mean = rolling_of_series(&typical, self.period, Reduction::Mean);
        let mad = rolling_of_series(&typical, self.period, Reduction::MeanAbsDev);

        Ok(typical
            .iter()
            .zip(mean.iter().zip(&mad))
            .map(|(tp, (m, d))| {
                if *d == 0.0 {
                    f64::NAN
                } else {
                    (tp - m) / (self.constant * d)
                }
            })
            .collect())
    }
}
