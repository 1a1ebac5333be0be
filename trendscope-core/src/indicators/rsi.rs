//! Relative Strength Index (RSI).
//!
//! Gains and losses of each bar-to-bar change are smoothed separately with the
//! mean-seeded EMA (span = period).
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period.
//! Edge cases: avg_loss == 0 → RSI = 100; avg_gain == 0 → RSI = 0.

use serde::{Deserialize, Serialize};

use super::ema::ema_of_series;
use crate::domain::{BarSeries, PriceField};
use crate::indicator::{require_window, require_window_fits, Indicator, IndicatorError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rsi {
    pub period: usize,
    pub source: PriceField,
    pub overbought: f64,
    pub oversold: f64,
}

/// Where an RSI reading sits relative to the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    Overbought,
    Neutral,
    Oversold,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }

    pub fn with_thresholds(mut self, overbought: f64, oversold: f64) -> Self {
        self.overbought = overbought;
        self.oversold = oversold;
        self
    }

    /// Classify one reading; `None` when undefined.
    pub fn zone(&self, value: f64) -> Option<RsiZone> {
        if value.is_nan() {
            None
        } else if value >= self.overbought {
            Some(RsiZone::Overbought)
        } else if value <= self.oversold {
            Some(RsiZone::Oversold)
        } else {
            Some(RsiZone::Neutral)
        }
    }

    pub fn zones(&self, values: &[f64]) -> Vec<Option<RsiZone>> {
        values.iter().map(|v| self.zone(*v)).collect()
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self {
            period: 14,
            source: PriceField::Close,
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> String {
        format!("rsi_{}", self.period)
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn validate(&self) -> Result<(), IndicatorError> {
        require_window("rsi", "period", self.period)?;
        if !(0.0..=100.0).contains(&self.overbought) {
            return Err(IndicatorError::InvalidParameter {
                indicator: "rsi",
                parameter: "overbought",
                value: self.overbought,
                reason: "must lie in [0, 100]",
            });
        }
        if !(0.0..=100.0).contains(&self.oversold) || self.oversold >= self.overbought {
            return Err(IndicatorError::InvalidParameter {
                indicator: "rsi",
                parameter: "oversold",
                value: self.oversold,
                reason: "must lie in [0, 100] and below overbought",
            });
        }
        Ok(())
    }

    fn compute(&self, bars: &BarSeries) -> Result<Vec<f64>, IndicatorError> {
        self.validate()?;
        require_window_fits("rsi", "period", self.period, bars.len())?;
        Ok(rsi_of_series(&bars.column(self.source), self.period))
    }
}

/// RSI over a pre-extracted series.
pub fn rsi_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut gains = vec![f64::NAN; n];
    let mut losses = vec![f64::NAN; n];
    for i in 1..n {
        let delta = values[i] - values[i - 1];
        if delta.is_nan() {
            continue;
        }
        gains[i] = delta.max(0.0);
        losses[i] = (-delta).max(0.0);
    }

    let avg_gain = ema_of_series(&gains, period);
    let avg_loss = ema_of_series(&losses, period);

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&gain, &loss)| rsi_from_averages(gain, loss))
        .collect()
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_gain.is_nan() || avg_loss.is_nan() {
        return f64::NAN;
    }
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn rsi_known_values() {
        // gains  _, 1, 0, 1, 0   losses _, 0, 1, 0, 1
        // seed at 2: 0.5 / 0.5 → 50
        // bar 3: gain 2/3 + 1/6 = 5/6, loss 1/6 → RS 5 → 83.33
        let result = rsi_of_series(&[1.0, 2.0, 1.0, 2.0, 1.0], 2);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 50.0, DEFAULT_EPSILON);
        assert_approx(result[3], 100.0 - 100.0 / 6.0, 1e-9);
    }

    #[test]
    fn rsi_all_gains_is_exactly_100() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let result = Rsi::new(14).compute(&make_bars(&closes)).unwrap();
        assert!(result[13].is_nan());
        for v in &result[14..] {
            assert_eq!(*v, 100.0);
        }
    }

    #[test]
    fn rsi_all_losses_is_zero() {
        let closes: Vec<f64> = (0..30).map(|i| 200.0 - i as f64).collect();
        let result = Rsi::new(14).compute(&make_bars(&closes)).unwrap();
        for v in &result[14..] {
            assert_approx(*v, 0.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn rsi_flat_prices_hit_zero_denominator_case() {
        let result = Rsi::new(3).compute(&make_bars(&[50.0; 8])).unwrap();
        assert_eq!(result[3], 100.0);
    }

    #[test]
    fn rsi_zones() {
        let rsi = Rsi::default();
        assert_eq!(rsi.zone(75.0), Some(RsiZone::Overbought));
        assert_eq!(rsi.zone(70.0), Some(RsiZone::Overbought));
        assert_eq!(rsi.zone(50.0), Some(RsiZone::Neutral));
        assert_eq!(rsi.zone(30.0), Some(RsiZone::Oversold));
        assert_eq!(rsi.zone(f64::NAN), None);
    }

    #[test]
    fn rsi_rejects_inverted_thresholds() {
        assert!(Rsi::default().with_thresholds(30.0, 70.0).validate().is_err());
        assert!(Rsi::default().with_thresholds(120.0, 30.0).validate().is_err());
    }

    #[test]
    fn rsi_lookback() {
        assert_eq!(Rsi::default().lookback(), 14);
    }
}
