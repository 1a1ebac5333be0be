//! Indicator trait, configuration errors and the named-series container.
//!
//! Indicators are pure functions: bar history in, numeric series out. Every
//! output series has the same length as the input; positions inside the warmup
//! region hold `f64::NAN`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::BarSeries;

/// Configuration errors reported before any computation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("{indicator}: window `{parameter}` must be >= 1")]
    InvalidWindow {
        indicator: &'static str,
        parameter: &'static str,
    },

    #[error("{indicator}: window `{parameter}` = {window} exceeds series length {len}")]
    WindowExceedsSeries {
        indicator: &'static str,
        parameter: &'static str,
        window: usize,
        len: usize,
    },

    #[error("{indicator}: parameter `{parameter}` = {value} is invalid ({reason})")]
    InvalidParameter {
        indicator: &'static str,
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Reject a zero window.
pub fn require_window(
    indicator: &'static str,
    parameter: &'static str,
    window: usize,
) -> Result<(), IndicatorError> {
    if window == 0 {
        return Err(IndicatorError::InvalidWindow {
            indicator,
            parameter,
        });
    }
    Ok(())
}

/// Reject a zero window or one longer than the series.
pub fn require_window_fits(
    indicator: &'static str,
    parameter: &'static str,
    window: usize,
    len: usize,
) -> Result<(), IndicatorError> {
    require_window(indicator, parameter, window)?;
    if window > len {
        return Err(IndicatorError::WindowExceedsSeries {
            indicator,
            parameter,
            window,
            len,
        });
    }
    Ok(())
}

/// Single-series indicator.
///
/// # Look-ahead contamination guard
/// No value at bar t may depend on price data from bar t+1 or later. Every
/// indicator must pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_21", "rsi_14").
    fn name(&self) -> String;

    /// Number of leading positions that are undefined on a long enough series.
    fn lookback(&self) -> usize;

    /// Check parameters that do not depend on the input length.
    fn validate(&self) -> Result<(), IndicatorError>;

    /// Compute the indicator over the whole series.
    ///
    /// Returns a `Vec<f64>` of the same length as `bars`.
    fn compute(&self, bars: &BarSeries) -> Result<Vec<f64>, IndicatorError>;
}

/// Named indicator outputs, all aligned to the same bar series.
///
/// `BTreeMap` keeps serialization order deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValues {
    #[serde(with = "crate::domain::undefined::nan_map_as_null")]
    series: BTreeMap<String, Vec<f64>>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named indicator series.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Get the indicator value at a specific bar index.
    pub fn get(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|v| v.get(bar_index).copied())
    }

    /// Get the full series for a named indicator.
    pub fn get_series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Number of indicator series stored.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
