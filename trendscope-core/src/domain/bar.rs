//! Bar: the fundamental market data unit.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// OHLCV observation for one fixed time interval.
///
/// Bars are produced by an external data provider and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(
        timestamp: NaiveDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self { timestamp, open, high, low, close, volume }
    }

    /// Returns true if any OHLCV field is NaN (void bar).
    pub fn is_void(&self) -> bool {
        self.open.is_nan()
            || self.high.is_nan()
            || self.low.is_nan()
            || self.close.is_nan()
            || self.volume.is_nan()
    }

    /// OHLCV sanity check: `0 < low <= open, close <= high` and `volume >= 0`.
    ///
    /// Prices must be positive; returns divide by the previous close.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high.is_finite()
            && self.low.is_finite()
            && self.low > 0.0
            && self.low <= self.open
            && self.low <= self.close
            && self.high >= self.open
            && self.high >= self.close
            && self.volume >= 0.0
    }

    /// Typical price `(high + low + close) / 3`.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Value of the selected price column.
    pub fn price(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
            PriceField::Typical => self.typical_price(),
        }
    }
}

/// Price column an indicator reads from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    Open,
    High,
    Low,
    #[default]
    Close,
    /// `(high + low + close) / 3`
    Typical,
}

/// Errors raised while assembling a bar series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BarError {
    #[error("bar {index} at {timestamp} violates low <= open,close <= high or has negative volume")]
    Invalid { index: usize, timestamp: NaiveDateTime },

    #[error("bar {index} at {timestamp} is not after the previous bar ({previous})")]
    Unordered {
        index: usize,
        timestamp: NaiveDateTime,
        previous: NaiveDateTime,
    },

    #[error("duplicate timestamp {timestamp} at bar {index}")]
    DuplicateTimestamp { index: usize, timestamp: NaiveDateTime },
}
