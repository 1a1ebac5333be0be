//! Bar series: a validated, strictly time-ordered run of bars for one symbol.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::bar::{Bar, BarError, PriceField};
use super::series::Series;

/// Strictly time-ordered bars with unique timestamps.
///
/// No fixed spacing is required: gaps (weekends, holidays) are allowed and every
/// window-based computation works on position, not calendar distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Validate ordering, uniqueness and OHLCV sanity.
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, BarError> {
        for (index, bar) in bars.iter().enumerate() {
            if !bar.is_sane() {
                return Err(BarError::Invalid {
                    index,
                    timestamp: bar.timestamp,
                });
            }
            if index > 0 {
                let previous = bars[index - 1].timestamp;
                if bar.timestamp == previous {
                    return Err(BarError::DuplicateTimestamp {
                        index,
                        timestamp: bar.timestamp,
                    });
                }
                if bar.timestamp < previous {
                    return Err(BarError::Unordered {
                        index,
                        timestamp: bar.timestamp,
                        previous,
                    });
                }
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    /// Extract one price column, aligned 1:1 with the bars.
    pub fn column(&self, field: PriceField) -> Vec<f64> {
        self.bars.iter().map(|b| b.price(field)).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.column(PriceField::Close)
    }

    pub fn highs(&self) -> Vec<f64> {
        self.column(PriceField::High)
    }

    pub fn lows(&self) -> Vec<f64> {
        self.column(PriceField::Low)
    }

    /// Timestamped close prices.
    pub fn close_series(&self) -> Series {
        Series::from_parts_unchecked(self.timestamps(), self.closes())
    }

    /// Attach this series' timestamps to a position-aligned derived vector.
    ///
    /// Returns `None` if the lengths differ.
    pub fn derive(&self, values: Vec<f64>) -> Option<Series> {
        if values.len() != self.bars.len() {
            return None;
        }
        Some(Series::from_parts_unchecked(self.timestamps(), values))
    }
}
