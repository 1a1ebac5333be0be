//! Timestamped derived series.
//!
//! Values are aligned 1:1 by position with their timestamps. Positions that a
//! computation cannot define yet hold `f64::NAN`; [`Series::get`] surfaces that
//! marker as `None`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("series has {timestamps} timestamps but {values} values")]
    LengthMismatch { timestamps: usize, values: usize },

    #[error("timestamp at position {index} is not strictly after the previous one")]
    Unordered { index: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    timestamps: Vec<NaiveDateTime>,
    #[serde(with = "crate::domain::undefined::nan_as_null")]
    values: Vec<f64>,
}

impl Series {
    /// Build a series, rejecting length mismatches and non-increasing timestamps.
    pub fn new(timestamps: Vec<NaiveDateTime>, values: Vec<f64>) -> Result<Self, SeriesError> {
        if timestamps.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                timestamps: timestamps.len(),
                values: values.len(),
            });
        }
        if let Some(index) = timestamps
            .windows(2)
            .position(|w| w[1] <= w[0])
            .map(|i| i + 1)
        {
            return Err(SeriesError::Unordered { index });
        }
        Ok(Self { timestamps, values })
    }

    /// Caller guarantees equal lengths and strictly increasing timestamps.
    pub(crate) fn from_parts_unchecked(timestamps: Vec<NaiveDateTime>, values: Vec<f64>) -> Self {
        debug_assert_eq!(timestamps.len(), values.len());
        Self { timestamps, values }
    }

    /// Same index domain, new values.
    pub fn with_values(&self, values: Vec<f64>) -> Result<Self, SeriesError> {
        Self::new(self.timestamps.clone(), values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn timestamp(&self, index: usize) -> Option<NaiveDateTime> {
        self.timestamps.get(index).copied()
    }

    /// Value at `index`, `None` when out of range or undefined.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().filter(|v| !v.is_nan())
    }

    pub fn is_defined(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// `(timestamp, value)` pairs for defined positions only.
    pub fn defined(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
        self.timestamps
            .iter()
            .zip(&self.values)
            .filter(|(_, v)| !v.is_nan())
            .map(|(t, v)| (*t, *v))
    }

    /// Same timestamp domain as `other`.
    pub fn shares_index(&self, other: &Series) -> bool {
        self.timestamps == other.timestamps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn new_rejects_length_mismatch() {
        let err = Series::new(vec![ts(1), ts(2)], vec![1.0]).unwrap_err();
        assert_eq!(err, SeriesError::LengthMismatch { timestamps: 2, values: 1 });
    }

    #[test]
    fn new_rejects_unordered_timestamps() {
        let err = Series::new(vec![ts(2), ts(2)], vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err, SeriesError::Unordered { index: 1 });
    }

    #[test]
    fn undefined_positions_are_none() {
        let s = Series::new(vec![ts(1), ts(2), ts(3)], vec![f64::NAN, 2.0, 3.0]).unwrap();
        assert_eq!(s.get(0), None);
        assert_eq!(s.get(1), Some(2.0));
        assert_eq!(s.get(9), None);
        assert_eq!(s.defined().count(), 2);
    }
}
