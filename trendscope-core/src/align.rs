//! Two-series time alignment.
//!
//! Given two timestamped series, align them to the union of their timelines.
//! Positions missing from either side get strict NaN (no forward-fill), so any
//! later comparison or regression sees them as undefined.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::domain::Series;

/// Two series on a common, ascending timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPair {
    pub left: Series,
    pub right: Series,
}

impl AlignedPair {
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        self.left.timestamps()
    }

    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Positions where both sides are defined.
    pub fn complete_pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.left
            .values()
            .iter()
            .zip(self.right.values())
            .filter(|(l, r)| !l.is_nan() && !r.is_nan())
            .map(|(l, r)| (*l, *r))
    }
}

/// Align two series to the union of their timestamps.
pub fn align_series(left: &Series, right: &Series) -> AlignedPair {
    if left.shares_index(right) {
        return AlignedPair {
            left: left.clone(),
            right: right.clone(),
        };
    }

    let timeline: Vec<NaiveDateTime> = left
        .timestamps()
        .iter()
        .chain(right.timestamps())
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    AlignedPair {
        left: reindex(left, &timeline),
        right: reindex(right, &timeline),
    }
}

fn reindex(series: &Series, timeline: &[NaiveDateTime]) -> Series {
    let lookup: HashMap<NaiveDateTime, f64> = series
        .timestamps()
        .iter()
        .copied()
        .zip(series.values().iter().copied())
        .collect();

    let values = timeline
        .iter()
        .map(|t| lookup.get(t).copied().unwrap_or(f64::NAN))
        .collect();

    Series::from_parts_unchecked(timeline.to_vec(), values)
}
