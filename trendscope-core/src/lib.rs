//! Trendscope Core: price-series data model and technical-analysis engine.
//!
//! This crate contains the computation core:
//! - Domain types (bars, validated bar series, timestamped derived series)
//! - Explicit alignment of two series onto a shared timeline
//! - Rolling reductions and mean-seeded exponential smoothing
//! - Trend indicators, the Parabolic SAR state machine and momentum oscillators
//!
//! Every computation is a pure function of its inputs: no global state, no I/O.

pub mod align;
pub mod domain;
pub mod indicator;
pub mod indicators;

pub use align::{align_series, AlignedPair};
pub use domain::{Bar, BarError, BarSeries, PriceField, Series, SeriesError};
pub use indicator::{Indicator, IndicatorError, IndicatorValues};
