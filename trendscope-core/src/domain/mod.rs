//! Domain types for trendscope

pub mod bar;
pub mod bar_series;
pub mod series;
pub mod undefined;

pub use bar::{Bar, BarError, PriceField};
pub use bar_series::BarSeries;
pub use series::{Series, SeriesError};
