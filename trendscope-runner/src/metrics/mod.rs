//! Performance metrics: pure functions over price and return series.
//!
//! Every metric is a pure function: series in, numbers out. Cross-series
//! metrics require a shared timestamp domain and report misalignment as an
//! error instead of truncating.

pub mod drawdown;
pub mod regression;
pub mod returns;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use trendscope_core::align::align_series;
use trendscope_core::domain::{BarSeries, SeriesError};

pub use drawdown::{max_drawdown, max_drawdown_series, DrawdownResult};
pub use regression::{alpha_beta, RegressionResult};
pub use returns::{
    compounded_mean_return, cumulative_return, cumulative_returns, log_returns, return_series,
    returns, simple_returns, total_return, ReturnKind,
};

/// Errors from cross-series and aggregate metrics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("series are not on a common timestamp domain ({left} vs {right} points); align them first")]
    Misaligned { left: usize, right: usize },

    #[error("need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("degenerate input: {0}")]
    Degenerate(&'static str),

    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// Settings shared by every performance computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Trading periods per year used to annualize alpha.
    pub periods_per_year: usize,
    /// Return measure used for drawdown and regression.
    pub return_kind: ReturnKind,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            periods_per_year: 252,
            return_kind: ReturnKind::Simple,
        }
    }
}

/// Aggregate performance of one asset against a benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub symbol: String,
    pub benchmark: String,
    pub total_return: f64,
    pub cumulative_simple: f64,
    pub cumulative_log: f64,
    /// Mean simple return times the number of periods (does not compound).
    pub compounded_simple: f64,
    /// `exp(mean log return * periods) - 1`.
    pub compounded_log: f64,
    pub drawdown: DrawdownResult,
    pub regression: RegressionResult,
}

impl PerformanceMetrics {
    /// Compute all metrics from the close prices of an asset and a benchmark.
    ///
    /// The two return series are aligned onto the union of their timestamps
    /// before the regression; bars present on one side only are left out of the fit.
    pub fn compute(
        asset: &BarSeries,
        benchmark: &BarSeries,
        settings: &PerformanceConfig,
    ) -> Result<Self, MetricsError> {
        let closes = asset.closes();
        let simple = simple_returns(&closes);
        let log = log_returns(&closes);
        let periods = simple.iter().filter(|r| !r.is_nan()).count();
        if periods == 0 {
            return Err(MetricsError::InsufficientData {
                needed: 2,
                got: closes.len(),
            });
        }

        let kind = settings.return_kind;
        let asset_returns = return_series(&asset.close_series(), kind)?;
        let benchmark_returns = return_series(&benchmark.close_series(), kind)?;
        let drawdown = max_drawdown_series(&asset_returns, kind)?;

        let aligned = align_series(&asset_returns, &benchmark_returns);
        let regression = alpha_beta(&aligned.left, &aligned.right, settings.periods_per_year)?;

        Ok(Self {
            symbol: asset.symbol().to_string(),
            benchmark: benchmark.symbol().to_string(),
            total_return: total_return(&closes),
            cumulative_simple: cumulative_return(&simple, ReturnKind::Simple),
            cumulative_log: cumulative_return(&log, ReturnKind::Log),
            compounded_simple: compounded_mean_return(&simple, ReturnKind::Simple, periods),
            compounded_log: compounded_mean_return(&log, ReturnKind::Log, periods),
            drawdown,
            regression,
        })
    }
}
