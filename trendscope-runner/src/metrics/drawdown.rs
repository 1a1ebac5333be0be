//! Maximum drawdown of a return series.
//!
//! growth      = running product of (1 + r) (or exp of the running log sum)
//! running_max = running maximum of growth
//! drawdown    = (running_max - growth) / running_max
//!
//! The trough is the first position of the largest drawdown; the peak is the
//! position where the running maximum in effect at the trough was set. With no
//! drawdown at all, peak and trough are both the last position.
//!
//! Returns must come from positive prices (as [`BarSeries`] guarantees); a
//! zero price makes the following simple return infinite and the growth NaN.
//!
//! [`BarSeries`]: trendscope_core::domain::BarSeries

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use trendscope_core::domain::Series;

use super::returns::{growth_path, ReturnKind};
use super::MetricsError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownResult {
    /// Largest drawdown as a fraction in [0, 1].
    pub max_drawdown: f64,
    pub peak: usize,
    pub trough: usize,
    /// Bars from peak to trough.
    pub duration: usize,
    pub peak_timestamp: Option<NaiveDateTime>,
    pub trough_timestamp: Option<NaiveDateTime>,
    /// Cumulative growth factor at every position.
    pub growth: Vec<f64>,
    /// Drawdown fraction at every position.
    pub drawdown: Vec<f64>,
}

pub fn max_drawdown(returns: &[f64], kind: ReturnKind) -> Result<DrawdownResult, MetricsError> {
    if returns.is_empty() {
        return Err(MetricsError::InsufficientData { needed: 1, got: 0 });
    }

    let growth = growth_path(returns, kind);
    let mut drawdown = Vec::with_capacity(growth.len());
    let mut running_max = growth[0];
    let mut running_max_at = 0;
    let mut worst = 0.0;
    let mut peak = 0;
    let mut trough = 0;

    for (i, &g) in growth.iter().enumerate() {
        if g > running_max {
            running_max = g;
            running_max_at = i;
        }
        let dd = (running_max - g) / running_max;
        if dd > worst {
            worst = dd;
            peak = running_max_at;
            trough = i;
        }
        drawdown.push(dd);
    }

    if worst == 0.0 {
        let last = growth.len() - 1;
        peak = last;
        trough = last;
    }

    Ok(DrawdownResult {
        max_drawdown: worst,
        peak,
        trough,
        duration: trough - peak,
        peak_timestamp: None,
        trough_timestamp: None,
        growth,
        drawdown,
    })
}

/// [`max_drawdown`] over a timestamped return series, resolving peak and trough times.
pub fn max_drawdown_series(
    returns: &Series,
    kind: ReturnKind,
) -> Result<DrawdownResult, MetricsError> {
    let mut result = max_drawdown(returns.values(), kind)?;
    result.peak_timestamp = returns.timestamp(result.peak);
    result.trough_timestamp = returns.timestamp(result.trough);
    Ok(result)
}
