//! Period returns and their aggregation.
//!
//! simple = p[t] / p[t-1] - 1
//! log    = ln(p[t] / p[t-1])
//!
//! Position 0 (and any position next to an undefined price) is NaN. Aggregates
//! skip undefined returns.

use serde::{Deserialize, Serialize};
use trendscope_core::domain::Series;

use super::MetricsError;

/// How a period return is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnKind {
    #[default]
    Simple,
    /// Additive across periods; preferred for multi-period aggregation.
    Log,
}

impl ReturnKind {
    /// Return from `previous` to `current`.
    pub fn between(self, previous: f64, current: f64) -> f64 {
        match self {
            ReturnKind::Simple => current / previous - 1.0,
            ReturnKind::Log => (current / previous).ln(),
        }
    }

    /// Growth factor `1 + R` of a run of returns of this kind.
    pub fn growth(self, returns: &[f64]) -> f64 {
        let defined = returns.iter().filter(|r| !r.is_nan());
        match self {
            ReturnKind::Simple => defined.map(|r| 1.0 + r).product(),
            ReturnKind::Log => defined.sum::<f64>().exp(),
        }
    }
}

pub fn returns(prices: &[f64], kind: ReturnKind) -> Vec<f64> {
    let mut result = vec![f64::NAN; prices.len()];
    for i in 1..prices.len() {
        result[i] = kind.between(prices[i - 1], prices[i]);
    }
    result
}

pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    returns(prices, ReturnKind::Simple)
}

pub fn log_returns(prices: &[f64]) -> Vec<f64> {
    returns(prices, ReturnKind::Log)
}

/// Returns of a timestamped price series, on the same timestamps.
pub fn return_series(prices: &Series, kind: ReturnKind) -> Result<Series, MetricsError> {
    Ok(prices.with_values(returns(prices.values(), kind))?)
}

/// Cumulative return of a return series.
///
/// Simple: `prod(1 + r) - 1`. Log: `exp(sum(r)) - 1`.
pub fn cumulative_return(returns: &[f64], kind: ReturnKind) -> f64 {
    kind.growth(returns) - 1.0
}

/// Running cumulative return; position i covers returns 0..=i.
pub fn cumulative_returns(returns: &[f64], kind: ReturnKind) -> Vec<f64> {
    growth_path(returns, kind).into_iter().map(|g| g - 1.0).collect()
}

/// Running growth factor; undefined returns contribute nothing.
pub(crate) fn growth_path(returns: &[f64], kind: ReturnKind) -> Vec<f64> {
    let mut acc = match kind {
        ReturnKind::Simple => 1.0,
        ReturnKind::Log => 0.0,
    };
    returns
        .iter()
        .map(|&r| {
            if !r.is_nan() {
                match kind {
                    ReturnKind::Simple => acc *= 1.0 + r,
                    ReturnKind::Log => acc += r,
                }
            }
            match kind {
                ReturnKind::Simple => acc,
                ReturnKind::Log => acc.exp(),
            }
        })
        .collect()
}

/// Total return from first to last defined price: `last / first - 1`.
///
/// NaN with fewer than two defined prices. For a return series use
/// [`cumulative_return`]; both agree on returns derived from the same prices.
pub fn total_return(prices: &[f64]) -> f64 {
    let mut defined = prices.iter().filter(|p| !p.is_nan());
    match (defined.next(), defined.last()) {
        (Some(first), Some(last)) => last / first - 1.0,
        _ => f64::NAN,
    }
}

/// Mean per-period return projected over `periods`.
///
/// Simple: `mean * periods`, which does not compound. Log: `exp(mean * periods) - 1`,
/// which reproduces the realized return when `periods` matches the sample.
/// NaN when no return is defined.
pub fn compounded_mean_return(returns: &[f64], kind: ReturnKind, periods: usize) -> f64 {
    let defined: Vec<f64> = returns.iter().copied().filter(|r| !r.is_nan()).collect();
    if defined.is_empty() {
        return f64::NAN;
    }
    let mean = defined.iter().sum::<f64>() / defined.len() as f64;
    let projected = mean * periods as f64;
    match kind {
        ReturnKind::Simple => projected,
        ReturnKind::Log => projected.exp() - 1.0,
    }
}
