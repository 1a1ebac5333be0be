//! Alpha / Beta by ordinary least squares.
//!
//! Fits `asset = alpha + beta * benchmark` over the positions where both
//! return series are defined. Alpha is annualized by `periods_per_year`.
//! Both series must already share one timestamp domain; call
//! [`align_series`](trendscope_core::align::align_series) first.

use serde::{Deserialize, Serialize};
use tracing::debug;
use trendscope_core::domain::Series;

use super::MetricsError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Annualized intercept.
    pub alpha: f64,
    pub beta: f64,
    pub r_squared: f64,
    pub observations: usize,
}

/// Regress asset returns on benchmark returns.
pub fn alpha_beta(
    asset: &Series,
    benchmark: &Series,
    periods_per_year: usize,
) -> Result<RegressionResult, MetricsError> {
    if !asset.shares_index(benchmark) {
        return Err(MetricsError::Misaligned {
            left: asset.len(),
            right: benchmark.len(),
        });
    }

    let (x, y): (Vec<f64>, Vec<f64>) = benchmark
        .values()
        .iter()
        .zip(asset.values())
        .filter(|(b, a)| !b.is_nan() && !a.is_nan())
        .map(|(b, a)| (*b, *a))
        .unzip();

    let fit = ols(&x, &y)?;
    Ok(RegressionResult {
        alpha: fit.intercept * periods_per_year as f64,
        beta: fit.slope,
        r_squared: fit.r_squared,
        observations: x.len(),
    })
}

struct LineFit {
    intercept: f64,
    slope: f64,
    r_squared: f64,
}

fn ols(x: &[f64], y: &[f64]) -> Result<LineFit, MetricsError> {
    let n = x.len();
    if n < 2 {
        return Err(MetricsError::InsufficientData { needed: 2, got: n });
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx == 0.0 {
        debug!(observations = n, "benchmark returns have zero variance");
        return Err(MetricsError::Degenerate("benchmark returns have zero variance"));
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    // Constant asset returns are fit exactly.
    let r_squared = if syy == 0.0 {
        1.0
    } else {
        (sxy * sxy) / (sxx * syy)
    };

    Ok(LineFit {
        intercept,
        slope,
        r_squared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(n: usize) -> Vec<NaiveDateTime> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (0..n).map(|i| base + chrono::Duration::days(i as i64)).collect()
    }

    fn series(values: &[f64]) -> Series {
        Series::new(ts(values.len()), values.to_vec()).unwrap()
    }

    #[test]
    fn self_regression_is_beta_one_alpha_zero() {
        let r = series(&[f64::NAN, 0.01, -0.02, 0.015, 0.003, -0.007]);
        let fit = alpha_beta(&r, &r, 252).unwrap();
        assert!((fit.beta - 1.0).abs() < 1e-12);
        assert!(fit.alpha.abs() < 1e-12);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
        assert_eq!(fit.observations, 5);
    }

    #[test]
    fn recovers_known_line() {
        let bench = [0.01, -0.02, 0.03, 0.0, -0.01];
        let asset: Vec<f64> = bench.iter().map(|b| 0.001 + 1.5 * b).collect();
        let fit = alpha_beta(&series(&asset), &series(&bench), 252).unwrap();
        assert!((fit.beta - 1.5).abs() < 1e-12);
        assert!((fit.alpha - 0.252).abs() < 1e-10);
    }

    #[test]
    fn misaligned_is_error() {
        let a = series(&[0.01, 0.02, 0.03]);
        let b = series(&[0.01, 0.02]);
        assert_eq!(
            alpha_beta(&a, &b, 252),
            Err(MetricsError::Misaligned { left: 3, right: 2 })
        );
    }

    #[test]
    fn flat_benchmark_is_degenerate() {
        let a = series(&[0.01, 0.02, 0.03]);
        let b = series(&[0.01, 0.01, 0.01]);
        assert!(matches!(alpha_beta(&a, &b, 252), Err(MetricsError::Degenerate(_))));
    }

    #[test]
    fn too_few_pairs_is_error() {
        let a = series(&[f64::NAN, 0.02, f64::NAN]);
        let b = series(&[0.01, 0.01, 0.03]);
        assert_eq!(
            alpha_beta(&a, &b, 252),
            Err(MetricsError::InsufficientData { needed: 2, got: 1 })
        );
    }
}
