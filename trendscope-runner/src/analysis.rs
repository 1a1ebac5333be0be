//! Single-series analysis: evaluates every configured indicator.
//!
//! Outputs are stored in one [`IndicatorValues`] map under stable names:
//! single-series indicators under their own name (`sma_21`), components of
//! multi-output indicators as `name.component` (`macd_12_26_9.histogram`).
//! Booleans and signals are stored numerically (`1.0` / `0.0` / `-1.0`, NaN
//! where undefined) so every entry lines up with the bar timestamps.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use trendscope_core::domain::BarSeries;
use trendscope_core::indicator::{Indicator, IndicatorError, IndicatorValues};
use trendscope_core::indicators::{RsiZone, Trend};

use crate::config::{AnalysisConfig, ConfigError};
use crate::metrics::MetricsError;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("indicator error: {0}")]
    Indicator(#[from] IndicatorError),
    #[error("metrics error: {0}")]
    Metrics(#[from] MetricsError),
    #[error("series '{0}' has no bars")]
    EmptySeries(String),
}

/// Every indicator output for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub timestamps: Vec<NaiveDateTime>,
    pub indicators: IndicatorValues,
    /// Bars on which the Parabolic SAR flipped trend.
    pub sar_reversals: Vec<usize>,
}

impl AnalysisReport {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Full series for one named output.
    pub fn series(&self, name: &str) -> Option<&[f64]> {
        self.indicators.get_series(name)
    }

    /// Serialize for a rendering collaborator. Undefined values become `null`
    /// and read back as NaN.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn flag(value: Option<bool>) -> f64 {
    match value {
        Some(true) => 1.0,
        Some(false) => 0.0,
        None => f64::NAN,
    }
}

fn zone_value(zone: Option<RsiZone>) -> f64 {
    match zone {
        Some(RsiZone::Overbought) => 1.0,
        Some(RsiZone::Neutral) => 0.0,
        Some(RsiZone::Oversold) => -1.0,
        None => f64::NAN,
    }
}

/// Run every configured indicator over one bar series.
pub fn run_analysis(series: &BarSeries, config: &AnalysisConfig) -> Result<AnalysisReport, RunError> {
    if series.is_empty() {
        return Err(RunError::EmptySeries(series.symbol().to_string()));
    }
    config.validate()?;
    debug!(symbol = series.symbol(), bars = series.len(), "running analysis");

    let mut values = IndicatorValues::new();

    let single: [&dyn Indicator; 4] = [&config.sma, &config.ema, &config.wma, &config.cci];
    for indicator in single {
        values.insert(indicator.name(), indicator.compute(series)?);
    }

    let name = config.rsi.name();
    let rsi = config.rsi.compute(series)?;
    values.insert(
        format!("{name}.zone"),
        config.rsi.zones(&rsi).into_iter().map(zone_value).collect(),
    );
    values.insert(name, rsi);

    let name = config.crossover.name();
    let crossover = config.crossover.compute(series)?;
    values.insert(format!("{name}.signal"), crossover.signal_values());
    values.insert(
        format!("{name}.regime"),
        crossover
            .regime()
            .iter()
            .map(|r| r.map_or(f64::NAN, |s| f64::from(s.as_i8())))
            .collect(),
    );
    values.insert(
        format!("{name}.fast_above_slow"),
        crossover.fast_above_slow().into_iter().map(flag).collect(),
    );
    values.insert(format!("{name}.fast"), crossover.fast);
    values.insert(format!("{name}.slow"), crossover.slow);

    let name = config.macd.name();
    let macd = config.macd.compute(series)?;
    values.insert(format!("{name}.histogram"), macd.histogram());
    values.insert(format!("{name}.line"), macd.line);
    values.insert(format!("{name}.signal"), macd.signal);

    let name = config.ichimoku.name();
    let ichimoku = config.ichimoku.compute(series)?;
    values.insert(
        format!("{name}.cloud_bullish"),
        ichimoku.cloud_bullish().into_iter().map(flag).collect(),
    );
    values.insert(format!("{name}.tenkan"), ichimoku.tenkan);
    values.insert(format!("{name}.kijun"), ichimoku.kijun);
    values.insert(format!("{name}.span_a"), ichimoku.span_a);
    values.insert(format!("{name}.span_b"), ichimoku.span_b);
    values.insert(format!("{name}.chikou"), ichimoku.chikou);

    let name = config.parabolic_sar.name();
    let sar = config.parabolic_sar.compute(series)?;
    values.insert(
        format!("{name}.trend"),
        sar.trend
            .iter()
            .map(|t| match t {
                Some(Trend::Up) => 1.0,
                Some(Trend::Down) => -1.0,
                None => f64::NAN,
            })
            .collect(),
    );
    values.insert(name.clone(), sar.sar);
    values.insert(format!("{name}.up"), sar.up);
    values.insert(format!("{name}.down"), sar.down);

    let name = config.tsi.name();
    let tsi = config.tsi.compute(series)?;
    values.insert(
        format!("{name}.trend"),
        tsi.trend.iter().map(|t| if *t { 1.0 } else { 0.0 }).collect(),
    );
    values.insert(name.clone(), tsi.tsi);
    values.insert(format!("{name}.signal"), tsi.signal);

    Ok(AnalysisReport {
        symbol: series.symbol().to_string(),
        timestamps: series.timestamps(),
        indicators: values,
        sar_reversals: sar.reversals,
    })
}
