//! Serializable analysis configuration.
//!
//! One section per indicator plus the performance settings. Every section is
//! optional in TOML; missing sections and fields take their documented
//! defaults.
//!
//! ```toml
//! [sma]
//! period = 50
//!
//! [ichimoku]
//! shift_cloud = false
//!
//! [performance]
//! periods_per_year = 365
//! return_kind = "log"
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use trendscope_core::indicator::{Indicator, IndicatorError};
use trendscope_core::indicators::{
    Cci, Ema, Ichimoku, MaCrossover, Macd, ParabolicSar, Rsi, Sma, Tsi, Wma,
};

use crate::metrics::PerformanceConfig;

/// Errors from configuration parsing and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("[{section}] {source}")]
    Indicator {
        section: &'static str,
        #[source]
        source: IndicatorError,
    },

    #[error("[performance] periods_per_year must be >= 1")]
    PeriodsPerYear,
}

/// Parameters for one full analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub sma: Sma,
    pub ema: Ema,
    pub wma: Wma,
    pub crossover: MaCrossover,
    pub macd: Macd,
    pub cci: Cci,
    pub ichimoku: Ichimoku,
    pub parabolic_sar: ParabolicSar,
    pub rsi: Rsi,
    pub tsi: Tsi,
    pub performance: PerformanceConfig,
}

impl AnalysisConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter that does not depend on series length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn section(
            section: &'static str,
            result: Result<(), IndicatorError>,
        ) -> Result<(), ConfigError> {
            result.map_err(|source| ConfigError::Indicator { section, source })
        }

        section("sma", self.sma.validate())?;
        section("ema", self.ema.validate())?;
        section("wma", self.wma.validate())?;
        section("crossover", self.crossover.validate())?;
        section("macd", self.macd.validate())?;
        section("cci", self.cci.validate())?;
        section("ichimoku", self.ichimoku.validate())?;
        section("parabolic_sar", self.parabolic_sar.validate())?;
        section("rsi", self.rsi.validate())?;
        section("tsi", self.tsi.validate())?;

        if self.performance.periods_per_year == 0 {
            return Err(ConfigError::PeriodsPerYear);
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

/// Load and validate an analysis configuration file.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<AnalysisConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    AnalysisConfig::from_toml_str(&content)
        .with_context(|| format!("invalid config {}", path.display()))
}
