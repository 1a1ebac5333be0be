//! Trendscope Runner: analysis runs, performance metrics, configuration.
//!
//! This crate builds on `trendscope-core` to provide:
//! - TOML analysis configuration with per-indicator sections
//! - Returns, cumulative return, drawdown and Alpha/Beta metrics
//! - Single-series analysis into a named, serializable report
//! - Parallel evaluation over a universe of series

pub mod analysis;
pub mod batch;
pub mod config;
pub mod metrics;

pub use analysis::{run_analysis, AnalysisReport, RunError};
pub use batch::{analyze_universe, benchmark_universe, BatchResults, SymbolOutcome};
pub use config::{load_config, AnalysisConfig, ConfigError};
pub use metrics::{
    DrawdownResult, MetricsError, PerformanceConfig, PerformanceMetrics, RegressionResult,
    ReturnKind,
};
