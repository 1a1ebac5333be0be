//! Parallel evaluation over a universe of independent series.
//!
//! Each series is analysed on the rayon pool with no shared mutable state.
//! A failure is recorded against its symbol and never aborts the batch.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use trendscope_core::domain::BarSeries;

use crate::analysis::{run_analysis, AnalysisReport, RunError};
use crate::config::AnalysisConfig;
use crate::metrics::PerformanceMetrics;

/// Outcome for one symbol of a batch.
#[derive(Debug)]
pub struct SymbolOutcome<T> {
    pub symbol: String,
    pub result: Result<T, RunError>,
}

/// Per-symbol outcomes in universe order.
#[derive(Debug)]
pub struct BatchResults<T> {
    pub outcomes: Vec<SymbolOutcome<T>>,
}

impl<T> BatchResults<T> {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn get(&self, symbol: &str) -> Option<&Result<T, RunError>> {
        self.outcomes
            .iter()
            .find(|o| o.symbol == symbol)
            .map(|o| &o.result)
    }

    pub fn successes(&self) -> impl Iterator<Item = (&str, &T)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|r| (o.symbol.as_str(), r)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &RunError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.symbol.as_str(), e)))
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

#[derive(Serialize)]
struct JsonEntry<'a, T> {
    symbol: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> BatchResults<T> {
    /// One entry per symbol: its result, or the failure message.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let entries: Vec<JsonEntry<'_, T>> = self
            .outcomes
            .iter()
            .map(|o| JsonEntry {
                symbol: &o.symbol,
                result: o.result.as_ref().ok(),
                error: o.result.as_ref().err().map(ToString::to_string),
            })
            .collect();
        serde_json::to_string(&entries)
    }
}

fn collect<T>(outcomes: Vec<SymbolOutcome<T>>) -> BatchResults<T> {
    for outcome in &outcomes {
        if let Err(e) = &outcome.result {
            warn!(symbol = %outcome.symbol, error = %e, "series failed");
        }
    }
    BatchResults { outcomes }
}

/// Run [`run_analysis`] over every series in parallel.
pub fn analyze_universe(
    universe: &[BarSeries],
    config: &AnalysisConfig,
) -> BatchResults<AnalysisReport> {
    info!(series = universe.len(), "analyzing universe");
    let outcomes = universe
        .par_iter()
        .map(|series| SymbolOutcome {
            symbol: series.symbol().to_string(),
            result: run_analysis(series, config),
        })
        .collect();
    collect(outcomes)
}

/// Compute [`PerformanceMetrics`] of every series against one benchmark in parallel.
pub fn benchmark_universe(
    universe: &[BarSeries],
    benchmark: &BarSeries,
    config: &AnalysisConfig,
) -> BatchResults<PerformanceMetrics> {
    info!(
        series = universe.len(),
        benchmark = benchmark.symbol(),
        "benchmarking universe"
    );
    let outcomes = universe
        .par_iter()
        .map(|series| SymbolOutcome {
            symbol: series.symbol().to_string(),
            result: PerformanceMetrics::compute(series, benchmark, &config.performance)
                .map_err(RunError::from),
        })
        .collect();
    collect(outcomes)
}
