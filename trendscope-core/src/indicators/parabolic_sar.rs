//! Parabolic SAR (stop and reverse).
//!
//! Inherently sequential: every bar depends on the trend, extreme point (EP)
//! and acceleration factor (AF) carried over from the bar before it. The scan
//! is an explicit state machine; [`ParabolicSar::step`] applies one bar and can
//! be driven bar by bar.
//!
//! Per bar i, given the state at i - 1:
//! 1. project: `sar + af * (ep - sar)`
//! 2. reversal: in an up-trend a low below the projection flips to down (mirror
//!    for down-trends); SAR resets to the prior EP, EP seeds from the bar's
//!    opposite extreme, AF resets to `increment`
//! 3. extend: otherwise a new extreme moves EP and bumps AF, capped at `max_step`
//! 4. clamp: on non-reversal bars SAR never enters the prior two bars' range
//!
//! The first bar seeds the state using `initial_trend`. The clamp needs two
//! prior bars, so output starts at bar 2; bars 0 and 1 stay undefined, as does
//! every bar of a series shorter than 3.
//!
//! Names scale both parameters to percent (`psar_2_20` for 0.02 / 0.20) so the
//! name itself never contains a `.`.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::{Bar, BarSeries};
use crate::indicator::IndicatorError;

/// Trend regime of the SAR engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn flipped(self) -> Self {
        match self {
            Trend::Up => Trend::Down,
            Trend::Down => Trend::Up,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParabolicSar {
    pub increment: f64,
    pub max_step: f64,
    /// Trend assumed on the first bar.
    pub initial_trend: Trend,
}

/// Engine state after one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SarState {
    pub trend: Trend,
    pub extreme_point: f64,
    pub acceleration: f64,
    pub sar: f64,
    /// The bar that produced this state flipped the trend.
    pub reversed: bool,
}

impl ParabolicSar {
    pub fn new(increment: f64, max_step: f64) -> Self {
        Self {
            increment,
            max_step,
            initial_trend: Trend::Up,
        }
    }

    pub fn with_initial_trend(mut self, trend: Trend) -> Self {
        self.initial_trend = trend;
        self
    }

    pub fn name(&self) -> String {
        format!(
            "psar_{}_{}",
            percent_label(self.increment),
            percent_label(self.max_step)
        )
    }

    pub fn validate(&self) -> Result<(), IndicatorError> {
        if !(self.increment.is_finite() && self.increment > 0.0) {
            return Err(IndicatorError::InvalidParameter {
                indicator: "parabolic_sar",
                parameter: "increment",
                value: self.increment,
                reason: "must be finite and > 0",
            });
        }
        if !(self.max_step.is_finite() && self.max_step >= self.increment) {
            return Err(IndicatorError::InvalidParameter {
                indicator: "parabolic_sar",
                parameter: "max_step",
                value: self.max_step,
                reason: "must be finite and >= increment",
            });
        }
        Ok(())
    }

    /// Initial state from the first bar.
    ///
    /// Up: SAR at the low, EP at the high. Down: the mirror.
    pub fn seed(&self, first: &Bar) -> SarState {
        let (sar, extreme_point) = match self.initial_trend {
            Trend::Up => (first.low, first.high),
            Trend::Down => (first.high, first.low),
        };
        SarState {
            trend: self.initial_trend,
            extreme_point,
            acceleration: self.increment,
            sar,
            reversed: false,
        }
    }

    /// Advance the state machine by one bar.
    ///
    /// `prev1` and `prev2` are the bars one and two positions before `bar`.
    pub fn step(&self, state: &SarState, bar: &Bar, prev1: &Bar, prev2: &Bar) -> SarState {
        let projected = state.sar + state.acceleration * (state.extreme_point - state.sar);

        let breached = match state.trend {
            Trend::Up => bar.low < projected,
            Trend::Down => bar.high > projected,
        };
        if breached {
            let trend = state.trend.flipped();
            let extreme_point = match trend {
                Trend::Up => bar.high,
                Trend::Down => bar.low,
            };
            return SarState {
                trend,
                extreme_point,
                acceleration: self.increment,
                sar: state.extreme_point,
                reversed: true,
            };
        }

        let mut next = SarState {
            sar: projected,
            reversed: false,
            ..*state
        };
        let new_extreme = match state.trend {
            Trend::Up => bar.high > state.extreme_point,
            Trend::Down => bar.low < state.extreme_point,
        };
        if new_extreme {
            next.extreme_point = match state.trend {
                Trend::Up => bar.high,
                Trend::Down => bar.low,
            };
            next.acceleration = (state.acceleration + self.increment).min(self.max_step);
        }

        next.sar = match state.trend {
            Trend::Up => projected.min(prev1.low).min(prev2.low),
            Trend::Down => projected.max(prev1.high).max(prev2.high),
        };
        next
    }

    pub fn compute(&self, bars: &BarSeries) -> Result<ParabolicSarOutput, IndicatorError> {
        self.validate()?;

        let bars = bars.bars();
        let n = bars.len();
        let mut output = ParabolicSarOutput::undefined(n);
        if n < 3 {
            return Ok(output);
        }

        let mut state = self.seed(&bars[0]);

        for i in 2..n {
            let next = self.step(&state, &bars[i], &bars[i - 1], &bars[i - 2]);
            if next.reversed {
                trace!(
                    bar = i,
                    from = ?state.trend,
                    to = ?next.trend,
                    sar = next.sar,
                    "parabolic sar reversal"
                );
                output.reversals.push(i);
            }
            output.record(i, &next);
            state = next;
        }

        Ok(output)
    }
}

/// `0.02` → `"2"`, `0.025` → `"2p5"`.
fn percent_label(value: f64) -> String {
    let percent = (value * 100.0 * 1e4).round() / 1e4;
    percent.to_string().replace('.', "p")
}

impl Default for ParabolicSar {
    fn default() -> Self {
        Self::new(0.02, 0.20)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParabolicSarOutput {
    /// Raw SAR from bar 2 on.
    #[serde(with = "crate::domain::undefined::nan_as_null")]
    pub sar: Vec<f64>,
    /// SAR on up-trend bars, NaN elsewhere.
    #[serde(with = "crate::domain::undefined::nan_as_null")]
    pub up: Vec<f64>,
    /// SAR on down-trend bars, NaN elsewhere.
    #[serde(with = "crate::domain::undefined::nan_as_null")]
    pub down: Vec<f64>,
    pub trend: Vec<Option<Trend>>,
    /// Bars on which the trend flipped.
    pub reversals: Vec<usize>,
}

impl ParabolicSarOutput {
    fn undefined(n: usize) -> Self {
        Self {
            sar: vec![f64::NAN; n],
            up: vec![f64::NAN; n],
            down: vec![f64::NAN; n],
            trend: vec![None; n],
            reversals: Vec::new(),
        }
    }

    fn record(&mut self, i: usize, state: &SarState) {
        self.sar[i] = state.sar;
        self.trend[i] = Some(state.trend);
        match state.trend {
            Trend::Up => self.up[i] = state.sar,
            Trend::Down => self.down[i] = state.sar,
        }
    }
}
