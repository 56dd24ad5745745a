//! Instrumentation hooks for annealing runs.
//!
//! A monitor observes a run without influencing it: it sees the annealer
//! before the first step, every non-terminal step outcome, and the final
//! result of a run-to-completion.

use super::runner::Annealer;
use super::types::{AnnealResult, StepOutcome, TrajectoryPoint};

/// Observer of annealing progress.
pub trait AnnealMonitor {
    /// Called once before [`Annealer::run_with_monitor`] takes its first step.
    fn on_start(&mut self, _annealer: &Annealer) {}

    /// Called after every non-terminal step.
    fn on_step(&mut self, outcome: &StepOutcome);

    /// Called once when [`Annealer::run_with_monitor`] finishes.
    fn on_end(&mut self, _result: &AnnealResult) {}
}

/// A monitor that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMonitor;

impl AnnealMonitor for NoOpMonitor {
    #[inline]
    fn on_step(&mut self, _outcome: &StepOutcome) {}
}

/// Accumulates `(iteration, trial inflow, best inflow, temperature)` samples.
#[derive(Debug, Clone, Default)]
pub struct TrajectoryRecorder {
    points: Vec<TrajectoryPoint>,
}

impl TrajectoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded samples in step order.
    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    /// Drops all recorded samples.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Highest best-inflow seen so far, or `0` when empty.
    pub fn peak_inflow(&self) -> u64 {
        self.points.iter().map(|p| p.best_inflow).max().unwrap_or(0)
    }
}

impl AnnealMonitor for TrajectoryRecorder {
    fn on_step(&mut self, outcome: &StepOutcome) {
        self.points.push(outcome.point());
    }
}
