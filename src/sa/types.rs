//! Value types produced by the annealer.

use crate::network::FlowNetwork;

/// Lifecycle state of an annealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnealState {
    /// Temperature is at or above the minimum; steps make progress.
    Running,
    /// Temperature fell below the minimum; steps are no-ops.
    Terminal,
}

/// Outcome of one call to [`Annealer::step`](super::Annealer::step).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepOutcome {
    /// Number of non-terminal steps taken so far, this one included.
    pub iteration: usize,

    /// Sink inflow of this step's trial network. `0` once terminal.
    pub trial_inflow: u64,

    /// Best-so-far inflow after the acceptance decision.
    pub best_inflow: u64,

    /// Snapshot of the best-so-far network.
    pub best_network: FlowNetwork,

    /// Temperature after this step's decay. `0.0` once terminal.
    pub temperature: f64,

    /// Whether the trial replaced the best-so-far state.
    pub accepted: bool,
}

impl StepOutcome {
    /// The plotting-relevant scalars of this outcome.
    pub fn point(&self) -> TrajectoryPoint {
        TrajectoryPoint {
            iteration: self.iteration,
            trial_inflow: self.trial_inflow,
            best_inflow: self.best_inflow,
            temperature: self.temperature,
        }
    }
}

/// One sample of an annealing trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryPoint {
    pub iteration: usize,
    pub trial_inflow: u64,
    pub best_inflow: u64,
    pub temperature: f64,
}

/// Result of running an annealer to completion.
#[derive(Debug, Clone)]
pub struct AnnealResult {
    /// Best inflow at termination.
    pub best_inflow: u64,

    /// Network holding the best-so-far flow assignment.
    pub best_network: FlowNetwork,

    /// Total non-terminal steps taken by the annealer.
    pub iterations: usize,

    /// Number of accepted trials (including non-worsening ones).
    pub accepted_moves: usize,

    /// Number of trials that strictly increased the best inflow.
    pub improving_moves: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Trial inflow of every step executed by this run, in order.
    pub inflow_history: Vec<u64>,
}
