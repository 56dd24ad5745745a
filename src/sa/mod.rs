//! Simulated annealing over flow networks.
//!
//! The [`Annealer`] searches path-wise flow assignments that maximize the
//! inflow at the sink. Each step samples one source-to-sink path, draws a
//! flow value up to the path's bottleneck, clears every live path that
//! shares an edge with it, and decides acceptance with the Metropolis
//! criterion under geometric cooling.
//!
//! The annealer is pull-driven: the caller invokes [`Annealer::step`] at
//! whatever cadence it likes and stops when [`AnnealState::Terminal`] is
//! reached.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod config;
mod conflict;
mod monitor;
mod runner;
mod types;

pub use config::AnnealConfig;
pub use conflict::VisitedPaths;
pub use monitor::{AnnealMonitor, NoOpMonitor, TrajectoryRecorder};
pub use runner::{acceptance_probability, metropolis_accept, Annealer};
pub use types::{AnnealResult, AnnealState, StepOutcome, TrajectoryPoint};
