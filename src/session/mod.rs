//! Per-caller orchestration of annealing runs.
//!
//! A [`Session`] bundles the state a front end needs for one user: an
//! interactively stepped annealer, a precomputed reference run with the
//! same seed, and the accumulated trajectory buffer. [`sweep_seeds`]
//! runs batches of independent seeds.

mod interactive;
mod sweep;

pub use interactive::Session;
pub use sweep::{sweep_seeds, SeedSummary};
