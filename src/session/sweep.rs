//! Independent runs across many seeds.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::Result;
use crate::network::FlowNetwork;
use crate::sa::{AnnealConfig, Annealer};

/// Summary of one completed run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeedSummary {
    pub seed: u64,
    pub best_inflow: u64,
    pub iterations: usize,
    pub accepted_moves: usize,
    pub improving_moves: usize,
}

/// Runs one annealer to completion per seed and summarizes each run.
///
/// Results are returned in the order of `seeds`. With the `parallel`
/// feature the runs execute on the rayon thread pool; every run owns its
/// random stream, so the output does not depend on scheduling.
///
/// # Errors
///
/// Fails if `config` or `network` cannot build an annealer.
pub fn sweep_seeds(
    network: &FlowNetwork,
    config: &AnnealConfig,
    seeds: &[u64],
) -> Result<Vec<SeedSummary>> {
    let run = |&seed: &u64| -> Result<SeedSummary> {
        let result = Annealer::new(network, config.clone().with_seed(seed))?.run_to_completion();
        Ok(SeedSummary {
            seed,
            best_inflow: result.best_inflow,
            iterations: result.iterations,
            accepted_moves: result.accepted_moves,
            improving_moves: result.improving_moves,
        })
    };

    #[cfg(feature = "parallel")]
    let summaries = seeds.par_iter().map(run).collect();
    #[cfg(not(feature = "parallel"))]
    let summaries = seeds.iter().map(run).collect();

    summaries
}
