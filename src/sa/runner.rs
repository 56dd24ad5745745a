//! Annealer state machine.
//!
//! # Algorithm
//!
//! Each step while running:
//!
//! 1. Decay the temperature, `T <- T * (1 - a)`
//! 2. Snapshot the visited-path set
//! 3. Clone the best network, sample a path uniformly, draw a flow in
//!    `[1, bottleneck]`, zero every live path overlapping it, assign the flow
//! 4. Accept if the trial inflow is not worse; otherwise accept with
//!    probability `exp((trial - best) / T)`
//! 5. On rejection, restore the visited-path snapshot
//!
//! Once `T < min_temperature` a step returns `(0, best, network, 0)` and
//! changes nothing.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::config::AnnealConfig;
use super::conflict::VisitedPaths;
use super::monitor::{AnnealMonitor, NoOpMonitor};
use super::types::{AnnealResult, AnnealState, StepOutcome};
use crate::error::{AnnealError, Result};
use crate::network::{enumerate_paths, FlowNetwork, Path};

/// Probability of accepting a trial whose inflow differs from the best by
/// `delta` at temperature `temperature`.
///
/// Non-negative deltas are always accepted.
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta >= 0.0 {
        1.0
    } else if temperature > 0.0 {
        (delta / temperature).exp()
    } else {
        0.0
    }
}

/// Metropolis criterion for a maximization objective.
///
/// Returns `true` without drawing when `trial >= best`; otherwise draws
/// `p` uniformly from `[0, 1)` and accepts iff `p < exp((trial - best) / T)`.
pub fn metropolis_accept<R: Rng>(trial: u64, best: u64, temperature: f64, rng: &mut R) -> bool {
    if trial >= best {
        return true;
    }
    let delta = trial as f64 - best as f64;
    let threshold = acceptance_probability(delta, temperature);
    rng.random_range(0.0..1.0) < threshold
}

/// Simulated annealing over source-to-sink path flow assignments.
///
/// Driven one step at a time by the caller; see the module docs for the
/// per-step algorithm.
///
/// # Examples
///
/// ```
/// use u_flowanneal::network::reference_network;
/// use u_flowanneal::sa::{AnnealConfig, AnnealState, Annealer};
///
/// let net = reference_network();
/// let config = AnnealConfig::default().with_seed(5);
/// let mut annealer = Annealer::new(&net, config).unwrap();
///
/// while annealer.state() == AnnealState::Running {
///     let outcome = annealer.step();
///     assert!(outcome.best_inflow <= net.total_sink_capacity());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Annealer {
    config: AnnealConfig,
    seed: u64,
    paths: Vec<Path>,
    initial_network: FlowNetwork,

    best_network: FlowNetwork,
    best_inflow: u64,
    temperature: f64,
    visited: VisitedPaths,

    iteration: usize,
    accepted_moves: usize,
    improving_moves: usize,
    rng: StdRng,
}

impl Annealer {
    /// Builds an annealer over a copy of `network` with all flows cleared.
    ///
    /// # Errors
    ///
    /// - [`AnnealError::InvalidParameter`] if `network` or `config` fails
    ///   validation.
    /// - [`AnnealError::Configuration`] if no source-to-sink path exists
    ///   within `config.max_path_edges` edges.
    pub fn new(network: &FlowNetwork, config: AnnealConfig) -> Result<Self> {
        network.validate()?;
        config.validate()?;

        let mut initial_network = network.clone();
        initial_network.clear_all_flow();

        let paths = enumerate_paths(&initial_network, config.max_path_edges);
        if paths.is_empty() {
            return Err(AnnealError::Configuration(format!(
                "no path from {} to {} within {} edges",
                initial_network.source(),
                initial_network.sink(),
                config.max_path_edges
            )));
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        debug!(
            paths = paths.len(),
            edges = initial_network.edge_count(),
            seed,
            initial_temperature = config.initial_temperature,
            cooling_rate = config.cooling_rate,
            "annealer constructed"
        );

        Ok(Self {
            best_network: initial_network.clone(),
            best_inflow: 0,
            temperature: config.initial_temperature,
            visited: VisitedPaths::new(),
            iteration: 0,
            accepted_moves: 0,
            improving_moves: 0,
            rng: StdRng::seed_from_u64(seed),
            config,
            seed,
            paths,
            initial_network,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AnnealState {
        if self.temperature < self.config.min_temperature {
            AnnealState::Terminal
        } else {
            AnnealState::Running
        }
    }

    /// Advances the search by one step.
    pub fn step(&mut self) -> StepOutcome {
        self.step_with(&mut NoOpMonitor)
    }

    /// Advances by one step, reporting a non-terminal outcome to `monitor`.
    pub fn step_with<M: AnnealMonitor>(&mut self, monitor: &mut M) -> StepOutcome {
        if self.state() == AnnealState::Terminal {
            return self.terminal_outcome();
        }
        let outcome = self.advance();
        monitor.on_step(&outcome);
        if self.state() == AnnealState::Terminal {
            debug!(
                iterations = self.iteration,
                best_inflow = self.best_inflow,
                "annealer reached terminal temperature"
            );
        }
        outcome
    }

    /// Steps until terminal and returns the final best state.
    pub fn run_to_completion(&mut self) -> AnnealResult {
        self.run_with_monitor(&mut NoOpMonitor)
    }

    /// Like [`run_to_completion`](Self::run_to_completion), reporting every
    /// step to `monitor`.
    pub fn run_with_monitor<M: AnnealMonitor>(&mut self, monitor: &mut M) -> AnnealResult {
        monitor.on_start(self);

        let mut inflow_history = Vec::with_capacity(self.config.expected_steps());
        while self.state() == AnnealState::Running {
            let outcome = self.advance();
            inflow_history.push(outcome.trial_inflow);
            monitor.on_step(&outcome);
        }

        let result = AnnealResult {
            best_inflow: self.best_inflow,
            best_network: self.best_network.clone(),
            iterations: self.iteration,
            accepted_moves: self.accepted_moves,
            improving_moves: self.improving_moves,
            final_temperature: self.temperature,
            inflow_history,
        };
        debug!(
            iterations = result.iterations,
            best_inflow = result.best_inflow,
            accepted = result.accepted_moves,
            "annealing run complete"
        );
        monitor.on_end(&result);
        result
    }

    /// Restores the just-constructed state and reseeds with the construction seed.
    ///
    /// Path enumeration is kept.
    pub fn reset(&mut self) {
        self.best_network = self.initial_network.clone();
        self.best_inflow = 0;
        self.temperature = self.config.initial_temperature;
        self.visited.clear();
        self.iteration = 0;
        self.accepted_moves = 0;
        self.improving_moves = 0;
        self.rng = StdRng::seed_from_u64(self.seed);
        debug!(seed = self.seed, "annealer reset");
    }

    /// Resets and switches to a new random seed.
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.config.seed = Some(seed);
        self.reset();
    }

    pub fn config(&self) -> &AnnealConfig {
        &self.config
    }

    /// Seed driving this annealer's random stream.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn best_inflow(&self) -> u64 {
        self.best_inflow
    }

    pub fn best_network(&self) -> &FlowNetwork {
        &self.best_network
    }

    /// Paths currently holding flow in the best network.
    pub fn visited_paths(&self) -> &VisitedPaths {
        &self.visited
    }

    /// The enumerated sampling universe.
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Number of non-terminal steps taken since construction or reset.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn accepted_moves(&self) -> usize {
        self.accepted_moves
    }

    pub fn improving_moves(&self) -> usize {
        self.improving_moves
    }

    fn terminal_outcome(&self) -> StepOutcome {
        StepOutcome {
            iteration: self.iteration,
            trial_inflow: 0,
            best_inflow: self.best_inflow,
            best_network: self.best_network.clone(),
            temperature: 0.0,
            accepted: false,
        }
    }

    /// One running step. Does not check the terminal condition.
    fn advance(&mut self) -> StepOutcome {
        self.temperature *= 1.0 - self.config.cooling_rate;
        self.iteration += 1;

        let snapshot = self.visited.clone();
        let (trial_network, trial_inflow) = self.successor();

        let accepted = metropolis_accept(
            trial_inflow,
            self.best_inflow,
            self.temperature,
            &mut self.rng,
        );
        if accepted {
            if trial_inflow > self.best_inflow {
                self.improving_moves += 1;
            }
            self.accepted_moves += 1;
            self.best_network = trial_network;
            self.best_inflow = trial_inflow;
        } else {
            self.visited = snapshot;
        }

        trace!(
            iteration = self.iteration,
            temperature = self.temperature,
            trial_inflow,
            best_inflow = self.best_inflow,
            accepted,
            "annealing step"
        );

        StepOutcome {
            iteration: self.iteration,
            trial_inflow,
            best_inflow: self.best_inflow,
            best_network: self.best_network.clone(),
            temperature: self.temperature,
            accepted,
        }
    }

    /// Builds a trial network from the best one by reassigning one sampled path.
    fn successor(&mut self) -> (FlowNetwork, u64) {
        let mut trial = self.best_network.clone();

        let index = self.rng.random_range(0..self.paths.len());
        let path = &self.paths[index];
        let bottleneck = path.bottleneck(&trial);
        let flow = self.rng.random_range(1..=bottleneck);

        self.visited.resolve_conflicts(index, &self.paths, &mut trial);
        path.assign(&mut trial, flow);
        self.visited.insert(index);

        let inflow = trial.sink_inflow();
        (trial, inflow)
    }
}
