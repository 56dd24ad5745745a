//! A single user's annealing session.

use tracing::debug;

use crate::error::Result;
use crate::network::FlowNetwork;
use crate::sa::{
    AnnealConfig, AnnealResult, AnnealState, Annealer, StepOutcome, TrajectoryPoint,
    TrajectoryRecorder,
};

/// Owns everything one caller needs to drive and display a run.
///
/// A session holds two independent annealers built from the same network,
/// parameters and seed:
///
/// - a reference run, completed eagerly at construction, whose trial
///   inflow trajectory serves as a static backdrop;
/// - an interactive run, advanced one step per [`advance`](Self::advance).
///
/// Sessions share no mutable state with each other; confine each one to a
/// single owner for its lifetime.
///
/// # Examples
///
/// ```
/// use u_flowanneal::network::reference_network;
/// use u_flowanneal::sa::AnnealConfig;
/// use u_flowanneal::session::Session;
///
/// let config = AnnealConfig::default().with_seed(5);
/// let mut session = Session::new(reference_network(), config).unwrap();
/// while !session.is_complete() {
///     session.advance();
/// }
/// assert_eq!(session.trajectory().len(), session.reference().iterations);
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    network: FlowNetwork,
    config: AnnealConfig,
    reference: AnnealResult,
    annealer: Annealer,
    trajectory: TrajectoryRecorder,
}

impl Session {
    /// Builds a session and precomputes its reference run.
    ///
    /// An unset seed is drawn once here so both runs share it.
    pub fn new(network: FlowNetwork, config: AnnealConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let config = config.with_seed(seed);

        let reference = Annealer::new(&network, config.clone())?.run_to_completion();
        let annealer = Annealer::new(&network, config.clone())?;
        debug!(
            seed,
            reference_best = reference.best_inflow,
            reference_steps = reference.iterations,
            "session ready"
        );

        Ok(Self {
            network,
            config,
            reference,
            annealer,
            trajectory: TrajectoryRecorder::new(),
        })
    }

    /// Advances the interactive run by one step and records it.
    ///
    /// Once the run is complete this returns the frozen terminal outcome
    /// and records nothing.
    pub fn advance(&mut self) -> StepOutcome {
        self.annealer.step_with(&mut self.trajectory)
    }

    /// Restarts the interactive run from scratch with the same seed.
    pub fn restart(&mut self) {
        self.annealer.reset();
        self.trajectory.clear();
    }

    /// Replaces the parameters, rebuilding both runs.
    ///
    /// On error the session is left unchanged.
    pub fn reconfigure(&mut self, config: AnnealConfig) -> Result<()> {
        *self = Self::new(self.network.clone(), config)?;
        Ok(())
    }

    /// Whether the interactive run has reached its terminal temperature.
    pub fn is_complete(&self) -> bool {
        self.annealer.state() == AnnealState::Terminal
    }

    /// The precomputed reference run.
    pub fn reference(&self) -> &AnnealResult {
        &self.reference
    }

    /// Samples recorded by the interactive run since the last restart.
    pub fn trajectory(&self) -> &[TrajectoryPoint] {
        self.trajectory.points()
    }

    pub fn annealer(&self) -> &Annealer {
        &self.annealer
    }

    pub fn config(&self) -> &AnnealConfig {
        &self.config
    }

    pub fn network(&self) -> &FlowNetwork {
        &self.network
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnnealError;
    use crate::network::reference_network;

    fn session(seed: u64) -> Session {
        Session::new(reference_network(), AnnealConfig::default().with_seed(seed)).unwrap()
    }

    #[test]
    fn test_interactive_run_replays_reference() {
        let mut s = session(5);
        while !s.is_complete() {
            s.advance();
        }
        let trials: Vec<u64> = s.trajectory().iter().map(|p| p.trial_inflow).collect();
        assert_eq!(trials, s.reference().inflow_history);
        assert_eq!(s.annealer().best_inflow(), s.reference().best_inflow);
    }

    #[test]
    fn test_unset_seed_is_shared() {
        let s = Session::new(reference_network(), AnnealConfig::default()).unwrap();
        assert_eq!(s.config().seed, Some(s.annealer().seed()));
    }

    #[test]
    fn test_restart_clears_trajectory() {
        let mut s = session(3);
        for _ in 0..10 {
            s.advance();
        }
        assert_eq!(s.trajectory().len(), 10);

        s.restart();
        assert!(s.trajectory().is_empty());
        assert_eq!(s.annealer().iteration(), 0);
        assert!(!s.is_complete());
    }

    #[test]
    fn test_completed_session_stays_frozen() {
        let mut s = session(4);
        while !s.is_complete() {
            s.advance();
        }
        let len = s.trajectory().len();
        let outcome = s.advance();
        assert_eq!(outcome.temperature, 0.0);
        assert_eq!(outcome.trial_inflow, 0);
        assert_eq!(s.trajectory().len(), len);
    }

    #[test]
    fn test_reconfigure_rebuilds_reference() {
        let mut s = session(5);
        s.advance();
        s.reconfigure(AnnealConfig::default().with_cooling_rate(0.5).with_seed(5))
            .unwrap();

        assert!(s.trajectory().is_empty());
        assert_eq!(s.reference().iterations, s.config().expected_steps());
    }

    #[test]
    fn test_reconfigure_error_keeps_session() {
        let mut s = session(5);
        let before = s.reference().inflow_history.clone();
        let err = s
            .reconfigure(AnnealConfig::default().with_initial_temperature(-3.0))
            .unwrap_err();
        assert!(matches!(err, AnnealError::InvalidParameter { .. }));
        assert_eq!(s.reference().inflow_history, before);
        assert_eq!(s.config().seed, Some(5));
    }
}
