//! Annealer configuration.

use crate::error::{AnnealError, Result};
use crate::network::DEFAULT_MAX_PATH_EDGES;

/// Configuration for the flow-network annealer.
///
/// Temperature decays geometrically, `T_{k+1} = T_k * (1 - cooling_rate)`,
/// once per step. The run is terminal as soon as `T < min_temperature`.
///
/// # Examples
///
/// ```
/// use u_flowanneal::sa::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_initial_temperature(12.0)
///     .with_cooling_rate(0.2)
///     .with_seed(5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Initial temperature. Recommended domain: 1 to 100.
    pub initial_temperature: f64,

    /// Fraction of the temperature removed per step, in (0, 1).
    /// Recommended domain: 0.01 to 0.99.
    pub cooling_rate: f64,

    /// Temperature below which the annealer is terminal.
    pub min_temperature: f64,

    /// Maximum number of edges in an enumerated source-to-sink path.
    pub max_path_edges: usize,

    /// Random seed for reproducibility. `None` draws a fresh seed at
    /// construction; the drawn seed is kept for [`reset`](super::Annealer::reset).
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 12.0,
            cooling_rate: 0.2,
            min_temperature: 0.01,
            max_path_edges: DEFAULT_MAX_PATH_EDGES,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_max_path_edges(mut self, n: usize) -> Self {
        self.max_path_edges = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(AnnealError::invalid(
                "initial_temperature",
                format!("must be positive and finite, got {}", self.initial_temperature),
            ));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(AnnealError::invalid(
                "cooling_rate",
                format!("must be in (0, 1), got {}", self.cooling_rate),
            ));
        }
        if !(self.min_temperature.is_finite() && self.min_temperature > 0.0) {
            return Err(AnnealError::invalid(
                "min_temperature",
                format!("must be positive, got {}", self.min_temperature),
            ));
        }
        if self.max_path_edges == 0 {
            return Err(AnnealError::invalid(
                "max_path_edges",
                "must allow at least one edge",
            ));
        }
        Ok(())
    }

    /// Number of steps a run takes before it becomes terminal.
    ///
    /// Returns `0` for an invalid configuration.
    pub fn expected_steps(&self) -> usize {
        if self.validate().is_err() {
            return 0;
        }
        let mut t = self.initial_temperature;
        let mut steps = 0;
        while t >= self.min_temperature {
            t *= 1.0 - self.cooling_rate;
            steps += 1;
        }
        steps
    }
}
