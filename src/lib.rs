//! Simulated annealing for flow assignments on capacitated networks.
//!
//! Approximately maximizes the flow reaching a designated sink by
//! annealing over source-to-sink path assignments:
//!
//! - **Network**: an index-addressed edge arena with per-edge capacity
//!   and flow, plus exhaustive simple-path enumeration up to a length
//!   cutoff.
//! - **Simulated Annealing (SA)**: a pull-driven [`sa::Annealer`] that
//!   samples a path, enforces path-level conservation by zeroing every
//!   overlapping live path, and applies the Metropolis criterion under
//!   geometric cooling.
//! - **Session**: per-caller ownership of an interactive run, its
//!   reference run and trajectory buffer, and seed sweeps.
//!
//! This is not an exact max-flow solver: the objective sums inflow at the
//! sink without verifying conservation at interior vertices, and no
//! optimality guarantee is given.
//!
//! # Examples
//!
//! ```
//! use u_flowanneal::network::reference_network;
//! use u_flowanneal::sa::{AnnealConfig, Annealer};
//!
//! let net = reference_network();
//! let mut annealer = Annealer::new(&net, AnnealConfig::default().with_seed(5)).unwrap();
//! let result = annealer.run_to_completion();
//! assert!(result.best_inflow <= net.total_sink_capacity());
//! ```

pub mod error;
pub mod network;
pub mod sa;
pub mod session;

pub use error::{AnnealError, Result};
