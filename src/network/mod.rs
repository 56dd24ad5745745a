//! Capacitated flow networks.
//!
//! A [`FlowNetwork`] is an arena of fixed-shape edge records addressed by
//! integer index. Vertices are plain integers `0..N`; vertex `0` is the
//! source and vertex `N - 1` the sink. Cloning a network yields an
//! independent snapshot: capacities and topology are shared by value,
//! flow values diverge freely afterwards.
//!
//! Source-to-sink [`Path`]s are enumerated once with [`enumerate_paths`]
//! and then serve as the sampling universe for the annealer.

mod graph;
mod path;
mod reference;

pub use graph::{Edge, EdgeId, FlowNetwork, VertexId};
pub use path::{enumerate_paths, Path, DEFAULT_MAX_PATH_EDGES};
pub use reference::reference_network;
