//! Source-to-sink path enumeration.

use super::graph::{EdgeId, FlowNetwork, VertexId};

/// Default maximum number of edges in an enumerated path.
pub const DEFAULT_MAX_PATH_EDGES: usize = 9;

/// A simple source-to-sink path, stored as an ordered list of edge indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    edges: Vec<EdgeId>,
}

impl Path {
    /// Creates a path from edge indices.
    pub fn new(edges: Vec<EdgeId>) -> Self {
        Self { edges }
    }

    /// Edge indices from source to sink.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Number of edges (hops).
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` for the empty path.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Minimum capacity over the path's edges.
    ///
    /// Returns `0` for an empty path.
    pub fn bottleneck(&self, network: &FlowNetwork) -> u64 {
        self.edges
            .iter()
            .map(|&e| network.edge(e).capacity)
            .min()
            .unwrap_or(0)
    }

    /// Returns `true` if the two paths share at least one edge.
    pub fn conflicts_with(&self, other: &Path) -> bool {
        self.edges.iter().any(|e| other.edges.contains(e))
    }

    /// Vertex sequence visited by the path.
    pub fn vertices(&self, network: &FlowNetwork) -> Vec<VertexId> {
        let mut out = Vec::with_capacity(self.edges.len() + 1);
        if let Some(&first) = self.edges.first() {
            out.push(network.edge(first).tail);
        }
        out.extend(self.edges.iter().map(|&e| network.edge(e).head));
        out
    }

    /// Sets the flow of every edge on the path to `flow`.
    pub fn assign(&self, network: &mut FlowNetwork, flow: u64) {
        for &e in &self.edges {
            network.set_flow(e, flow);
        }
    }
}

/// Enumerates every simple source-to-sink path with at most `max_edges` edges.
///
/// Depth-first over outgoing edges in insertion order, so the result is
/// deterministic for a given network.
///
/// # Examples
///
/// ```
/// use u_flowanneal::network::{enumerate_paths, reference_network};
///
/// let net = reference_network();
/// let paths = enumerate_paths(&net, 9);
/// assert!(!paths.is_empty());
/// ```
pub fn enumerate_paths(network: &FlowNetwork, max_edges: usize) -> Vec<Path> {
    let mut paths = Vec::new();
    let mut on_path = vec![false; network.vertex_count()];
    let mut stack = Vec::with_capacity(max_edges);

    on_path[network.source()] = true;
    extend(
        network,
        network.source(),
        max_edges,
        &mut on_path,
        &mut stack,
        &mut paths,
    );
    paths
}

fn extend(
    network: &FlowNetwork,
    vertex: VertexId,
    max_edges: usize,
    on_path: &mut [bool],
    stack: &mut Vec<EdgeId>,
    paths: &mut Vec<Path>,
) {
    if stack.len() >= max_edges {
        return;
    }
    for id in network.outgoing(vertex) {
        let head = network.edge(id).head;
        if on_path[head] {
            continue;
        }
        stack.push(id);
        if head == network.sink() {
            paths.push(Path::new(stack.clone()));
        } else {
            on_path[head] = true;
            extend(network, head, max_edges, on_path, stack, paths);
            on_path[head] = false;
        }
        stack.pop();
    }
}
