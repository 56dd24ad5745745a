//! Edge arena and flow bookkeeping.

use crate::error::{AnnealError, Result};

/// Vertex identifier (rank in `0..vertex_count`).
pub type VertexId = usize;

/// Edge identifier (index into the edge arena).
pub type EdgeId = usize;

/// A directed, capacitated edge carrying a mutable flow value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// Tail vertex.
    pub tail: VertexId,
    /// Head vertex.
    pub head: VertexId,
    /// Fixed upper bound, always positive.
    pub capacity: u64,
    /// Flow currently assigned by the search.
    pub flow: u64,
}

/// A directed graph with per-edge capacity and flow.
///
/// # Examples
///
/// ```
/// use u_flowanneal::network::FlowNetwork;
///
/// let mut net = FlowNetwork::from_edges(3, &[(0, 1, 4), (1, 2, 3)]).unwrap();
/// let e = net.find_edge(1, 2).unwrap();
/// net.set_flow(e, 3);
/// assert_eq!(net.sink_inflow(), 3);
/// ```
///
/// Deserialization runs the same checks as [`FlowNetwork::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawFlowNetwork"))]
pub struct FlowNetwork {
    vertex_count: usize,
    edges: Vec<Edge>,
}

impl FlowNetwork {
    /// Creates an edgeless network over `vertex_count` vertices.
    pub fn new(vertex_count: usize) -> Result<Self> {
        check_vertex_count(vertex_count)?;
        Ok(Self {
            vertex_count,
            edges: Vec::new(),
        })
    }

    /// Builds a network from `(tail, head, capacity)` triples. All flows start at zero.
    pub fn from_edges(vertex_count: usize, edges: &[(VertexId, VertexId, u64)]) -> Result<Self> {
        let mut net = Self::new(vertex_count)?;
        for &(tail, head, capacity) in edges {
            net.add_edge(tail, head, capacity)?;
        }
        Ok(net)
    }

    /// Adds a directed edge with zero flow and returns its index.
    pub fn add_edge(&mut self, tail: VertexId, head: VertexId, capacity: u64) -> Result<EdgeId> {
        check_edge(self.vertex_count, &self.edges, tail, head, capacity)?;
        self.edges.push(Edge {
            tail,
            head,
            capacity,
            flow: 0,
        });
        Ok(self.edges.len() - 1)
    }

    /// Re-checks every structural invariant: at least two vertices, edge
    /// endpoints in range, no self-loops, no duplicate edges and positive
    /// capacities.
    ///
    /// Networks built through [`new`](Self::new) and
    /// [`add_edge`](Self::add_edge) always pass.
    pub fn validate(&self) -> Result<()> {
        check_vertex_count(self.vertex_count)?;
        for (i, e) in self.edges.iter().enumerate() {
            check_edge(self.vertex_count, &self.edges[..i], e.tail, e.head, e.capacity)?;
        }
        Ok(())
    }

    /// Assembles a network without any checks.
    #[cfg(any(test, feature = "serde"))]
    pub(crate) fn from_parts_unchecked(vertex_count: usize, edges: Vec<Edge>) -> Self {
        Self {
            vertex_count,
            edges,
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The source vertex (always `0`).
    pub fn source(&self) -> VertexId {
        0
    }

    /// The sink vertex (always `vertex_count - 1`).
    pub fn sink(&self) -> VertexId {
        self.vertex_count - 1
    }

    /// Returns the edge record at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id]
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Looks up the edge `tail -> head`.
    pub fn find_edge(&self, tail: VertexId, head: VertexId) -> Option<EdgeId> {
        self.edges
            .iter()
            .position(|e| e.tail == tail && e.head == head)
    }

    /// Outgoing edges of `vertex`, in insertion order.
    pub fn outgoing(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.tail == vertex)
            .map(|(id, _)| id)
    }

    /// Sets the flow on one edge.
    ///
    /// The value is not checked against the edge capacity.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    pub fn set_flow(&mut self, id: EdgeId, flow: u64) {
        self.edges[id].flow = flow;
    }

    /// Resets every edge's flow to zero.
    pub fn clear_all_flow(&mut self) {
        for edge in &mut self.edges {
            edge.flow = 0;
        }
    }

    /// Total flow on edges entering the sink.
    ///
    /// This is the search objective. Conservation at interior vertices is
    /// not checked, so the value is a proxy for delivered flow rather than
    /// a certified feasible flow value. Saturates at `u64::MAX`.
    pub fn sink_inflow(&self) -> u64 {
        let sink = self.sink();
        self.edges
            .iter()
            .filter(|e| e.head == sink)
            .fold(0u64, |acc, e| acc.saturating_add(e.flow))
    }

    /// Sum of capacities on edges entering the sink; an upper bound on
    /// [`sink_inflow`](Self::sink_inflow).
    pub fn total_sink_capacity(&self) -> u64 {
        let sink = self.sink();
        self.edges
            .iter()
            .filter(|e| e.head == sink)
            .fold(0u64, |acc, e| acc.saturating_add(e.capacity))
    }

    /// Returns `true` if any edge carries more flow than its capacity.
    pub fn exceeds_capacity(&self) -> bool {
        self.edges.iter().any(|e| e.flow > e.capacity)
    }

    /// Returns `true` if both networks have identical vertices, edges and
    /// capacities, ignoring flow.
    pub fn same_topology(&self, other: &FlowNetwork) -> bool {
        self.vertex_count == other.vertex_count
            && self.edges.len() == other.edges.len()
            && self
                .edges
                .iter()
                .zip(&other.edges)
                .all(|(a, b)| a.tail == b.tail && a.head == b.head && a.capacity == b.capacity)
    }
}

fn check_vertex_count(vertex_count: usize) -> Result<()> {
    if vertex_count < 2 {
        return Err(AnnealError::invalid(
            "vertex_count",
            format!("need at least a source and a sink, got {vertex_count}"),
        ));
    }
    Ok(())
}

/// Checks one edge against the vertex range and the edges before it.
fn check_edge(
    vertex_count: usize,
    existing: &[Edge],
    tail: VertexId,
    head: VertexId,
    capacity: u64,
) -> Result<()> {
    if tail >= vertex_count || head >= vertex_count {
        return Err(AnnealError::invalid(
            "edge",
            format!("({tail}, {head}) references a vertex outside 0..{vertex_count}"),
        ));
    }
    if tail == head {
        return Err(AnnealError::invalid(
            "edge",
            format!("self-loop on vertex {tail}"),
        ));
    }
    if capacity == 0 {
        return Err(AnnealError::invalid(
            "capacity",
            format!("edge ({tail}, {head}) must have positive capacity"),
        ));
    }
    if existing.iter().any(|e| e.tail == tail && e.head == head) {
        return Err(AnnealError::invalid(
            "edge",
            format!("duplicate edge ({tail}, {head})"),
        ));
    }
    Ok(())
}

/// Unchecked wire shape of a [`FlowNetwork`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawFlowNetwork {
    vertex_count: usize,
    edges: Vec<Edge>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawFlowNetwork> for FlowNetwork {
    type Error = AnnealError;

    fn try_from(raw: RawFlowNetwork) -> Result<Self> {
        let net = Self::from_parts_unchecked(raw.vertex_count, raw.edges);
        net.validate()?;
        Ok(net)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> FlowNetwork {
        FlowNetwork::from_edges(4, &[(0, 1, 5), (0, 2, 4), (1, 3, 3), (2, 3, 6)]).unwrap()
    }

    #[test]
    fn test_source_and_sink() {
        let net = diamond();
        assert_eq!(net.source(), 0);
        assert_eq!(net.sink(), 3);
        assert_eq!(net.edge_count(), 4);
    }

    #[test]
    fn test_rejects_too_few_vertices() {
        assert!(FlowNetwork::new(1).is_err());
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = FlowNetwork::from_edges(2, &[(0, 1, 0)]).unwrap_err();
        assert!(matches!(
            err,
            AnnealError::InvalidParameter {
                name: "capacity",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_out_of_range_and_self_loop() {
        assert!(FlowNetwork::from_edges(2, &[(0, 2, 1)]).is_err());
        assert!(FlowNetwork::from_edges(2, &[(1, 1, 1)]).is_err());
    }

    #[test]
    fn test_rejects_duplicate_edge() {
        assert!(FlowNetwork::from_edges(2, &[(0, 1, 1), (0, 1, 2)]).is_err());
    }

    #[test]
    fn test_sink_inflow_counts_only_sink_edges() {
        let mut net = diamond();
        net.set_flow(0, 5);
        net.set_flow(2, 3);
        net.set_flow(3, 2);
        assert_eq!(net.sink_inflow(), 5);
        assert_eq!(net.total_sink_capacity(), 9);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut base = diamond();
        base.set_flow(2, 1);
        let mut copy = base.clone();
        copy.set_flow(2, 3);
        copy.set_flow(3, 6);

        assert_eq!(base.edge(2).flow, 1);
        assert_eq!(base.edge(3).flow, 0);
        assert!(base.same_topology(&copy));
    }

    #[test]
    fn test_clear_all_flow() {
        let mut net = diamond();
        for id in 0..net.edge_count() {
            net.set_flow(id, 1);
        }
        net.clear_all_flow();
        assert!(net.edges().iter().all(|e| e.flow == 0));
        assert_eq!(net.sink_inflow(), 0);
    }

    #[test]
    fn test_set_flow_is_unchecked() {
        let mut net = diamond();
        net.set_flow(2, 100);
        assert!(net.exceeds_capacity());
    }

    #[test]
    fn test_outgoing_preserves_insertion_order() {
        let net = diamond();
        let out: Vec<EdgeId> = net.outgoing(0).collect();
        assert_eq!(out, vec![0, 1]);
    }

    #[test]
    fn test_validate_accepts_built_network() {
        assert!(diamond().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unchecked_parts() {
        let edge = |tail, head, capacity| Edge {
            tail,
            head,
            capacity,
            flow: 0,
        };
        let cases = [
            (0, vec![]),
            (1, vec![]),
            (2, vec![edge(0, 1, 0)]),
            (2, vec![edge(0, 2, 1)]),
            (2, vec![edge(1, 1, 1)]),
            (2, vec![edge(0, 1, 1), edge(0, 1, 3)]),
        ];
        for (vertex_count, edges) in cases {
            let net = FlowNetwork::from_parts_unchecked(vertex_count, edges);
            assert!(
                matches!(net.validate(), Err(AnnealError::InvalidParameter { .. })),
                "accepted {net:?}"
            );
        }
    }

    #[test]
    fn test_sink_inflow_saturates() {
        let mut net = diamond();
        net.set_flow(2, u64::MAX);
        net.set_flow(3, u64::MAX);
        assert_eq!(net.sink_inflow(), u64::MAX);
    }

    #[test]
    #[should_panic]
    fn test_set_flow_out_of_range_panics() {
        let mut net = diamond();
        net.set_flow(net.edge_count(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_zero_capacity() {
        let json = r#"{"vertex_count":2,"edges":[{"tail":0,"head":1,"capacity":0,"flow":0}]}"#;
        assert!(serde_json::from_str::<FlowNetwork>(json).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_zero_vertices() {
        let json = r#"{"vertex_count":0,"edges":[]}"#;
        assert!(serde_json::from_str::<FlowNetwork>(json).is_err());
    }
}
