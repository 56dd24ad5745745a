//! The six-vertex demonstration network.

use super::graph::FlowNetwork;

const REFERENCE_EDGES: [(usize, usize, u64); 10] = [
    (0, 1, 10),
    (0, 2, 8),
    (0, 3, 11),
    (1, 2, 9),
    (1, 5, 3),
    (2, 4, 9),
    (2, 5, 8),
    (3, 2, 8),
    (3, 4, 12),
    (4, 5, 9),
];

/// Returns the reference network: 6 vertices, source `0`, sink `5`,
/// all flows zero. Edges entering the sink have capacities 3, 8 and 9,
/// so no assignment can push more than 20 units into it.
pub fn reference_network() -> FlowNetwork {
    let mut net = FlowNetwork::new(6).expect("reference network has 6 vertices");
    for (tail, head, capacity) in REFERENCE_EDGES {
        net.add_edge(tail, head, capacity)
            .expect("reference edges are valid");
    }
    net
}
