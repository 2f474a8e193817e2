#![allow(dead_code)]

use lockstep_graph::{EdgeId, Graph, NodeId, Point};

/// Four fully connected nodes; edges created in order N0-N1=1, N0-N2=2,
/// N0-N3=3, N1-N2=4, N1-N3=5, N2-N3=6.
pub fn square() -> (Graph, Vec<NodeId>, Vec<EdgeId>) {
    let mut g = Graph::new();
    let nodes: Vec<NodeId> = (0..4)
        .map(|i| g.add_node(Point::new(f64::from(i) * 40.0, 10.0)))
        .collect();
    let pairs = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
    let mut edges = Vec::new();
    for (i, (a, b)) in pairs.into_iter().enumerate() {
        let e = g.add_edge(nodes[a], nodes[b]).unwrap();
        g.set_weight(e, i as i64 + 1).unwrap();
        edges.push(e);
    }
    (g, nodes, edges)
}

/// Two components: a weighted triangle (nodes 0-2) and a separate pair
/// (nodes 3-4).
pub fn disconnected() -> (Graph, Vec<NodeId>, Vec<EdgeId>) {
    let mut g = Graph::new();
    let nodes: Vec<NodeId> = (0..5)
        .map(|i| g.add_node(Point::new(f64::from(i) * 30.0, 0.0)))
        .collect();
    let weighted_pairs = [(0, 1, 1), (1, 2, 2), (0, 2, 3), (3, 4, 4)];
    let mut edges = Vec::new();
    for (a, b, w) in weighted_pairs {
        let e = g.add_edge(nodes[a], nodes[b]).unwrap();
        g.set_weight(e, w).unwrap();
        edges.push(e);
    }
    (g, nodes, edges)
}
