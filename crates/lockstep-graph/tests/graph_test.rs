use lockstep_graph::{Error, Graph, NodeId, Point};

fn neighbor_ids(graph: &Graph, node: NodeId) -> Vec<NodeId> {
    graph.neighbors(node).map(|(n, _)| n).collect()
}

#[test]
fn add_node_assigns_sequential_auto_names_in_insertion_order() {
    let mut g = Graph::new();
    let a = g.add_node(Point::new(10.0, 10.0));
    let b = g.add_node(Point::new(20.0, 20.0));

    assert_eq!(g.node(a).map(|n| n.name.as_str()), Some("NewNode0"));
    assert_eq!(g.node(b).map(|n| n.name.as_str()), Some("NewNode1"));
    let order: Vec<NodeId> = g.nodes().map(|(id, _)| id).collect();
    assert_eq!(order, vec![a, b]);
}

#[test]
fn add_edge_is_symmetric_and_starts_at_weight_zero() {
    let mut g = Graph::new();
    let a = g.add_node(Point::default());
    let b = g.add_node(Point::default());
    let e = g.add_edge(a, b).unwrap();

    assert_eq!(g.edge_between(a, b), Some(e));
    assert_eq!(g.edge_between(b, a), Some(e));
    assert_eq!(g.edge(e).map(|edge| edge.weight()), Some(0));
    assert_eq!(g.edge(e).map(|edge| edge.endpoints()), Some((a, b)));
}

#[test]
fn add_edge_rejects_self_loops_and_absent_nodes() {
    let mut g = Graph::new();
    let a = g.add_node(Point::default());
    let b = g.add_node(Point::default());
    let ghost = {
        let mut other = Graph::new();
        other.add_node(Point::default());
        other.add_node(Point::default());
        other.add_node(Point::default());
        other.add_node(Point::default()) // an id the first graph never issued
    };

    assert_eq!(g.add_edge(a, a), Err(Error::SelfLoop));
    assert_eq!(g.add_edge(a, ghost), Err(Error::MissingNode(ghost)));
    assert_eq!(g.add_edge(ghost, b), Err(Error::MissingNode(ghost)));
}

#[test]
fn neighbors_iterate_in_edge_creation_order() {
    let mut g = Graph::new();
    let a = g.add_node(Point::default());
    let b = g.add_node(Point::default());
    let c = g.add_node(Point::default());
    let d = g.add_node(Point::default());
    g.add_edge(a, c).unwrap();
    g.add_edge(a, b).unwrap();
    g.add_edge(a, d).unwrap();

    assert_eq!(neighbor_ids(&g, a), vec![c, b, d]);
}

#[test]
fn re_adding_an_existing_pair_replaces_the_edge_in_place() {
    let mut g = Graph::new();
    let a = g.add_node(Point::default());
    let b = g.add_node(Point::default());
    let c = g.add_node(Point::default());
    let first = g.add_edge(a, b).unwrap();
    g.add_edge(a, c).unwrap();
    g.set_weight(first, 7).unwrap();

    let replacement = g.add_edge(a, b).unwrap();

    assert_ne!(first, replacement);
    assert!(g.edge(first).is_none());
    assert_eq!(g.edge(replacement).map(|e| e.weight()), Some(0));
    assert_eq!(g.edge_count(), 2);
    // The pair keeps its original adjacency position.
    assert_eq!(neighbor_ids(&g, a), vec![b, c]);
}

#[test]
fn delete_edge_removes_both_adjacency_entries_and_preserves_order() {
    let mut g = Graph::new();
    let a = g.add_node(Point::default());
    let b = g.add_node(Point::default());
    let c = g.add_node(Point::default());
    let ab = g.add_edge(a, b).unwrap();
    g.add_edge(a, c).unwrap();
    g.add_edge(b, c).unwrap();

    g.delete_edge(ab);

    assert_eq!(g.edge_between(a, b), None);
    assert_eq!(g.edge_between(b, a), None);
    assert_eq!(neighbor_ids(&g, a), vec![c]);
    assert_eq!(neighbor_ids(&g, b), vec![c]);
    assert_eq!(g.edge_count(), 2);

    // Deleting again is a no-op.
    g.delete_edge(ab);
    assert_eq!(g.edge_count(), 2);
}

#[test]
fn delete_node_removes_incident_edges_first() {
    let mut g = Graph::new();
    let a = g.add_node(Point::default());
    let b = g.add_node(Point::default());
    let c = g.add_node(Point::default());
    g.add_edge(a, b).unwrap();
    g.add_edge(b, c).unwrap();
    let ac = g.add_edge(a, c).unwrap();

    g.delete_node(b);

    assert!(!g.has_node(b));
    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.edge_between(a, c), Some(ac));
    assert_eq!(neighbor_ids(&g, a), vec![c]);
    assert_eq!(neighbor_ids(&g, c), vec![a]);
}

#[test]
fn set_weight_rejects_negative_weights_and_absent_edges() {
    let mut g = Graph::new();
    let a = g.add_node(Point::default());
    let b = g.add_node(Point::default());
    let e = g.add_edge(a, b).unwrap();

    assert_eq!(g.set_weight(e, -1), Err(Error::NegativeWeight(-1)));
    assert_eq!(g.edge(e).map(|edge| edge.weight()), Some(0));

    g.set_weight(e, 5).unwrap();
    assert_eq!(g.edge(e).map(|edge| edge.weight()), Some(5));

    g.delete_edge(e);
    assert_eq!(g.set_weight(e, 5), Err(Error::MissingEdge(e)));
}

#[test]
fn rename_node_requires_an_existing_node() {
    let mut g = Graph::new();
    let a = g.add_node(Point::default());

    g.rename_node(a, "Depot").unwrap();
    assert_eq!(g.node(a).map(|n| n.name.as_str()), Some("Depot"));

    g.delete_node(a);
    assert_eq!(g.rename_node(a, "Gone"), Err(Error::MissingNode(a)));
}

#[test]
fn snapshot_is_isolated_from_live_graph_edits() {
    let mut live = Graph::new();
    let a = live.add_node(Point::default());
    let b = live.add_node(Point::default());
    let ab = live.add_edge(a, b).unwrap();
    live.set_weight(ab, 3).unwrap();

    let snapshot = live.clone();

    live.set_weight(ab, 99).unwrap();
    live.delete_node(b);

    assert_eq!(snapshot.node_count(), 2);
    assert_eq!(snapshot.edge(ab).map(|e| e.weight()), Some(3));
    assert_eq!(snapshot.edge_between(a, b), Some(ab));
}
