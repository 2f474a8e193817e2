//! Prim's minimum spanning tree, one annexed edge per step.
//!
//! The candidate scan iterates visited nodes in visit order and each node's
//! adjacency in insertion order, comparing with strict `<`, so the first
//! minimal edge encountered wins ties. The visited/chosen logs double as the
//! undo history: `retreat()` pops the last entry of both.

use crate::{Highlights, Step, Walkthrough};
use lockstep_graph::{EdgeId, Graph, NodeId};

pub struct Prims {
    graph: Graph,
    visited: Vec<NodeId>,
    chosen: Vec<EdgeId>,
    highlights: Highlights,
}

impl Prims {
    pub fn new(graph: Graph, start: NodeId) -> Self {
        Self {
            graph,
            visited: vec![start],
            chosen: Vec::new(),
            highlights: Highlights::default(),
        }
    }

    /// Nodes in the order they were annexed (the start node first).
    pub fn visited(&self) -> &[NodeId] {
        &self.visited
    }

    /// Accepted edges in acceptance order; always one shorter than `visited`.
    pub fn chosen(&self) -> &[EdgeId] {
        &self.chosen
    }

    pub fn total_weight(&self) -> i64 {
        self.chosen
            .iter()
            .filter_map(|&edge| self.graph.edge(edge))
            .map(|edge| edge.weight())
            .sum()
    }

    pub fn advance(&mut self) -> Step {
        if self.visited.len() == self.graph.node_count() {
            return Step::Finished;
        }

        let mut choice: Option<(NodeId, EdgeId, i64)> = None;
        for &node in &self.visited {
            for (dest, edge) in self.graph.neighbors(node) {
                if self.visited.contains(&dest) {
                    continue;
                }
                let Some(e) = self.graph.edge(edge) else {
                    continue;
                };
                if choice.is_none_or(|(_, _, best)| e.weight() < best) {
                    choice = Some((dest, edge, e.weight()));
                }
            }
        }

        // Unvisited nodes remain but none is reachable from the visited set:
        // the input is disconnected, so the walkthrough terminates here.
        let Some((dest, edge, weight)) = choice else {
            return Step::Finished;
        };

        self.visited.push(dest);
        self.chosen.push(edge);
        self.highlights.mark_node(dest);
        self.highlights.mark_edge(edge);
        tracing::debug!(?dest, ?edge, weight, "prim annexes edge");
        Step::Advanced
    }

    pub fn retreat(&mut self) {
        // No-op at the initial single-node state.
        if self.chosen.is_empty() {
            return;
        }
        if let Some(edge) = self.chosen.pop() {
            self.highlights.unmark_edge(edge);
        }
        if let Some(node) = self.visited.pop() {
            self.highlights.unmark_node(node);
        }
    }

    pub fn cleanup(&mut self) {
        self.highlights.clear();
    }
}

impl Walkthrough for Prims {
    fn advance(&mut self) -> Step {
        Prims::advance(self)
    }

    fn retreat(&mut self) {
        Prims::retreat(self);
    }

    fn cleanup(&mut self) {
        Prims::cleanup(self);
    }

    fn highlights(&self) -> &Highlights {
        &self.highlights
    }
}
