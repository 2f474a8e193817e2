//! Kruskal's minimum spanning tree, one accepted edge per step.
//!
//! Candidates are all not-yet-chosen edges, stable-sorted ascending by weight
//! so ties keep edge-creation order. A candidate is rejected when its
//! endpoints are already connected through chosen edges, decided by running a
//! complete depth-first traversal over the chosen-only subgraph; the first
//! candidate that does not close a cycle is accepted. The subgraph traversal
//! is kept instead of union-find because the acceptance order and the
//! per-candidate accept/reject outcomes are observable behavior.

use crate::{DepthFirst, Highlights, Step, Walkthrough};
use lockstep_graph::{EdgeId, Graph, NodeId};

pub struct Kruskals {
    graph: Graph,
    visited: Vec<NodeId>,
    chosen: Vec<EdgeId>,
    highlights: Highlights,
}

impl Kruskals {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            visited: Vec::new(),
            chosen: Vec::new(),
            highlights: Highlights::default(),
        }
    }

    /// Endpoints of accepted edges in first-occurrence order.
    pub fn visited(&self) -> &[NodeId] {
        &self.visited
    }

    /// Accepted edges in acceptance order.
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

    /// True when accepting `a`–`b` would close a cycle: `b` is already
    /// reachable from `a` using chosen edges only.
    fn closes_cycle(&self, a: NodeId, b: NodeId) -> bool {
        let mut subgraph = self.graph.clone();
        let not_chosen: Vec<EdgeId> = subgraph
            .edges()
            .map(|(id, _)| id)
            .filter(|id| !self.chosen.contains(id))
            .collect();
        for edge in not_chosen {
            subgraph.delete_edge(edge);
        }

        let mut walk = DepthFirst::new(subgraph, a);
        while walk.advance() == Step::Advanced {}
        walk.has_visited(b)
    }

    pub fn advance(&mut self) -> Step {
        let mut candidates: Vec<(EdgeId, NodeId, NodeId, i64)> = self
            .graph
            .edges()
            .filter(|(id, _)| !self.chosen.contains(id))
            .map(|(id, edge)| (id, edge.a(), edge.b(), edge.weight()))
            .collect();
        candidates.sort_by_key(|&(_, _, _, weight)| weight);

        if candidates.is_empty() {
            return Step::Finished;
        }

        for (edge, a, b, weight) in candidates {
            if self.closes_cycle(a, b) {
                tracing::trace!(?edge, "kruskal rejects cycle-closing edge");
                continue;
            }
            if !self.visited.contains(&a) {
                self.visited.push(a);
                self.highlights.mark_node(a);
            }
            if !self.visited.contains(&b) {
                self.visited.push(b);
                self.highlights.mark_node(b);
            }
            self.chosen.push(edge);
            self.highlights.mark_edge(edge);
            tracing::debug!(?edge, weight, "kruskal accepts edge");
            return Step::Advanced;
        }

        // Every remaining candidate closes a cycle: the spanning forest is
        // complete.
        Step::Finished
    }

    pub fn retreat(&mut self) {
        let Some(edge) = self.chosen.pop() else {
            return;
        };
        self.highlights.unmark_edge(edge);

        // Recompute the visited set from the surviving chosen edges. The
        // first-occurrence endpoint order reproduces the forward append
        // order, so an advance/retreat pair restores the log exactly.
        let mut remaining: Vec<NodeId> = Vec::new();
        for &chosen in &self.chosen {
            let Some(e) = self.graph.edge(chosen) else {
                continue;
            };
            for endpoint in [e.a(), e.b()] {
                if !remaining.contains(&endpoint) {
                    remaining.push(endpoint);
                }
            }
        }
        for &node in &self.visited {
            if !remaining.contains(&node) {
                self.highlights.unmark_node(node);
            }
        }
        self.visited = remaining;
    }

    pub fn cleanup(&mut self) {
        self.highlights.clear();
    }
}

impl Walkthrough for Kruskals {
    fn advance(&mut self) -> Step {
        Kruskals::advance(self)
    }

    fn retreat(&mut self) {
        Kruskals::retreat(self);
    }

    fn cleanup(&mut self) {
        Kruskals::cleanup(self);
    }

    fn highlights(&self) -> &Highlights {
        &self.highlights
    }
}
