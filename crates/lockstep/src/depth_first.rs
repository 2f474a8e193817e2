//! Iterative depth-first traversal.
//!
//! Used standalone as a walkthrough and as Kruskal's reachability check. The
//! traversal keeps an explicit visit stack (the path from the start node to
//! the current one); each `advance()` either descends to the first unvisited
//! neighbor in adjacency order or pops the stack to backtrack.

use crate::{Highlights, Step, Walkthrough};
use indexmap::IndexSet;
use lockstep_graph::{Graph, NodeId};
use rustc_hash::FxBuildHasher;

/// What one `advance()` changed; consumed in reverse by `retreat()`.
#[derive(Debug, Clone, Copy)]
enum Delta {
    /// Descended to a previously unvisited neighbor and pushed it.
    Descend { from: NodeId },
    /// Every neighbor was already visited: popped the stack top.
    Backtrack { popped: NodeId },
}

pub struct DepthFirst {
    graph: Graph,
    current: NodeId,
    visit_stack: Vec<NodeId>,
    visited: IndexSet<NodeId, FxBuildHasher>,
    history: Vec<Delta>,
    // Depth-first never emits highlights; the set stays empty and exists to
    // satisfy the driver surface.
    highlights: Highlights,
}

impl DepthFirst {
    pub fn new(graph: Graph, start: NodeId) -> Self {
        let mut visited = IndexSet::default();
        visited.insert(start);
        Self {
            graph,
            current: start,
            visit_stack: vec![start],
            visited,
            history: Vec::new(),
            highlights: Highlights::default(),
        }
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    /// Nodes in the order they were first visited.
    pub fn visited(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.visited.iter().copied()
    }

    pub fn has_visited(&self, node: NodeId) -> bool {
        self.visited.contains(&node)
    }

    pub fn advance(&mut self) -> Step {
        if self.visit_stack.is_empty() {
            return Step::Finished;
        }

        let next = self
            .graph
            .neighbors(self.current)
            .map(|(neighbor, _)| neighbor)
            .find(|neighbor| !self.visited.contains(neighbor));

        match next {
            Some(next) => {
                self.history.push(Delta::Descend { from: self.current });
                self.current = next;
                self.visited.insert(next);
                self.visit_stack.push(next);
                tracing::trace!(?next, "depth-first descends");
                Step::Advanced
            }
            None => {
                let Some(popped) = self.visit_stack.pop() else {
                    return Step::Finished;
                };
                self.history.push(Delta::Backtrack { popped });
                match self.visit_stack.last() {
                    Some(&parent) => {
                        self.current = parent;
                        tracing::trace!(?parent, "depth-first backtracks");
                        Step::Advanced
                    }
                    // The terminal pop is itself a recorded step, so it can
                    // be retreated like any other.
                    None => Step::Finished,
                }
            }
        }
    }

    pub fn retreat(&mut self) {
        let Some(delta) = self.history.pop() else {
            return;
        };
        match delta {
            Delta::Descend { from } => {
                self.visit_stack.pop();
                self.visited.pop();
                self.current = from;
            }
            Delta::Backtrack { popped } => {
                self.visit_stack.push(popped);
                self.current = popped;
            }
        }
    }

    pub fn cleanup(&mut self) {
        self.highlights.clear();
    }
}

impl Walkthrough for DepthFirst {
    fn advance(&mut self) -> Step {
        DepthFirst::advance(self)
    }

    fn retreat(&mut self) {
        DepthFirst::retreat(self);
    }

    fn cleanup(&mut self) {
        DepthFirst::cleanup(self);
    }

    fn highlights(&self) -> &Highlights {
        &self.highlights
    }
}
