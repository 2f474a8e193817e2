//! Dijkstra's shortest path with per-node relaxation records.
//!
//! Every node carries a [`Relaxation`] record: a candidate-distance stack
//! that only grows when a strictly better candidate arrives, plus the
//! finalized distance and 1-based finalization rank once the node is chosen.
//! Records iterate in graph node order, which is the tie-break for the
//! minimum selection.
//!
//! Reversibility: each `advance()` appends a delta of exactly what it changed
//! (which stacks received a push, which edges were newly marked, which node
//! was finalized); `retreat()` pops and undoes that delta. Non-negative
//! weights are assumed — the monotone candidate stacks rely on it.

use crate::{Highlights, Step, Walkthrough};
use indexmap::IndexMap;
use lockstep_graph::{EdgeId, Graph, NodeId};
use rustc_hash::FxBuildHasher;

/// Per-node relaxation bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relaxation {
    candidates: Vec<i64>,
    distance: Option<i64>,
    rank: Option<usize>,
}

impl Relaxation {
    /// Candidate distances in push order; the last entry is the best so far.
    pub fn candidates(&self) -> &[i64] {
        &self.candidates
    }

    /// Shortest distance from the start node, set when the node is finalized.
    pub fn distance(&self) -> Option<i64> {
        self.distance
    }

    /// 1-based order in which the node was finalized.
    pub fn rank(&self) -> Option<usize> {
        self.rank
    }

    pub fn is_finalized(&self) -> bool {
        self.rank.is_some()
    }
}

/// What one `advance()` changed; consumed in reverse by `retreat()`.
#[derive(Debug, Clone)]
struct Delta {
    previous: NodeId,
    finalized: NodeId,
    /// Nodes whose candidate stack received a push, in push order.
    pushed: Vec<NodeId>,
    /// Edges this step newly marked.
    marked_edges: Vec<EdgeId>,
}

pub struct Dijkstras {
    graph: Graph,
    start: NodeId,
    end: NodeId,
    current: NodeId,
    records: IndexMap<NodeId, Relaxation, FxBuildHasher>,
    history: Vec<Delta>,
    highlights: Highlights,
}

impl Dijkstras {
    pub fn new(graph: Graph, start: NodeId, end: NodeId) -> Self {
        let mut records: IndexMap<NodeId, Relaxation, FxBuildHasher> = graph
            .nodes()
            .map(|(id, _)| (id, Relaxation::default()))
            .collect();
        if let Some(record) = records.get_mut(&start) {
            record.distance = Some(0);
            record.rank = Some(1);
        }
        Self {
            graph,
            start,
            end,
            current: start,
            records,
            history: Vec::new(),
            highlights: Highlights::default(),
        }
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn record(&self, node: NodeId) -> Option<&Relaxation> {
        self.records.get(&node)
    }

    /// Records in graph node order.
    pub fn records(&self) -> impl Iterator<Item = (NodeId, &Relaxation)> {
        self.records.iter().map(|(&id, record)| (id, record))
    }

    pub fn advance(&mut self) -> Step {
        if self.current == self.end {
            return Step::Finished;
        }

        let current_record = self
            .records
            .get(&self.current)
            .expect("current node always has a relaxation record");
        let current_distance = current_record
            .distance
            .expect("current node is always finalized");
        let current_rank = current_record
            .rank
            .expect("current node is always finalized");

        // Relax every neighbor of the current node, in adjacency order.
        let mut pushed: Vec<NodeId> = Vec::new();
        let mut marked_edges: Vec<EdgeId> = Vec::new();
        for (neighbor, edge) in self.graph.neighbors(self.current) {
            let finalized = self
                .records
                .get(&neighbor)
                .is_some_and(Relaxation::is_finalized);
            if !finalized && self.highlights.mark_edge(edge) {
                marked_edges.push(edge);
            }
            let Some(weight) = self.graph.edge(edge).map(|e| e.weight()) else {
                continue;
            };
            let candidate = weight + current_distance;
            if let Some(record) = self.records.get_mut(&neighbor) {
                if record.candidates.last().is_none_or(|&top| candidate < top) {
                    record.candidates.push(candidate);
                    pushed.push(neighbor);
                }
            }
        }

        // Select the non-finalized node with the smallest candidate; the
        // first record in node order wins ties.
        let mut choice: Option<(NodeId, i64)> = None;
        for (&node, record) in &self.records {
            if record.is_finalized() {
                continue;
            }
            let Some(&top) = record.candidates.last() else {
                continue;
            };
            if choice.is_none_or(|(_, best)| top < best) {
                choice = Some((node, top));
            }
        }

        let Some((next, distance)) = choice else {
            // The target is unreachable. Roll back this call's scratch work
            // so a Finished probe leaves the engine state untouched.
            for node in pushed.iter().rev() {
                if let Some(record) = self.records.get_mut(node) {
                    record.candidates.pop();
                }
            }
            for edge in marked_edges {
                self.highlights.unmark_edge(edge);
            }
            return Step::Finished;
        };

        let record = self
            .records
            .get_mut(&next)
            .expect("selected node came from the record map");
        record.distance = Some(distance);
        record.rank = Some(current_rank + 1);
        self.highlights.mark_node(next);
        self.history.push(Delta {
            previous: self.current,
            finalized: next,
            pushed,
            marked_edges,
        });
        tracing::debug!(?next, distance, rank = current_rank + 1, "dijkstra finalizes node");
        self.current = next;
        Step::Advanced
    }

    pub fn retreat(&mut self) {
        let Some(delta) = self.history.pop() else {
            return;
        };

        self.highlights.unmark_node(delta.finalized);
        if let Some(record) = self.records.get_mut(&delta.finalized) {
            record.distance = None;
            record.rank = None;
        }
        for node in delta.pushed.iter().rev() {
            if let Some(record) = self.records.get_mut(node) {
                record.candidates.pop();
            }
        }
        for edge in delta.marked_edges {
            self.highlights.unmark_edge(edge);
        }
        self.current = delta.previous;
    }

    pub fn cleanup(&mut self) {
        self.highlights.clear();
    }
}

impl Walkthrough for Dijkstras {
    fn advance(&mut self) -> Step {
        Dijkstras::advance(self)
    }

    fn retreat(&mut self) {
        Dijkstras::retreat(self);
    }

    fn cleanup(&mut self) {
        Dijkstras::cleanup(self);
    }

    fn highlights(&self) -> &Highlights {
        &self.highlights
    }
}
