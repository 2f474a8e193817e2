use indexmap::IndexSet;
use lockstep_graph::{EdgeId, NodeId};
use rustc_hash::FxBuildHasher;

type OrderedSet<T> = IndexSet<T, FxBuildHasher>;

/// Engine-owned highlight state: the nodes and edges currently part of the
/// partial result, in the order they were marked.
///
/// Marks live here rather than on the shared `Node`/`Edge` entities, so two
/// engines (or an engine and the editor) never cross-contaminate each
/// other's display state. The renderer reads this set after each step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Highlights {
    nodes: OrderedSet<NodeId>,
    edges: OrderedSet<EdgeId>,
}

impl Highlights {
    /// Returns true if the node was not already marked.
    pub(crate) fn mark_node(&mut self, node: NodeId) -> bool {
        self.nodes.insert(node)
    }

    pub(crate) fn unmark_node(&mut self, node: NodeId) {
        self.nodes.shift_remove(&node);
    }

    /// Returns true if the edge was not already marked.
    pub(crate) fn mark_edge(&mut self, edge: EdgeId) -> bool {
        self.edges.insert(edge)
    }

    pub(crate) fn unmark_edge(&mut self, edge: EdgeId) {
        self.edges.shift_remove(&edge);
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    pub fn node_is_marked(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn edge_is_marked(&self, edge: EdgeId) -> bool {
        self.edges.contains(&edge)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
