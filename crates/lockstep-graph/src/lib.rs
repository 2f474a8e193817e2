//! Weighted undirected graph container used by the `lockstep` engines.
//!
//! Design notes:
//! - Node/edge identity is a copyable id; payloads live in insertion-ordered
//!   arenas. Handing an engine a snapshot means cloning the container while
//!   ids stay shared between the live graph and the snapshot.
//! - Adjacency is an `IndexMap` per node because iteration order is semantic:
//!   every engine tie-break is defined in terms of first-inserted neighbors,
//!   not hash order.
//! - Removal uses `shift_remove` so surviving entries keep their insertion
//!   order.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

pub mod persist;

mod error;
pub use error::{Error, Result};

type OrderedMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Stable handle of a node. Identity never changes after creation and is
/// never reused within one graph lineage (snapshots included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

/// Stable handle of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(u32);

/// Canvas position of a node. Opaque to the algorithms; the editing UI owns
/// it and it is only carried for persistence fidelity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub pos: Point,
}

/// An unordered pair of endpoints plus an integer weight. Endpoints are fixed
/// at creation; the weight is edited through [`Graph::set_weight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    a: NodeId,
    b: NodeId,
    weight: i64,
}

impl Edge {
    pub fn a(&self) -> NodeId {
        self.a
    }

    pub fn b(&self) -> NodeId {
        self.b
    }

    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.a, self.b)
    }

    pub fn weight(&self) -> i64 {
        self.weight
    }
}

/// Adjacency structure: node id -> insertion-ordered map from neighbor id to
/// the connecting edge id. Invariants:
/// - symmetric: an edge appears in both endpoints' inner maps or in neither;
/// - at most one edge per unordered node pair;
/// - `nodes()` / `edges()` iterate in creation order.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: OrderedMap<NodeId, Node>,
    edges: OrderedMap<EdgeId, Edge>,
    adjacency: OrderedMap<NodeId, OrderedMap<NodeId, EdgeId>>,
    next_node: u32,
    next_edge: u32,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node with an auto-generated `NewNode{n}` name.
    pub fn add_node(&mut self, pos: Point) -> NodeId {
        let name = format!("NewNode{}", self.nodes.len());
        self.add_node_with(name, pos)
    }

    pub fn add_node_with(&mut self, name: impl Into<String>, pos: Point) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.nodes.insert(
            id,
            Node {
                name: name.into(),
                pos,
            },
        );
        self.adjacency.insert(id, OrderedMap::default());
        id
    }

    /// Connects two existing, distinct nodes with a weight-0 edge. Re-adding
    /// an existing pair replaces the old edge in place: the neighbor keeps its
    /// adjacency position, the edge gets a fresh id and a reset weight.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<EdgeId> {
        if a == b {
            return Err(Error::SelfLoop);
        }
        if !self.nodes.contains_key(&a) {
            return Err(Error::MissingNode(a));
        }
        if !self.nodes.contains_key(&b) {
            return Err(Error::MissingNode(b));
        }

        if let Some(old) = self.adjacency.get(&a).and_then(|inner| inner.get(&b).copied()) {
            self.edges.shift_remove(&old);
        }

        let id = EdgeId(self.next_edge);
        self.next_edge += 1;
        self.edges.insert(id, Edge { a, b, weight: 0 });
        if let Some(inner) = self.adjacency.get_mut(&a) {
            inner.insert(b, id);
        }
        if let Some(inner) = self.adjacency.get_mut(&b) {
            inner.insert(a, id);
        }
        Ok(id)
    }

    /// Removes an edge from both endpoints' adjacency. No-op if absent.
    pub fn delete_edge(&mut self, edge: EdgeId) {
        let Some(e) = self.edges.shift_remove(&edge) else {
            return;
        };
        if let Some(inner) = self.adjacency.get_mut(&e.a) {
            inner.shift_remove(&e.b);
        }
        if let Some(inner) = self.adjacency.get_mut(&e.b) {
            inner.shift_remove(&e.a);
        }
    }

    /// Removes all incident edges, then the node itself. No-op if absent.
    pub fn delete_node(&mut self, node: NodeId) {
        let Some(inner) = self.adjacency.get(&node) else {
            return;
        };
        let incident: Vec<EdgeId> = inner.values().copied().collect();
        for edge in incident {
            self.delete_edge(edge);
        }
        self.adjacency.shift_remove(&node);
        self.nodes.shift_remove(&node);
    }

    pub fn set_weight(&mut self, edge: EdgeId, weight: i64) -> Result<()> {
        if weight < 0 {
            return Err(Error::NegativeWeight(weight));
        }
        let Some(e) = self.edges.get_mut(&edge) else {
            return Err(Error::MissingEdge(edge));
        };
        e.weight = weight;
        Ok(())
    }

    pub fn rename_node(&mut self, node: NodeId, name: impl Into<String>) -> Result<()> {
        let Some(n) = self.nodes.get_mut(&node) else {
            return Err(Error::MissingNode(node));
        };
        n.name = name.into();
        Ok(())
    }

    pub fn has_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn node(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(&node)
    }

    pub fn edge(&self, edge: EdgeId) -> Option<&Edge> {
        self.edges.get(&edge)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().map(|(&id, node)| (id, node))
    }

    /// Edges in creation order, deduplicated by identity.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter().map(|(&id, edge)| (id, edge))
    }

    /// A node's `(neighbor, edge)` pairs in adjacency insertion order. Empty
    /// for a node that is not part of this graph.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, EdgeId)> + '_ {
        self.adjacency
            .get(&node)
            .into_iter()
            .flatten()
            .map(|(&n, &e)| (n, e))
    }

    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.adjacency.get(&a)?.get(&b).copied()
    }
}
