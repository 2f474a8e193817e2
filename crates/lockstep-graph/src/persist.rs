//! JSON save/load of graphs.
//!
//! Format (the interactive editor's save files):
//!
//! ```json
//! { "info": {
//!     "adjacency_list": { "node0": { "node1": "edge0" } },
//!     "nodes": { "node0": { "name": "A", "pos": [10, 10] } },
//!     "edges": { "edge0": { "weight": 1, "start_node": "node0", "end_node": "node1" } }
//! } }
//! ```
//!
//! Synthetic `node{i}` / `edge{i}` keys are assigned at save time in
//! `nodes()` / `edges()` iteration order. Object key order is significant:
//! load rebuilds per-node neighbor order from each `adjacency_list` object's
//! key order, which is why the on-disk structs use `IndexMap` and
//! `serde_json` is built with `preserve_order`.

use crate::{Edge, EdgeId, Graph, NodeId, Point};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed graph file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("graph file references undefined key `{0}`")]
    DanglingKey(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct FileContent {
    info: Info,
}

#[derive(Debug, Serialize, Deserialize)]
struct Info {
    adjacency_list: IndexMap<String, IndexMap<String, String>>,
    nodes: IndexMap<String, NodeInfo>,
    edges: IndexMap<String, EdgeInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeInfo {
    name: String,
    pos: [f64; 2],
}

#[derive(Debug, Serialize, Deserialize)]
struct EdgeInfo {
    weight: i64,
    start_node: String,
    end_node: String,
}

pub fn save_graph(path: impl AsRef<Path>, graph: &Graph) -> Result<(), PersistError> {
    let mut node_keys: IndexMap<NodeId, String> = IndexMap::new();
    for (i, (id, _)) in graph.nodes().enumerate() {
        node_keys.insert(id, format!("node{i}"));
    }
    let mut edge_keys: IndexMap<EdgeId, String> = IndexMap::new();
    for (i, (id, _)) in graph.edges().enumerate() {
        edge_keys.insert(id, format!("edge{i}"));
    }

    let mut info = Info {
        adjacency_list: IndexMap::new(),
        nodes: IndexMap::new(),
        edges: IndexMap::new(),
    };
    for (id, node) in graph.nodes() {
        let mut entries = IndexMap::new();
        for (neighbor, edge) in graph.neighbors(id) {
            entries.insert(node_keys[&neighbor].clone(), edge_keys[&edge].clone());
        }
        info.adjacency_list.insert(node_keys[&id].clone(), entries);
        info.nodes.insert(
            node_keys[&id].clone(),
            NodeInfo {
                name: node.name.clone(),
                pos: [node.pos.x, node.pos.y],
            },
        );
    }
    for (id, edge) in graph.edges() {
        info.edges.insert(
            edge_keys[&id].clone(),
            EdgeInfo {
                weight: edge.weight(),
                start_node: node_keys[&edge.a()].clone(),
                end_node: node_keys[&edge.b()].clone(),
            },
        );
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &FileContent { info })?;
    writer.flush()?;
    Ok(())
}

pub fn load_graph(path: impl AsRef<Path>) -> Result<Graph, PersistError> {
    let file = File::open(path)?;
    let content: FileContent = serde_json::from_reader(BufReader::new(file))?;
    let info = content.info;

    let mut graph = Graph::new();

    // Node order follows the adjacency_list key order; nodes that never
    // appear there are dropped, as the editor's loader did.
    let mut node_ids: IndexMap<String, NodeId> = IndexMap::new();
    for key in info.adjacency_list.keys() {
        let Some(node) = info.nodes.get(key) else {
            return Err(PersistError::DanglingKey(key.clone()));
        };
        let id = graph.add_node_with(node.name.clone(), Point::new(node.pos[0], node.pos[1]));
        node_ids.insert(key.clone(), id);
    }

    // Edge arena order follows the edges object's key order.
    let mut edge_ids: IndexMap<String, EdgeId> = IndexMap::new();
    for (key, edge) in &info.edges {
        let a = resolve_node(&node_ids, &edge.start_node)?;
        let b = resolve_node(&node_ids, &edge.end_node)?;
        let id = EdgeId(graph.next_edge);
        graph.next_edge += 1;
        graph.edges.insert(
            id,
            Edge {
                a,
                b,
                weight: edge.weight,
            },
        );
        edge_ids.insert(key.clone(), id);
    }

    // Inner adjacency maps take the file's key order verbatim.
    for (key, entries) in &info.adjacency_list {
        let node = resolve_node(&node_ids, key)?;
        for (neighbor_key, edge_key) in entries {
            let neighbor = resolve_node(&node_ids, neighbor_key)?;
            let Some(&edge) = edge_ids.get(edge_key) else {
                return Err(PersistError::DanglingKey(edge_key.clone()));
            };
            if let Some(inner) = graph.adjacency.get_mut(&node) {
                inner.insert(neighbor, edge);
            }
        }
    }

    Ok(graph)
}

fn resolve_node(ids: &IndexMap<String, NodeId>, key: &str) -> Result<NodeId, PersistError> {
    ids.get(key)
        .copied()
        .ok_or_else(|| PersistError::DanglingKey(key.to_string()))
}
