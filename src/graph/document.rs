// src/graph/document.rs

//! Persisted graph representation.
//!
//! A document is a JSON object with two ordered collections:
//!
//! ```json
//! {
//!   "directed": true,
//!   "nodes": [{ "id": 0, "value": 3 }, { "id": 1, "value": 4 }],
//!   "edges": [{ "from": 0, "to": 1, "value": 2 }]
//! }
//! ```
//!
//! `value` is the node weight or edge weight and defaults to 0. Extra fields
//! written by a drawing surface (labels, edge ids, shapes) are ignored.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::Result;
use crate::graph::ids::IdAllocator;
use crate::graph::store::Graph;
use crate::types::{NodeId, Weight};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default = "default_directed")]
    pub directed: bool,

    #[serde(default)]
    pub nodes: Vec<NodeRecord>,

    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

fn default_directed() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    #[serde(default)]
    pub value: Weight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default)]
    pub value: Weight,
}

impl GraphDocument {
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Graph {
    /// Export nodes in graph order and edges in node order, then child order.
    ///
    /// Undirected graphs store each edge twice; only one direction of every
    /// mirrored pair is written.
    pub fn to_document(&self) -> GraphDocument {
        let nodes = self
            .nodes()
            .iter()
            .map(|n| NodeRecord {
                id: n.id(),
                value: n.weight(),
            })
            .collect();

        let mut edges = Vec::new();
        // Emitted edges whose mirror has not been skipped yet.
        let mut unmatched: HashMap<(NodeId, NodeId), usize> = HashMap::new();

        for node in self.nodes() {
            for edge in node.children() {
                if !self.is_directed() {
                    if let Some(count) = unmatched.get_mut(&(edge.to, node.id())) {
                        if *count > 0 {
                            *count -= 1;
                            continue;
                        }
                    }
                    *unmatched.entry((node.id(), edge.to)).or_insert(0) += 1;
                }
                edges.push(EdgeRecord {
                    from: node.id(),
                    to: edge.to,
                    value: edge.weight,
                });
            }
        }

        GraphDocument {
            directed: self.is_directed(),
            nodes,
            edges,
        }
    }

    /// Rebuild a graph from a document.
    ///
    /// Every loaded id is reported to `ids`, so nodes added afterwards never
    /// collide with loaded ones.
    pub fn from_document(doc: &GraphDocument, ids: &mut IdAllocator) -> Result<Graph> {
        let mut graph = Graph::new(doc.directed);

        for record in &doc.nodes {
            graph.insert_node(record.id)?;
            graph.set_node_weight(record.id, record.value)?;
            ids.observe(record.id);
        }

        for record in &doc.edges {
            graph.add_weighted_edge(record.from, record.to, record.value)?;
        }

        debug!(
            nodes = graph.len(),
            edges = doc.edges.len(),
            directed = doc.directed,
            "loaded graph from document"
        );
        Ok(graph)
    }
}

/// Read a graph document from disk without building the graph.
pub fn read_document(path: impl AsRef<Path>) -> Result<GraphDocument> {
    let contents = fs::read_to_string(path.as_ref())?;
    GraphDocument::from_json(&contents)
}

/// Read a document from disk and build the graph it describes.
pub fn load_graph(path: impl AsRef<Path>, ids: &mut IdAllocator) -> Result<Graph> {
    let doc = read_document(path)?;
    Graph::from_document(&doc, ids)
}

/// Write `graph` to disk as a pretty-printed document.
pub fn save_graph(path: impl AsRef<Path>, graph: &Graph) -> Result<()> {
    let json = graph.to_document().to_json_pretty()?;
    fs::write(path.as_ref(), json)?;
    Ok(())
}
