#![allow(dead_code)]

use taskgantt::graph::Graph;
use taskgantt::types::{NodeId, Weight};

/// Builder for `Graph` with explicit ids to simplify test setup.
///
/// Panics on invalid input (duplicate ids, edges to unknown nodes), which
/// is what a test wants.
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    pub fn directed() -> Self {
        Self {
            graph: Graph::directed(),
        }
    }

    pub fn undirected() -> Self {
        Self {
            graph: Graph::undirected(),
        }
    }

    pub fn node(mut self, id: NodeId, weight: Weight) -> Self {
        self.graph
            .insert_node(id)
            .expect("builder: duplicate node id");
        self.graph
            .set_node_weight(id, weight)
            .expect("builder: node just inserted");
        self
    }

    pub fn edge(mut self, from: NodeId, to: NodeId, weight: Weight) -> Self {
        self.graph
            .add_weighted_edge(from, to, weight)
            .expect("builder: edge endpoints must exist");
        self
    }

    /// Nodes `0..weights.len()` chained `0 -> 1 -> 2 ...`, every edge
    /// carrying `edge_weight`.
    pub fn chain(weights: &[Weight], edge_weight: Weight) -> Self {
        let mut builder = Self::directed();
        for (id, &w) in weights.iter().enumerate() {
            builder = builder.node(id as NodeId, w);
        }
        for id in 1..weights.len() {
            builder = builder.edge(id as NodeId - 1, id as NodeId, edge_weight);
        }
        builder
    }

    pub fn build(self) -> Graph {
        self.graph
    }
}
