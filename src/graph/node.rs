// src/graph/node.rs

use crate::types::{NodeId, Weight};

/// Outgoing edge: the child it points at and the data-transfer cost of
/// moving this node's output to that child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: NodeId,
    pub weight: Weight,
}

/// A task in the graph.
///
/// Adjacency is only mutated through [`crate::graph::Graph`], which keeps
/// `children` and `parents` of both endpoints consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub(crate) id: NodeId,
    pub(crate) weight: Weight,
    pub(crate) children: Vec<Edge>,
    pub(crate) parents: Vec<NodeId>,
}

impl GraphNode {
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            weight: 0,
            children: Vec::new(),
            parents: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Execution cost of the task.
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Outgoing edges in insertion order.
    pub fn children(&self) -> &[Edge] {
        &self.children
    }

    pub fn child_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().map(|e| e.to)
    }

    /// Incoming neighbours in insertion order.
    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    /// Weight of the first edge from this node to `to`, if any.
    pub fn edge_weight_to(&self, to: NodeId) -> Option<Weight> {
        self.children.iter().find(|e| e.to == to).map(|e| e.weight)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
