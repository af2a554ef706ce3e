// src/graph/store.rs

use std::collections::HashMap;

use tracing::debug;

use crate::errors::{GanttError, Result};
use crate::graph::ids::IdAllocator;
use crate::graph::node::{Edge, GraphNode};
use crate::types::{NodeId, Weight};

/// Ordered collection of task nodes with unique ids.
///
/// The graph is either directed (task dependencies) or undirected (worker
/// topology). In undirected mode every edge is stored in both directions:
/// if A has child B then B also has child A, and both have each other as
/// parents.
///
/// There is no implicit root. Node order is insertion order and is
/// significant for analysis and simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    directed: bool,
    nodes: Vec<GraphNode>,
    /// Position of every node in `nodes`.
    index: HashMap<NodeId, usize>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::directed()
    }
}

impl Graph {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn directed() -> Self {
        Self::new(true)
    }

    pub fn undirected() -> Self {
        Self::new(false)
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in graph order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    pub fn first(&self) -> Option<&GraphNode> {
        self.nodes.first()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.position(id).map(|i| &self.nodes[i])
    }

    /// Like [`Graph::node`], but a missing id is a structural error.
    pub fn require(&self, id: NodeId) -> Result<&GraphNode> {
        self.node(id).ok_or(GanttError::NodeNotFound(id))
    }

    /// Weight of the edge `from -> to`.
    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> Result<Weight> {
        self.require(from)?
            .edge_weight_to(to)
            .ok_or(GanttError::EdgeNotFound { from, to })
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.node(from)
            .map(|n| n.edge_weight_to(to).is_some())
            .unwrap_or(false)
    }

    /// Add a node with a fresh id, zero weight and no edges.
    pub fn add_node(&mut self, ids: &mut IdAllocator) -> NodeId {
        let mut id = ids.next_id();
        while self.contains(id) {
            id = ids.next_id();
        }
        self.push_node(id);
        id
    }

    /// Add a node with an explicit id.
    pub fn insert_node(&mut self, id: NodeId) -> Result<()> {
        if self.contains(id) {
            return Err(GanttError::DuplicateNode(id));
        }
        self.push_node(id);
        Ok(())
    }

    fn push_node(&mut self, id: NodeId) {
        self.index.insert(id, self.nodes.len());
        self.nodes.push(GraphNode::new(id));
        debug!(node = id, "added node");
    }

    /// Remove a node and every edge that touches it.
    pub fn remove_node(&mut self, id: NodeId) -> Result<()> {
        let pos = self.position(id).ok_or(GanttError::NodeNotFound(id))?;
        self.nodes.remove(pos);

        for node in self.nodes.iter_mut() {
            node.children.retain(|e| e.to != id);
            node.parents.retain(|&p| p != id);
        }

        self.reindex();
        debug!(node = id, "removed node and its edges");
        Ok(())
    }

    /// Add the edge `from -> to` with weight 0.
    ///
    /// In undirected mode the mirrored edge `to -> from` is added as well.
    /// Parallel edges are appended rather than merged.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        self.add_weighted_edge(from, to, 0)
    }

    /// Add the edge `from -> to` carrying `weight` (mirrored when undirected).
    pub fn add_weighted_edge(&mut self, from: NodeId, to: NodeId, weight: Weight) -> Result<()> {
        let from_pos = self.position(from).ok_or(GanttError::NodeNotFound(from))?;
        let to_pos = self.position(to).ok_or(GanttError::NodeNotFound(to))?;

        self.nodes[from_pos].children.push(Edge { to, weight });
        self.nodes[to_pos].parents.push(from);

        if !self.directed {
            self.nodes[to_pos].children.push(Edge { to: from, weight });
            self.nodes[from_pos].parents.push(to);
        }

        debug!(from, to, weight, directed = self.directed, "added edge");
        Ok(())
    }

    /// Remove every `from -> to` edge (and its mirror in undirected mode).
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        let from_pos = self.position(from).ok_or(GanttError::NodeNotFound(from))?;
        let to_pos = self.position(to).ok_or(GanttError::NodeNotFound(to))?;

        if self.nodes[from_pos].edge_weight_to(to).is_none() {
            return Err(GanttError::EdgeNotFound { from, to });
        }

        self.nodes[from_pos].children.retain(|e| e.to != to);
        self.nodes[to_pos].parents.retain(|&p| p != from);

        if !self.directed {
            self.nodes[to_pos].children.retain(|e| e.to != from);
            self.nodes[from_pos].parents.retain(|&p| p != to);
        }

        debug!(from, to, directed = self.directed, "removed edge");
        Ok(())
    }

    pub fn set_node_weight(&mut self, id: NodeId, weight: Weight) -> Result<()> {
        let pos = self.position(id).ok_or(GanttError::NodeNotFound(id))?;
        self.nodes[pos].weight = weight;
        debug!(node = id, weight, "set node weight");
        Ok(())
    }

    /// Set the weight of the first `from -> to` edge.
    ///
    /// In undirected mode the mirrored edge gets the same weight.
    pub fn set_edge_weight(&mut self, from: NodeId, to: NodeId, weight: Weight) -> Result<()> {
        let from_pos = self.position(from).ok_or(GanttError::NodeNotFound(from))?;
        let edge = self.nodes[from_pos]
            .children
            .iter_mut()
            .find(|e| e.to == to)
            .ok_or(GanttError::EdgeNotFound { from, to })?;
        edge.weight = weight;

        if !self.directed {
            if let Some(to_pos) = self.position(to) {
                if let Some(mirror) = self.nodes[to_pos].children.iter_mut().find(|e| e.to == from) {
                    mirror.weight = weight;
                }
            }
        }

        debug!(from, to, weight, "set edge weight");
        Ok(())
    }

    /// Drop every node and edge, keeping the directedness.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        debug!("cleared graph");
    }

    fn reindex(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id, i))
            .collect();
    }
}
