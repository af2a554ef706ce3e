// src/analysis/integrity.rs

use std::collections::HashSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::Result;
use crate::graph::{Graph, GraphNode};
use crate::types::NodeId;

/// Structural flags for one graph snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphAnalysis {
    pub acyclic: bool,
    pub connected: bool,
}

pub fn analyze(graph: &Graph) -> Result<GraphAnalysis> {
    Ok(GraphAnalysis {
        acyclic: is_acyclic(graph)?,
        connected: is_connected(graph)?,
    })
}

/// `true` if no chain of `children` links leads from a node back to itself.
///
/// Children are followed as directed successors even in undirected mode, so
/// an undirected graph with any edge is reported as cyclic. Every node is
/// used as a starting point because the graph may be disconnected.
pub fn is_acyclic(graph: &Graph) -> Result<bool> {
    let mut on_path: HashSet<NodeId> = HashSet::new();
    let mut proven: HashSet<NodeId> = HashSet::new();

    for node in graph.nodes() {
        if proven.contains(&node.id()) {
            continue;
        }
        if !descend(graph, node, &mut on_path, &mut proven)? {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Depth-first descent. `on_path` holds the ancestors of `node` on the
/// current walk; `proven` holds nodes whose whole subgraph is cycle-free.
fn descend(
    graph: &Graph,
    node: &GraphNode,
    on_path: &mut HashSet<NodeId>,
    proven: &mut HashSet<NodeId>,
) -> Result<bool> {
    on_path.insert(node.id());

    for child in node.child_ids() {
        if on_path.contains(&child) {
            return Ok(false);
        }
        if proven.contains(&child) {
            continue;
        }
        let child_node = graph.require(child)?;
        if !descend(graph, child_node, on_path, proven)? {
            return Ok(false);
        }
    }

    on_path.remove(&node.id());
    proven.insert(node.id());
    Ok(true)
}

/// `true` if a walk from the first node that follows both `children` and
/// `parents` reaches every node. Edge direction is ignored.
pub fn is_connected(graph: &Graph) -> Result<bool> {
    let Some(start) = graph.first() else {
        return Ok(true);
    };

    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut stack: Vec<NodeId> = vec![start.id()];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let node = graph.require(id)?;
        stack.extend(node.child_ids().filter(|c| !visited.contains(c)));
        stack.extend(node.parents().iter().copied().filter(|p| !visited.contains(p)));
    }

    Ok(visited.len() == graph.len())
}

/// Some node that lies on a cycle, or `None` for an acyclic graph.
///
/// Used to name the offending node in diagnostics.
pub fn find_cycle_node(graph: &Graph) -> Option<NodeId> {
    let mut dag: DiGraphMap<NodeId, ()> = DiGraphMap::new();

    for node in graph.nodes() {
        dag.add_node(node.id());
    }
    for node in graph.nodes() {
        for child in node.child_ids() {
            dag.add_edge(node.id(), child, ());
        }
    }

    match toposort(&dag, None) {
        Ok(_order) => None,
        Err(cycle) => Some(cycle.node_id()),
    }
}
