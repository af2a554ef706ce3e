// src/analysis/ordering.rs

//! Display orderings for acyclic task graphs.
//!
//! All sorts are stable: nodes that compare equal keep their graph order.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::analysis::integrity::{find_cycle_node, is_acyclic};
use crate::errors::{GanttError, Result};
use crate::graph::Graph;
use crate::types::{NodeId, SortStrategy};

/// Full permutation of the graph's node ids under `strategy`.
///
/// `CritTime` and `CriticalPath` are only defined on acyclic graphs and
/// return [`GanttError::CyclicGraph`] otherwise. An empty graph yields an
/// empty order.
pub fn order_nodes(graph: &Graph, strategy: SortStrategy) -> Result<Vec<NodeId>> {
    if graph.is_empty() {
        return Ok(Vec::new());
    }
    if strategy.requires_acyclic() {
        ensure_acyclic(graph)?;
    }

    let order = match strategy {
        SortStrategy::CritTime => by_critical_time(graph)?,
        SortStrategy::CriticalPath => by_critical_path(graph)?,
        SortStrategy::Weight => by_weight(graph),
    };

    debug!(?strategy, ?order, "ordered nodes");
    Ok(order)
}

fn ensure_acyclic(graph: &Graph) -> Result<()> {
    if is_acyclic(graph)? {
        return Ok(());
    }
    let msg = match find_cycle_node(graph) {
        Some(id) => format!("cycle detected in task graph involving node {id}"),
        None => "cycle detected in task graph".to_string(),
    };
    Err(GanttError::CyclicGraph(msg))
}

fn by_weight(graph: &Graph) -> Vec<NodeId> {
    let mut nodes: Vec<_> = graph.nodes().iter().collect();
    nodes.sort_by_key(|n| Reverse(n.weight()));
    nodes.into_iter().map(|n| n.id()).collect()
}

fn by_critical_time(graph: &Graph) -> Result<Vec<NodeId>> {
    let times = critical_times(graph)?;
    let mut ids: Vec<NodeId> = graph.ids().collect();
    ids.sort_by_key(|id| Reverse(times.get(id).copied().unwrap_or(0)));
    Ok(ids)
}

fn by_critical_path(graph: &Graph) -> Result<Vec<NodeId>> {
    let on_path: HashSet<NodeId> = critical_path(graph, None)?.into_iter().collect();
    let lengths = path_lengths(graph)?;

    let mut ids: Vec<NodeId> = graph.ids().collect();
    ids.sort_by_key(|id| {
        (
            !on_path.contains(id),
            Reverse(lengths.get(id).copied().unwrap_or(0)),
        )
    });
    Ok(ids)
}

/// Critical time of every node: its weight plus the smallest critical time
/// among its children, where the downstream term never exceeds 0.
///
/// Requires an acyclic graph.
pub fn critical_times(graph: &Graph) -> Result<HashMap<NodeId, i64>> {
    let mut memo = HashMap::with_capacity(graph.len());
    for id in graph.ids() {
        critical_time(graph, id, &mut memo)?;
    }
    Ok(memo)
}

fn critical_time(graph: &Graph, id: NodeId, memo: &mut HashMap<NodeId, i64>) -> Result<i64> {
    if let Some(&t) = memo.get(&id) {
        return Ok(t);
    }

    let node = graph.require(id)?;
    let mut downstream = 0i64;
    for child in node.child_ids() {
        downstream = downstream.min(critical_time(graph, child, memo)?);
    }

    let own = i64::try_from(node.weight()).unwrap_or(i64::MAX);
    let t = own.saturating_add(downstream);
    memo.insert(id, t);
    Ok(t)
}

/// Node count of the longest path starting at each node (a leaf counts 1).
///
/// Requires an acyclic graph.
pub fn path_lengths(graph: &Graph) -> Result<HashMap<NodeId, usize>> {
    let mut memo = HashMap::with_capacity(graph.len());
    for id in graph.ids() {
        path_length(graph, id, &mut memo)?;
    }
    Ok(memo)
}

fn path_length(graph: &Graph, id: NodeId, memo: &mut HashMap<NodeId, usize>) -> Result<usize> {
    if let Some(&n) = memo.get(&id) {
        return Ok(n);
    }

    let node = graph.require(id)?;
    let mut longest = 0usize;
    for child in node.child_ids() {
        longest = longest.max(path_length(graph, child, memo)?);
    }

    let n = longest + 1;
    memo.insert(id, n);
    Ok(n)
}

/// Longest path (by node count) starting at `root`, or at the first node
/// when `root` is `None`.
///
/// Among equally long paths the one found first by a depth-first walk over
/// children in order wins. Returns an empty path for an empty graph and
/// [`GanttError::CyclicGraph`] for a cyclic one.
pub fn critical_path(graph: &Graph, root: Option<NodeId>) -> Result<Vec<NodeId>> {
    let start = match root {
        Some(id) => graph.require(id)?.id(),
        None => match graph.first() {
            Some(node) => node.id(),
            None => return Ok(Vec::new()),
        },
    };
    ensure_acyclic(graph)?;

    let mut memo = HashMap::with_capacity(graph.len());
    let mut path = vec![start];
    let mut current = graph.require(start)?;

    loop {
        let mut best: Option<(NodeId, usize)> = None;
        for child in current.child_ids() {
            let len = path_length(graph, child, &mut memo)?;
            if best.map(|(_, b)| len > b).unwrap_or(true) {
                best = Some((child, len));
            }
        }
        let Some((next, _)) = best else {
            break;
        };
        path.push(next);
        current = graph.require(next)?;
    }

    Ok(path)
}
