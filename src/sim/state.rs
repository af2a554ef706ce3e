// src/sim/state.rs

//! Per-run task bookkeeping for the simulator.

use std::collections::HashSet;

use crate::graph::GraphNode;
use crate::types::NodeId;

#[derive(Debug, Clone, Default)]
pub struct RunState {
    /// Tasks that have been dispatched to a worker.
    scheduled: HashSet<NodeId>,
    /// Tasks whose compute phase has finished.
    done: HashSet<NodeId>,
    /// Outputs written out by their owner and not yet read back in.
    store: HashSet<NodeId>,
}

impl RunState {
    pub fn is_scheduled(&self, task: NodeId) -> bool {
        self.scheduled.contains(&task)
    }

    pub fn mark_scheduled(&mut self, task: NodeId) {
        self.scheduled.insert(task);
    }

    pub fn is_done(&self, task: NodeId) -> bool {
        self.done.contains(&task)
    }

    pub fn mark_done(&mut self, task: NodeId) {
        self.done.insert(task);
    }

    /// Not yet dispatched, and every parent has finished computing.
    pub fn is_ready(&self, node: &GraphNode) -> bool {
        !self.is_scheduled(node.id()) && node.parents().iter().all(|&p| self.is_done(p))
    }

    pub fn in_store(&self, task: NodeId) -> bool {
        self.store.contains(&task)
    }

    pub fn put_in_store(&mut self, task: NodeId) {
        self.store.insert(task);
    }

    pub fn take_from_store(&mut self, task: NodeId) {
        self.store.remove(&task);
    }
}
