// src/sim/worker.rs

use crate::types::{NodeId, Phase, Weight};

/// What a busy worker is doing and for how many more ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activity {
    /// The task being computed, or whose output is being moved.
    pub task: NodeId,
    pub phase: Phase,
    pub remaining: Weight,
}

impl Activity {
    pub fn new(task: NodeId, phase: Phase, duration: Weight) -> Self {
        Self {
            task,
            phase,
            remaining: duration,
        }
    }
}

/// One simulated worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Worker {
    pub(crate) current: Option<Activity>,
    /// Task outputs held in the local cache, in arrival order.
    pub(crate) resident: Vec<NodeId>,
}

impl Worker {
    pub fn current(&self) -> Option<Activity> {
        self.current
    }

    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    pub fn resident(&self) -> &[NodeId] {
        &self.resident
    }

    pub fn holds(&self, task: NodeId) -> bool {
        self.resident.contains(&task)
    }

    /// How many of `parents` have their output resident here.
    pub fn shared_count(&self, parents: &[NodeId]) -> usize {
        self.resident.iter().filter(|d| parents.contains(d)).count()
    }

    pub(crate) fn evict(&mut self, task: NodeId) {
        if let Some(pos) = self.resident.iter().position(|&d| d == task) {
            self.resident.remove(pos);
        }
    }
}
