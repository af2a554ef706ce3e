// src/sim/step.rs

//! Step-by-step result type for the simulator.

use crate::sim::gantt::Row;
use crate::types::NodeId;

/// Structured result of a single simulator tick.
///
/// Useful for tests that step the simulation manually and make assertions
/// about what changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimStep {
    /// Row recorded for this tick, or `None` if the run ended instead.
    pub row: Option<Row>,
    /// Tasks whose compute phase started during this tick.
    pub dispatched: Vec<NodeId>,
    /// Tasks whose compute phase finished during this tick.
    pub completed: Vec<NodeId>,
    /// Whether the run is over (completed or stalled).
    pub finished: bool,
}
