// src/sim/mod.rs

//! Discrete-time list-scheduling simulation of a task graph on a fixed set
//! of interchangeable workers.
//!
//! - [`worker`] holds per-worker state: the current activity and the task
//!   outputs resident in the worker's local cache.
//! - [`state`] tracks which tasks are scheduled or done, and which outputs
//!   sit in the shared store between a write and a read.
//! - [`simulator`] contains the tick loop.
//! - [`step`] is the structured result of a single tick.
//! - [`gantt`] is the time/worker occupancy table the simulation produces.

pub mod gantt;
pub mod simulator;
pub mod state;
pub mod step;
pub mod worker;

pub use gantt::{Cell, GanttTable, Row};
pub use simulator::{
    Simulation, SimulationOptions, SimulationOutcome, Simulator, StallReason, simulate,
    simulate_with,
};
pub use step::SimStep;
pub use worker::{Activity, Worker};
