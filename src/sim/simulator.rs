// src/sim/simulator.rs

use std::collections::VecDeque;

use tracing::{debug, info, trace, warn};

use crate::errors::{GanttError, Result};
use crate::graph::Graph;
use crate::sim::gantt::{Cell, GanttTable, Row};
use crate::sim::state::RunState;
use crate::sim::step::SimStep;
use crate::sim::worker::{Activity, Worker};
use crate::types::{NodeId, Phase};

/// Knobs for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationOptions {
    /// Upper bound on consecutive ticks in which no task computes, starts or
    /// finishes. Guards against runs where outputs keep moving between
    /// workers while nothing gets done. Long computations never hit it.
    pub max_ticks: usize,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self { max_ticks: 100_000 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StallReason {
    /// Every worker is idle and nothing can be dispatched, moved or read.
    NoProgress,
    /// [`SimulationOptions::max_ticks`] ticks passed with data moving between
    /// workers but no task computing.
    TickLimit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationOutcome {
    /// Every task finished computing.
    Completed,
    /// The run stopped with `pending` tasks (in graph order) unfinished.
    Stalled {
        pending: Vec<NodeId>,
        reason: StallReason,
    },
}

/// Table produced by a run plus how the run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    pub table: GanttTable,
    pub outcome: SimulationOutcome,
}

impl Simulation {
    pub fn is_complete(&self) -> bool {
        self.outcome == SimulationOutcome::Completed
    }

    /// The table of a completed run, or [`GanttError::Stalled`].
    pub fn into_completed(self) -> Result<GanttTable> {
        match self.outcome {
            SimulationOutcome::Completed => Ok(self.table),
            SimulationOutcome::Stalled { pending, .. } => Err(GanttError::Stalled {
                pending,
                ticks: self.table.len(),
            }),
        }
    }
}

/// Simulate `graph` on `workers` workers with default options.
pub fn simulate(graph: &Graph, workers: usize) -> Result<Simulation> {
    simulate_with(graph, workers, SimulationOptions::default())
}

pub fn simulate_with(graph: &Graph, workers: usize, options: SimulationOptions) -> Result<Simulation> {
    Simulator::new(graph, workers, options)?.run()
}

/// What one assignment pass changed.
#[derive(Debug, Default)]
struct Pass {
    dispatched: Vec<NodeId>,
    completed: Vec<NodeId>,
    /// A zero-duration activity started and finished within the pass.
    instant: bool,
}

/// Tick-by-tick list scheduler.
///
/// Each tick:
/// 1. collect ready tasks (not dispatched, all parents done) in graph order;
/// 2. run one assignment pass over idle workers in index order;
/// 3. stop if every worker is idle;
/// 4. record each worker's activity as a row;
/// 5. advance every busy worker by one tick.
///
/// The input graph is never mutated and the run is fully deterministic.
#[derive(Debug)]
pub struct Simulator<'g> {
    graph: &'g Graph,
    workers: Vec<Worker>,
    state: RunState,
    table: GanttTable,
    options: SimulationOptions,
    /// Passes since a task last computed, started or finished.
    stale_passes: usize,
    outcome: Option<SimulationOutcome>,
}

impl<'g> Simulator<'g> {
    /// Prepare a run. Fails if any adjacency entry points at a missing node
    /// or if a parent link has no matching edge.
    pub fn new(graph: &'g Graph, workers: usize, options: SimulationOptions) -> Result<Self> {
        for node in graph.nodes() {
            for child in node.child_ids() {
                graph.require(child)?;
            }
            for &parent in node.parents() {
                graph.edge_weight(parent, node.id())?;
            }
        }

        Ok(Self {
            graph,
            workers: vec![Worker::default(); workers],
            state: RunState::default(),
            table: GanttTable::new(workers),
            options,
            stale_passes: 0,
            outcome: None,
        })
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn table(&self) -> &GanttTable {
        &self.table
    }

    pub fn outcome(&self) -> Option<&SimulationOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_done(&self, task: NodeId) -> bool {
        self.state.is_done(task)
    }

    /// Tasks not yet dispatched whose parents have all finished, in graph
    /// order.
    pub fn ready_tasks(&self) -> Vec<NodeId> {
        self.graph
            .nodes()
            .iter()
            .filter(|n| self.state.is_ready(n))
            .map(|n| n.id())
            .collect()
    }

    /// Drive the run to its end.
    pub fn run(mut self) -> Result<Simulation> {
        while !self.is_finished() {
            self.step()?;
        }

        let outcome = self.outcome.unwrap_or(SimulationOutcome::Completed);
        Ok(Simulation {
            table: self.table,
            outcome,
        })
    }

    /// Advance by one recorded tick, or end the run.
    pub fn step(&mut self) -> Result<SimStep> {
        let mut step = SimStep::default();
        if self.is_finished() {
            step.finished = true;
            return Ok(step);
        }

        loop {
            if self.stale_passes >= self.options.max_ticks {
                self.finish(StallReason::TickLimit);
                step.finished = true;
                return Ok(step);
            }

            let ready = self.ready_tasks();
            let pass = self.assign(ready)?;
            let mut progressed = !pass.dispatched.is_empty() || !pass.completed.is_empty();
            step.dispatched.extend(pass.dispatched);
            step.completed.extend(pass.completed);

            if self.workers.iter().all(|w| !w.is_busy()) {
                if pass.instant {
                    // Zero-duration work finished; new tasks may be ready.
                    self.note_progress(progressed);
                    continue;
                }
                self.finish(StallReason::NoProgress);
                step.finished = true;
                return Ok(step);
            }

            let row = self.record();
            progressed |= row.iter().flatten().any(|c| c.phase == Phase::Compute);
            self.note_progress(progressed);
            trace!(tick = self.table.len(), ?row, "recorded tick");
            self.table.push_row(row.clone());
            step.row = Some(row);

            step.completed.extend(self.advance());
            return Ok(step);
        }
    }

    fn note_progress(&mut self, progressed: bool) {
        if progressed {
            self.stale_passes = 0;
        } else {
            self.stale_passes += 1;
        }
    }

    fn finish(&mut self, reason: StallReason) {
        let pending: Vec<NodeId> = self
            .graph
            .ids()
            .filter(|&id| !self.state.is_done(id))
            .collect();

        let outcome = if pending.is_empty() {
            info!(
                ticks = self.table.len(),
                workers = self.workers.len(),
                "simulation completed"
            );
            SimulationOutcome::Completed
        } else {
            warn!(
                ticks = self.table.len(),
                ?pending,
                ?reason,
                "simulation stalled"
            );
            SimulationOutcome::Stalled { pending, reason }
        };
        self.outcome = Some(outcome);
    }

    /// Index of the worker holding the fewest (but at least one) of `task`'s
    /// parent outputs. Ties go to the lower index.
    fn preferred_worker(&self, task: NodeId) -> Result<Option<usize>> {
        let parents = self.graph.require(task)?.parents();
        let mut best: Option<(usize, usize)> = None;

        for (index, worker) in self.workers.iter().enumerate() {
            let count = worker.shared_count(parents);
            if count == 0 {
                continue;
            }
            if best.map(|(c, _)| count < c).unwrap_or(true) {
                best = Some((count, index));
            }
        }

        Ok(best.map(|(_, index)| index))
    }

    /// First worker (by index) whose cache holds `task`'s output.
    fn owner_of(&self, task: NodeId) -> Option<usize> {
        self.workers.iter().position(|w| w.holds(task))
    }

    /// One assignment pass. Only the front of the ready queue is considered;
    /// it leaves the queue once dispatched.
    fn assign(&mut self, ready: Vec<NodeId>) -> Result<Pass> {
        let mut queue: VecDeque<(NodeId, Option<usize>)> = VecDeque::with_capacity(ready.len());
        for task in ready {
            queue.push_back((task, self.preferred_worker(task)?));
        }

        let graph = self.graph;
        let mut pass = Pass::default();

        for index in 0..self.workers.len() {
            if self.workers[index].is_busy() {
                continue;
            }
            let Some(&(task, preferred)) = queue.front() else {
                break;
            };
            if preferred.is_some_and(|p| p != index) {
                continue;
            }

            let node = graph.require(task)?;
            let mut missing: Vec<NodeId> = Vec::new();
            for &parent in node.parents() {
                // Parallel edges list a parent more than once.
                if !self.workers[index].holds(parent) && !missing.contains(&parent) {
                    missing.push(parent);
                }
            }

            if !missing.is_empty() {
                self.fetch(index, task, &missing, &mut pass)?;
                continue;
            }

            queue.pop_front();
            self.state.mark_scheduled(task);
            debug!(task, worker = index, weight = node.weight(), "dispatching compute");
            pass.dispatched.push(task);
            self.start(index, Activity::new(task, Phase::Compute, node.weight()), &mut pass);
        }

        Ok(pass)
    }

    /// Start moving `task`'s missing parent outputs towards worker `index`.
    ///
    /// An output resident on another idle worker is written out by that
    /// worker. An output sitting in the shared store is read in by `index`,
    /// at most one read per worker per pass.
    fn fetch(&mut self, index: usize, task: NodeId, missing: &[NodeId], pass: &mut Pass) -> Result<()> {
        for &parent in missing {
            let duration = self.graph.edge_weight(parent, task)?;

            match self.owner_of(parent) {
                None => {
                    if !self.state.in_store(parent) {
                        trace!(task, parent, "parent output in flight; waiting");
                        continue;
                    }
                    if self.workers[index].is_busy() {
                        continue;
                    }
                    debug!(task, parent, worker = index, duration, "reading parent output");
                    self.start(index, Activity::new(parent, Phase::Read, duration), pass);
                }
                Some(owner) => {
                    if self.workers[owner].is_busy() {
                        trace!(task, parent, owner, "owner busy; retrying next tick");
                        continue;
                    }
                    debug!(task, parent, worker = owner, duration, "writing parent output");
                    self.start(owner, Activity::new(parent, Phase::Write, duration), pass);
                }
            }
        }
        Ok(())
    }

    fn start(&mut self, index: usize, activity: Activity, pass: &mut Pass) {
        let worker = &mut self.workers[index];
        match activity.phase {
            Phase::Compute | Phase::Read => worker.resident.push(activity.task),
            Phase::Write => worker.evict(activity.task),
        }

        if activity.remaining == 0 {
            pass.instant = true;
            if activity.phase == Phase::Compute {
                pass.completed.push(activity.task);
            }
            self.complete(activity);
        } else {
            worker.current = Some(activity);
        }
    }

    fn complete(&mut self, activity: Activity) {
        match activity.phase {
            Phase::Compute => self.state.mark_done(activity.task),
            Phase::Write => self.state.put_in_store(activity.task),
            Phase::Read => self.state.take_from_store(activity.task),
        }
    }

    fn record(&self) -> Row {
        self.workers
            .iter()
            .map(|w| {
                w.current.map(|a| Cell {
                    task: a.task,
                    phase: a.phase,
                })
            })
            .collect()
    }

    /// Count every busy worker down by one tick. Returns tasks whose compute
    /// phase finished.
    fn advance(&mut self) -> Vec<NodeId> {
        let mut finished = Vec::new();
        let mut completed = Vec::new();

        for worker in self.workers.iter_mut() {
            let Some(activity) = worker.current.as_mut() else {
                continue;
            };
            activity.remaining = activity.remaining.saturating_sub(1);
            if activity.remaining == 0 {
                finished.push(*activity);
                worker.current = None;
            }
        }

        for activity in finished {
            if activity.phase == Phase::Compute {
                completed.push(activity.task);
            }
            self.complete(activity);
        }
        completed
    }
}
