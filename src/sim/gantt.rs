// src/sim/gantt.rs

use std::fmt;

use crate::types::{NodeId, Phase};

/// What one worker was doing during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub task: NodeId,
    pub phase: Phase,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.phase {
            Phase::Compute => write!(f, "{}", self.task),
            other => write!(f, "{} {}", self.task, other),
        }
    }
}

/// One tick: a cell per worker, `None` when the worker is idle.
pub type Row = Vec<Option<Cell>>;

/// Time/worker occupancy table. Row `t` describes tick `t`, starting at 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GanttTable {
    workers: usize,
    rows: Vec<Row>,
}

impl GanttTable {
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            rows: Vec::new(),
        }
    }

    pub(crate) fn push_row(&mut self, row: Row) {
        debug_assert_eq!(row.len(), self.workers);
        self.rows.push(row);
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of ticks until the last worker went idle.
    pub fn makespan(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, tick: usize, worker: usize) -> Option<Cell> {
        self.rows.get(tick)?.get(worker).copied().flatten()
    }

    /// Ticks during which `worker` was doing anything.
    pub fn busy_ticks(&self, worker: usize) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row.get(worker), Some(Some(_))))
            .count()
    }

    /// Fraction of the makespan `worker` was busy; 0 for an empty table.
    pub fn utilization(&self, worker: usize) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        self.busy_ticks(worker) as f64 / self.rows.len() as f64
    }

    /// Cells in `phase`, summed over all workers and ticks.
    pub fn phase_ticks(&self, phase: Phase) -> usize {
        self.rows
            .iter()
            .flatten()
            .flatten()
            .filter(|c| c.phase == phase)
            .count()
    }

    /// `(tick, worker)` of every cell showing `task` in `phase`, in time order.
    pub fn occurrences(&self, task: NodeId, phase: Phase) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (tick, row) in self.rows.iter().enumerate() {
            for (worker, cell) in row.iter().enumerate() {
                if *cell == Some(Cell { task, phase }) {
                    out.push((tick, worker));
                }
            }
        }
        out
    }
}

impl fmt::Display for GanttTable {
    /// Renders a header `time | P0 | P1 ...` and one line per tick.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<Vec<String>> = Vec::with_capacity(self.rows.len() + 1);

        let mut header = vec!["time".to_string()];
        header.extend((0..self.workers).map(|w| format!("P{w}")));
        lines.push(header);

        for (tick, row) in self.rows.iter().enumerate() {
            let mut line = vec![tick.to_string()];
            line.extend(
                row.iter()
                    .map(|cell| cell.map(|c| c.to_string()).unwrap_or_default()),
            );
            lines.push(line);
        }

        let mut widths = vec![0usize; self.workers + 1];
        for line in &lines {
            for (col, text) in line.iter().enumerate() {
                widths[col] = widths[col].max(text.len());
            }
        }

        for line in &lines {
            let rendered: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(text, &w)| format!("{text:<w$}"))
                .collect();
            writeln!(f, "{}", rendered.join(" | ").trim_end())?;
        }
        Ok(())
    }
}
