use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Identifier of a task node. Stable for the node's lifetime.
pub type NodeId = u64;

/// Execution or transfer cost, in simulated ticks.
pub type Weight = u64;

/// What a worker is doing during one tick.
///
/// - `Compute`: running the task itself.
/// - `Read`: pulling a dependency's output from the shared store into the
///   worker's local cache.
/// - `Write`: pushing a locally resident output out to the shared store so a
///   different worker can read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Compute,
    Read,
    Write,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Compute => "compute",
            Phase::Read => "read",
            Phase::Write => "write",
        };
        f.write_str(s)
    }
}

/// Ordering used when displaying the nodes of an acyclic task graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortStrategy {
    /// Descending critical time (own weight plus the most negative
    /// downstream time).
    CritTime,
    /// Nodes on the longest path from the root first, then the rest by
    /// descending path length.
    CriticalPath,
    /// Descending node weight.
    Weight,
}

impl Default for SortStrategy {
    fn default() -> Self {
        SortStrategy::CritTime
    }
}

impl SortStrategy {
    /// Whether this ordering is only defined on acyclic graphs.
    pub fn requires_acyclic(self) -> bool {
        matches!(self, SortStrategy::CritTime | SortStrategy::CriticalPath)
    }
}

impl FromStr for SortStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "crit-time" => Ok(SortStrategy::CritTime),
            "critical-path" => Ok(SortStrategy::CriticalPath),
            "weight" => Ok(SortStrategy::Weight),
            other => Err(format!(
                "invalid sort strategy: {other} (expected \"crit-time\", \"critical-path\" or \"weight\")"
            )),
        }
    }
}
