// src/config/model.rs

use serde::Deserialize;

use crate::sim::SimulationOptions;
use crate::types::SortStrategy;

/// Configuration exactly as read from a TOML file.
///
/// ```toml
/// [simulation]
/// workers = 2
/// max_ticks = 100000
///
/// [analysis]
/// sort = "critical-path"
/// ```
///
/// All sections are optional and have reasonable defaults. Convert into a
/// [`ConfigFile`] with `TryFrom` to validate it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub simulation: SimulationSection,

    #[serde(default)]
    pub analysis: AnalysisSection,
}

/// `[simulation]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSection {
    /// Worker count used when the command line does not give one.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Consecutive ticks without any task computing before a run is reported
    /// as stalled.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: usize,
}

fn default_workers() -> usize {
    1
}

fn default_max_ticks() -> usize {
    SimulationOptions::default().max_ticks
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            max_ticks: default_max_ticks(),
        }
    }
}

/// `[analysis]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisSection {
    /// `"crit-time"` (default), `"critical-path"` or `"weight"`.
    #[serde(default)]
    pub sort: SortStrategy,
}

/// Validated configuration.
///
/// Only constructible through `TryFrom<RawConfigFile>` (or `Default`), so
/// holders can rely on every value being in range.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    simulation: SimulationSection,
    analysis: AnalysisSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(simulation: SimulationSection, analysis: AnalysisSection) -> Self {
        Self {
            simulation,
            analysis,
        }
    }

    pub fn workers(&self) -> usize {
        self.simulation.workers
    }

    pub fn sort(&self) -> SortStrategy {
        self.analysis.sort
    }

    pub fn simulation_options(&self) -> SimulationOptions {
        SimulationOptions {
            max_ticks: self.simulation.max_ticks,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(SimulationSection::default(), AnalysisSection::default())
    }
}
