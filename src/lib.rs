// src/lib.rs

pub mod analysis;
pub mod cli;
pub mod config;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod sim;
pub mod types;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::ConfigFile;
use crate::graph::{Graph, GraphEditor, IdAllocator, read_document};
use crate::sim::{Simulation, SimulationOutcome, simulate_with};
use crate::types::SortStrategy;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - task graph loading and analysis
/// - worker count resolution (flag, topology document or config)
/// - the simulation and its report
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = config::load_or_default(args.config.as_deref().map(Path::new))?;
    let sort = args.sort.map(SortStrategy::from).unwrap_or(cfg.sort());

    let doc = read_document(&args.graph)
        .with_context(|| format!("reading task graph from {:?}", args.graph))?;
    let mut editor = GraphEditor::new(doc.directed);
    editor.load(&doc)?;
    editor.set_sort(sort);

    let workers = resolve_workers(&args, &cfg)?;
    info!(
        nodes = editor.graph().len(),
        workers,
        ?sort,
        "loaded task graph"
    );

    let mut out = std::io::stdout().lock();
    write_analysis(&mut out, &editor)?;

    if args.dry_run {
        debug!("dry-run complete (no simulation)");
        return Ok(());
    }

    let simulation = simulate_with(editor.graph(), workers, cfg.simulation_options())?;
    write_schedule(&mut out, &simulation)?;
    simulation.into_completed()?;
    Ok(())
}

/// Worker count from `--topology`, then `--workers`, then the config.
fn resolve_workers(args: &CliArgs, cfg: &ConfigFile) -> Result<usize> {
    if let Some(path) = &args.topology {
        let topology = load_topology(path)?;
        let analysis = analysis::analyze(&topology)?;
        if !analysis.connected {
            warn!(path = %path, "worker topology is not connected");
        }
        return Ok(topology.len());
    }
    Ok(args.workers.unwrap_or(cfg.workers()))
}

/// Load a worker topology. Topologies are always undirected.
fn load_topology(path: &str) -> Result<Graph> {
    let mut doc = read_document(path)
        .with_context(|| format!("reading worker topology from {path:?}"))?;
    doc.directed = false;
    let graph = Graph::from_document(&doc, &mut IdAllocator::new())?;
    Ok(graph)
}

/// Print the flags and display order of the loaded graph.
pub fn write_analysis(out: &mut impl Write, editor: &GraphEditor) -> Result<()> {
    let analysis = editor.analysis()?;
    let order = editor.sorted_order()?;
    let order: Vec<String> = order.iter().map(|id| id.to_string()).collect();

    writeln!(out, "acyclic:   {}", analysis.acyclic)?;
    writeln!(out, "connected: {}", analysis.connected)?;
    writeln!(out, "sorted:    {}", order.join(", "))?;
    Ok(())
}

/// Print the Gantt table followed by per-worker utilization.
pub fn write_schedule(out: &mut impl Write, simulation: &Simulation) -> Result<()> {
    let table = &simulation.table;

    writeln!(out)?;
    write!(out, "{table}")?;
    writeln!(out)?;
    writeln!(out, "makespan: {}", table.makespan())?;
    for worker in 0..table.workers() {
        writeln!(
            out,
            "P{worker}: busy {} ticks ({:.0}%)",
            table.busy_ticks(worker),
            table.utilization(worker) * 100.0
        )?;
    }

    if let SimulationOutcome::Stalled { pending, reason } = &simulation.outcome {
        writeln!(out, "stalled ({reason:?}); pending tasks: {pending:?}")?;
    }
    Ok(())
}
