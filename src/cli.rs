// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::SortStrategy;

/// Command-line arguments for `taskgantt`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskgantt",
    version,
    about = "Analyse a weighted task graph and simulate its execution on a set of workers.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the task graph document (JSON with `nodes` and `edges`).
    #[arg(long, value_name = "PATH")]
    pub graph: String,

    /// Path to the config file (TOML).
    ///
    /// If omitted, `Taskgantt.toml` in the current directory is used when it
    /// exists; otherwise built-in defaults apply.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Number of workers; overrides `[simulation].workers`.
    #[arg(long, value_name = "N", conflicts_with = "topology")]
    pub workers: Option<usize>,

    /// Worker topology document; its node count becomes the worker count.
    #[arg(long, value_name = "PATH")]
    pub topology: Option<String>,

    /// Display ordering; overrides `[analysis].sort`.
    #[arg(long, value_enum, value_name = "STRATEGY")]
    pub sort: Option<SortArg>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKGANTT_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the graph analysis but don't run the simulation.
    #[arg(long)]
    pub dry_run: bool,
}

/// Sort strategy as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum SortArg {
    CritTime,
    CriticalPath,
    Weight,
}

impl From<SortArg> for SortStrategy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::CritTime => SortStrategy::CritTime,
            SortArg::CriticalPath => SortStrategy::CriticalPath,
            SortArg::Weight => SortStrategy::Weight,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// `EnvFilter` directive for this level.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
