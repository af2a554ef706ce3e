// src/logging.rs

//! Logging setup for `taskgantt` using `tracing` + `tracing-subscriber`.
//!
//! The filter is chosen in this order:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `TASKGANTT_LOG` environment variable, which accepts full
//!    `EnvFilter` directives such as `taskgantt::sim=debug,info`
//! 3. default to `info`
//!
//! Logs go to STDERR; stdout carries only the analysis report and the
//! Gantt table.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable consulted when no CLI level is given.
pub const LOG_ENV: &str = "TASKGANTT_LOG";

/// Initialise the global logging subscriber.
///
/// Fails if a global subscriber was already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = match cli_level {
        Some(lvl) => EnvFilter::new(lvl.as_directive()),
        None => filter_from_env().unwrap_or_else(|| EnvFilter::new("info")),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing tracing subscriber: {e}"))
}

fn filter_from_env() -> Option<EnvFilter> {
    let raw = std::env::var(LOG_ENV).ok()?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    EnvFilter::try_new(raw).ok()
}
