// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::types::NodeId;

#[derive(Error, Debug)]
pub enum GanttError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Edge not found: {from} -> {to}")]
    EdgeNotFound { from: NodeId, to: NodeId },

    #[error("Node id already in use: {0}")]
    DuplicateNode(NodeId),

    #[error("Cycle detected in task graph: {0}")]
    CyclicGraph(String),

    #[error("Simulation stalled after {ticks} ticks with pending tasks {pending:?}")]
    Stalled { pending: Vec<NodeId>, ticks: usize },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, GanttError>;
