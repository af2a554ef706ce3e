// src/analysis/mod.rs

//! Pure analysis over a [`Graph`](crate::graph::Graph).
//!
//! - [`integrity`] answers the two structural questions shown after every
//!   edit: is the graph acyclic, and is it connected.
//! - [`ordering`] produces display orders for acyclic graphs.
//!
//! Walks are recursive; their depth is bounded by the number of nodes, which
//! is editor-scale in practice.

pub mod integrity;
pub mod ordering;

pub use integrity::{GraphAnalysis, analyze, find_cycle_node, is_acyclic, is_connected};
pub use ordering::{critical_path, critical_times, order_nodes, path_lengths};
