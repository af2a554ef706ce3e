// src/graph/mod.rs

//! Task graph storage and editing.
//!
//! - [`node`] defines a task node and its weighted outgoing edges.
//! - [`store`] holds the [`Graph`] itself and its mutation primitives.
//! - [`ids`] provides the caller-owned [`IdAllocator`].
//! - [`document`] converts a graph to and from its persisted JSON form.
//! - [`editor`] applies discrete editing events and reports the analysis
//!   flags the editing surface displays after each one.

pub mod document;
pub mod editor;
pub mod ids;
pub mod node;
pub mod store;

pub use document::{EdgeRecord, GraphDocument, NodeRecord, load_graph, read_document, save_graph};
pub use editor::{EditorStep, GraphEdit, GraphEditor};
pub use ids::IdAllocator;
pub use node::{Edge, GraphNode};
pub use store::Graph;
