// src/graph/editor.rs

//! Editing core behind an interactive graph editor.
//!
//! The drawing surface turns pointer and keyboard input into [`GraphEdit`]
//! events. [`GraphEditor::apply`] applies one event atomically and answers
//! with the flags the surface displays (acyclic / connected). The editor has
//! no rendering or input handling of its own.

use tracing::{debug, warn};

use crate::analysis::{self, GraphAnalysis};
use crate::errors::Result;
use crate::graph::document::GraphDocument;
use crate::graph::ids::IdAllocator;
use crate::graph::store::Graph;
use crate::types::{NodeId, SortStrategy, Weight};

/// A discrete mutation requested by the editing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphEdit {
    AddNode,
    RemoveNodes(Vec<NodeId>),
    AddEdge { from: NodeId, to: NodeId },
    RemoveEdge { from: NodeId, to: NodeId },
    SetNodeWeight { id: NodeId, weight: Weight },
    SetEdgeWeight { from: NodeId, to: NodeId, weight: Weight },
    Clear,
}

/// Result of applying one [`GraphEdit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorStep {
    /// Id of the node created by [`GraphEdit::AddNode`].
    pub added: Option<NodeId>,
    /// Flags of the graph after the edit.
    pub analysis: GraphAnalysis,
}

/// Owns the graph being edited, its id allocator and the selected display
/// ordering.
#[derive(Debug, Clone)]
pub struct GraphEditor {
    graph: Graph,
    ids: IdAllocator,
    sort: SortStrategy,
}

impl GraphEditor {
    pub fn new(directed: bool) -> Self {
        Self::with_graph(Graph::new(directed), IdAllocator::new())
    }

    pub fn with_graph(graph: Graph, ids: IdAllocator) -> Self {
        Self {
            graph,
            ids,
            sort: SortStrategy::default(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    pub fn sort(&self) -> SortStrategy {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortStrategy) {
        self.sort = sort;
    }

    /// Apply one edit. On error the graph is left exactly as it was.
    pub fn apply(&mut self, edit: GraphEdit) -> Result<EditorStep> {
        let mut next = self.graph.clone();
        let mut added = None;

        match &edit {
            GraphEdit::AddNode => {
                added = Some(next.add_node(&mut self.ids));
            }
            GraphEdit::RemoveNodes(ids) => {
                for &id in ids {
                    next.remove_node(id)?;
                }
            }
            GraphEdit::AddEdge { from, to } => next.add_edge(*from, *to)?,
            GraphEdit::RemoveEdge { from, to } => next.remove_edge(*from, *to)?,
            GraphEdit::SetNodeWeight { id, weight } => next.set_node_weight(*id, *weight)?,
            GraphEdit::SetEdgeWeight { from, to, weight } => {
                next.set_edge_weight(*from, *to, *weight)?
            }
            GraphEdit::Clear => next.clear(),
        }

        let analysis = analysis::analyze(&next)?;
        self.graph = next;

        debug!(
            ?edit,
            acyclic = analysis.acyclic,
            connected = analysis.connected,
            "applied graph edit"
        );
        Ok(EditorStep { added, analysis })
    }

    /// Replace the whole graph with the contents of `doc`.
    pub fn load(&mut self, doc: &GraphDocument) -> Result<EditorStep> {
        let mut ids = self.ids.clone();
        let graph = Graph::from_document(doc, &mut ids)?;
        let analysis = analysis::analyze(&graph)?;

        self.graph = graph;
        self.ids = ids;
        Ok(EditorStep {
            added: None,
            analysis,
        })
    }

    pub fn document(&self) -> GraphDocument {
        self.graph.to_document()
    }

    pub fn analysis(&self) -> Result<GraphAnalysis> {
        analysis::analyze(&self.graph)
    }

    /// Node ids in the selected display order.
    ///
    /// Orderings that need an acyclic graph fall back to graph order while
    /// the graph contains a cycle.
    pub fn sorted_order(&self) -> Result<Vec<NodeId>> {
        if self.sort.requires_acyclic() && !analysis::is_acyclic(&self.graph)? {
            warn!(sort = ?self.sort, "graph has a cycle; showing unsorted order");
            return Ok(self.graph.ids().collect());
        }
        analysis::order_nodes(&self.graph, self.sort)
    }
}
