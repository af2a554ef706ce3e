// tests/graph_store.rs

use taskgantt::errors::GanttError;
use taskgantt::graph::{Edge, Graph, GraphEdit, GraphEditor, IdAllocator};
use taskgantt::types::SortStrategy;
use taskgantt_test_utils::builders::GraphBuilder;
use taskgantt_test_utils::init_tracing;

#[test]
fn ids_increase_and_are_never_reused() {
    init_tracing();
    let mut ids = IdAllocator::starting_at(10);
    let mut graph = Graph::directed();

    let a = graph.add_node(&mut ids);
    let b = graph.add_node(&mut ids);
    assert_eq!((a, b), (10, 11));

    graph.remove_node(b).unwrap();
    let c = graph.add_node(&mut ids);
    assert_eq!(c, 12);

    let node = graph.node(a).unwrap();
    assert_eq!(node.weight(), 0);
    assert!(node.children().is_empty());
    assert!(node.parents().is_empty());
}

#[test]
fn add_node_skips_ids_taken_explicitly() {
    let mut ids = IdAllocator::new();
    let mut graph = Graph::directed();
    graph.insert_node(0).unwrap();
    graph.insert_node(1).unwrap();

    assert_eq!(graph.add_node(&mut ids), 2);
}

#[test]
fn insert_node_rejects_duplicate_id() {
    let mut graph = GraphBuilder::directed().node(3, 1).build();
    match graph.insert_node(3) {
        Err(GanttError::DuplicateNode(3)) => {}
        other => panic!("expected DuplicateNode, got {other:?}"),
    }
}

#[test]
fn directed_edge_links_child_and_parent() {
    let mut graph = GraphBuilder::directed().node(0, 1).node(1, 1).build();
    graph.add_edge(0, 1).unwrap();

    assert_eq!(graph.node(0).unwrap().children(), &[Edge { to: 1, weight: 0 }]);
    assert!(graph.node(0).unwrap().parents().is_empty());
    assert_eq!(graph.node(1).unwrap().parents(), &[0]);
    assert!(graph.node(1).unwrap().children().is_empty());
}

#[test]
fn undirected_edge_is_mirrored() {
    let mut graph = GraphBuilder::undirected().node(0, 1).node(1, 1).build();
    graph.add_edge(0, 1).unwrap();
    graph.set_edge_weight(0, 1, 4).unwrap();

    let a = graph.node(0).unwrap();
    let b = graph.node(1).unwrap();
    assert_eq!(a.children(), &[Edge { to: 1, weight: 4 }]);
    assert_eq!(b.children(), &[Edge { to: 0, weight: 4 }]);
    assert_eq!(a.parents(), &[1]);
    assert_eq!(b.parents(), &[0]);

    graph.remove_edge(1, 0).unwrap();
    assert!(graph.node(0).unwrap().children().is_empty());
    assert!(graph.node(0).unwrap().parents().is_empty());
    assert!(graph.node(1).unwrap().children().is_empty());
    assert!(graph.node(1).unwrap().parents().is_empty());
}

#[test]
fn edge_to_missing_node_is_rejected() {
    let mut graph = GraphBuilder::directed().node(0, 1).build();
    match graph.add_edge(0, 9) {
        Err(GanttError::NodeNotFound(9)) => {}
        other => panic!("expected NodeNotFound, got {other:?}"),
    }
    assert!(graph.node(0).unwrap().children().is_empty());
}

#[test]
fn removing_node_cascades_to_all_edges() {
    let mut graph = GraphBuilder::directed()
        .node(0, 1)
        .node(1, 1)
        .node(2, 1)
        .edge(0, 1, 3)
        .edge(1, 2, 4)
        .edge(0, 2, 5)
        .build();

    graph.remove_node(1).unwrap();

    assert!(!graph.contains(1));
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.node(0).unwrap().children(), &[Edge { to: 2, weight: 5 }]);
    assert_eq!(graph.node(2).unwrap().parents(), &[0]);
}

#[test]
fn removing_edge_keeps_remaining_weights_aligned() {
    let mut graph = GraphBuilder::directed()
        .node(0, 1)
        .node(1, 1)
        .node(2, 1)
        .edge(0, 1, 5)
        .edge(0, 2, 7)
        .build();

    graph.remove_edge(0, 1).unwrap();

    assert_eq!(graph.node(0).unwrap().children(), &[Edge { to: 2, weight: 7 }]);
    assert!(graph.node(1).unwrap().parents().is_empty());
    assert_eq!(graph.edge_weight(0, 2).unwrap(), 7);
}

#[test]
fn weight_updates_require_existing_targets() {
    let mut graph = GraphBuilder::directed().node(0, 1).node(1, 1).edge(0, 1, 0).build();

    graph.set_node_weight(1, 9).unwrap();
    graph.set_edge_weight(0, 1, 6).unwrap();
    assert_eq!(graph.node(1).unwrap().weight(), 9);
    assert_eq!(graph.edge_weight(0, 1).unwrap(), 6);

    assert!(matches!(
        graph.set_edge_weight(1, 0, 2),
        Err(GanttError::EdgeNotFound { from: 1, to: 0 })
    ));
    assert!(matches!(
        graph.set_node_weight(7, 2),
        Err(GanttError::NodeNotFound(7))
    ));
    assert!(matches!(
        graph.remove_edge(1, 0),
        Err(GanttError::EdgeNotFound { .. })
    ));
}

#[test]
fn editor_reports_flags_after_each_edit() {
    init_tracing();
    let mut editor = GraphEditor::new(true);

    let step = editor.apply(GraphEdit::AddNode).unwrap();
    assert_eq!(step.added, Some(0));
    assert!(step.analysis.acyclic);
    assert!(step.analysis.connected);

    let step = editor.apply(GraphEdit::AddNode).unwrap();
    assert_eq!(step.added, Some(1));
    assert!(!step.analysis.connected);

    let step = editor.apply(GraphEdit::AddEdge { from: 0, to: 1 }).unwrap();
    assert_eq!(step.added, None);
    assert!(step.analysis.acyclic);
    assert!(step.analysis.connected);

    let step = editor.apply(GraphEdit::AddEdge { from: 1, to: 0 }).unwrap();
    assert!(!step.analysis.acyclic);

    let step = editor.apply(GraphEdit::RemoveEdge { from: 1, to: 0 }).unwrap();
    assert!(step.analysis.acyclic);

    editor
        .apply(GraphEdit::SetEdgeWeight { from: 0, to: 1, weight: 3 })
        .unwrap();
    editor
        .apply(GraphEdit::SetNodeWeight { id: 1, weight: 8 })
        .unwrap();
    assert_eq!(editor.graph().edge_weight(0, 1).unwrap(), 3);
    assert_eq!(editor.graph().node(1).unwrap().weight(), 8);
}

#[test]
fn failed_edit_leaves_graph_untouched() {
    let mut editor = GraphEditor::new(true);
    editor.apply(GraphEdit::AddNode).unwrap();
    editor.apply(GraphEdit::AddNode).unwrap();
    let before = editor.graph().clone();

    let result = editor.apply(GraphEdit::RemoveNodes(vec![0, 99]));
    assert!(matches!(result, Err(GanttError::NodeNotFound(99))));
    assert_eq!(editor.graph(), &before);
}

#[test]
fn clear_empties_graph_but_keeps_id_sequence() {
    let mut editor = GraphEditor::new(true);
    editor.apply(GraphEdit::AddNode).unwrap();
    editor.apply(GraphEdit::AddNode).unwrap();

    let step = editor.apply(GraphEdit::Clear).unwrap();
    assert!(editor.graph().is_empty());
    assert!(step.analysis.acyclic && step.analysis.connected);

    let step = editor.apply(GraphEdit::AddNode).unwrap();
    assert_eq!(step.added, Some(2));
}

#[test]
fn sorted_order_falls_back_to_graph_order_on_cycle() {
    let mut editor = GraphEditor::new(true);
    for _ in 0..3 {
        editor.apply(GraphEdit::AddNode).unwrap();
    }
    editor.apply(GraphEdit::SetNodeWeight { id: 2, weight: 5 }).unwrap();
    editor.apply(GraphEdit::AddEdge { from: 0, to: 1 }).unwrap();
    editor.apply(GraphEdit::AddEdge { from: 1, to: 0 }).unwrap();

    editor.set_sort(SortStrategy::CritTime);
    assert_eq!(editor.sorted_order().unwrap(), vec![0, 1, 2]);

    editor.set_sort(SortStrategy::Weight);
    assert_eq!(editor.sorted_order().unwrap(), vec![2, 0, 1]);
}

#[test]
fn editor_loads_and_exports_documents() {
    let graph = GraphBuilder::directed()
        .node(3, 2)
        .node(8, 1)
        .edge(3, 8, 4)
        .build();
    let doc = graph.to_document();

    let mut editor = GraphEditor::new(true);
    let step = editor.load(&doc).unwrap();
    assert_eq!(step.added, None);
    assert!(step.analysis.acyclic && step.analysis.connected);
    assert_eq!(editor.document(), doc);

    // New nodes continue after the highest loaded id.
    let step = editor.apply(GraphEdit::AddNode).unwrap();
    assert_eq!(step.added, Some(9));
    assert!(!step.analysis.connected);

    let graph = editor.into_graph();
    assert!(graph.has_edge(3, 8));
    assert!(!graph.has_edge(8, 3));
    assert!(graph.node(8).unwrap().is_leaf());
    assert!(!graph.node(3).unwrap().is_leaf());
}
