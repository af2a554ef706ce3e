// tests/properties.rs

use std::collections::HashSet;

use petgraph::algo::is_cyclic_directed;
use petgraph::graphmap::DiGraphMap;
use proptest::prelude::*;
use taskgantt::analysis::{critical_times, is_acyclic, is_connected, order_nodes};
use taskgantt::graph::{Graph, IdAllocator};
use taskgantt::sim::{Cell, SimulationOptions, SimulationOutcome, StallReason, simulate, simulate_with};
use taskgantt::types::{NodeId, Phase, SortStrategy, Weight};
use taskgantt_test_utils::builders::GraphBuilder;

type EdgeList = Vec<(usize, usize, Weight)>;

// Node weights plus raw edge endpoints. Endpoints are reduced modulo the node
// count when the graph is built.
fn raw_graph(max_nodes: usize) -> impl Strategy<Value = (Vec<Weight>, EdgeList)> {
    (1..=max_nodes).prop_flat_map(|n| {
        (
            proptest::collection::vec(0..5u64, n),
            proptest::collection::vec((any::<usize>(), any::<usize>(), 0..4u64), 0..(2 * n)),
        )
    })
}

fn build(weights: &[Weight], edges: &EdgeList, acyclic: bool) -> Graph {
    let n = weights.len();
    let mut builder = GraphBuilder::directed();
    for (id, &w) in weights.iter().enumerate() {
        builder = builder.node(id as NodeId, w);
    }
    for &(a, b, w) in edges {
        let (mut from, mut to) = (a % n, b % n);
        if acyclic {
            // Only allow edges from a lower to a higher index.
            if from == to {
                continue;
            }
            if from > to {
                std::mem::swap(&mut from, &mut to);
            }
        }
        builder = builder.edge(from as NodeId, to as NodeId, w);
    }
    builder.build()
}

fn reachable_ignoring_direction(graph: &Graph, start: NodeId) -> HashSet<NodeId> {
    let mut seen = HashSet::new();
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        let node = graph.require(id).unwrap();
        stack.extend(node.child_ids());
        stack.extend(node.parents().iter().copied());
    }
    seen
}

proptest! {
    #[test]
    fn acyclicity_matches_petgraph((weights, edges) in raw_graph(8)) {
        let graph = build(&weights, &edges, false);

        let mut reference: DiGraphMap<NodeId, ()> = DiGraphMap::new();
        for id in graph.ids() {
            reference.add_node(id);
        }
        for node in graph.nodes() {
            for child in node.child_ids() {
                reference.add_edge(node.id(), child, ());
            }
        }

        prop_assert_eq!(is_acyclic(&graph).unwrap(), !is_cyclic_directed(&reference));
    }

    #[test]
    fn connectivity_does_not_depend_on_start((weights, edges) in raw_graph(8)) {
        let graph = build(&weights, &edges, false);
        let connected = is_connected(&graph).unwrap();

        for id in graph.ids() {
            let seen = reachable_ignoring_direction(&graph, id);
            prop_assert_eq!(seen.len() == graph.len(), connected);
        }
    }

    #[test]
    fn crit_time_order_is_stable_and_descending((weights, edges) in raw_graph(8)) {
        let graph = build(&weights, &edges, true);
        let times = critical_times(&graph).unwrap();
        let order = order_nodes(&graph, SortStrategy::CritTime).unwrap();

        prop_assert_eq!(order.len(), graph.len());
        for pair in order.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(times[&a] >= times[&b]);
            if times[&a] == times[&b] {
                prop_assert!(graph.position(a) < graph.position(b));
            }
        }
    }

    #[test]
    fn document_round_trip_is_lossless((weights, edges) in raw_graph(8)) {
        let graph = build(&weights, &edges, false);
        let doc = graph.to_document();
        let rebuilt = Graph::from_document(&doc, &mut IdAllocator::new()).unwrap();
        prop_assert_eq!(rebuilt.to_document(), doc);
    }

    #[test]
    fn dag_simulation_respects_dependencies(
        (weights, edges) in raw_graph(8),
        workers in 1..4usize,
    ) {
        // Positive durations: every pass records a row.
        let weights: Vec<Weight> = weights.iter().map(|&w| w.max(1)).collect();
        let edges: EdgeList = edges.iter().map(|&(a, b, w)| (a, b, w.max(1))).collect();
        let graph = build(&weights, &edges, true);
        let options = SimulationOptions { max_ticks: 200 };
        let sim = simulate_with(&graph, workers, options).unwrap();

        // A DAG never gets stuck outright. With several workers parent
        // outputs may keep moving between them, and then the final
        // `max_ticks` rows show only writes and reads.
        match &sim.outcome {
            SimulationOutcome::Completed => {}
            SimulationOutcome::Stalled { pending, reason } => {
                prop_assert!(workers > 1);
                prop_assert_eq!(*reason, StallReason::TickLimit);
                prop_assert!(!pending.is_empty());

                let rows = sim.table.rows();
                prop_assert!(rows.len() >= options.max_ticks);
                let tail: Vec<Cell> = rows[rows.len() - options.max_ticks..]
                    .iter()
                    .flatten()
                    .flatten()
                    .copied()
                    .collect();
                prop_assert!(tail.iter().all(|c| c.phase != Phase::Compute));
                prop_assert!(tail.iter().any(|c| c.phase == Phase::Write));
                prop_assert!(tail.iter().any(|c| c.phase == Phase::Read));
            }
        }

        if sim.is_complete() {
            for node in graph.nodes() {
                let ticks = sim.table.occurrences(node.id(), Phase::Compute);
                prop_assert_eq!(ticks.len() as u64, node.weight());
            }
        }

        for node in graph.nodes() {
            let Some(&(last, _)) = sim.table.occurrences(node.id(), Phase::Compute).last() else {
                continue;
            };
            for child in node.child_ids() {
                if let Some(&(first, _)) = sim.table.occurrences(child, Phase::Compute).first() {
                    prop_assert!(last < first, "{} must finish before {} starts", node.id(), child);
                }
            }
        }

        let again = simulate_with(&graph, workers, options).unwrap();
        prop_assert_eq!(again, sim);
    }

    #[test]
    fn single_worker_always_completes_a_dag((weights, edges) in raw_graph(8)) {
        let graph = build(&weights, &edges, true);
        let sim = simulate(&graph, 1).unwrap();

        prop_assert!(sim.is_complete());
        let total: u64 = weights.iter().sum();
        prop_assert_eq!(sim.table.len() as u64, total);
        prop_assert_eq!(sim.table.phase_ticks(Phase::Read), 0);
        prop_assert_eq!(sim.table.phase_ticks(Phase::Write), 0);
    }
}
