use std::rc::Rc;

use fnv::FnvHashMap;
use proptest::prelude::*;
use rcspp::graph::DualRow;
use rcspp::resource::{ArcPayload, Extender, NodeBound, ResourceFactory, ResourceSpec, ResourceValue};
use rcspp::{AlgorithmParams, Graph, SchedulerVariant, Solver};

fn cost_only_spec() -> Rc<ResourceSpec> {
    let mut factory = ResourceFactory::new();
    factory.add_additive_resource(true);
    factory.build()
}

/// Builds a layered DAG: `layers` layers of `width` nodes each, plus a
/// single source feeding layer 0 and a single sink fed by the last
/// layer, with one arc per (node, next-layer-node) pair at the given
/// cost. Every node id is dense and layering guarantees acyclicity.
fn layered_dag(spec: &ResourceSpec, widths: &[usize], costs: &[f64]) -> (Graph, FnvHashMap<u64, f64>) {
    let mut graph = Graph::new();
    let mut next_id = 0u64;
    let mut layer_ids: Vec<Vec<u64>> = Vec::new();

    let template = || {
        spec.make_template(vec![NodeBound::Unbounded], vec![ResourceValue::Number(0.0)])
            .unwrap()
    };

    for (layer_idx, &width) in widths.iter().enumerate() {
        let is_source = layer_idx == 0;
        let is_sink = layer_idx == widths.len() - 1;
        let mut ids = Vec::new();
        for _ in 0..width {
            graph.add_node(next_id, is_source, is_sink, template());
            ids.push(next_id);
            next_id += 1;
        }
        layer_ids.push(ids);
    }

    let mut arc_id = 0u64;
    let mut base_costs = FnvHashMap::default();
    let mut cost_iter = costs.iter().cycle();
    for pair in layer_ids.windows(2) {
        let (from_layer, to_layer) = (&pair[0], &pair[1]);
        for &from in from_layer {
            for &to in to_layer {
                let cost = *cost_iter.next().unwrap();
                let extender = Extender(vec![ArcPayload::Additive(cost)]);
                graph
                    .add_arc_with_dual_rows(arc_id, from, to, extender, cost, vec![DualRow { row_index: 0, coefficient: 1.0 }])
                    .unwrap();
                base_costs.insert(arc_id, cost);
                arc_id += 1;
            }
        }
    }

    (graph, base_costs)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn scheduler_variants_agree_on_random_layered_dags(
        widths in prop::collection::vec(1usize..4, 2..5),
        costs in prop::collection::vec(1.0f64..20.0, 1..12),
    ) {
        let spec = cost_only_spec();
        let (mut graph, _) = layered_dag(&spec, &widths, &costs);
        graph.sort_nodes();

        let mut last_cost = None;
        for variant in [SchedulerVariant::Simple, SchedulerVariant::Pushing, SchedulerVariant::Pulling] {
            let mut solver = Solver::new(graph.clone(), Rc::clone(&spec), AlgorithmParams::default());
            let solutions = solver.solve(variant).unwrap();
            prop_assert!(!solutions.is_empty());
            let cost = solutions.iter().fold(f64::INFINITY, |acc, s| acc.min(s.cost));
            if let Some(expected) = last_cost {
                prop_assert!((cost - expected).abs() < 1e-6);
            }
            last_cost = Some(cost);
        }
    }

    #[test]
    fn reduced_cost_update_is_idempotent(
        widths in prop::collection::vec(1usize..3, 2..4),
        costs in prop::collection::vec(1.0f64..20.0, 1..8),
        dual in -5.0f64..5.0,
    ) {
        let spec = cost_only_spec();
        let (mut graph, base_costs) = layered_dag(&spec, &widths, &costs);

        graph.update_dual_values(&base_costs, &[dual], 0).unwrap();
        let once: Vec<f64> = graph.arc_ids().map(|id| graph.get_arc(id).unwrap().cost).collect();

        graph.update_dual_values(&base_costs, &[dual], 0).unwrap();
        let twice: Vec<f64> = graph.arc_ids().map(|id| graph.get_arc(id).unwrap().cost).collect();

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn determinism_across_repeated_solves(
        widths in prop::collection::vec(1usize..4, 2..5),
        costs in prop::collection::vec(1.0f64..20.0, 1..12),
    ) {
        let spec = cost_only_spec();
        let (graph, _) = layered_dag(&spec, &widths, &costs);

        let mut solver = Solver::new(graph, spec, AlgorithmParams::default());
        let first = solver.solve(SchedulerVariant::Simple).unwrap();
        let second = solver.solve(SchedulerVariant::Simple).unwrap();
        prop_assert_eq!(first, second);
    }
}
