use std::rc::Rc;

use fnv::FnvHashMap;
use rcspp::graph::DualRow;
use rcspp::resource::{ArcPayload, Extender, NodeBound, ResourceFactory, ResourceSpec, ResourceValue};
use rcspp::{AlgorithmParams, Graph, SchedulerVariant, Solver};

fn cost_only_spec() -> Rc<ResourceSpec> {
    let mut factory = ResourceFactory::new();
    factory.add_additive_resource(true);
    factory.build()
}

fn add_cost_node(graph: &mut Graph, spec: &ResourceSpec, id: u64, source: bool, sink: bool) {
    let template = spec
        .make_template(vec![NodeBound::Unbounded], vec![ResourceValue::Number(0.0)])
        .unwrap();
    graph.add_node(id, source, sink, template);
}

fn add_cost_arc(graph: &mut Graph, id: u64, from: u64, to: u64, cost: f64) {
    let extender = Extender(vec![ArcPayload::Additive(cost)]);
    graph.add_arc(id, from, to, extender, cost).unwrap();
}

/// S1 — trivial chain: 0=src, 1, 2=sink; 0->1 cost 3, 1->2 cost 4.
#[test]
fn s1_trivial_chain() {
    let spec = cost_only_spec();
    let mut graph = Graph::new();
    for id in 0..3 {
        add_cost_node(&mut graph, &spec, id, id == 0, id == 2);
    }
    add_cost_arc(&mut graph, 0, 0, 1, 3.0);
    add_cost_arc(&mut graph, 1, 1, 2, 4.0);

    let mut solver = Solver::new(graph, spec, AlgorithmParams::default());
    let solutions = solver.solve(SchedulerVariant::Simple).unwrap();

    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].cost, 7.0);
    assert_eq!(solutions[0].path_node_ids, vec![0, 1, 2]);
    assert_eq!(solutions[0].path_arc_ids, vec![0, 1]);
}

/// S2 — dominance pruning: two parallel 0->1 arcs, the cheaper one should
/// be the only survivor feeding into the final solution.
#[test]
fn s2_dominance_pruning_picks_cheaper_parallel_arc() {
    let spec = cost_only_spec();
    let mut graph = Graph::new();
    for id in 0..3 {
        add_cost_node(&mut graph, &spec, id, id == 0, id == 2);
    }
    add_cost_arc(&mut graph, 0, 0, 1, 3.0);
    add_cost_arc(&mut graph, 2, 0, 1, 5.0);
    add_cost_arc(&mut graph, 1, 1, 2, 4.0);

    let mut params = AlgorithmParams::default();
    params.return_dominated_solutions = false;
    let mut solver = Solver::new(graph, spec, params);
    let solutions = solver.solve(SchedulerVariant::Simple).unwrap();

    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].cost, 7.0);
    assert_eq!(solutions[0].path_arc_ids, vec![0, 1]);
}

/// S3 — time window: 0=src tw[0,0], 1 tw[5,10] (effectively forces a wait
/// to 5), 2=sink tw[0,100]. Arcs 0->1 travel 2, 1->2 travel 3. Expected
/// total travel cost 5, feasible.
#[test]
fn s3_time_window_feasible() {
    let mut factory = ResourceFactory::new();
    factory.add_additive_resource(true);
    factory.add_time_window_resource();
    let spec = factory.build();

    let mut graph = Graph::new();
    let src_template = spec
        .make_template(
            vec![NodeBound::Unbounded, NodeBound::TimeWindow { lower: 0.0, upper: 0.0 }],
            vec![ResourceValue::Number(0.0), ResourceValue::Number(0.0)],
        )
        .unwrap();
    graph.add_node(0, true, false, src_template);

    let mid_template = spec
        .make_template(
            vec![NodeBound::Unbounded, NodeBound::TimeWindow { lower: 5.0, upper: 10.0 }],
            vec![ResourceValue::Number(0.0), ResourceValue::Number(0.0)],
        )
        .unwrap();
    graph.add_node(1, false, false, mid_template);

    let sink_template = spec
        .make_template(
            vec![NodeBound::Unbounded, NodeBound::TimeWindow { lower: 0.0, upper: 100.0 }],
            vec![ResourceValue::Number(0.0), ResourceValue::Number(0.0)],
        )
        .unwrap();
    graph.add_node(2, false, true, sink_template);

    let extender = Extender(vec![
        ArcPayload::Additive(2.0),
        ArcPayload::TimeWindow { travel: 2.0, dest_lower: 5.0 },
    ]);
    graph.add_arc(0, 0, 1, extender, 2.0).unwrap();
    let extender = Extender(vec![
        ArcPayload::Additive(3.0),
        ArcPayload::TimeWindow { travel: 3.0, dest_lower: 0.0 },
    ]);
    graph.add_arc(1, 1, 2, extender, 3.0).unwrap();

    let mut solver = Solver::new(graph, spec, AlgorithmParams::default());
    let solutions = solver.solve(SchedulerVariant::Simple).unwrap();

    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].cost, 5.0);
}

/// S4 — same as S3 but node 1's time window is [0, 3], which the forced
/// arrival time of 5 violates: no feasible solution.
#[test]
fn s4_time_window_infeasible() {
    let mut factory = ResourceFactory::new();
    factory.add_additive_resource(true);
    factory.add_time_window_resource();
    let spec = factory.build();

    let mut graph = Graph::new();
    let src_template = spec
        .make_template(
            vec![NodeBound::Unbounded, NodeBound::TimeWindow { lower: 0.0, upper: 0.0 }],
            vec![ResourceValue::Number(0.0), ResourceValue::Number(0.0)],
        )
        .unwrap();
    graph.add_node(0, true, false, src_template);

    let mid_template = spec
        .make_template(
            vec![NodeBound::Unbounded, NodeBound::TimeWindow { lower: 0.0, upper: 3.0 }],
            vec![ResourceValue::Number(0.0), ResourceValue::Number(0.0)],
        )
        .unwrap();
    graph.add_node(1, false, false, mid_template);

    let sink_template = spec
        .make_template(
            vec![NodeBound::Unbounded, NodeBound::TimeWindow { lower: 0.0, upper: 100.0 }],
            vec![ResourceValue::Number(0.0), ResourceValue::Number(0.0)],
        )
        .unwrap();
    graph.add_node(2, false, true, sink_template);

    let extender = Extender(vec![
        ArcPayload::Additive(2.0),
        ArcPayload::TimeWindow { travel: 2.0, dest_lower: 0.0 },
    ]);
    graph.add_arc(0, 0, 1, extender, 2.0).unwrap();
    let extender = Extender(vec![
        ArcPayload::Additive(3.0),
        ArcPayload::TimeWindow { travel: 3.0, dest_lower: 0.0 },
    ]);
    graph.add_arc(1, 1, 2, extender, 3.0).unwrap();

    let mut solver = Solver::new(graph, spec, AlgorithmParams::default());
    let solutions = solver.solve(SchedulerVariant::Simple).unwrap();

    assert!(solutions.is_empty());
}

/// S5 — capacity infeasibility with an alternative: node 1 demands more
/// than the vehicle capacity, node 2 doesn't; only the path through node
/// 2 survives.
#[test]
fn s5_capacity_infeasibility_with_alternative() {
    let mut factory = ResourceFactory::new();
    factory.add_additive_resource(true);
    factory.add_additive_resource(false);
    let spec = factory.build();

    const CAPACITY: f64 = 5.0;
    let mut graph = Graph::new();

    let node_template = |spec: &ResourceSpec| {
        spec.make_template(
            vec![NodeBound::Unbounded, NodeBound::Interval { min: 0.0, max: CAPACITY }],
            vec![ResourceValue::Number(0.0), ResourceValue::Number(0.0)],
        )
        .unwrap()
    };
    for id in 0..4 {
        graph.add_node(id, id == 0, id == 3, node_template(&spec));
    }

    let demand_extender = |travel_cost: f64, demand: f64| {
        Extender(vec![ArcPayload::Additive(travel_cost), ArcPayload::Additive(demand)])
    };
    graph.add_arc(0, 0, 1, demand_extender(1.0, 10.0), 1.0).unwrap();
    graph.add_arc(1, 0, 2, demand_extender(2.0, 3.0), 2.0).unwrap();
    graph.add_arc(2, 1, 3, demand_extender(1.0, 0.0), 1.0).unwrap();
    graph.add_arc(3, 2, 3, demand_extender(1.0, 0.0), 1.0).unwrap();

    let mut solver = Solver::new(graph, spec, AlgorithmParams::default());
    let solutions = solver.solve(SchedulerVariant::Simple).unwrap();

    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].cost, 3.0);
    assert_eq!(solutions[0].path_node_ids, vec![0, 2, 3]);
}

/// S6 — dual update reversibility: zeroing the duals and re-solving must
/// reproduce the original cost, and re-zeroing after a nonzero update
/// must do so again.
#[test]
fn s6_dual_update_reversibility() {
    let spec = cost_only_spec();
    let mut graph = Graph::new();
    for id in 0..3 {
        add_cost_node(&mut graph, &spec, id, id == 0, id == 2);
    }
    let extender = Extender(vec![ArcPayload::Additive(3.0)]);
    graph
        .add_arc_with_dual_rows(0, 0, 1, extender, 3.0, vec![DualRow { row_index: 0, coefficient: 1.0 }])
        .unwrap();
    let extender = Extender(vec![ArcPayload::Additive(4.0)]);
    graph
        .add_arc_with_dual_rows(1, 1, 2, extender, 4.0, vec![DualRow { row_index: 0, coefficient: 1.0 }])
        .unwrap();

    let mut base_costs = FnvHashMap::default();
    base_costs.insert(0u64, 3.0);
    base_costs.insert(1u64, 4.0);

    let mut solver = Solver::new(graph, spec, AlgorithmParams::default());
    let baseline = solver.solve(SchedulerVariant::Simple).unwrap();
    assert_eq!(baseline[0].cost, 7.0);

    solver.graph_mut().update_dual_values(&base_costs, &[0.0], 0).unwrap();
    let unchanged = solver.solve(SchedulerVariant::Simple).unwrap();
    assert_eq!(unchanged[0].cost, 7.0);

    solver.graph_mut().update_dual_values(&base_costs, &[1.0], 0).unwrap();
    let reduced = solver.solve(SchedulerVariant::Simple).unwrap();
    assert_eq!(reduced[0].cost, 5.0);

    solver.graph_mut().update_dual_values(&base_costs, &[0.0], 0).unwrap();
    let restored = solver.solve(SchedulerVariant::Simple).unwrap();
    assert_eq!(restored[0].cost, 7.0);
}

/// Arc restore reversibility: deleting then restoring an arc returns the
/// graph to a state that solves to the same cost as before deletion.
#[test]
fn arc_delete_then_restore_preserves_optimal_cost() {
    let spec = cost_only_spec();
    let mut graph = Graph::new();
    for id in 0..3 {
        add_cost_node(&mut graph, &spec, id, id == 0, id == 2);
    }
    add_cost_arc(&mut graph, 0, 0, 1, 3.0);
    add_cost_arc(&mut graph, 1, 0, 1, 5.0);
    add_cost_arc(&mut graph, 2, 1, 2, 4.0);

    let mut solver = Solver::new(graph, spec, AlgorithmParams::default());
    let before = solver.solve(SchedulerVariant::Simple).unwrap();
    assert_eq!(before[0].cost, 7.0);

    solver.graph_mut().delete_arc(0).unwrap();
    let during = solver.solve(SchedulerVariant::Simple).unwrap();
    assert_eq!(during[0].cost, 9.0);

    solver.graph_mut().restore_arc(0).unwrap();
    let after = solver.solve(SchedulerVariant::Simple).unwrap();
    assert_eq!(after[0].cost, 7.0);
}

/// Scheduler equivalence on the trivial chain: all three variants must
/// agree on the optimal cost.
#[test]
fn scheduler_variants_agree_on_optimal_cost() {
    for variant in [SchedulerVariant::Simple, SchedulerVariant::Pushing, SchedulerVariant::Pulling] {
        let spec = cost_only_spec();
        let mut graph = Graph::new();
        for id in 0..3 {
            add_cost_node(&mut graph, &spec, id, id == 0, id == 2);
        }
        add_cost_arc(&mut graph, 0, 0, 1, 3.0);
        add_cost_arc(&mut graph, 1, 0, 1, 5.0);
        add_cost_arc(&mut graph, 2, 1, 2, 4.0);
        graph.sort_nodes();

        let mut solver = Solver::new(graph, spec, AlgorithmParams::default());
        let solutions = solver.solve(variant).unwrap();
        assert_eq!(solutions[0].cost, 7.0, "variant {variant:?} disagreed on cost");
    }
}

/// Pushing/pulling require a sort first; using them without one is a
/// misconfiguration, not a panic.
#[test]
fn node_ordered_scheduler_without_sort_is_an_error() {
    let spec = cost_only_spec();
    let mut graph = Graph::new();
    for id in 0..2 {
        add_cost_node(&mut graph, &spec, id, id == 0, id == 1);
    }
    add_cost_arc(&mut graph, 0, 0, 1, 1.0);

    let mut solver = Solver::new(graph, spec, AlgorithmParams::default());
    let result = solver.solve(SchedulerVariant::Pushing);
    assert!(matches!(result, Err(rcspp::RcsppError::NodesNotSorted)));
}
