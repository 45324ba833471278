use std::rc::Rc;

use fnv::FnvHashSet;
use log::{debug, trace, warn};

use crate::dominance::DominanceSets;
use crate::error::RcsppError;
use crate::graph::Graph;
use crate::pool::{LabelHandle, LabelPool};
use crate::resource::ResourceSpec;
use crate::scheduler::{ExtensionBudget, PendingLabel, PushingScheduler, Scheduler, SimpleScheduler};
use crate::solution::{reconstruct_path, Solution};

/// Which label ever reaches the head of the queue first is an exploration
/// strategy choice, not a correctness one: all three variants must return
/// the same optimal cost for the same graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerVariant {
    /// Unordered FIFO.
    Simple,
    /// Node-position-ordered, labels pushed into destination buckets.
    Pushing,
    /// Node-position-ordered, labels pulled from predecessor buckets.
    Pulling,
}

#[derive(Clone, Copy, Debug)]
pub struct AlgorithmParams {
    pub max_iterations: u64,
    pub stop_after_solutions: Option<usize>,
    pub num_labels_to_extend_by_node: Option<usize>,
    pub return_dominated_solutions: bool,
    pub seed: u64,
}

impl Default for AlgorithmParams {
    fn default() -> Self {
        AlgorithmParams {
            max_iterations: u64::MAX,
            stop_after_solutions: Some(1),
            num_labels_to_extend_by_node: None,
            return_dominated_solutions: false,
            seed: 0,
        }
    }
}

/// Owns the graph, resource composition, label pool, and dominance
/// bookkeeping for one solve. A fresh `Solver` (or a call to `reset`) is
/// needed between unrelated solves; reduced-cost updates between solves
/// of the same graph go through `Graph::update_dual_values` directly and
/// don't require rebuilding the solver.
pub struct Solver {
    graph: Graph,
    spec: Rc<ResourceSpec>,
    pool: LabelPool,
    nd_sets: DominanceSets,
    params: AlgorithmParams,
}

impl Solver {
    pub fn new(graph: Graph, spec: Rc<ResourceSpec>, params: AlgorithmParams) -> Self {
        Solver {
            graph,
            spec,
            pool: LabelPool::new(),
            nd_sets: DominanceSets::new(),
            params,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn reset(&mut self) {
        self.pool.clear();
        self.nd_sets.clear();
    }

    pub fn solve(&mut self, variant: SchedulerVariant) -> Result<Vec<Solution>, RcsppError> {
        if !self.graph.are_nodes_sorted() && variant != SchedulerVariant::Simple {
            return Err(RcsppError::NodesNotSorted);
        }
        self.reset();
        match variant {
            SchedulerVariant::Simple => {
                let scheduler = SimpleScheduler::new();
                self.drive(scheduler)
            }
            SchedulerVariant::Pushing => {
                let node_count = self.graph.node_ids().count();
                let scheduler = PushingScheduler::new(node_count);
                self.drive(scheduler)
            }
            SchedulerVariant::Pulling => self.run_pulling(),
        }
    }

    fn node_pos(&self, node_id: u64) -> usize {
        self.graph
            .get_node(node_id)
            .ok()
            .and_then(|n| n.pos())
            .unwrap_or(0)
    }

    fn seed_sources(&mut self) -> Vec<PendingLabel> {
        let mut seeded = Vec::new();
        for node_id in self.graph.source_node_ids() {
            let node = self.graph.get_node(node_id).expect("source id from graph");
            let initial = node.template.initial.clone();
            let cost = self.spec.cost(&initial);
            let handle = self.pool.acquire(node_id, initial, cost);
            if self.nd_sets.update(&mut self.pool, &self.spec, node_id, handle) {
                seeded.push(PendingLabel {
                    node_id,
                    node_pos: self.node_pos(node_id),
                    handle,
                });
            }
        }
        seeded
    }

    /// Extends `handle` across a single arc, running the result through
    /// dominance at the arc's destination. Returns `None` if the arc is
    /// unknown, the extension is malformed, the result is infeasible at the
    /// destination, or the result is dominated away.
    fn extend_across_arc(&mut self, handle: LabelHandle, arc_id: u64) -> Option<PendingLabel> {
        let arc = match self.graph.get_arc(arc_id) {
            Ok(arc) => arc.clone(),
            Err(_) => return None,
        };
        let label = self.pool.get(handle);
        let extended = match self.spec.extend(&label.resource, &arc.extender) {
            Ok(r) => r,
            Err(err) => {
                warn!("resource extension failed on arc {arc_id}: {err}");
                return None;
            }
        };
        let dest_node = match self.graph.get_node(arc.destination) {
            Ok(n) => n,
            Err(_) => return None,
        };
        if !self.spec.is_feasible(&extended, &dest_node.template) {
            trace!("arc {arc_id} infeasible for destination {}", arc.destination);
            return None;
        }
        let dest_pos = dest_node.pos().unwrap_or(0);
        let new_cost = self.spec.cost(&extended);
        let new_handle = self.pool.acquire(arc.destination, extended, new_cost);
        self.pool.get_mut(new_handle).in_arc_id = Some(arc_id);

        if self
            .nd_sets
            .update(&mut self.pool, &self.spec, arc.destination, new_handle)
        {
            Some(PendingLabel {
                node_id: arc.destination,
                node_pos: dest_pos,
                handle: new_handle,
            })
        } else {
            None
        }
    }

    /// Extends `handle` (known to end at `node_id`) along every live
    /// outgoing arc. Returns the handles that survived and were inserted
    /// into `ND`. Used by the pushed (Simple/Pushing) schedulers, where the
    /// label itself drives its own extension.
    fn extend_one(&mut self, handle: LabelHandle, node_id: u64) -> Vec<PendingLabel> {
        let out_arc_ids: Vec<u64> = match self.graph.get_node(node_id) {
            Ok(node) => node.out_arc_ids().to_vec(),
            Err(_) => return Vec::new(),
        };
        out_arc_ids
            .into_iter()
            .filter_map(|arc_id| self.extend_across_arc(handle, arc_id))
            .collect()
    }

    fn maybe_extract_solution(
        &self,
        handle: LabelHandle,
        upper_bound: &mut f64,
        solutions: &mut Vec<Solution>,
    ) {
        let label = self.pool.get(handle);
        if label.dominated {
            return;
        }
        if label.cost >= *upper_bound && !self.params.return_dominated_solutions {
            return;
        }
        match reconstruct_path(&self.pool, &self.graph, &self.spec, &self.nd_sets, label) {
            Ok(solution) => {
                debug!("solution found at node {} with cost {}", label.end_node_id, solution.cost);
                if solution.cost < *upper_bound {
                    *upper_bound = solution.cost;
                }
                solutions.push(solution);
            }
            Err(err) => {
                warn!("dropping unreconstructable solution candidate: {err}");
            }
        }
    }

    fn drive<S: Scheduler>(&mut self, mut scheduler: S) -> Result<Vec<Solution>, RcsppError> {
        let sinks: FnvHashSet<u64> = self.graph.sink_node_ids().into_iter().collect();
        for pending in self.seed_sources() {
            scheduler.enqueue(pending);
        }

        let mut budget = ExtensionBudget::new(self.params.num_labels_to_extend_by_node);
        let mut truncated: Vec<PendingLabel> = Vec::new();
        let mut solutions = Vec::new();
        let mut upper_bound = f64::INFINITY;
        let mut iterations: u64 = 0;

        loop {
            while let Some(pending) = scheduler.dequeue() {
                iterations += 1;
                if iterations > self.params.max_iterations {
                    warn!("max_iterations reached, stopping early");
                    return Ok(solutions);
                }

                if self.pool.get(pending.handle).dominated {
                    self.pool.release(pending.handle);
                    continue;
                }

                if sinks.contains(&pending.node_id) {
                    self.maybe_extract_solution(pending.handle, &mut upper_bound, &mut solutions);
                    if let Some(limit) = self.params.stop_after_solutions {
                        if solutions.len() >= limit {
                            return Ok(solutions);
                        }
                    }
                }

                if !budget.admit(pending.node_id) {
                    truncated.push(pending);
                    continue;
                }

                for produced in self.extend_one(pending.handle, pending.node_id) {
                    scheduler.enqueue(produced);
                }
            }

            if truncated.is_empty() {
                break;
            }
            debug!("restarting phase with {} truncated labels", truncated.len());
            budget.start_next_phase();
            for pending in truncated.drain(..) {
                scheduler.enqueue(pending);
            }
        }

        Ok(solutions)
    }

    /// Pulling scheduler: rather than a label driving its own extension
    /// along its node's out-arcs, each node in ascending position order
    /// walks its *in*-arcs and pulls from each origin's already-settled
    /// `ND` bucket whatever it hasn't already pulled through that arc.
    /// This can't share `drive`'s loop (or `extend_one`'s out-arc walk):
    /// the label never initiates its own extension, the destination does.
    fn run_pulling(&mut self) -> Result<Vec<Solution>, RcsppError> {
        let sorted_ids = self.graph.sorted_node_ids().to_vec();
        let sinks: FnvHashSet<u64> = self.graph.sink_node_ids().into_iter().collect();

        let mut budget = ExtensionBudget::new(self.params.num_labels_to_extend_by_node);
        // Per in-arc, the set of origin labels already pulled through it —
        // so a label sitting in an origin's ND bucket across several
        // sweeps is never re-extended along the same arc twice.
        let mut pulled_through: fnv::FnvHashMap<u64, FnvHashSet<LabelHandle>> = Default::default();
        let mut solutions = Vec::new();
        let mut upper_bound = f64::INFINITY;
        let mut iterations: u64 = 0;

        for pending in self.seed_sources() {
            if sinks.contains(&pending.node_id) {
                self.maybe_extract_solution(pending.handle, &mut upper_bound, &mut solutions);
                if let Some(limit) = self.params.stop_after_solutions {
                    if solutions.len() >= limit {
                        return Ok(solutions);
                    }
                }
            }
        }

        loop {
            let mut pulled_any = false;
            let mut deferred_any = false;

            for &node_id in &sorted_ids {
                let in_arc_ids: Vec<u64> = match self.graph.get_node(node_id) {
                    Ok(node) => node.in_arc_ids().to_vec(),
                    Err(_) => continue,
                };

                for arc_id in in_arc_ids {
                    let origin = match self.graph.get_arc(arc_id) {
                        Ok(arc) => arc.origin,
                        Err(_) => continue,
                    };
                    let candidates: Vec<LabelHandle> = self.nd_sets.at(origin).to_vec();

                    for handle in candidates {
                        if pulled_through.entry(arc_id).or_default().contains(&handle) {
                            continue;
                        }
                        if self.pool.get(handle).dominated {
                            pulled_through.entry(arc_id).or_default().insert(handle);
                            continue;
                        }
                        if !budget.admit(origin) {
                            deferred_any = true;
                            continue;
                        }

                        iterations += 1;
                        if iterations > self.params.max_iterations {
                            warn!("max_iterations reached, stopping early");
                            return Ok(solutions);
                        }

                        pulled_through.entry(arc_id).or_default().insert(handle);
                        if let Some(produced) = self.extend_across_arc(handle, arc_id) {
                            pulled_any = true;
                            if sinks.contains(&produced.node_id) {
                                self.maybe_extract_solution(produced.handle, &mut upper_bound, &mut solutions);
                                if let Some(limit) = self.params.stop_after_solutions {
                                    if solutions.len() >= limit {
                                        return Ok(solutions);
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if !pulled_any && !deferred_any {
                break;
            }
            if deferred_any {
                debug!("restarting pulling phase with deferred pulls pending");
                budget.start_next_phase();
            }
        }

        Ok(solutions)
    }
}
