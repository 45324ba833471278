use fnv::FnvHashMap;

use super::Preprocessor;
use crate::error::NegativeCycleError;
use crate::graph::Graph;

/// Shortest distances from the graph's source nodes to every reachable
/// node, using arc cost only (no resource feasibility involved). Detects
/// a negative-weight cycle reachable from the sources rather than looping
/// forever, since the core's own dominance sweep assumes none exists.
pub fn shortest_distances(graph: &Graph) -> Result<FnvHashMap<u64, f64>, NegativeCycleError> {
    let node_ids: Vec<u64> = graph.node_ids().collect();
    let mut dist: FnvHashMap<u64, f64> = FnvHashMap::default();
    for id in &node_ids {
        dist.insert(*id, f64::INFINITY);
    }
    for source in graph.source_node_ids() {
        dist.insert(source, 0.0);
    }

    let arc_ids: Vec<u64> = graph.arc_ids().collect();
    for _ in 0..node_ids.len().saturating_sub(1) {
        let mut changed = false;
        for &arc_id in &arc_ids {
            let arc = graph.get_arc(arc_id).expect("arc id came from graph.arc_ids()");
            let from = *dist.get(&arc.origin).unwrap_or(&f64::INFINITY);
            if from.is_finite() {
                let candidate = from + arc.cost;
                let to = dist.entry(arc.destination).or_insert(f64::INFINITY);
                if candidate < *to {
                    *to = candidate;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    for &arc_id in &arc_ids {
        let arc = graph.get_arc(arc_id).expect("arc id came from graph.arc_ids()");
        let from = *dist.get(&arc.origin).unwrap_or(&f64::INFINITY);
        if from.is_finite() {
            let to = *dist.get(&arc.destination).unwrap_or(&f64::INFINITY);
            if from + arc.cost < to {
                return Err(NegativeCycleError);
            }
        }
    }

    Ok(dist)
}

/// `Preprocessor` wrapper around `shortest_distances`, for callers that
/// drive preprocessing through the trait rather than calling the
/// function directly.
#[derive(Debug, Default)]
pub struct BellmanFordPreprocessor;

impl Preprocessor for BellmanFordPreprocessor {
    type Output = FnvHashMap<u64, f64>;
    type Error = NegativeCycleError;

    fn run(&self, graph: &Graph) -> Result<Self::Output, Self::Error> {
        shortest_distances(graph)
    }
}
