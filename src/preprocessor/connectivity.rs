use std::collections::VecDeque;
use std::convert::Infallible;

use fnv::{FnvHashMap, FnvHashSet};

use super::Preprocessor;
use crate::graph::Graph;

/// Forward reachability from every node, computed once by BFS over live
/// arcs. Used ahead of the main sweep to rule out nodes or arcs that can
/// never reach a sink, without having to run the label-setting core to
/// find that out.
#[derive(Debug, Default)]
pub struct ConnectivityMatrix {
    reachable_from: FnvHashMap<u64, FnvHashSet<u64>>,
}

impl ConnectivityMatrix {
    pub fn build(graph: &Graph) -> Self {
        let mut reachable_from = FnvHashMap::default();
        for node_id in graph.node_ids() {
            reachable_from.insert(node_id, bfs_reachable(graph, node_id));
        }
        ConnectivityMatrix { reachable_from }
    }

    pub fn is_connected(&self, from: u64, to: u64) -> bool {
        self.reachable_from
            .get(&from)
            .map(|set| set.contains(&to))
            .unwrap_or(false)
    }

    pub fn can_reach_any_sink(&self, graph: &Graph, node_id: u64) -> bool {
        graph
            .sink_node_ids()
            .iter()
            .any(|sink| self.is_connected(node_id, *sink))
    }
}

fn bfs_reachable(graph: &Graph, start: u64) -> FnvHashSet<u64> {
    let mut seen = FnvHashSet::default();
    let mut queue = VecDeque::new();
    queue.push_back(start);
    seen.insert(start);
    while let Some(node_id) = queue.pop_front() {
        let Ok(node) = graph.get_node(node_id) else {
            continue;
        };
        for &arc_id in node.out_arc_ids() {
            let Ok(arc) = graph.get_arc(arc_id) else {
                continue;
            };
            if seen.insert(arc.destination) {
                queue.push_back(arc.destination);
            }
        }
    }
    seen
}

impl Preprocessor for ConnectivityMatrix {
    type Output = ConnectivityMatrix;
    type Error = Infallible;

    fn run(&self, graph: &Graph) -> Result<Self::Output, Self::Error> {
        Ok(ConnectivityMatrix::build(graph))
    }
}
