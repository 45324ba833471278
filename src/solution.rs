use crate::dominance::DominanceSets;
use crate::error::ReconstructionError;
use crate::graph::Graph;
use crate::label::Label;
use crate::pool::LabelPool;
use crate::resource::ResourceSpec;

#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub cost: f64,
    pub path_node_ids: Vec<u64>,
    pub path_arc_ids: Vec<u64>,
}

/// Rebuilds the node/arc sequence ending at `label` without the label
/// having stored a predecessor pointer.
///
/// At each step the label names the arc it last extended along
/// (`in_arc_id`); its origin node's surviving, non-dominated labels are
/// the only candidates that could have produced it. Each candidate is
/// re-extended along that same arc; the one whose extension result is
/// indistinguishable from (dominates-and-is-dominated-by) the current
/// label's resource is the predecessor. This is repeated until a label
/// with no `in_arc_id` is reached, i.e. one seeded directly at a source.
pub fn reconstruct_path(
    pool: &LabelPool,
    graph: &Graph,
    spec: &ResourceSpec,
    nd_sets: &DominanceSets,
    label: &Label,
) -> Result<Solution, ReconstructionError> {
    let cost = label.cost;
    let mut path_node_ids = vec![label.end_node_id];
    let mut path_arc_ids = Vec::new();

    let mut current = label.clone();
    while let Some(arc_id) = current.in_arc_id {
        let arc = graph
            .get_arc(arc_id)
            .map_err(|_| ReconstructionError {
                node_id: current.end_node_id,
            })?;
        let predecessor_node_id = arc.origin;

        let mut found = None;
        for &handle in nd_sets.at(predecessor_node_id) {
            let candidate = pool.get(handle);
            let Ok(extended) = spec.extend(&candidate.resource, &arc.extender) else {
                continue;
            };
            if spec.dominates(&extended, &current.resource)
                && spec.dominates(&current.resource, &extended)
            {
                found = Some(candidate.clone());
                break;
            }
        }

        let predecessor = found.ok_or(ReconstructionError {
            node_id: predecessor_node_id,
        })?;

        path_node_ids.push(predecessor_node_id);
        path_arc_ids.push(arc_id);
        current = predecessor;
    }

    path_node_ids.reverse();
    path_arc_ids.reverse();

    Ok(Solution {
        cost,
        path_node_ids,
        path_arc_ids,
    })
}
