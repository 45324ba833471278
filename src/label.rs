use crate::resource::ResourceTuple;

/// A partial path, represented only by where it ends and what resources it
/// has accumulated — not by a pointer to its predecessor label. Paths are
/// recovered after the fact by `crate::solution::reconstruct_path`, which
/// re-derives predecessors by re-probing dominance along the arc a label
/// says it arrived on.
#[derive(Clone, Debug)]
pub struct Label {
    pub id: u64,
    pub end_node_id: u64,
    pub resource: ResourceTuple,
    /// The arc this label last extended along, if any. `None` for a label
    /// seeded directly at a source node.
    pub in_arc_id: Option<u64>,
    pub cost: f64,
    pub dominated: bool,
}

impl Label {
    pub fn new(id: u64, end_node_id: u64, resource: ResourceTuple, cost: f64) -> Self {
        Label {
            id,
            end_node_id,
            resource,
            in_arc_id: None,
            cost,
            dominated: false,
        }
    }
}
