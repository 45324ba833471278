use std::cmp::Ordering;

use fnv::{FnvHashMap, FnvHashSet};

use crate::error::RcsppError;
use crate::resource::{Extender, ResourceTemplate};

/// A reduced-cost row coefficient attached to an arc: `row_index` names the
/// dual value it pairs with, `coefficient` is the arc's contribution to
/// that row. Column-generation callers rewrite an arc's additive cost
/// component as `base_cost - sum(dual[row_index] * coefficient)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DualRow {
    pub row_index: usize,
    pub coefficient: f64,
}

#[derive(Clone, Debug)]
pub struct Node {
    pub id: u64,
    pub template: ResourceTemplate,
    /// Designated at construction, independent of arc adjacency: a node
    /// with in-arcs can still be a source, and soft-deleting its last
    /// out-arc doesn't turn it into a sink.
    source: bool,
    sink: bool,
    in_arc_ids: Vec<u64>,
    out_arc_ids: Vec<u64>,
    /// Position assigned by `Graph::sort_nodes`; `None` until then. Node-
    /// ordered schedulers require this to be set.
    pos: Option<usize>,
}

impl Node {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn pos(&self) -> Option<usize> {
        self.pos
    }

    pub fn in_arc_ids(&self) -> &[u64] {
        &self.in_arc_ids
    }

    pub fn out_arc_ids(&self) -> &[u64] {
        &self.out_arc_ids
    }

    pub fn is_source(&self) -> bool {
        self.source
    }

    pub fn is_sink(&self) -> bool {
        self.sink
    }
}

#[derive(Clone, Debug)]
pub struct Arc {
    pub id: u64,
    pub origin: u64,
    pub destination: u64,
    pub extender: Extender,
    /// Base scalar cost of traversing the arc, kept separate from the
    /// resource extender so reduced-cost rewrites (`Graph::update_dual_values`)
    /// don't need to reach into the resource composition.
    pub cost: f64,
    pub dual_rows: Vec<DualRow>,
}

/// A label-setting graph over a fixed node/arc id space, with soft arc
/// deletion (an arc can be withdrawn and restored without disturbing ids
/// or the rest of the adjacency structure) and an explicit node ordering
/// used by the node-ordered schedulers.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: FnvHashMap<u64, Node>,
    arcs: FnvHashMap<u64, Arc>,
    deleted_arcs: FnvHashMap<u64, Arc>,
    sorted_node_ids: Vec<u64>,
    source_node_ids: FnvHashSet<u64>,
    sink_node_ids: FnvHashSet<u64>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node and its designation as a source and/or sink. This
    /// designation is independent of arc adjacency and is never revised by
    /// `add_arc`/`delete_arc`/`restore_arc`.
    pub fn add_node(&mut self, id: u64, source: bool, sink: bool, template: ResourceTemplate) {
        self.nodes.insert(
            id,
            Node {
                id,
                template,
                source,
                sink,
                in_arc_ids: Vec::new(),
                out_arc_ids: Vec::new(),
                pos: None,
            },
        );
        if source {
            self.source_node_ids.insert(id);
        } else {
            self.source_node_ids.remove(&id);
        }
        if sink {
            self.sink_node_ids.insert(id);
        } else {
            self.sink_node_ids.remove(&id);
        }
        self.sorted_node_ids.clear();
    }

    pub fn add_arc(
        &mut self,
        id: u64,
        origin: u64,
        destination: u64,
        extender: Extender,
        cost: f64,
    ) -> Result<(), RcsppError> {
        self.add_arc_with_dual_rows(id, origin, destination, extender, cost, Vec::new())
    }

    pub fn add_arc_with_dual_rows(
        &mut self,
        id: u64,
        origin: u64,
        destination: u64,
        extender: Extender,
        cost: f64,
        dual_rows: Vec<DualRow>,
    ) -> Result<(), RcsppError> {
        if !self.nodes.contains_key(&origin) {
            return Err(RcsppError::UnknownNode(origin));
        }
        if !self.nodes.contains_key(&destination) {
            return Err(RcsppError::UnknownNode(destination));
        }
        self.arcs.insert(
            id,
            Arc {
                id,
                origin,
                destination,
                extender,
                cost,
                dual_rows,
            },
        );
        self.nodes.get_mut(&origin).unwrap().out_arc_ids.push(id);
        self.nodes.get_mut(&destination).unwrap().in_arc_ids.push(id);
        self.sorted_node_ids.clear();
        Ok(())
    }

    /// Withdraws an arc from the live adjacency without discarding it: the
    /// arc moves to a side table and can be brought back with
    /// `restore_arc`. Node ids, positions, and other arcs are untouched.
    pub fn delete_arc(&mut self, id: u64) -> Result<(), RcsppError> {
        let arc = self.arcs.remove(&id).ok_or(RcsppError::UnknownArc(id))?;
        if let Some(node) = self.nodes.get_mut(&arc.origin) {
            node.out_arc_ids.retain(|a| *a != id);
        }
        if let Some(node) = self.nodes.get_mut(&arc.destination) {
            node.in_arc_ids.retain(|a| *a != id);
        }
        self.deleted_arcs.insert(id, arc);
        Ok(())
    }

    pub fn restore_arc(&mut self, id: u64) -> Result<(), RcsppError> {
        let arc = self
            .deleted_arcs
            .remove(&id)
            .ok_or(RcsppError::UnknownArc(id))?;
        if let Some(node) = self.nodes.get_mut(&arc.origin) {
            node.out_arc_ids.push(id);
        }
        if let Some(node) = self.nodes.get_mut(&arc.destination) {
            node.in_arc_ids.push(id);
        }
        self.arcs.insert(id, arc);
        Ok(())
    }

    pub fn get_node(&self, id: u64) -> Result<&Node, RcsppError> {
        self.nodes.get(&id).ok_or(RcsppError::UnknownNode(id))
    }

    pub fn get_arc(&self, id: u64) -> Result<&Arc, RcsppError> {
        self.arcs.get(&id).ok_or(RcsppError::UnknownArc(id))
    }

    pub fn is_arc_deleted(&self, id: u64) -> bool {
        self.deleted_arcs.contains_key(&id)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.nodes.keys().copied()
    }

    pub fn arc_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.arcs.keys().copied()
    }

    pub fn source_node_ids(&self) -> Vec<u64> {
        self.source_node_ids.iter().copied().collect()
    }

    pub fn sink_node_ids(&self) -> Vec<u64> {
        self.sink_node_ids.iter().copied().collect()
    }

    /// Node ids in ascending `pos` order. Empty until `sort_nodes` has run.
    pub fn sorted_node_ids(&self) -> &[u64] {
        &self.sorted_node_ids
    }

    pub fn are_nodes_sorted(&self) -> bool {
        !self.sorted_node_ids.is_empty()
    }

    /// Assigns `pos` to every node using the default comparator: source
    /// nodes first, sink nodes last, ties broken by id. Node-ordered
    /// schedulers (pushing, pulling) require this to have run.
    pub fn sort_nodes(&mut self) {
        self.sort_nodes_by(default_node_order)
    }

    pub fn sort_nodes_by(&mut self, mut cmp: impl FnMut(&Node, &Node) -> Ordering) {
        let mut ids: Vec<u64> = self.nodes.keys().copied().collect();
        ids.sort_by(|a, b| cmp(&self.nodes[a], &self.nodes[b]));
        for (pos, id) in ids.iter().enumerate() {
            self.nodes.get_mut(id).unwrap().pos = Some(pos);
        }
        self.sorted_node_ids = ids;
    }

    /// Rewrites every arc's cost in place from a dual value vector:
    /// `new_cost = base_cost - sum(dual[row] * coefficient)` over the
    /// arc's dual rows, and pushes the same value into the cost-kind
    /// component of the arc's extender at `cost_component_index` so that
    /// resource extension picks up the reduced cost too. `base_costs` must
    /// have been captured once (e.g. at graph-construction time) and
    /// passed back in on every re-optimization, since each call overwrites
    /// `arc.cost` with the new reduced value.
    pub fn update_dual_values(
        &mut self,
        base_costs: &FnvHashMap<u64, f64>,
        duals: &[f64],
        cost_component_index: usize,
    ) -> Result<(), RcsppError> {
        for arc in self.arcs.values_mut() {
            let base = *base_costs.get(&arc.id).unwrap_or(&arc.cost);
            let mut reduced = base;
            for row in &arc.dual_rows {
                let dual = duals
                    .get(row.row_index)
                    .ok_or(RcsppError::UnknownDualRow(row.row_index))?;
                reduced -= dual * row.coefficient;
            }
            arc.cost = reduced;
            if let Some(payload) = arc.extender.0.get_mut(cost_component_index) {
                *payload = crate::resource::ArcPayload::Additive(reduced);
            }
        }
        Ok(())
    }
}

fn default_node_order(a: &Node, b: &Node) -> Ordering {
    let a_src = !a.is_source();
    let b_src = !b.is_source();
    a_src
        .cmp(&b_src)
        .then_with(|| a.is_sink().cmp(&b.is_sink()))
        .then_with(|| a.id.cmp(&b.id))
}
