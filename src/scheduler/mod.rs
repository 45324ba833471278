mod pushing;
mod simple;

pub use pushing::PushingScheduler;
pub use simple::SimpleScheduler;

use crate::pool::LabelHandle;

/// A unit of pending work: a label that has survived dominance at
/// `node_id` and is waiting to be extended along that node's outgoing
/// arcs.
#[derive(Clone, Copy, Debug)]
pub struct PendingLabel {
    pub node_id: u64,
    pub node_pos: usize,
    pub handle: LabelHandle,
}

/// How the main loop pulls the next label to extend. `Simple` is an
/// unordered FIFO; `Pushing` drains node by node in ascending position,
/// with newly produced labels pushed straight into their destination
/// node's bucket. All implementations must yield the same optimal cost;
/// they differ only in exploration order and in how well that order
/// plays with the per-node extension budget.
///
/// The pulling variant is not implemented via this trait: it walks
/// predecessors rather than being pushed into, so it is driven directly
/// by its own loop in `crate::algorithm`.
pub trait Scheduler {
    fn enqueue(&mut self, label: PendingLabel);
    fn dequeue(&mut self) -> Option<PendingLabel>;
    fn is_empty(&self) -> bool;
    fn len(&self) -> usize;
}

/// Per-node cap on how many labels may be extended within one phase
/// (`AlgorithmParams::num_labels_to_extend_by_node`). Labels beyond the
/// cap, ranked by cost, are held over ("truncated") and spliced back in
/// at the start of the next phase rather than discarded — this is what
/// lets a finite-width sweep still converge to the optimum over several
/// phases instead of silently dropping work.
#[derive(Debug, Default)]
pub struct ExtensionBudget {
    limit: Option<usize>,
    extended_this_phase: fnv::FnvHashMap<u64, usize>,
}

impl ExtensionBudget {
    pub fn new(limit: Option<usize>) -> Self {
        ExtensionBudget {
            limit,
            extended_this_phase: fnv::FnvHashMap::default(),
        }
    }

    /// Returns `true` if a label may still be extended at `node_id` in
    /// the current phase, and records the attempt.
    pub fn admit(&mut self, node_id: u64) -> bool {
        let Some(limit) = self.limit else {
            return true;
        };
        let count = self.extended_this_phase.entry(node_id).or_insert(0);
        if *count >= limit {
            return false;
        }
        *count += 1;
        true
    }

    pub fn start_next_phase(&mut self) {
        self.extended_this_phase.clear();
    }
}
