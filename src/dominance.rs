use fnv::FnvHashMap;

use crate::pool::{LabelHandle, LabelPool};
use crate::resource::ResourceSpec;

/// The non-dominated label sets `ND[n]`, one bucket per node, keyed by
/// node id. Dominated labels never live here: `update` removes them from
/// the pool as soon as a new label supersedes them.
#[derive(Debug, Default)]
pub struct DominanceSets {
    by_node: FnvHashMap<u64, Vec<LabelHandle>>,
}

impl DominanceSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(&self, node_id: u64) -> &[LabelHandle] {
        self.by_node.get(&node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.by_node.clear();
    }

    /// Attempts to insert `candidate` (ending at `node_id`) into `ND[node_id]`.
    ///
    /// Two passes over the existing bucket, mirroring the scan-then-splice
    /// shape used throughout this crate's Pareto-front bookkeeping:
    /// first check whether any existing label already dominates the
    /// candidate (if so, the candidate is rejected and released); then
    /// remove and release every existing label the candidate dominates
    /// before appending it. Returns `true` iff the candidate survived and
    /// was inserted.
    pub fn update(
        &mut self,
        pool: &mut LabelPool,
        spec: &ResourceSpec,
        node_id: u64,
        candidate: LabelHandle,
    ) -> bool {
        let bucket = self.by_node.entry(node_id).or_default();

        for &existing in bucket.iter() {
            let existing_label = pool.get(existing);
            let candidate_label = pool.get(candidate);
            if spec.dominates(&existing_label.resource, &candidate_label.resource) {
                pool.release(candidate);
                return false;
            }
        }

        let mut kept = Vec::with_capacity(bucket.len());
        let mut dominated = Vec::new();
        for &existing in bucket.iter() {
            let existing_label = pool.get(existing);
            let candidate_label = pool.get(candidate);
            if spec.dominates(&candidate_label.resource, &existing_label.resource) {
                dominated.push(existing);
            } else {
                kept.push(existing);
            }
        }
        kept.push(candidate);
        *bucket = kept;

        // Newly dominated labels are only *marked*, not released: they may
        // still be sitting in a scheduler queue. Whoever dequeues them is
        // responsible for checking `dominated` and releasing them then.
        for handle in dominated {
            pool.get_mut(handle).dominated = true;
        }
        true
    }
}
