use std::collections::VecDeque;

use super::{PendingLabel, Scheduler};

/// Node-position-ordered scheduler: one bucket per node position, drained
/// by a cursor that cycles forward through positions. A label produced by
/// extension is pushed directly into its destination node's bucket, so
/// later positions always see the labels earlier positions have already
/// produced in this sweep.
#[derive(Debug, Default)]
pub struct PushingScheduler {
    buckets: Vec<VecDeque<PendingLabel>>,
    cursor: usize,
    total: usize,
}

impl PushingScheduler {
    pub fn new(node_count: usize) -> Self {
        PushingScheduler {
            buckets: (0..node_count).map(|_| VecDeque::new()).collect(),
            cursor: 0,
            total: 0,
        }
    }
}

impl Scheduler for PushingScheduler {
    fn enqueue(&mut self, label: PendingLabel) {
        if label.node_pos >= self.buckets.len() {
            self.buckets.resize_with(label.node_pos + 1, VecDeque::new);
        }
        self.buckets[label.node_pos].push_back(label);
        self.total += 1;
    }

    fn dequeue(&mut self) -> Option<PendingLabel> {
        if self.buckets.is_empty() {
            return None;
        }
        for _ in 0..self.buckets.len() {
            if let Some(label) = self.buckets[self.cursor].pop_front() {
                self.total -= 1;
                return Some(label);
            }
            self.cursor = (self.cursor + 1) % self.buckets.len();
        }
        None
    }

    fn is_empty(&self) -> bool {
        self.total == 0
    }

    fn len(&self) -> usize {
        self.total
    }
}
