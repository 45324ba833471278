use std::collections::VecDeque;

use super::{PendingLabel, Scheduler};

/// Unordered FIFO: labels are dequeued in the order they were enqueued,
/// regardless of which node they end at.
#[derive(Debug, Default)]
pub struct SimpleScheduler {
    queue: VecDeque<PendingLabel>,
}

impl SimpleScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for SimpleScheduler {
    fn enqueue(&mut self, label: PendingLabel) {
        self.queue.push_back(label);
    }

    fn dequeue(&mut self) -> Option<PendingLabel> {
        self.queue.pop_front()
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}
