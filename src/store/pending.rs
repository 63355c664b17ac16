//! Pending-update queues.
//!
//! One set of notification IDs per field transition (read/unread/shown),
//! awaiting submission to the remote service. Populated by user actions
//! through the handle, drained by the update dispatcher once per poll cycle.

use std::collections::BTreeSet;

use super::models::QueueKind;

/// The three pending-update queues.
///
/// BTreeSet keeps each queue deduplicated and gives snapshots a stable
/// order, which is what the remote submission contract expects (an ordered
/// list of IDs).
#[derive(Debug, Default, Clone)]
pub struct PendingQueues {
    read: BTreeSet<String>,
    unread: BTreeSet<String>,
    shown: BTreeSet<String>,
}

impl PendingQueues {
    pub fn new() -> Self {
        Self::default()
    }

    fn queue(&self, kind: QueueKind) -> &BTreeSet<String> {
        match kind {
            QueueKind::Read => &self.read,
            QueueKind::Unread => &self.unread,
            QueueKind::Shown => &self.shown,
        }
    }

    fn queue_mut(&mut self, kind: QueueKind) -> &mut BTreeSet<String> {
        match kind {
            QueueKind::Read => &mut self.read,
            QueueKind::Unread => &mut self.unread,
            QueueKind::Shown => &mut self.shown,
        }
    }

    /// Add IDs to a queue. Duplicates are absorbed.
    pub fn enqueue<I>(&mut self, kind: QueueKind, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.queue_mut(kind).extend(ids);
    }

    /// Snapshot the current membership of a queue as an ordered ID list.
    pub fn snapshot(&self, kind: QueueKind) -> Vec<String> {
        self.queue(kind).iter().cloned().collect()
    }

    /// Remove the given IDs from a queue. IDs not present are ignored, and
    /// IDs added after the caller's snapshot are left untouched.
    pub fn remove(&mut self, kind: QueueKind, ids: &[String]) {
        let queue = self.queue_mut(kind);
        for id in ids {
            queue.remove(id);
        }
    }

    pub fn len(&self, kind: QueueKind) -> usize {
        self.queue(kind).len()
    }

    pub fn is_empty(&self, kind: QueueKind) -> bool {
        self.queue(kind).is_empty()
    }
}
