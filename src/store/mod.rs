//! Feed state container.
//!
//! Owns the in-memory notification store and the three pending-update
//! queues. The sync engine only reads this state through accessors and
//! proposes changes as [`SyncEvent`]s; all mutation funnels through
//! [`FeedState::apply`], the single reducer step.

mod models;
mod pending;

pub use models::{Direction, Notification, PollOutcome, QueueKind, StateTransition};
pub use pending::PendingQueues;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::sync::SyncEvent;

/// Shared handle to the feed state, teacher to every sync component.
pub type SharedFeedState = Arc<RwLock<FeedState>>;

/// The application-owned state the sync engine orchestrates around.
#[derive(Debug)]
pub struct FeedState {
    username: String,
    notifications: HashMap<String, Notification>,
    pending: PendingQueues,
}

impl FeedState {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            notifications: HashMap::new(),
            pending: PendingQueues::new(),
        }
    }

    /// Wrap a fresh state for the given user in a shared handle.
    pub fn shared(username: impl Into<String>) -> SharedFeedState {
        Arc::new(RwLock::new(Self::new(username)))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn notification(&self, id: &str) -> Option<&Notification> {
        self.notifications.get(id)
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.values()
    }

    pub fn notification_count(&self) -> usize {
        self.notifications.len()
    }

    /// Queue IDs for a later read/unread/shown submission.
    pub fn enqueue_pending<I>(&mut self, kind: QueueKind, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.pending.enqueue(kind, ids);
    }

    /// Ordered snapshot of one pending queue.
    pub fn pending_snapshot(&self, kind: QueueKind) -> Vec<String> {
        self.pending.snapshot(kind)
    }

    pub fn pending_count(&self, kind: QueueKind) -> usize {
        self.pending.len(kind)
    }

    fn merge(&mut self, notifications: &[Notification]) {
        for notification in notifications {
            self.notifications
                .insert(notification.id.clone(), notification.clone());
        }
    }

    /// Apply one sync event to the state.
    ///
    /// Full sets replace the store; incremental and merge payloads upsert.
    /// Submission outcomes clear exactly the attempted IDs from their queue,
    /// so IDs enqueued while the drain was in flight stay pending.
    pub fn apply(&mut self, event: &SyncEvent) {
        match event {
            SyncEvent::FullSetReceived { notifications } => {
                self.notifications.clear();
                self.merge(notifications);
            }
            SyncEvent::IncrementalSetReceived { notifications }
            | SyncEvent::NotificationsMerged { notifications } => {
                self.merge(notifications);
            }
            SyncEvent::QueueSubmissionSucceeded { transition, ids } => {
                self.pending.remove(transition.queue(), ids);
                for id in ids {
                    if let Some(notification) = self.notifications.get_mut(id) {
                        transition.apply(notification);
                    }
                }
            }
            SyncEvent::QueueSubmissionFailed { queue, ids, message } => {
                debug!(
                    "Dropping {} attempted {} updates after remote rejection: {}",
                    ids.len(),
                    queue,
                    message
                );
                self.pending.remove(*queue, ids);
            }
            SyncEvent::FullSetFetchFailed { .. }
            | SyncEvent::IncrementalSetFetchFailed { .. }
            | SyncEvent::PollCancelled { .. } => {}
        }
    }
}
