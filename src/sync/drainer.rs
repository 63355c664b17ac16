//! Queue drainer.
//!
//! Submits one pending-update queue's snapshot to the remote service and
//! emits the resulting state transitions. Exactly one attempt per drain; a
//! failed submission is surfaced upward, never retried here.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::remote::FeedService;
use crate::store::{QueueKind, SharedFeedState};

use super::events::SyncEvent;

/// Drains pending read/unread/shown queues against the remote service.
#[derive(Clone)]
pub struct QueueDrainer {
    state: SharedFeedState,
    service: Arc<dyn FeedService>,
    events: mpsc::Sender<SyncEvent>,
}

impl QueueDrainer {
    pub fn new(
        state: SharedFeedState,
        service: Arc<dyn FeedService>,
        events: mpsc::Sender<SyncEvent>,
    ) -> Self {
        Self {
            state,
            service,
            events,
        }
    }

    /// Drain one queue.
    ///
    /// The snapshot taken here is exactly the batch submitted; IDs enqueued
    /// while the submission is in flight are deferred to the next cycle. An
    /// empty queue is a no-op with no network call and no events.
    pub async fn drain(&self, kind: QueueKind) {
        // Snapshot under the read lock, released before any await
        let ids = { self.state.read().await.pending_snapshot(kind) };
        if ids.is_empty() {
            return;
        }

        debug!("Draining {} queue with {} ids", kind, ids.len());

        let result = match kind {
            QueueKind::Read => self.service.mark_read(&ids).await,
            QueueKind::Unread => self.service.mark_unread(&ids).await,
            QueueKind::Shown => self.service.mark_shown(&ids).await,
        };

        match result {
            Ok(payload) => {
                // Transition metadata must land before the merged records
                self.emit(SyncEvent::QueueSubmissionSucceeded {
                    transition: kind.transition(),
                    ids,
                })
                .await;
                self.emit(SyncEvent::NotificationsMerged {
                    notifications: payload,
                })
                .await;
            }
            Err(e) => {
                warn!("Submission of {} queue failed: {}", kind, e);
                self.emit(SyncEvent::QueueSubmissionFailed {
                    queue: kind,
                    ids,
                    message: e.to_string(),
                })
                .await;
            }
        }
    }

    async fn emit(&self, event: SyncEvent) {
        if self.events.send(event).await.is_err() {
            warn!("Event channel closed, dropping drain event");
        }
    }
}
