//! Update dispatcher.
//!
//! Runs the three queue drains once per trigger. The drains are independent
//! units of failure with no ordering guarantee among them; one queue's
//! rejection never blocks or cancels the other two.

use tracing::debug;

use crate::store::QueueKind;

use super::drainer::QueueDrainer;

/// Fans one dispatch trigger out to the three pending-update queues.
#[derive(Clone)]
pub struct UpdateDispatcher {
    drainer: QueueDrainer,
}

impl UpdateDispatcher {
    pub fn new(drainer: QueueDrainer) -> Self {
        Self { drainer }
    }

    /// Drain read, unread and shown concurrently; resolves once all three
    /// have finished or no-opped.
    pub async fn dispatch_all(&self) {
        debug!("Dispatching pending-update queues");
        futures::join!(
            self.drainer.drain(QueueKind::Read),
            self.drainer.drain(QueueKind::Unread),
            self.drainer.drain(QueueKind::Shown),
        );
    }
}
