//! State reducer task.
//!
//! Single consumer of the event channel: applies each event to the shared
//! feed state, signals the supervisor when notification data lands, and
//! re-broadcasts every event to external observers.

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use crate::store::SharedFeedState;

use super::events::{DataArrival, SyncEvent};

/// Applies sync events to state and fans them out to observers.
pub struct StateReducer {
    events_rx: mpsc::Receiver<SyncEvent>,
    state: SharedFeedState,
    data_tx: mpsc::Sender<DataArrival>,
    observers: broadcast::Sender<SyncEvent>,
}

impl StateReducer {
    pub fn new(
        events_rx: mpsc::Receiver<SyncEvent>,
        state: SharedFeedState,
        data_tx: mpsc::Sender<DataArrival>,
        observers: broadcast::Sender<SyncEvent>,
    ) -> Self {
        Self {
            events_rx,
            state,
            data_tx,
            observers,
        }
    }

    /// Consume events until every producer has dropped its sender.
    pub async fn run(mut self) {
        info!("Starting state reducer");

        while let Some(event) = self.events_rx.recv().await {
            debug!("Applying event: {}", event.event_type());
            self.state.write().await.apply(&event);

            let arrival = match &event {
                SyncEvent::FullSetReceived { .. } => Some(DataArrival::Full),
                SyncEvent::IncrementalSetReceived { .. } => Some(DataArrival::Incremental),
                _ => None,
            };
            if let Some(arrival) = arrival {
                // The supervisor may already be gone during teardown
                if self.data_tx.send(arrival).await.is_err() {
                    debug!("Supervisor gone, dropping data-arrival signal");
                }
            }

            // No subscribers is normal; lagging subscribers miss events
            let _ = self.observers.send(event);
        }

        info!("State reducer stopped");
    }
}
