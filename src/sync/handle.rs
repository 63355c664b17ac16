//! External handle to a running sync engine.
//!
//! The surrounding application triggers fetches, queues pending updates,
//! observes events and signals logout through this facade; it never touches
//! the engine's internals.

use anyhow::{anyhow, Result};
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

use crate::store::{Direction, Notification, QueueKind, SharedFeedState, StateTransition};

use super::events::{FetchCommand, SyncEvent};

/// Cloneable facade over a running [`SyncEngine`](super::SyncEngine).
#[derive(Clone)]
pub struct SyncHandle {
    state: SharedFeedState,
    commands: mpsc::Sender<FetchCommand>,
    observers: broadcast::Sender<SyncEvent>,
    logout: CancellationToken,
}

impl SyncHandle {
    pub(super) fn new(
        state: SharedFeedState,
        commands: mpsc::Sender<FetchCommand>,
        observers: broadcast::Sender<SyncEvent>,
        logout: CancellationToken,
    ) -> Self {
        Self {
            state,
            commands,
            observers,
            logout,
        }
    }

    /// Request the complete notification set for the current user.
    pub async fn request_full_fetch(&self) -> Result<()> {
        self.send(FetchCommand::FetchAll).await
    }

    /// Request an incremental fetch; the cursor is derived from known state.
    pub async fn request_incremental_fetch(
        &self,
        types: Option<Vec<String>>,
        direction: Direction,
    ) -> Result<()> {
        self.send(FetchCommand::FetchSome { types, direction }).await
    }

    /// Submit explicit IDs with a transition immediately, bypassing the
    /// pending queues.
    pub async fn update_now(&self, ids: Vec<String>, transition: StateTransition) -> Result<()> {
        self.send(FetchCommand::Update { ids, transition }).await
    }

    async fn send(&self, command: FetchCommand) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| anyhow!("Sync engine not available"))
    }

    /// Queue IDs to be marked read on the next drain.
    pub async fn mark_read<I>(&self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.enqueue(QueueKind::Read, ids).await;
    }

    /// Queue IDs to be marked unread on the next drain.
    pub async fn mark_unread<I>(&self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.enqueue(QueueKind::Unread, ids).await;
    }

    /// Queue IDs to be marked shown on the next drain.
    pub async fn mark_shown<I>(&self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.enqueue(QueueKind::Shown, ids).await;
    }

    async fn enqueue<I>(&self, kind: QueueKind, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.state.write().await.enqueue_pending(kind, ids);
    }

    /// Subscribe to the engine's event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.observers.subscribe()
    }

    /// Signal logout: the supervisor terminates and polling stops for good.
    pub fn logout(&self) {
        self.logout.cancel();
    }

    pub fn is_logged_out(&self) -> bool {
        self.logout.is_cancelled()
    }

    // Read accessors over shared state

    pub async fn notification(&self, id: &str) -> Option<Notification> {
        self.state.read().await.notification(id).cloned()
    }

    pub async fn notification_count(&self) -> usize {
        self.state.read().await.notification_count()
    }

    pub async fn pending_count(&self, kind: QueueKind) -> usize {
        self.state.read().await.pending_count(kind)
    }
}
