//! Fetch controller.
//!
//! Consumes fetch/update commands, derives cursors from current state, calls
//! the remote service, and publishes results or errors as events. Full and
//! incremental fetches are de-duplicated with generation counters: a request
//! superseded while in flight is abandoned, its result never published.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::remote::{FeedQuery, FeedService};
use crate::store::{Direction, SharedFeedState, StateTransition};

use super::cursor::select_cursor;
use super::events::{FetchCommand, SyncEvent};

/// Serves fetch and manual-update commands against the remote service.
pub struct FetchController {
    state: SharedFeedState,
    service: Arc<dyn FeedService>,
    events: mpsc::Sender<SyncEvent>,
    commands_rx: mpsc::Receiver<FetchCommand>,
    logout: CancellationToken,
    fetch_all_generation: Arc<AtomicU64>,
    fetch_some_generation: Arc<AtomicU64>,
}

impl FetchController {
    pub fn new(
        state: SharedFeedState,
        service: Arc<dyn FeedService>,
        events: mpsc::Sender<SyncEvent>,
        commands_rx: mpsc::Receiver<FetchCommand>,
        logout: CancellationToken,
    ) -> Self {
        Self {
            state,
            service,
            events,
            commands_rx,
            logout,
            fetch_all_generation: Arc::new(AtomicU64::new(0)),
            fetch_some_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Serve commands until the channel closes or the user logs out.
    pub async fn run(mut self) {
        info!("Starting fetch controller");

        loop {
            tokio::select! {
                command = self.commands_rx.recv() => match command {
                    Some(command) => self.handle_command(command).await,
                    None => {
                        debug!("Command channel closed, stopping fetch controller");
                        break;
                    }
                },
                _ = self.logout.cancelled() => {
                    debug!("User logged out, stopping fetch controller");
                    break;
                }
            }
        }

        info!("Fetch controller stopped");
    }

    async fn handle_command(&self, command: FetchCommand) {
        match command {
            FetchCommand::FetchAll => self.spawn_fetch_all(),
            FetchCommand::FetchSome { types, direction } => {
                self.spawn_fetch_some(types, direction)
            }
            FetchCommand::Update { ids, transition } => self.spawn_update(ids, transition),
        }
    }

    fn spawn_fetch_all(&self) {
        let generation = self.fetch_all_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let counter = Arc::clone(&self.fetch_all_generation);
        let state = self.state.clone();
        let service = Arc::clone(&self.service);
        let events = self.events.clone();

        tokio::spawn(async move {
            let username = { state.read().await.username().to_string() };
            debug!("Fetching full notification set for {}", username);

            let result = service.fetch_all(&username).await;
            if counter.load(Ordering::SeqCst) != generation {
                debug!("Full fetch superseded, dropping result");
                return;
            }

            let event = match result {
                Ok(notifications) => SyncEvent::FullSetReceived { notifications },
                Err(e) => {
                    warn!("Full fetch failed: {}", e);
                    SyncEvent::FullSetFetchFailed {
                        message: e.to_string(),
                    }
                }
            };
            let _ = events.send(event).await;
        });
    }

    fn spawn_fetch_some(&self, types: Option<Vec<String>>, direction: Direction) {
        let generation = self.fetch_some_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let counter = Arc::clone(&self.fetch_some_generation);
        let state = self.state.clone();
        let service = Arc::clone(&self.service);
        let events = self.events.clone();

        tokio::spawn(async move {
            let query = { build_query(&*state.read().await, types, direction) };
            debug!(
                "Fetching incremental set for {} ({:?})",
                query.username, direction
            );

            let result = service.fetch_some(&query).await;
            if counter.load(Ordering::SeqCst) != generation {
                debug!("Incremental fetch superseded, dropping result");
                return;
            }

            let event = match result {
                Ok(notifications) => SyncEvent::IncrementalSetReceived { notifications },
                Err(e) => {
                    warn!("Incremental fetch failed: {}", e);
                    SyncEvent::IncrementalSetFetchFailed {
                        message: e.to_string(),
                    }
                }
            };
            let _ = events.send(event).await;
        });
    }

    fn spawn_update(&self, ids: Vec<String>, transition: StateTransition) {
        if transition != StateTransition::MarkedRead {
            debug!("Ignoring manual {:?} update for {} ids", transition, ids.len());
            return;
        }
        if ids.is_empty() {
            return;
        }

        let service = Arc::clone(&self.service);
        let events = self.events.clone();

        tokio::spawn(async move {
            debug!("Submitting manual read update for {} ids", ids.len());
            let event = match service.mark_read(&ids).await {
                Ok(notifications) => SyncEvent::NotificationsMerged { notifications },
                Err(e) => {
                    warn!("Manual read update failed: {}", e);
                    SyncEvent::QueueSubmissionFailed {
                        queue: transition.queue(),
                        ids,
                        message: e.to_string(),
                    }
                }
            };
            let _ = events.send(event).await;
        });
    }
}

/// Build the incremental query from current state.
///
/// The cursor is derived from the known set, filtered to the requested types
/// when present; an empty (filtered) set yields an unbounded query.
fn build_query(
    state: &crate::store::FeedState,
    types: Option<Vec<String>>,
    direction: Direction,
) -> FeedQuery {
    let cursor = match &types {
        Some(types) => select_cursor(
            direction,
            state
                .notifications()
                .filter(|n| types.contains(&n.notify_type)),
        ),
        None => select_cursor(direction, state.notifications()),
    };

    let (before, after) = match direction {
        Direction::Before => (cursor, None),
        Direction::After => (None, cursor),
    };

    FeedQuery {
        username: state.username().to_string(),
        types,
        before,
        after,
    }
}
