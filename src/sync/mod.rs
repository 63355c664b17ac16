//! Notification feed sync engine.
//!
//! Wires the orchestration core together: the state reducer, the fetch
//! controller and the poll supervisor, connected by channels and shut down
//! through a single logout token.

mod clock;
mod cursor;
mod dispatcher;
mod drainer;
mod events;
mod fetch;
mod handle;
mod poll;
mod reducer;
mod supervisor;

pub use clock::{Clock, TokioClock};
pub use cursor::select_cursor;
pub use dispatcher::UpdateDispatcher;
pub use drainer::QueueDrainer;
pub use events::{DataArrival, FetchCommand, SyncEvent};
pub use fetch::FetchController;
pub use handle::SyncHandle;
pub use poll::{PollCycle, POLL_CANCELLED_MESSAGE};
pub use reducer::StateReducer;
pub use supervisor::PollSupervisor;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

use crate::remote::FeedService;
use crate::store::SharedFeedState;

const EVENT_CHANNEL_CAPACITY: usize = 100;
const COMMAND_CHANNEL_CAPACITY: usize = 100;
const DATA_CHANNEL_CAPACITY: usize = 16;
const OBSERVER_CHANNEL_CAPACITY: usize = 100;

/// Engine tuning knobs.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Pause between a finished dispatch and the next incremental fetch.
    pub poll_interval: Duration,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(5000),
        }
    }
}

/// A fully wired sync engine, ready to run.
pub struct SyncEngine {
    supervisor: PollSupervisor,
    fetch: FetchController,
    reducer: StateReducer,
}

impl SyncEngine {
    /// Drive the engine until the user logs out and the channels drain.
    pub async fn run(self) {
        let SyncEngine {
            supervisor,
            fetch,
            reducer,
        } = self;

        tokio::join!(supervisor.run(), fetch.run(), reducer.run());
    }
}

/// Build an engine and its handle around shared state and a remote service.
pub fn build_engine(
    settings: SyncSettings,
    state: SharedFeedState,
    service: Arc<dyn FeedService>,
) -> (SyncEngine, SyncHandle) {
    build_engine_with_clock(settings, state, service, Arc::new(TokioClock))
}

/// As [`build_engine`], with an injected clock.
pub fn build_engine_with_clock(
    settings: SyncSettings,
    state: SharedFeedState,
    service: Arc<dyn FeedService>,
    clock: Arc<dyn Clock>,
) -> (SyncEngine, SyncHandle) {
    let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let (commands_tx, commands_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
    let (data_tx, data_rx) = mpsc::channel(DATA_CHANNEL_CAPACITY);
    let (observers, _) = broadcast::channel(OBSERVER_CHANNEL_CAPACITY);
    let logout = CancellationToken::new();

    let dispatcher = UpdateDispatcher::new(QueueDrainer::new(
        state.clone(),
        Arc::clone(&service),
        events_tx.clone(),
    ));

    let supervisor = PollSupervisor::new(
        data_rx,
        dispatcher,
        clock,
        settings.poll_interval,
        commands_tx.clone(),
        events_tx.clone(),
        logout.clone(),
    );

    let fetch = FetchController::new(
        state.clone(),
        service,
        events_tx,
        commands_rx,
        logout.clone(),
    );

    let reducer = StateReducer::new(events_rx, state.clone(), data_tx, observers.clone());

    let engine = SyncEngine {
        supervisor,
        fetch,
        reducer,
    };
    let handle = SyncHandle::new(state, commands_tx, observers, logout);

    (engine, handle)
}
