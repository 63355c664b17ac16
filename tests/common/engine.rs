//! Test harness around a running sync engine.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use notifeed::{build_engine, FeedState, SyncEvent, SyncHandle, SyncSettings};

use super::service::StubFeedService;

/// A sync engine wired against a [`StubFeedService`], already running.
pub struct TestEngine {
    pub handle: SyncHandle,
    pub service: Arc<StubFeedService>,
    events: broadcast::Receiver<SyncEvent>,
    engine_task: JoinHandle<()>,
}

impl TestEngine {
    /// Spawn an engine for `username` with the given poll interval.
    ///
    /// The event subscription is opened before the engine runs, so no event
    /// can be missed.
    pub fn spawn(username: &str, poll_interval_ms: u64) -> Self {
        let service = Arc::new(StubFeedService::new());
        let state = FeedState::shared(username);
        let settings = SyncSettings {
            poll_interval: Duration::from_millis(poll_interval_ms),
        };

        let (engine, handle) = build_engine(settings, state, service.clone());
        let events = handle.subscribe();
        let engine_task = tokio::spawn(engine.run());

        Self {
            handle,
            service,
            events,
            engine_task,
        }
    }

    /// Receive the next event, failing the test after one second.
    pub async fn next_event(&mut self) -> SyncEvent {
        tokio::time::timeout(Duration::from_secs(1), self.events.recv())
            .await
            .expect("timed out waiting for sync event")
            .expect("event stream closed")
    }

    /// Assert that no event arrives within the given window.
    pub async fn expect_silence(&mut self, window_ms: u64) {
        let result =
            tokio::time::timeout(Duration::from_millis(window_ms), self.events.recv()).await;
        if let Ok(Ok(event)) = result {
            panic!("expected no event, got {:?}", event);
        }
    }

    /// Log out and wait for the engine to stop.
    pub async fn shutdown(self) {
        self.handle.logout();
        tokio::time::timeout(Duration::from_secs(2), self.engine_task)
            .await
            .expect("engine did not stop after logout")
            .unwrap();
    }
}
