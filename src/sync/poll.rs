//! Poll cycle.
//!
//! One paced wait raced against cancellation. The wait elapsing requests the
//! next incremental fetch; a cancelled wait reports `PollCancelled` so
//! downstream consumers can suppress error surfaces on intentional teardown.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::store::{Direction, PollOutcome};

use super::clock::Clock;
use super::events::{FetchCommand, SyncEvent};

pub const POLL_CANCELLED_MESSAGE: &str = "poll cancelled";

/// A single polling cycle.
pub struct PollCycle {
    clock: Arc<dyn Clock>,
    interval: Duration,
    cancel: CancellationToken,
    commands: tokio::sync::mpsc::Sender<FetchCommand>,
    events: tokio::sync::mpsc::Sender<SyncEvent>,
}

impl PollCycle {
    pub fn new(
        clock: Arc<dyn Clock>,
        interval: Duration,
        cancel: CancellationToken,
        commands: tokio::sync::mpsc::Sender<FetchCommand>,
        events: tokio::sync::mpsc::Sender<SyncEvent>,
    ) -> Self {
        Self {
            clock,
            interval,
            cancel,
            commands,
            events,
        }
    }

    /// Run the cycle to its terminal outcome.
    ///
    /// The cancellation branch interrupts the clock wait promptly; a
    /// cancelled cycle never emits a late fetch request. The token itself is
    /// level-triggered and stays observable for callers after the race.
    pub async fn run(self) -> PollOutcome {
        tokio::select! {
            _ = self.clock.wait(self.interval) => {
                debug!("Poll interval elapsed, requesting incremental fetch");
                let command = FetchCommand::FetchSome {
                    types: None,
                    direction: Direction::After,
                };
                if self.commands.send(command).await.is_err() {
                    debug!("Fetch command channel closed, dropping poll request");
                }
                PollOutcome::Requested(Direction::After)
            }
            _ = self.cancel.cancelled() => {
                debug!("Poll cycle cancelled before interval elapsed");
                let event = SyncEvent::PollCancelled {
                    message: POLL_CANCELLED_MESSAGE.to_string(),
                };
                let _ = self.events.send(event).await;
                PollOutcome::Cancelled
            }
        }
    }
}
