//! Poll supervisor.
//!
//! Top-level control loop of the sync engine: wait for notification data to
//! land, drain the pending-update queues, then race one poll cycle against
//! the logout signal. Loops until logged out.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::store::PollOutcome;

use super::clock::Clock;
use super::dispatcher::UpdateDispatcher;
use super::events::{DataArrival, FetchCommand, SyncEvent};
use super::poll::PollCycle;

/// Supervisor phases, for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SupervisorState {
    AwaitingData,
    Dispatching,
    Racing,
    Terminated,
}

/// The top-level polling state machine.
///
/// At most one instance is live per user session, and it never has two poll
/// cycles in flight: each `Racing` phase starts exactly one cycle and waits
/// for its outcome before looping.
pub struct PollSupervisor {
    data_rx: mpsc::Receiver<DataArrival>,
    dispatcher: UpdateDispatcher,
    clock: Arc<dyn Clock>,
    poll_interval: Duration,
    commands: mpsc::Sender<FetchCommand>,
    events: mpsc::Sender<SyncEvent>,
    logout: CancellationToken,
}

impl PollSupervisor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        data_rx: mpsc::Receiver<DataArrival>,
        dispatcher: UpdateDispatcher,
        clock: Arc<dyn Clock>,
        poll_interval: Duration,
        commands: mpsc::Sender<FetchCommand>,
        events: mpsc::Sender<SyncEvent>,
        logout: CancellationToken,
    ) -> Self {
        Self {
            data_rx,
            dispatcher,
            clock,
            poll_interval,
            commands,
            events,
            logout,
        }
    }

    /// Run the supervisor until logout or until the data channel closes.
    pub async fn run(mut self) {
        info!(
            "Starting poll supervisor with interval {:?}",
            self.poll_interval
        );

        loop {
            self.trace(SupervisorState::AwaitingData);
            let arrival = tokio::select! {
                arrival = self.data_rx.recv() => match arrival {
                    Some(arrival) => arrival,
                    None => {
                        info!("Data channel closed, stopping supervisor");
                        break;
                    }
                },
                _ = self.logout.cancelled() => {
                    info!("User logged out while awaiting data, stopping supervisor");
                    break;
                }
            };
            debug!("Notification data arrived: {:?}", arrival);

            self.trace(SupervisorState::Dispatching);
            self.dispatcher.dispatch_all().await;

            self.trace(SupervisorState::Racing);
            let cycle = PollCycle::new(
                Arc::clone(&self.clock),
                self.poll_interval,
                self.logout.clone(),
                self.commands.clone(),
                self.events.clone(),
            );

            match cycle.run().await {
                PollOutcome::Requested(direction) => {
                    debug!("Poll cycle requested {:?} fetch, looping", direction);
                }
                PollOutcome::Cancelled => {
                    info!("User logged out, stopping supervisor");
                    break;
                }
            }
        }

        self.trace(SupervisorState::Terminated);
        info!("Poll supervisor stopped");
    }

    fn trace(&self, state: SupervisorState) {
        debug!("Supervisor state: {:?}", state);
    }
}
