//! Event and command types for the sync engine.
//!
//! Events flow from the orchestration components through the state reducer
//! to external observers; commands flow from the handle and the poll cycle
//! into the fetch controller.

use serde::{Deserialize, Serialize};

use crate::store::{Direction, Notification, QueueKind, StateTransition};

/// Events emitted by the sync engine.
///
/// Serialized using serde's adjacently tagged representation:
/// `{"type": "event_name", "payload": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload")]
pub enum SyncEvent {
    #[serde(rename = "full_set_received")]
    FullSetReceived { notifications: Vec<Notification> },

    #[serde(rename = "full_set_fetch_failed")]
    FullSetFetchFailed { message: String },

    #[serde(rename = "incremental_set_received")]
    IncrementalSetReceived { notifications: Vec<Notification> },

    #[serde(rename = "incremental_set_fetch_failed")]
    IncrementalSetFetchFailed { message: String },

    /// A queue submission was accepted by the remote service. Emitted
    /// strictly before the corresponding `NotificationsMerged`, so observers
    /// can tell a submission echo from an unrelated incremental fetch.
    #[serde(rename = "queue_submission_succeeded")]
    QueueSubmissionSucceeded {
        transition: StateTransition,
        ids: Vec<String>,
    },

    #[serde(rename = "queue_submission_failed")]
    QueueSubmissionFailed {
        queue: QueueKind,
        ids: Vec<String>,
        message: String,
    },

    #[serde(rename = "notifications_merged")]
    NotificationsMerged { notifications: Vec<Notification> },

    #[serde(rename = "poll_cancelled")]
    PollCancelled { message: String },
}

impl SyncEvent {
    /// Get the event type string for logging and observers.
    pub fn event_type(&self) -> &'static str {
        match self {
            SyncEvent::FullSetReceived { .. } => "full_set_received",
            SyncEvent::FullSetFetchFailed { .. } => "full_set_fetch_failed",
            SyncEvent::IncrementalSetReceived { .. } => "incremental_set_received",
            SyncEvent::IncrementalSetFetchFailed { .. } => "incremental_set_fetch_failed",
            SyncEvent::QueueSubmissionSucceeded { .. } => "queue_submission_succeeded",
            SyncEvent::QueueSubmissionFailed { .. } => "queue_submission_failed",
            SyncEvent::NotificationsMerged { .. } => "notifications_merged",
            SyncEvent::PollCancelled { .. } => "poll_cancelled",
        }
    }
}

/// Commands consumed by the fetch controller.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchCommand {
    /// Request the complete notification set for the current user.
    FetchAll,
    /// Request an incremental set; the cursor is derived from current state.
    FetchSome {
        types: Option<Vec<String>>,
        direction: Direction,
    },
    /// Manually submit explicit IDs with a requested transition, bypassing
    /// the pending queues.
    Update {
        ids: Vec<String>,
        transition: StateTransition,
    },
}

/// Signal from the reducer to the supervisor that notification data landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataArrival {
    Full,
    Incremental,
}
