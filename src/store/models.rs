//! Notification feed data models

use serde::{Deserialize, Serialize};

/// A single notification in the feed.
///
/// Identity is `id`; `created` and `updated` are Unix epoch seconds. The
/// `read` and `shown` flags are the only fields mutated after a notification
/// enters the store, either by a submission echo from the remote service or
/// by a locally applied transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub notify_type: String,
    pub created: i64,
    pub updated: i64,
    pub read: bool,
    pub shown: bool,
}

/// Paging direction for incremental fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Page backward for older items (cursor = oldest known creation time).
    Before,
    /// Page forward for items changed since the last known state.
    After,
}

/// The three pending-update queues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueKind {
    Read,
    Unread,
    Shown,
}

impl QueueKind {
    /// The local-state transition applied when this queue's submission
    /// succeeds.
    pub fn transition(self) -> StateTransition {
        match self {
            QueueKind::Read => StateTransition::MarkedRead,
            QueueKind::Unread => StateTransition::MarkedUnread,
            QueueKind::Shown => StateTransition::MarkedShown,
        }
    }
}

impl std::fmt::Display for QueueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueKind::Read => write!(f, "read"),
            QueueKind::Unread => write!(f, "unread"),
            QueueKind::Shown => write!(f, "shown"),
        }
    }
}

/// A confirmed field transition on a batch of notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateTransition {
    MarkedRead,
    MarkedUnread,
    MarkedShown,
}

impl StateTransition {
    /// The queue this transition originates from.
    pub fn queue(self) -> QueueKind {
        match self {
            StateTransition::MarkedRead => QueueKind::Read,
            StateTransition::MarkedUnread => QueueKind::Unread,
            StateTransition::MarkedShown => QueueKind::Shown,
        }
    }

    /// Apply the transition to a notification in place.
    pub fn apply(self, notification: &mut Notification) {
        match self {
            StateTransition::MarkedRead => notification.read = true,
            StateTransition::MarkedUnread => notification.read = false,
            StateTransition::MarkedShown => notification.shown = true,
        }
    }
}

/// Outcome of a single poll cycle. Drives whether the supervisor loops or
/// halts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The wait elapsed and an incremental fetch was requested.
    Requested(Direction),
    /// The cycle was torn down before the wait elapsed.
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_serialization_roundtrip() {
        let notification = Notification {
            id: "n-1".to_string(),
            notify_type: "mention".to_string(),
            created: 1700000000,
            updated: 1700000100,
            read: false,
            shown: true,
        };

        let serialized = serde_json::to_string(&notification).unwrap();
        let deserialized: Notification = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized, notification);
    }

    #[test]
    fn test_direction_serialization() {
        assert_eq!(serde_json::to_string(&Direction::Before).unwrap(), "\"before\"");
        assert_eq!(serde_json::to_string(&Direction::After).unwrap(), "\"after\"");
    }

    #[test]
    fn test_queue_kind_transition_mapping() {
        assert_eq!(QueueKind::Read.transition(), StateTransition::MarkedRead);
        assert_eq!(QueueKind::Unread.transition(), StateTransition::MarkedUnread);
        assert_eq!(QueueKind::Shown.transition(), StateTransition::MarkedShown);

        for kind in [QueueKind::Read, QueueKind::Unread, QueueKind::Shown] {
            assert_eq!(kind.transition().queue(), kind);
        }
    }

    #[test]
    fn test_transition_apply() {
        let mut notification = Notification {
            id: "n-1".to_string(),
            notify_type: "mention".to_string(),
            created: 0,
            updated: 0,
            read: false,
            shown: false,
        };

        StateTransition::MarkedRead.apply(&mut notification);
        assert!(notification.read);

        StateTransition::MarkedShown.apply(&mut notification);
        assert!(notification.shown);

        StateTransition::MarkedUnread.apply(&mut notification);
        assert!(!notification.read);
        // Shown is untouched by read transitions
        assert!(notification.shown);
    }
}
