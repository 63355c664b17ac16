//! Shared fixtures for sync engine tests.

use notifeed::Notification;

/// Build a notification with explicit timestamps, unread and unshown.
pub fn notification(id: &str, created: i64, updated: i64) -> Notification {
    Notification {
        id: id.to_string(),
        notify_type: "mention".to_string(),
        created,
        updated,
        read: false,
        shown: false,
    }
}

/// Build `count` notifications with ascending ids and timestamps.
pub fn notification_batch(count: usize) -> Vec<Notification> {
    (0..count)
        .map(|i| notification(&format!("n-{:02}", i), i as i64 + 1, i as i64 + 1))
        .collect()
}
