//! Cursor selection for incremental fetches.
//!
//! Pure functions over the current notification set; no side effects.

use crate::store::{Direction, Notification};

/// Choose the timestamp cursor for the next incremental fetch.
///
/// The set is conceptually reverse-sorted by creation time, so paging
/// backward (`Before`) keys off the earliest `created` in the set, while
/// paging forward (`After`) keys off the latest `updated`. An empty set has
/// no cursor and the fetch is unbounded.
pub fn select_cursor<'a, I>(direction: Direction, notifications: I) -> Option<i64>
where
    I: IntoIterator<Item = &'a Notification>,
{
    match direction {
        Direction::Before => notifications.into_iter().map(|n| n.created).min(),
        Direction::After => notifications.into_iter().map(|n| n.updated).max(),
    }
}
