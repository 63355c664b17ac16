//! Notifeed Sync Controller Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod config;
pub mod remote;
pub mod store;
pub mod sync;

// Re-export commonly used types for convenience
pub use remote::{FeedService, FeedServiceError, HttpFeedClient};
pub use store::{Direction, FeedState, Notification, QueueKind, SharedFeedState, StateTransition};
pub use sync::{build_engine, SyncEngine, SyncEvent, SyncHandle, SyncSettings};
