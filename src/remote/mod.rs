//! Remote feed service contract.
//!
//! The orchestrator talks to the remote service through the [`FeedService`]
//! trait; [`HttpFeedClient`] is the production implementation, tests provide
//! scripted ones.

mod client;
mod types;

pub use client::HttpFeedClient;
pub use types::{ApiResponse, FeedQuery, MarkRequest};

use async_trait::async_trait;
use thiserror::Error;

use crate::store::Notification;

/// Errors surfaced by the remote feed service.
#[derive(Debug, Error)]
pub enum FeedServiceError {
    /// Request never produced a usable response (connect, timeout, decode).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status without a decodable error body.
    #[error("request failed with status {0}")]
    Status(u16),

    /// The service answered with its error flag set.
    #[error("remote error: {0}")]
    Remote(String),

    /// The service answered success but the envelope carried neither
    /// payload nor error.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// The narrow contract the orchestrator needs from the remote service.
#[async_trait]
pub trait FeedService: Send + Sync {
    /// Fetch the complete notification set for a user.
    async fn fetch_all(&self, username: &str) -> Result<Vec<Notification>, FeedServiceError>;

    /// Fetch notifications matching an incremental query.
    async fn fetch_some(&self, query: &FeedQuery) -> Result<Vec<Notification>, FeedServiceError>;

    /// Submit a batch of IDs to be marked read. Returns the updated records.
    async fn mark_read(&self, ids: &[String]) -> Result<Vec<Notification>, FeedServiceError>;

    /// Submit a batch of IDs to be marked unread. Returns the updated records.
    async fn mark_unread(&self, ids: &[String]) -> Result<Vec<Notification>, FeedServiceError>;

    /// Submit a batch of IDs to be marked shown. Returns the updated records.
    async fn mark_shown(&self, ids: &[String]) -> Result<Vec<Notification>, FeedServiceError>;
}
