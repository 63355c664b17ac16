//! Wire types for the remote feed service.

use serde::{Deserialize, Serialize};

use crate::store::Notification;

/// Response envelope used by every feed endpoint.
///
/// The service answers with either a payload of notification records or an
/// error message, never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Vec<Notification>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Query for an incremental fetch.
///
/// At most one of `before`/`after` is set; both absent means an unbounded
/// fetch (empty local store, no cursor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedQuery {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<i64>,
}

/// Body for the read/unread/shown batch submission endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkRequest {
    pub ids: Vec<String>,
}
