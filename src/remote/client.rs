//! HTTP client for the remote feed service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::store::Notification;

use super::types::{ApiResponse, FeedQuery, MarkRequest};
use super::{FeedService, FeedServiceError};

/// Reqwest-backed implementation of [`FeedService`].
///
/// Endpoints:
/// - `GET  {base}/feed/{username}` — complete set
/// - `GET  {base}/feed/{username}/some` — incremental, cursor via query string
/// - `POST {base}/feed/read|unread|shown` — batch submissions
#[derive(Clone)]
pub struct HttpFeedClient {
    client: Client,
    base_url: String,
}

impl HttpFeedClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the feed service (e.g., "http://localhost:8080")
    /// * `timeout_secs` - Request timeout in seconds
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self, FeedServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Unwrap the `{payload} | {error}` envelope.
    fn unwrap_envelope(response: ApiResponse) -> Result<Vec<Notification>, FeedServiceError> {
        if let Some(message) = response.error {
            return Err(FeedServiceError::Remote(message));
        }
        response.payload.ok_or_else(|| {
            FeedServiceError::MalformedResponse("neither payload nor error present".to_string())
        })
    }

    async fn decode(
        &self,
        response: reqwest::Response,
    ) -> Result<Vec<Notification>, FeedServiceError> {
        let status = response.status();
        if !status.is_success() {
            // Error bodies still use the envelope when the service produced them
            if let Ok(envelope) = response.json::<ApiResponse>().await {
                if let Some(message) = envelope.error {
                    return Err(FeedServiceError::Remote(message));
                }
            }
            return Err(FeedServiceError::Status(status.as_u16()));
        }

        let envelope: ApiResponse = response.json().await?;
        Self::unwrap_envelope(envelope)
    }

    async fn mark(
        &self,
        endpoint: &str,
        ids: &[String],
    ) -> Result<Vec<Notification>, FeedServiceError> {
        let url = format!("{}/feed/{}", self.base_url, endpoint);
        let response = self
            .client
            .post(&url)
            .json(&MarkRequest { ids: ids.to_vec() })
            .send()
            .await?;

        self.decode(response).await
    }
}

#[async_trait]
impl FeedService for HttpFeedClient {
    async fn fetch_all(&self, username: &str) -> Result<Vec<Notification>, FeedServiceError> {
        let url = format!("{}/feed/{}", self.base_url, username);
        let response = self.client.get(&url).send().await?;
        self.decode(response).await
    }

    async fn fetch_some(&self, query: &FeedQuery) -> Result<Vec<Notification>, FeedServiceError> {
        let url = format!("{}/feed/{}/some", self.base_url, query.username);

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(types) = &query.types {
            params.push(("types", types.join(",")));
        }
        if let Some(before) = query.before {
            params.push(("before", before.to_string()));
        }
        if let Some(after) = query.after {
            params.push(("after", after.to_string()));
        }

        let response = self.client.get(&url).query(&params).send().await?;
        self.decode(response).await
    }

    async fn mark_read(&self, ids: &[String]) -> Result<Vec<Notification>, FeedServiceError> {
        self.mark("read", ids).await
    }

    async fn mark_unread(&self, ids: &[String]) -> Result<Vec<Notification>, FeedServiceError> {
        self.mark("unread", ids).await
    }

    async fn mark_shown(&self, ids: &[String]) -> Result<Vec<Notification>, FeedServiceError> {
        self.mark("shown", ids).await
    }
}
