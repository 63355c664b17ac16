//! Pacing primitive for the poll loop.

use std::time::Duration;

use async_trait::async_trait;

/// Suspend-for-duration seam.
///
/// The single wait suspends the caller exactly once. Cancellation safety is
/// inherited from future drop: a wait abandoned by `select!` never resumes
/// and leaks no timer.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Production clock backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
