//! Scripted remote feed service for end-to-end tests.

use std::sync::Mutex;

use async_trait::async_trait;

use notifeed::remote::{FeedQuery, FeedService, FeedServiceError};
use notifeed::{Notification, QueueKind};

/// Canned answer for one service operation.
#[derive(Debug, Clone)]
enum Answer {
    Payload(Vec<Notification>),
    Error(String),
}

impl Answer {
    fn resolve(&self) -> Result<Vec<Notification>, FeedServiceError> {
        match self {
            Answer::Payload(notifications) => Ok(notifications.clone()),
            Answer::Error(message) => Err(FeedServiceError::Remote(message.clone())),
        }
    }
}

#[derive(Debug)]
struct Inner {
    fetch_all: Answer,
    fetch_some: Answer,
    mark_read: Answer,
    mark_unread: Answer,
    mark_shown: Answer,
    fetch_all_calls: Vec<String>,
    fetch_some_calls: Vec<FeedQuery>,
    mark_calls: Vec<(QueueKind, Vec<String>)>,
}

/// Programmable [`FeedService`] that records every call it receives.
///
/// All answers default to an empty payload.
pub struct StubFeedService {
    inner: Mutex<Inner>,
}

impl Default for StubFeedService {
    fn default() -> Self {
        Self::new()
    }
}

impl StubFeedService {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                fetch_all: Answer::Payload(vec![]),
                fetch_some: Answer::Payload(vec![]),
                mark_read: Answer::Payload(vec![]),
                mark_unread: Answer::Payload(vec![]),
                mark_shown: Answer::Payload(vec![]),
                fetch_all_calls: Vec::new(),
                fetch_some_calls: Vec::new(),
                mark_calls: Vec::new(),
            }),
        }
    }

    pub fn set_fetch_all(&self, notifications: Vec<Notification>) {
        self.inner.lock().unwrap().fetch_all = Answer::Payload(notifications);
    }

    #[allow(dead_code)]
    pub fn fail_fetch_all(&self, message: &str) {
        self.inner.lock().unwrap().fetch_all = Answer::Error(message.to_string());
    }

    #[allow(dead_code)]
    pub fn set_fetch_some(&self, notifications: Vec<Notification>) {
        self.inner.lock().unwrap().fetch_some = Answer::Payload(notifications);
    }

    #[allow(dead_code)]
    pub fn fail_fetch_some(&self, message: &str) {
        self.inner.lock().unwrap().fetch_some = Answer::Error(message.to_string());
    }

    pub fn set_mark(&self, kind: QueueKind, notifications: Vec<Notification>) {
        let mut inner = self.inner.lock().unwrap();
        *Self::mark_answer(&mut inner, kind) = Answer::Payload(notifications);
    }

    pub fn fail_mark(&self, kind: QueueKind, message: &str) {
        let mut inner = self.inner.lock().unwrap();
        *Self::mark_answer(&mut inner, kind) = Answer::Error(message.to_string());
    }

    fn mark_answer(inner: &mut Inner, kind: QueueKind) -> &mut Answer {
        match kind {
            QueueKind::Read => &mut inner.mark_read,
            QueueKind::Unread => &mut inner.mark_unread,
            QueueKind::Shown => &mut inner.mark_shown,
        }
    }

    pub fn fetch_all_calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().fetch_all_calls.clone()
    }

    pub fn fetch_some_calls(&self) -> Vec<FeedQuery> {
        self.inner.lock().unwrap().fetch_some_calls.clone()
    }

    pub fn mark_calls(&self) -> Vec<(QueueKind, Vec<String>)> {
        self.inner.lock().unwrap().mark_calls.clone()
    }
}

#[async_trait]
impl FeedService for StubFeedService {
    async fn fetch_all(&self, username: &str) -> Result<Vec<Notification>, FeedServiceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.fetch_all_calls.push(username.to_string());
        inner.fetch_all.resolve()
    }

    async fn fetch_some(&self, query: &FeedQuery) -> Result<Vec<Notification>, FeedServiceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.fetch_some_calls.push(query.clone());
        inner.fetch_some.resolve()
    }

    async fn mark_read(&self, ids: &[String]) -> Result<Vec<Notification>, FeedServiceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.mark_calls.push((QueueKind::Read, ids.to_vec()));
        inner.mark_read.resolve()
    }

    async fn mark_unread(&self, ids: &[String]) -> Result<Vec<Notification>, FeedServiceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.mark_calls.push((QueueKind::Unread, ids.to_vec()));
        inner.mark_unread.resolve()
    }

    async fn mark_shown(&self, ids: &[String]) -> Result<Vec<Notification>, FeedServiceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.mark_calls.push((QueueKind::Shown, ids.to_vec()));
        inner.mark_shown.resolve()
    }
}
