//! Common test infrastructure
//!
//! This module provides all the infrastructure needed for end-to-end tests.
//! Tests should only import from this module, not from internal submodules.

mod engine;
mod fixtures;
mod service;

// Public API - this is what tests import
pub use engine::TestEngine;
pub use fixtures::{notification, notification_batch};
pub use service::StubFeedService;
