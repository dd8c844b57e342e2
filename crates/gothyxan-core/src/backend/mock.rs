//! Scripted backend provider for testing.
//!
//! # Feature Flag
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! gothyxan-core = { version = "...", features = ["test-utils"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use gothyxan_core::{Error, MockBackend};
//!
//! let mock = MockBackend::new();
//! mock.push_generate(Err(Error::backend(401, "expired")));
//! let service = mock.service();
//! // ... drive the code under test ...
//! assert_eq!(mock.calls().refresh, 1);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Value, json};

use super::{BackendProvider, BackendService, OutfitRequest};
use crate::{BackendSession, Outfit, Result};

/// Number of calls received per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockCalls {
    pub login: usize,
    pub refresh: usize,
    pub generate: usize,
    pub save: usize,
    pub close: usize,
}

#[derive(Default)]
struct MockState {
    calls: MockCalls,
    logins: VecDeque<Result<BackendSession>>,
    refreshes: VecDeque<Result<BackendSession>>,
    generates: VecDeque<Result<Outfit>>,
    saves: VecDeque<Result<Value>>,
    generate_tokens: Vec<String>,
    saved: Vec<Outfit>,
}

/// Backend provider returning scripted responses.
///
/// Each operation pops the next queued result; with an empty queue it
/// succeeds with a deterministic default:
/// - login: tokens `access-login-{n}` / `refresh-login-{n}`
/// - refresh: tokens `access-refreshed-{n}` / `refresh-refreshed-{n}`
/// - generate: an outfit echoing the requested style
/// - save: `{"saved": true}`
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    /// Creates a mock with empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a clone of this mock into a [`BackendService`].
    pub fn service(&self) -> BackendService {
        BackendService::new(self.clone())
    }

    /// Queues the next login result.
    pub fn push_login(&self, result: Result<BackendSession>) {
        self.state().logins.push_back(result);
    }

    /// Queues the next refresh result.
    pub fn push_refresh(&self, result: Result<BackendSession>) {
        self.state().refreshes.push_back(result);
    }

    /// Queues the next generate result.
    pub fn push_generate(&self, result: Result<Outfit>) {
        self.state().generates.push_back(result);
    }

    /// Queues the next save result.
    pub fn push_save(&self, result: Result<Value>) {
        self.state().saves.push_back(result);
    }

    /// Returns call counters.
    pub fn calls(&self) -> MockCalls {
        self.state().calls
    }

    /// Access tokens used for generate calls, in order.
    pub fn generate_tokens(&self) -> Vec<String> {
        self.state().generate_tokens.clone()
    }

    /// Outfits passed to save calls, in order.
    pub fn saved(&self) -> Vec<Outfit> {
        self.state().saved.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl BackendProvider for MockBackend {
    async fn login(&self, _telegram_id: &str, _username: Option<&str>) -> Result<BackendSession> {
        let mut state = self.state();
        state.calls.login += 1;
        let n = state.calls.login;
        state.logins.pop_front().unwrap_or_else(|| {
            Ok(BackendSession::new(
                format!("access-login-{n}"),
                format!("refresh-login-{n}"),
                None,
            ))
        })
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<BackendSession> {
        let mut state = self.state();
        state.calls.refresh += 1;
        let n = state.calls.refresh;
        state.refreshes.pop_front().unwrap_or_else(|| {
            Ok(BackendSession::new(
                format!("access-refreshed-{n}"),
                format!("refresh-refreshed-{n}"),
                None,
            ))
        })
    }

    async fn generate_outfit(
        &self,
        access_token: &str,
        request: &OutfitRequest,
    ) -> Result<Outfit> {
        let mut state = self.state();
        state.calls.generate += 1;
        state.generate_tokens.push(access_token.to_owned());
        state
            .generates
            .pop_front()
            .unwrap_or_else(|| Ok(Outfit::new(json!({ "style": request.style }))))
    }

    async fn save_outfit(&self, _access_token: &str, outfit: &Outfit) -> Result<Value> {
        let mut state = self.state();
        state.calls.save += 1;
        state.saved.push(outfit.clone());
        state
            .saves
            .pop_front()
            .unwrap_or_else(|| Ok(json!({ "saved": true })))
    }

    async fn close(&self) {
        self.state().calls.close += 1;
    }
}
