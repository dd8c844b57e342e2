//! Per-chat session state.

mod store;

use std::fmt;

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

pub use self::store::{ChatSessionStore, SharedChatSession};
use crate::{Outfit, RequestPreferences};

/// Tracing target for session operations.
pub const TRACING_TARGET: &str = "gothyxan_core::session";

/// Token type assumed when the backend omits one.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Stable identifier of a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Display, From, Into, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

/// Authenticated credential pair for one chat.
///
/// Sessions are replaced wholesale on login and refresh, never edited.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendSession {
    access_token: String,
    refresh_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
}

fn default_token_type() -> String {
    DEFAULT_TOKEN_TYPE.to_owned()
}

impl BackendSession {
    /// Creates a new session.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        token_type: Option<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            token_type: token_type.unwrap_or_else(default_token_type),
        }
    }

    /// Returns the access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the refresh token.
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// Returns the token type, `Bearer` unless the backend said otherwise.
    pub fn token_type(&self) -> &str {
        &self.token_type
    }
}

impl fmt::Debug for BackendSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSession")
            .field("token_type", &self.token_type)
            .finish_non_exhaustive()
    }
}

/// Everything the bot remembers about one chat.
#[derive(Debug, Clone)]
pub struct ChatSession {
    /// Current backend credentials.
    pub session: BackendSession,
    /// Parameters used for the next generation.
    pub preferences: RequestPreferences,
    /// Most recent successfully generated outfit.
    pub last_outfit: Option<Outfit>,
}

impl ChatSession {
    /// Creates chat state with default preferences and no outfit.
    pub fn new(session: BackendSession) -> Self {
        Self {
            session,
            preferences: RequestPreferences::default(),
            last_outfit: None,
        }
    }
}
