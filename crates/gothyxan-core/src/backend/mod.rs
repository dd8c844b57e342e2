//! Backend contract consumed by the session core.
//!
//! [`BackendProvider`] is the seam between the core and a concrete gateway
//! (see `gothyxan-reqwest`). [`BackendService`] wraps any provider with
//! structured logging, and [`RefreshInvoker`] adds the single
//! refresh-and-retry on authentication failure.

mod invoker;
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
mod mock;
mod request;
mod service;

pub use self::invoker::RefreshInvoker;
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use self::mock::{MockBackend, MockCalls};
pub use self::request::OutfitRequest;
pub use self::service::BackendService;
use crate::{BackendSession, Outfit, Result};

/// Tracing target for backend operations.
pub const TRACING_TARGET: &str = "gothyxan_core::backend";

/// Core trait for styling backend operations.
///
/// Implementations must be safe for concurrent use: one instance serves
/// every chat. Failed responses are reported as [`Error::backend`] so that
/// 401/403 can be told apart from other failures.
///
/// [`Error::backend`]: crate::Error::backend
#[async_trait::async_trait]
pub trait BackendProvider: Send + Sync {
    /// Exchanges a Telegram identity for a new session.
    async fn login(&self, telegram_id: &str, username: Option<&str>) -> Result<BackendSession>;

    /// Exchanges a refresh token for a new session.
    async fn refresh(&self, refresh_token: &str) -> Result<BackendSession>;

    /// Generates an outfit for the given request.
    async fn generate_outfit(&self, access_token: &str, request: &OutfitRequest)
    -> Result<Outfit>;

    /// Saves an outfit to the user's collection, returning the raw acknowledgement.
    async fn save_outfit(&self, access_token: &str, outfit: &Outfit) -> Result<serde_json::Value>;

    /// Releases pooled connections. Later calls may reopen them.
    async fn close(&self) {}
}
