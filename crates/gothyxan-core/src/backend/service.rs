//! Backend service wrapper with observability.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use super::{BackendProvider, OutfitRequest, TRACING_TARGET};
use crate::{BackendSession, Outfit, Result};

/// Backend service wrapper with observability.
///
/// This wrapper adds structured logging to any backend implementation.
/// The inner provider is wrapped in `Arc` for cheap cloning; all clones share
/// one connection pool.
#[derive(Clone)]
pub struct BackendService {
    inner: Arc<dyn BackendProvider>,
}

impl fmt::Debug for BackendService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendService").finish_non_exhaustive()
    }
}

impl BackendService {
    /// Create a new backend service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: BackendProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Exchanges a Telegram identity for a new session.
    pub async fn login(&self, telegram_id: &str, username: Option<&str>) -> Result<BackendSession> {
        observe("login", self.inner.login(telegram_id, username)).await
    }

    /// Exchanges a refresh token for a new session.
    pub async fn refresh(&self, refresh_token: &str) -> Result<BackendSession> {
        observe("refresh", self.inner.refresh(refresh_token)).await
    }

    /// Generates an outfit for the given request.
    pub async fn generate_outfit(
        &self,
        access_token: &str,
        request: &OutfitRequest,
    ) -> Result<Outfit> {
        tracing::debug!(
            target: TRACING_TARGET,
            style = %request.style,
            budget_mode = %request.budget_mode,
            luxury_only = request.luxury_only,
            "Requesting outfit"
        );

        observe(
            "generate_outfit",
            self.inner.generate_outfit(access_token, request),
        )
        .await
    }

    /// Saves an outfit to the user's collection.
    pub async fn save_outfit(
        &self,
        access_token: &str,
        outfit: &Outfit,
    ) -> Result<serde_json::Value> {
        observe("save_outfit", self.inner.save_outfit(access_token, outfit)).await
    }

    /// Releases the provider's pooled connections.
    pub async fn close(&self) {
        self.inner.close().await;
        tracing::info!(target: TRACING_TARGET, "Backend connections released");
    }
}

async fn observe<T>(operation: &'static str, call: impl Future<Output = Result<T>>) -> Result<T> {
    let started_at = Instant::now();
    let result = call.await;
    let elapsed = started_at.elapsed();

    match &result {
        Ok(_) => {
            tracing::debug!(
                target: TRACING_TARGET,
                operation,
                elapsed_ms = elapsed.as_millis(),
                "Backend call succeeded"
            );
        }
        Err(error) if error.is_auth_error() => {
            tracing::info!(
                target: TRACING_TARGET,
                operation,
                status = ?error.status,
                elapsed_ms = elapsed.as_millis(),
                "Backend rejected access token"
            );
        }
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET,
                operation,
                kind = %error.kind,
                status = ?error.status,
                error = %error,
                elapsed_ms = elapsed.as_millis(),
                "Backend call failed"
            );
        }
    }

    result
}
