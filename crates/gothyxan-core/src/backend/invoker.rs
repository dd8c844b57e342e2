//! Single refresh-and-retry around token-scoped backend calls.

use std::future::Future;

use super::{BackendService, TRACING_TARGET};
use crate::{BackendSession, Error, Result};

/// Runs token-scoped backend calls, renewing the session once on rejection.
///
/// The operation is invoked with the session's access token. When it fails
/// with an authentication error the session is refreshed, replaced, and the
/// operation retried exactly once. A second rejection surfaces as
/// [`ErrorKind::AuthExhausted`]; any other failure propagates untouched.
///
/// [`ErrorKind::AuthExhausted`]: crate::ErrorKind::AuthExhausted
#[derive(Debug, Clone)]
pub struct RefreshInvoker {
    backend: BackendService,
}

impl RefreshInvoker {
    /// Creates an invoker that refreshes sessions through `backend`.
    pub fn new(backend: BackendService) -> Self {
        Self { backend }
    }

    /// Invokes `operation`, refreshing `session` at most once.
    ///
    /// If the refresh call itself fails, its error is returned and the session
    /// is left as it was.
    pub async fn invoke<T, F, Fut>(&self, session: &mut BackendSession, operation: F) -> Result<T>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let rejected = match operation(session.access_token().to_owned()).await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_auth_error() => error,
            Err(error) => return Err(error),
        };

        tracing::info!(
            target: TRACING_TARGET,
            status = ?rejected.status,
            "Access token rejected, refreshing session"
        );

        *session = self.backend.refresh(session.refresh_token()).await?;

        operation(session.access_token().to_owned())
            .await
            .map_err(Error::into_exhausted)
    }
}
