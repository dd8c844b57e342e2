//! Reqwest-based HTTP client for the styling backend.

use std::sync::{Arc, Mutex, MutexGuard};

use gothyxan_core::BackendService;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};

use super::ReqwestConfig;
use crate::error::{Error, Result};

/// Tracing target for reqwest client operations.
pub const TRACING_TARGET: &str = "gothyxan_reqwest::client";

/// Inner client that holds the connection pool and configuration.
struct ReqwestClientInner {
    http: Mutex<Option<Client>>,
    config: ReqwestConfig,
    api_base: String,
}

/// Reqwest-based HTTP client for the styling backend.
///
/// This client implements the [`BackendProvider`] trait. The underlying
/// connection pool is created on first use and shared by every clone;
/// [`close`] releases it and the next call creates a fresh one.
///
/// # Examples
///
/// ```rust,ignore
/// use gothyxan_reqwest::{ReqwestClient, ReqwestConfig};
///
/// let config = ReqwestConfig::new("https://api.gothyxan.com");
/// let client = ReqwestClient::new(config)?;
/// let session = client.login("42", None).await?;
/// ```
///
/// [`BackendProvider`]: gothyxan_core::BackendProvider
/// [`close`]: ReqwestClient::close
#[derive(Clone)]
pub struct ReqwestClient {
    inner: Arc<ReqwestClientInner>,
}

impl std::fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestClient {
    /// Creates a new client, validating the configuration.
    ///
    /// No connection is opened until the first request.
    pub fn new(config: ReqwestConfig) -> Result<Self> {
        let api_base = config.api_base()?;

        tracing::debug!(
            target: TRACING_TARGET,
            api_base = %api_base,
            timeout_ms = config.effective_timeout().as_millis(),
            "Creating reqwest client"
        );

        let inner = ReqwestClientInner {
            http: Mutex::new(None),
            config,
            api_base,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.inner.config
    }

    /// Returns the `/api` base URL requests are sent to.
    pub fn api_base(&self) -> &str {
        &self.inner.api_base
    }

    /// Returns true while a connection pool is open.
    pub fn is_connected(&self) -> bool {
        self.pool().is_some()
    }

    /// Converts this client into a [`BackendService`] for use with dependency injection.
    pub fn into_service(self) -> BackendService {
        BackendService::new(self)
    }

    /// Drops the connection pool.
    pub fn close(&self) {
        if self.pool().take().is_some() {
            tracing::info!(target: TRACING_TARGET, "Connection pool closed");
        }
    }

    /// Returns the shared HTTP client, creating it on first use.
    pub(crate) fn http(&self) -> Result<Client> {
        let mut pool = self.pool();
        if let Some(client) = pool.as_ref() {
            return Ok(client.clone());
        }

        let client = Client::builder()
            .timeout(self.inner.config.effective_timeout())
            .user_agent(self.inner.config.effective_user_agent())
            .build()?;

        tracing::debug!(target: TRACING_TARGET, "Connection pool created");
        Ok(pool.insert(client).clone())
    }

    /// Sends a JSON `POST` to `path` below the API base.
    ///
    /// Error statuses become [`Error::Status`] with the raw body. An empty
    /// success body yields an empty object.
    pub(crate) async fn post<B>(&self, path: &str, body: &B, access_token: Option<&str>) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{path}", self.inner.api_base);
        let mut request = self.http()?.post(&url).json(body);
        if let Some(token) = access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        tracing::trace!(target: TRACING_TARGET, path, status, "Backend responded");

        if status >= 400 {
            return Err(Error::Status { status, body: text });
        }
        if text.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }

        Ok(serde_json::from_str(&text)?)
    }

    fn pool(&self) -> MutexGuard<'_, Option<Client>> {
        self.inner
            .http
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
