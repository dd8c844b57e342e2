//! Backend gateway configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use url::Url;

use crate::error::{Error, Result};

/// Backend base URL used when none is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:4000";

/// Default timeout for backend requests: 10 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the reqwest backend gateway.
#[derive(Clone)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ReqwestConfig {
    /// Base URL of the styling backend (without the `/api` suffix)
    #[cfg_attr(
        feature = "config",
        arg(long = "backend-url", env = "TELEGRAM_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)
    )]
    pub backend_url: String,

    /// Request timeout in seconds, zero falls back to the default
    #[cfg_attr(
        feature = "config",
        arg(long = "backend-timeout", env = "TELEGRAM_BACKEND_TIMEOUT", default_value_t = 10)
    )]
    pub backend_timeout: u64,

    /// Shared secret sent with Telegram logins
    #[cfg_attr(
        feature = "config",
        arg(long = "backend-bot-secret", env = "TELEGRAM_BACKEND_BOT_SECRET", hide_env_values = true)
    )]
    pub bot_secret: Option<String>,

    /// User-Agent header sent with every request
    #[cfg_attr(
        feature = "config",
        arg(long = "backend-user-agent", env = "TELEGRAM_BACKEND_USER_AGENT")
    )]
    pub user_agent: Option<String>,
}

impl std::fmt::Debug for ReqwestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestConfig")
            .field("backend_url", &self.backend_url)
            .field("backend_timeout", &self.backend_timeout)
            .field("bot_secret", &self.bot_secret.as_ref().map(|_| "***"))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for ReqwestConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_owned(),
            backend_timeout: DEFAULT_TIMEOUT.as_secs(),
            bot_secret: None,
            user_agent: None,
        }
    }
}

impl ReqwestConfig {
    /// Creates a configuration pointing at `backend_url`.
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.backend_timeout = timeout.as_secs();
        self
    }

    /// Set the login bot secret.
    #[must_use]
    pub fn with_bot_secret(mut self, secret: impl Into<String>) -> Self {
        self.bot_secret = Some(secret.into());
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Checks that the backend URL is a usable http(s) URL.
    pub fn validate(&self) -> Result<()> {
        self.api_base().map(|_| ())
    }

    /// Returns the `/api` base every endpoint path is appended to.
    ///
    /// The configured URL is trimmed and its trailing slashes removed.
    pub fn api_base(&self) -> Result<String> {
        let trimmed = self.backend_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(Error::invalid_config("backend URL is empty"));
        }

        let url = Url::parse(trimmed)
            .map_err(|e| Error::invalid_config(format!("invalid backend URL '{trimmed}': {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(format!(
                "backend URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        Ok(format!("{trimmed}/api"))
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        match self.backend_timeout {
            0 => DEFAULT_TIMEOUT,
            secs => Duration::from_secs(secs),
        }
    }

    /// Returns the bot secret, treating a blank value as absent.
    pub fn effective_bot_secret(&self) -> Option<&str> {
        self.bot_secret
            .as_deref()
            .map(str::trim)
            .filter(|secret| !secret.is_empty())
    }

    /// Returns the effective user agent, using default if empty.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .as_deref()
            .map(str::trim)
            .filter(|agent| !agent.is_empty())
            .map_or_else(Self::default_user_agent, str::to_owned)
    }

    fn default_user_agent() -> String {
        format!("gothyxan/{}", env!("CARGO_PKG_VERSION"))
    }
}
