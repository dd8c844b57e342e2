//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── bot_token                # Telegram bot API token
//! └── backend: ReqwestConfig   # Styling backend URL, timeout, secret
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

use std::process;

use anyhow::{Context, bail};
use clap::Parser;
use gothyxan_reqwest::ReqwestConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Clone, Parser)]
#[command(name = "gothyxan-bot")]
#[command(about = "Telegram front-end for the gothyxan outfit stylist")]
#[command(version)]
pub struct Cli {
    /// Telegram bot API token.
    #[arg(long = "bot-token", env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub bot_token: String,

    /// Styling backend configuration.
    #[clap(flatten)]
    pub backend: ReqwestConfig,
}

impl std::fmt::Debug for Cli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cli")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Returns the bot token with surrounding whitespace removed.
    pub fn bot_token(&self) -> &str {
        self.bot_token.trim()
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bot_token().is_empty() {
            bail!("TELEGRAM_BOT_TOKEN is required");
        }

        self.backend
            .validate()
            .context("invalid backend configuration")?;
        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            backend_url = %self.backend.backend_url.trim(),
            backend_timeout_secs = self.backend.effective_timeout().as_secs(),
            bot_secret = self.backend.effective_bot_secret().is_some(),
            user_agent = %self.backend.effective_user_agent(),
            "Backend configuration"
        );
    }

    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
