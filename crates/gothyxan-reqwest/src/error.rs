//! Internal error types for gothyxan-reqwest.

use thiserror::Error;

/// Result type alias for gothyxan-reqwest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for gothyxan-reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The backend answered with an error status.
    #[error("Backend {status}: {body}")]
    Status { status: u16, body: String },
    /// Configuration errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<Error> for gothyxan_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    gothyxan_core::Error::timeout()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if e.is_connect() {
                    gothyxan_core::Error::network_error()
                        .with_message("Connection failed")
                        .with_source(e)
                } else if e.is_decode() {
                    gothyxan_core::Error::serialization()
                        .with_message(e.to_string())
                        .with_source(e)
                } else {
                    gothyxan_core::Error::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => gothyxan_core::Error::serialization()
                .with_message(e.to_string())
                .with_source(e),
            Error::Status { status, body } => gothyxan_core::Error::backend(status, body),
            Error::Config(message) => gothyxan_core::Error::configuration().with_message(message),
        }
    }
}
