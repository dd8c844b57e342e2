//! Structured error handling for session and backend operations.

use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur in gothyxan operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// A user directive failed validation.
    InvalidInput,
    /// The backend answered with a non-auth error status.
    Backend,
    /// The backend rejected the access token (401 or 403).
    Authentication,
    /// The backend rejected the token again after a refresh.
    AuthExhausted,
    /// Connection-level failure.
    NetworkError,
    /// The request did not finish within the configured timeout.
    Timeout,
    /// A response body could not be (de)serialized.
    Serialization,
    /// Requested chat state does not exist.
    NotFound,
    /// Invalid startup configuration.
    Configuration,
    /// Unknown error occurred.
    #[default]
    Unknown,
}

impl ErrorKind {
    /// Returns true for connection, timeout and malformed-body failures.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::Timeout | Self::Serialization
        )
    }
}

/// Structured error type with classification and backend status tracking.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}{}",
    status.map(|s| format!(" status {s}")).unwrap_or_default(),
    message.as_ref().map(|m| format!(": {m}")).unwrap_or_default()
)]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message. For backend errors this is the raw response body.
    pub message: Option<String>,
    /// HTTP status code returned by the backend, if any.
    pub status: Option<u16>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            status: None,
            source: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self::new(kind).with_source(source)
    }

    /// Creates an error for a failed backend response.
    ///
    /// Statuses 401 and 403 classify as [`ErrorKind::Authentication`].
    pub fn backend(status: u16, body: impl Into<String>) -> Self {
        let kind = match status {
            401 | 403 => ErrorKind::Authentication,
            _ => ErrorKind::Backend,
        };

        Self {
            kind,
            message: Some(body.into()),
            status: Some(status),
            source: None,
        }
    }

    /// Creates a new invalid input error with a user-facing message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput).with_message(message)
    }

    /// Creates a new network error.
    pub fn network_error() -> Self {
        Self::new(ErrorKind::NetworkError)
    }

    /// Creates a new timeout error.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    /// Creates a new serialization error.
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// Creates a new not found error.
    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns true if the backend rejected the access token.
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Authentication)
    }

    /// Returns true if this is a connection, timeout or malformed-body failure.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        self.kind.is_transport()
    }

    /// Returns true if this error should be shown to the user verbatim.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidInput)
    }

    /// Converts an authentication error into [`ErrorKind::AuthExhausted`].
    ///
    /// Other kinds are returned unchanged.
    pub fn into_exhausted(mut self) -> Self {
        if self.is_auth_error() {
            self.kind = ErrorKind::AuthExhausted;
        }
        self
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::from_source(ErrorKind::Serialization, error).with_message("Malformed JSON payload")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_error_new() {
        let error = Error::new(ErrorKind::Unknown);
        assert_eq!(error.kind, ErrorKind::Unknown);
        assert!(error.message.is_none());
        assert!(error.status.is_none());
        assert!(error.source.is_none());
    }

    #[test]
    fn test_backend_classification() {
        assert!(Error::backend(401, "expired").is_auth_error());
        assert!(Error::backend(403, "forbidden").is_auth_error());

        let error = Error::backend(500, "boom");
        assert_eq!(error.kind, ErrorKind::Backend);
        assert_eq!(error.status, Some(500));
        assert_eq!(error.message.as_deref(), Some("boom"));
        assert!(!error.is_auth_error());
    }

    #[test]
    fn test_error_display() {
        let error = Error::backend(502, "bad gateway");
        let display = error.to_string();
        assert!(display.contains("backend"));
        assert!(display.contains("502"));
        assert!(display.contains("bad gateway"));

        let error = Error::invalid_input("Budget values must be numbers");
        assert_eq!(
            error.to_string(),
            "[invalid_input]: Budget values must be numbers"
        );
    }

    #[test]
    fn test_into_exhausted() {
        let error = Error::backend(401, "still expired").into_exhausted();
        assert_eq!(error.kind, ErrorKind::AuthExhausted);
        assert_eq!(error.status, Some(401));

        let error = Error::timeout().into_exhausted();
        assert_eq!(error.kind, ErrorKind::Timeout);
    }

    #[test]
    fn test_transport_kinds() {
        assert!(Error::network_error().is_transport());
        assert!(Error::timeout().is_transport());
        assert!(Error::serialization().is_transport());
        assert!(!Error::backend(500, "").is_transport());
        assert!(!Error::invalid_input("x").is_transport());
    }

    #[test]
    fn test_from_serde() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = Error::from(source);
        assert_eq!(error.kind, ErrorKind::Serialization);
        assert!(error.source.is_some());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            ErrorKind::from_str("auth_exhausted").unwrap(),
            ErrorKind::AuthExhausted
        );
        assert_eq!(ErrorKind::from_str("timeout").unwrap(), ErrorKind::Timeout);
        assert!(ErrorKind::from_str("invalid").is_err());
    }
}
