//! Error type definitions
//!
//! Defines the main error types used throughout the cPanel client.

use thiserror::Error;

/// Reason a session-related operation could not proceed
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionErrorKind {
    /// No session is active, or login returned no session token
    #[error("No active session found.")]
    InactiveSession,

    /// Login returned a session token that is not a usable string
    #[error("Session identifier is invalid or empty.")]
    InvalidIdentifier,
}

/// Main error type for the cPanel client
#[derive(Error, Debug)]
pub enum Error {
    /// Credentials were rejected by the login endpoint
    #[error("Authentication failed. Please check your login credentials and try again.")]
    AuthenticationFailed,

    /// Session lifecycle errors
    #[error("Session error: {0}")]
    Session(SessionErrorKind),

    /// API request failed at transport level or returned an unexpected response kind
    #[error("Error during API request: {message}")]
    RequestFailed {
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// Response body could not be parsed into the expected format
    #[error("Invalid response data: {reason}")]
    InvalidResponseData { reason: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// One-time password generation errors
    #[error("OTP error: {0}")]
    Totp(String),

    /// Network/HTTP client errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration file parsing errors
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a session error for a missing or inactive session
    pub fn inactive_session() -> Self {
        Self::Session(SessionErrorKind::InactiveSession)
    }

    /// Create a session error for an unusable session identifier
    pub fn invalid_session_identifier() -> Self {
        Self::Session(SessionErrorKind::InvalidIdentifier)
    }

    /// Wrap an underlying failure as a failed request
    pub fn request_failed(source: Error) -> Self {
        Self::RequestFailed {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Wrap as a failed request unless this already is one
    pub fn into_request_failed(self) -> Self {
        match self {
            Self::RequestFailed { .. } => self,
            other => Self::request_failed(other),
        }
    }

    /// Create a failed request error for a response of the wrong kind
    pub fn unexpected_response(expected: impl AsRef<str>, actual: impl AsRef<str>) -> Self {
        Self::RequestFailed {
            message: format!(
                "Expected {} response, got {} response instead.",
                expected.as_ref(),
                actual.as_ref()
            ),
            source: None,
        }
    }

    /// Create a failed request error with a plain message
    pub fn request_failed_with(message: impl Into<String>) -> Self {
        Self::RequestFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Create an invalid response data error
    pub fn invalid_response_data(reason: impl Into<String>) -> Self {
        Self::InvalidResponseData {
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new OTP error
    pub fn totp(msg: impl Into<String>) -> Self {
        Self::Totp(msg.into())
    }

    /// Session error kind, looking through `RequestFailed` wrappers
    pub fn session_kind(&self) -> Option<SessionErrorKind> {
        match self {
            Self::Session(kind) => Some(*kind),
            Self::RequestFailed {
                source: Some(source),
                ..
            } => source.session_kind(),
            _ => None,
        }
    }

    /// Whether this error (or its wrapped cause) is a session error
    pub fn is_session_error(&self) -> bool {
        self.session_kind().is_some()
    }

    /// Whether this error (or its wrapped cause) is an authentication failure
    pub fn is_authentication_failure(&self) -> bool {
        match self {
            Self::AuthenticationFailed => true,
            Self::RequestFailed {
                source: Some(source),
                ..
            } => source.is_authentication_failure(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_creation() {
        let err = Error::config("test config error");
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.to_string(), "Configuration error: test config error");
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_session_errors() {
        let err = Error::inactive_session();
        assert_eq!(err.session_kind(), Some(SessionErrorKind::InactiveSession));
        assert_eq!(err.to_string(), "Session error: No active session found.");

        let err = Error::invalid_session_identifier();
        assert_eq!(err.session_kind(), Some(SessionErrorKind::InvalidIdentifier));
        assert!(err.to_string().contains("invalid or empty"));
    }

    #[test]
    fn test_request_failed_keeps_source() {
        let err = Error::request_failed(Error::AuthenticationFailed);
        assert!(matches!(err, Error::RequestFailed { .. }));
        assert!(err.is_authentication_failure());
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Error during API request: Authentication failed"));
    }

    #[test]
    fn test_request_failed_wraps_session_error() {
        let err = Error::request_failed(Error::inactive_session());
        assert!(err.is_session_error());
        assert!(!err.is_authentication_failure());
    }

    #[test]
    fn test_unexpected_response_error() {
        let err = Error::unexpected_response("JSON", "web");
        assert_eq!(
            err.to_string(),
            "Error during API request: Expected JSON response, got web response instead."
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn test_invalid_response_data_error() {
        let err = Error::invalid_response_data("body is not an object");
        assert!(matches!(err, Error::InvalidResponseData { .. }));
        assert!(err.to_string().contains("body is not an object"));
    }

    #[test]
    fn test_into_request_failed_wraps_once() {
        let err = Error::AuthenticationFailed.into_request_failed();
        assert!(err.is_authentication_failure());
        assert_eq!(
            err.to_string(),
            "Error during API request: Authentication failed. Please check your login credentials and try again."
        );

        let again = err.into_request_failed();
        assert!(again.is_authentication_failure());
        assert!(again.source().is_some());
        assert!(!again.to_string().contains("Error during API request: Error during"));
    }
}
