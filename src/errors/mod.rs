//! Error types for the GitHub client.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Result type alias for GitHub operations.
pub type GitHubResult<T> = Result<T, GitHubError>;

/// Message used when an error response carries no usable message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Error kinds for categorizing GitHub errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubErrorKind {
    // Configuration errors
    /// Missing authentication configuration.
    MissingAuth,
    /// Invalid base URL.
    InvalidBaseUrl,
    /// Invalid configuration.
    InvalidConfiguration,

    // Request errors
    /// Parameters or body could not be encoded.
    InvalidParameter,

    // Classified HTTP errors
    /// Bad credentials (401).
    Unauthorized,
    /// Access forbidden (403).
    Forbidden,
    /// Resource not found (404).
    NotFound,
    /// Unprocessable entity (422).
    UnprocessableEntity,
    /// Any other status >= 400.
    Http,

    // Network errors
    /// Connection failed.
    ConnectionFailed,
    /// Request timeout.
    Timeout,

    // Response errors
    /// Failed to deserialize response.
    DeserializationError,
    /// Response had a shape the caller cannot use.
    UnexpectedFormat,

    // Generic
    /// Unknown error.
    Unknown,
}

impl fmt::Display for GitHubErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAuth => write!(f, "missing_auth"),
            Self::InvalidBaseUrl => write!(f, "invalid_base_url"),
            Self::InvalidConfiguration => write!(f, "invalid_configuration"),
            Self::InvalidParameter => write!(f, "invalid_parameter"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::NotFound => write!(f, "not_found"),
            Self::UnprocessableEntity => write!(f, "unprocessable_entity"),
            Self::Http => write!(f, "http_error"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::DeserializationError => write!(f, "deserialization_error"),
            Self::UnexpectedFormat => write!(f, "unexpected_format"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// GitHub API error with detailed information.
#[derive(Error, Debug)]
pub struct GitHubError {
    /// Error kind.
    kind: GitHubErrorKind,
    /// Error message.
    message: String,
    /// HTTP status code.
    status_code: Option<u16>,
    /// Underlying cause.
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for GitHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(code) = self.status_code {
            write!(f, " (HTTP {})", code)?;
        }
        Ok(())
    }
}

impl GitHubError {
    /// Creates a new GitHub error.
    pub fn new(kind: GitHubErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            cause: None,
        }
    }

    /// Sets the HTTP status code.
    pub fn with_status(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    /// Sets the underlying cause.
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Gets the error kind.
    pub fn kind(&self) -> &GitHubErrorKind {
        &self.kind
    }

    /// Gets the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Gets the HTTP status code.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Returns true if the error came from an HTTP status >= 400.
    pub fn is_http(&self) -> bool {
        matches!(
            self.kind,
            GitHubErrorKind::Unauthorized
                | GitHubErrorKind::Forbidden
                | GitHubErrorKind::NotFound
                | GitHubErrorKind::UnprocessableEntity
                | GitHubErrorKind::Http
        )
    }

    /// Returns true if the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self.kind,
            GitHubErrorKind::ConnectionFailed | GitHubErrorKind::Timeout | GitHubErrorKind::Unknown
        )
    }

    /// Creates an error from an HTTP status code and the raw response body.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let message = extract_message(body);
        Self::new(Self::kind_from_status(status), message).with_status(status)
    }

    /// Maps HTTP status code to error kind.
    fn kind_from_status(status: u16) -> GitHubErrorKind {
        match status {
            401 => GitHubErrorKind::Unauthorized,
            403 => GitHubErrorKind::Forbidden,
            404 => GitHubErrorKind::NotFound,
            422 => GitHubErrorKind::UnprocessableEntity,
            _ => GitHubErrorKind::Http,
        }
    }

    // Convenience constructors

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::InvalidConfiguration, message)
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::InvalidParameter, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::Timeout, message)
    }

    /// Creates a deserialization error.
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::DeserializationError, message)
    }
}

/// Pulls the most specific message out of a GitHub error body.
///
/// Prefers `errors[0].message`, then the top-level `message`. Bodies that are
/// not JSON, or carry neither field, yield [`UNKNOWN_ERROR_MESSAGE`].
pub fn extract_message(body: &[u8]) -> String {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();

    let nested = parsed
        .as_ref()
        .and_then(|v| v.get("errors"))
        .and_then(|errors| errors.get(0))
        .and_then(|first| first.get("message"))
        .and_then(Value::as_str);

    let top_level = parsed
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str);

    nested
        .or(top_level)
        .unwrap_or(UNKNOWN_ERROR_MESSAGE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = GitHubError::new(GitHubErrorKind::NotFound, "Repository not found").with_status(404);

        let display = format!("{}", error);
        assert!(display.contains("not_found"));
        assert!(display.contains("Repository not found"));
        assert!(display.contains("404"));
    }

    #[test]
    fn test_from_response_not_found() {
        let error = GitHubError::from_response(404, br#"{"message":"Not Found"}"#);

        assert_eq!(*error.kind(), GitHubErrorKind::NotFound);
        assert_eq!(error.message(), "Not Found");
        assert_eq!(error.status_code(), Some(404));
        assert!(error.is_http());
    }

    #[test]
    fn test_from_response_prefers_first_validation_error() {
        let body = br#"{"message":"Validation Failed","errors":[{"message":"Validation failed"},{"message":"second"}]}"#;
        let error = GitHubError::from_response(422, body);

        assert_eq!(*error.kind(), GitHubErrorKind::UnprocessableEntity);
        assert_eq!(error.message(), "Validation failed");
        assert_eq!(error.status_code(), Some(422));
    }

    #[test]
    fn test_validation_error_without_message_falls_back_to_top_level() {
        let body = br#"{"message":"Validation Failed","errors":[{"code":"missing_field"}]}"#;
        assert_eq!(extract_message(body), "Validation Failed");
    }

    #[test]
    fn test_malformed_body_uses_fallback() {
        assert_eq!(extract_message(b"<html>bad gateway</html>"), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(extract_message(b""), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(extract_message(b"[1,2,3]"), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn test_unlisted_status_is_generic_http() {
        let error = GitHubError::from_response(502, b"");
        assert_eq!(*error.kind(), GitHubErrorKind::Http);
        assert_eq!(error.status_code(), Some(502));
        assert_eq!(error.message(), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn test_transport_errors_have_no_status() {
        let error = GitHubError::timeout("timed out");
        assert!(error.is_transport());
        assert!(!error.is_http());
        assert_eq!(error.status_code(), None);
    }
}
