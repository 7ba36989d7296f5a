//! Configuration types for the GitHub transport.

use crate::auth::Credential;
use crate::errors::{GitHubError, GitHubErrorKind};
use std::time::Duration;

/// Default GitHub API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Versioned JSON media type sent as `Accept`.
pub const DEFAULT_ACCEPT: &str = "application/vnd.github.v3+json";

/// Default User-Agent header.
pub const DEFAULT_USER_AGENT: &str = "integrations-github-rest/0.1.0";

/// Page size used by pagination when the caller does not pick one.
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Transport configuration.
///
/// No request timeout is set by default: a request waits for whatever the
/// underlying HTTP client and the OS enforce. Set
/// [`TransportConfigBuilder::timeout`] to bound it.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// API base URL, without a trailing slash.
    pub base_url: String,
    /// `Accept` header value.
    pub accept: String,
    /// User-Agent header.
    pub user_agent: String,
    /// Credential used for the `Authorization` header.
    pub credential: Credential,
    /// Optional request timeout.
    pub timeout: Option<Duration>,
    /// Log full request/response headers at debug level.
    pub debug: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            credential: Credential::None,
            timeout: None,
            debug: false,
        }
    }
}

impl TransportConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> TransportConfigBuilder {
        TransportConfigBuilder::new()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), GitHubError> {
        if self.base_url.is_empty() {
            return Err(GitHubError::new(
                GitHubErrorKind::InvalidBaseUrl,
                "Base URL cannot be empty",
            ));
        }

        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            GitHubError::new(
                GitHubErrorKind::InvalidBaseUrl,
                format!("Invalid base URL {}: {}", self.base_url, e),
            )
            .with_cause(e)
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(GitHubError::new(
                GitHubErrorKind::InvalidBaseUrl,
                "Base URL must start with http:// or https://",
            ));
        }

        if self.user_agent.is_empty() {
            return Err(GitHubError::configuration("User-Agent is required by GitHub API"));
        }

        Ok(())
    }
}

/// Builder for TransportConfig.
#[derive(Debug, Default)]
pub struct TransportConfigBuilder {
    base_url: Option<String>,
    accept: Option<String>,
    user_agent: Option<String>,
    credential: Option<Credential>,
    timeout: Option<Duration>,
    debug: bool,
}

impl TransportConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the `Accept` header.
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the credential.
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Sets a personal access token.
    pub fn token(self, token: impl Into<String>) -> Self {
        self.credential(Credential::token(token))
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enables verbose request logging.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> Result<TransportConfig, GitHubError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let config = TransportConfig {
            base_url,
            accept: self.accept.unwrap_or_else(|| DEFAULT_ACCEPT.to_string()),
            user_agent: self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            credential: self.credential.unwrap_or_default(),
            timeout: self.timeout,
            debug: self.debug,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransportConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.accept, DEFAULT_ACCEPT);
        assert!(config.credential.is_anonymous());
        assert!(config.timeout.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn test_config_builder() {
        let config = TransportConfig::builder()
            .base_url("https://github.example.com/api/v3/")
            .user_agent("test-client/1.0")
            .token("ghp_test")
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap();

        assert_eq!(config.base_url, "https://github.example.com/api/v3");
        assert_eq!(config.user_agent, "test-client/1.0");
        assert_eq!(config.timeout, Some(Duration::from_secs(60)));
        assert_eq!(config.credential.auth_header(), "Authorization: Bearer ghp_test");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = TransportConfig::builder().base_url("invalid-url").build();
        assert_eq!(*result.unwrap_err().kind(), GitHubErrorKind::InvalidBaseUrl);

        let result = TransportConfig::builder().base_url("ftp://example.com").build();
        assert_eq!(*result.unwrap_err().kind(), GitHubErrorKind::InvalidBaseUrl);
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let result = TransportConfig::builder().user_agent("").build();
        assert_eq!(*result.unwrap_err().kind(), GitHubErrorKind::InvalidConfiguration);
    }
}
