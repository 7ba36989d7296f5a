//! GitHub API client facade.

use crate::auth::Credential;
use crate::config::{TransportConfig, TransportConfigBuilder};
use crate::errors::GitHubResult;
use crate::services::*;
use crate::transport::{HttpTransport, Transport};
use std::sync::Arc;
use std::time::Duration;

/// GitHub API client.
///
/// Owns one [`Transport`]; every service accessor borrows it, so rate limit
/// and scope caches are shared across services.
#[derive(Debug)]
pub struct GitHubClient {
    transport: Transport,
}

impl GitHubClient {
    /// Creates a client against the public API, anonymous when `credential`
    /// is `None`.
    pub fn new(credential: Option<Credential>) -> GitHubResult<Self> {
        Self::from_config(TransportConfig {
            credential: credential.unwrap_or_default(),
            ..TransportConfig::default()
        })
    }

    /// Creates a client from an explicit configuration.
    pub fn from_config(config: TransportConfig) -> GitHubResult<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Creates a client over a custom HTTP implementation.
    pub fn with_http(config: TransportConfig, http: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport: Transport::with_http(config, http),
        }
    }

    /// Creates a new client builder.
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }

    /// Replaces the credential used for subsequent requests.
    pub fn authenticate(&mut self, credential: Credential) -> &mut Self {
        self.transport.set_credential(credential);
        self
    }

    /// Enables or disables verbose header logging.
    pub fn set_debug(&mut self, debug: bool) -> &mut Self {
        self.transport.set_debug(debug);
        self
    }

    /// Gets the underlying transport.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    // Service accessors

    /// Gets the repositories service.
    pub fn repositories(&self) -> RepositoriesService<'_> {
        RepositoriesService::new(&self.transport)
    }

    /// Gets the pull requests service.
    pub fn pull_requests(&self) -> PullRequestsService<'_> {
        PullRequestsService::new(&self.transport)
    }

    /// Gets the issues service.
    pub fn issues(&self) -> IssuesService<'_> {
        IssuesService::new(&self.transport)
    }

    /// Gets the users service.
    pub fn users(&self) -> UsersService<'_> {
        UsersService::new(&self.transport)
    }

    /// Gets the organizations service.
    pub fn organizations(&self) -> OrganizationsService<'_> {
        OrganizationsService::new(&self.transport)
    }

    /// Gets the authorization service.
    pub fn authorization(&self) -> AuthorizationService<'_> {
        AuthorizationService::new(&self.transport)
    }
}

/// Builder for GitHubClient.
#[derive(Debug, Default)]
pub struct GitHubClientBuilder {
    config: TransportConfigBuilder,
}

impl GitHubClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.base_url(url);
        self
    }

    /// Sets the credential.
    pub fn credential(mut self, credential: Credential) -> Self {
        self.config = self.config.credential(credential);
        self
    }

    /// Sets a bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config = self.config.token(token);
        self
    }

    /// Sets the user agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config = self.config.user_agent(ua);
        self
    }

    /// Sets a request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Enables verbose header logging.
    pub fn debug(mut self, debug: bool) -> Self {
        self.config = self.config.debug(debug);
        self
    }

    /// Builds the client.
    pub fn build(self) -> GitHubResult<GitHubClient> {
        GitHubClient::from_config(self.config.build()?)
    }
}
