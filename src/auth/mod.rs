//! Authentication mechanisms for GitHub API.

use crate::errors::{GitHubError, GitHubErrorKind, GitHubResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use secrecy::{ExposeSecret, SecretString};

/// Environment variable read by [`Credential::from_env`].
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Credential attached to every request as an `Authorization` header.
#[derive(Debug, Clone, Default)]
pub enum Credential {
    /// Anonymous access; no header is sent.
    #[default]
    None,
    /// HTTP basic authentication (username + password).
    Basic {
        /// Username.
        username: String,
        /// Password.
        password: SecretString,
    },
    /// Bearer token (personal access token or OAuth token).
    Bearer(SecretString),
}

impl Credential {
    /// Creates an anonymous credential.
    pub fn none() -> Self {
        Self::None
    }

    /// Creates a personal access token credential.
    pub fn token(token: impl Into<String>) -> Self {
        Self::Bearer(SecretString::new(token.into()))
    }

    /// Creates an OAuth access token credential.
    ///
    /// GitHub treats OAuth tokens and personal access tokens identically on
    /// the wire, so this is the same bearer header as [`Credential::token`].
    pub fn oauth(token: impl Into<String>) -> Self {
        Self::token(token)
    }

    /// Creates a basic authentication credential.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }

    /// Reads a token credential from `GITHUB_TOKEN`.
    pub fn from_env() -> GitHubResult<Self> {
        Self::from_env_var(GITHUB_TOKEN_VAR)
    }

    /// Reads a token credential from a custom environment variable.
    pub fn from_env_var(var_name: &str) -> GitHubResult<Self> {
        std::env::var(var_name).map(Self::token).map_err(|_| {
            GitHubError::new(
                GitHubErrorKind::MissingAuth,
                format!("Environment variable {} not set", var_name),
            )
        })
    }

    /// Produces the full header line, e.g. `Authorization: Bearer <token>`.
    ///
    /// Returns an empty string for [`Credential::None`].
    pub fn auth_header(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::Basic { username, password } => {
                let raw = format!("{}:{}", username, password.expose_secret());
                format!("Authorization: Basic {}", STANDARD.encode(raw))
            }
            Self::Bearer(token) => format!("Authorization: Bearer {}", token.expose_secret()),
        }
    }

    /// Returns true if no header will be sent.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Gets a redacted label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "anonymous",
            Self::Basic { .. } => "basic",
            Self::Bearer(token) => {
                let exposed = token.expose_secret();
                if exposed.starts_with("ghp_") {
                    "ghp_***"
                } else if exposed.starts_with("github_pat_") {
                    "github_pat_***"
                } else if exposed.starts_with("gho_") {
                    "gho_***"
                } else {
                    "***"
                }
            }
        }
    }
}
