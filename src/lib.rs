//! # GitHub REST Client
//!
//! A thin GitHub REST v3 client with:
//! - Bearer, basic and anonymous authentication
//! - Page-number pagination that collects every item of a list endpoint
//! - Status-based error classification with GitHub's error messages
//! - Rate limit and OAuth scope tracking from response headers
//! - Repository, pull request, issue, user, organization and token helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integrations_github_rest::{Credential, GitHubClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GitHubClient::new(Some(Credential::token("ghp_xxxxxxxxxxxx")))?;
//!
//!     let repos = client.repositories().list_user_repos(Some("octocat")).await?;
//!     for repo in &repos {
//!         println!("{}", repo["full_name"]);
//!     }
//!
//!     if let Some(limit) = client.transport().rate_limit().await {
//!         println!("{} requests left", limit.remaining);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod errors;
pub mod types;

// Authentication
pub mod auth;

// Request pipeline
pub mod transport;

// Pagination handling
pub mod pagination;

// API Services
pub mod services;

// Facade
pub mod client;

// Observability
pub mod observability;

// Mocks for testing
pub mod mocks;

// Re-exports for convenience
pub use auth::Credential;
pub use client::{GitHubClient, GitHubClientBuilder};
pub use config::{TransportConfig, TransportConfigBuilder};
pub use errors::{GitHubError, GitHubErrorKind, GitHubResult};
pub use transport::Transport;
pub use types::*;
