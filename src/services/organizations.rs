//! Organization operations.

use crate::errors::GitHubResult;
use crate::transport::Transport;
use serde_json::Value;

/// Service for organization operations.
pub struct OrganizationsService<'a> {
    transport: &'a Transport,
}

impl<'a> OrganizationsService<'a> {
    /// Creates a new organizations service.
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Gets an organization.
    pub async fn get(&self, org: &str) -> GitHubResult<Value> {
        self.transport.get(&format!("/orgs/{}", org)).await
    }

    /// Lists every repository of an organization.
    pub async fn repositories(&self, org: &str) -> GitHubResult<Vec<Value>> {
        self.list(org, "repos").await
    }

    /// Lists every member of an organization.
    pub async fn members(&self, org: &str) -> GitHubResult<Vec<Value>> {
        self.list(org, "members").await
    }

    /// Lists every team of an organization.
    pub async fn teams(&self, org: &str) -> GitHubResult<Vec<Value>> {
        self.list(org, "teams").await
    }

    async fn list(&self, org: &str, collection: &str) -> GitHubResult<Vec<Value>> {
        self.transport
            .paginate(&format!("/orgs/{}/{}", org, collection), &(), None)
            .await
    }
}
