//! Issue operations.

use crate::errors::GitHubResult;
use crate::transport::Transport;
use serde::Serialize;
use serde_json::Value;

/// Service for issue operations.
pub struct IssuesService<'a> {
    transport: &'a Transport,
}

impl<'a> IssuesService<'a> {
    /// Creates a new issues service.
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Lists every issue matching `params`.
    pub async fn all<P: Serialize + ?Sized>(
        &self,
        owner: &str,
        repo: &str,
        params: &P,
    ) -> GitHubResult<Vec<Value>> {
        self.transport
            .paginate(&format!("/repos/{}/{}/issues", owner, repo), params, None)
            .await
    }

    /// Gets an issue.
    pub async fn get(&self, owner: &str, repo: &str, number: u64) -> GitHubResult<Value> {
        self.transport
            .get(&format!("/repos/{}/{}/issues/{}", owner, repo, number))
            .await
    }

    /// Creates an issue.
    pub async fn create<B: Serialize + ?Sized>(
        &self,
        owner: &str,
        repo: &str,
        data: &B,
    ) -> GitHubResult<Value> {
        self.transport
            .post(&format!("/repos/{}/{}/issues", owner, repo), data)
            .await
    }

    /// Updates an issue.
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        data: &B,
    ) -> GitHubResult<Value> {
        self.transport
            .patch(&format!("/repos/{}/{}/issues/{}", owner, repo, number), data)
            .await
    }

    /// Closes an issue.
    pub async fn close(&self, owner: &str, repo: &str, number: u64) -> GitHubResult<Value> {
        self.update(owner, repo, number, &StateUpdate { state: "closed" })
            .await
    }

    /// Reopens an issue.
    pub async fn open(&self, owner: &str, repo: &str, number: u64) -> GitHubResult<Value> {
        self.update(owner, repo, number, &StateUpdate { state: "open" })
            .await
    }
}

#[derive(Debug, Serialize)]
struct StateUpdate {
    state: &'static str,
}
