//! Repository operations.

use crate::errors::GitHubResult;
use crate::transport::Transport;
use serde::Serialize;
use serde_json::Value;

/// Service for repository operations.
pub struct RepositoriesService<'a> {
    transport: &'a Transport,
}

impl<'a> RepositoriesService<'a> {
    /// Creates a new repositories service.
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Gets a repository.
    pub async fn get(&self, owner: &str, repo: &str) -> GitHubResult<Value> {
        self.transport
            .get(&format!("/repos/{}/{}", owner, repo))
            .await
    }

    /// Lists every repository of a user, or of the authenticated user when
    /// `username` is `None`.
    pub async fn list_user_repos(&self, username: Option<&str>) -> GitHubResult<Vec<Value>> {
        let path = match username {
            Some(username) => format!("/users/{}/repos", username),
            None => "/user/repos".to_string(),
        };
        self.transport.paginate(&path, &(), None).await
    }

    /// Creates a repository for the authenticated user.
    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> GitHubResult<Value> {
        self.transport.post("/user/repos", data).await
    }

    /// Updates a repository.
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        owner: &str,
        repo: &str,
        data: &B,
    ) -> GitHubResult<Value> {
        self.transport
            .patch(&format!("/repos/{}/{}", owner, repo), data)
            .await
    }

    /// Deletes a repository.
    pub async fn delete(&self, owner: &str, repo: &str) -> GitHubResult<Value> {
        self.transport
            .delete(&format!("/repos/{}/{}", owner, repo))
            .await
    }

    // Branches

    /// Gets a branch.
    pub async fn get_branch(&self, owner: &str, repo: &str, branch: &str) -> GitHubResult<Value> {
        self.transport
            .get(&format!("/repos/{}/{}/branches/{}", owner, repo, branch))
            .await
    }

    /// Lists every branch.
    pub async fn list_branches(&self, owner: &str, repo: &str) -> GitHubResult<Vec<Value>> {
        self.transport
            .paginate(&format!("/repos/{}/{}/branches", owner, repo), &(), None)
            .await
    }

    /// Creates a branch pointing at `sha`.
    pub async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        branch_name: &str,
        sha: &str,
    ) -> GitHubResult<Value> {
        let request = CreateRefRequest {
            git_ref: format!("refs/heads/{}", branch_name),
            sha,
        };
        self.transport
            .post(&format!("/repos/{}/{}/git/refs", owner, repo), &request)
            .await
    }

    /// Deletes a branch.
    pub async fn delete_branch(
        &self,
        owner: &str,
        repo: &str,
        branch_name: &str,
    ) -> GitHubResult<Value> {
        self.transport
            .delete(&format!(
                "/repos/{}/{}/git/refs/heads/{}",
                owner, repo, branch_name
            ))
            .await
    }

    // Commits

    /// Lists every commit matching `params` (`sha`, `path`, `author`, ...).
    pub async fn list_commits<P: Serialize + ?Sized>(
        &self,
        owner: &str,
        repo: &str,
        params: &P,
    ) -> GitHubResult<Vec<Value>> {
        self.transport
            .paginate(&format!("/repos/{}/{}/commits", owner, repo), params, None)
            .await
    }

    /// Compares two commits.
    pub async fn compare(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
    ) -> GitHubResult<Value> {
        self.transport
            .get(&format!(
                "/repos/{}/{}/compare/{}...{}",
                owner, repo, base, head
            ))
            .await
    }
}

#[derive(Debug, Serialize)]
struct CreateRefRequest<'a> {
    #[serde(rename = "ref")]
    git_ref: String,
    sha: &'a str,
}
