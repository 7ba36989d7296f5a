//! Pull request operations.

use crate::errors::GitHubResult;
use crate::transport::Transport;
use serde::Serialize;
use serde_json::Value;

/// Service for pull request operations.
pub struct PullRequestsService<'a> {
    transport: &'a Transport,
}

impl<'a> PullRequestsService<'a> {
    /// Creates a new pull requests service.
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Lists every pull request matching `params` (`state`, `head`, `base`, ...).
    pub async fn all<P: Serialize + ?Sized>(
        &self,
        owner: &str,
        repo: &str,
        params: &P,
    ) -> GitHubResult<Vec<Value>> {
        self.transport
            .paginate(&format!("/repos/{}/{}/pulls", owner, repo), params, None)
            .await
    }

    /// Gets a pull request.
    pub async fn get(&self, owner: &str, repo: &str, number: u64) -> GitHubResult<Value> {
        self.transport
            .get(&format!("/repos/{}/{}/pulls/{}", owner, repo, number))
            .await
    }

    /// Creates a pull request.
    pub async fn create<B: Serialize + ?Sized>(
        &self,
        owner: &str,
        repo: &str,
        data: &B,
    ) -> GitHubResult<Value> {
        self.transport
            .post(&format!("/repos/{}/{}/pulls", owner, repo), data)
            .await
    }

    /// Updates a pull request.
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        data: &B,
    ) -> GitHubResult<Value> {
        self.transport
            .patch(&format!("/repos/{}/{}/pulls/{}", owner, repo, number), data)
            .await
    }

    /// Merges a pull request. Pass `&()` to merge with the defaults.
    pub async fn merge<B: Serialize + ?Sized>(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        data: &B,
    ) -> GitHubResult<Value> {
        self.transport
            .put(
                &format!("/repos/{}/{}/pulls/{}/merge", owner, repo, number),
                data,
            )
            .await
    }

    /// Lists every file changed by a pull request.
    pub async fn files(&self, owner: &str, repo: &str, number: u64) -> GitHubResult<Vec<Value>> {
        self.transport
            .paginate(
                &format!("/repos/{}/{}/pulls/{}/files", owner, repo, number),
                &(),
                None,
            )
            .await
    }

    /// Lists every commit on a pull request.
    pub async fn commits(&self, owner: &str, repo: &str, number: u64) -> GitHubResult<Vec<Value>> {
        self.transport
            .paginate(
                &format!("/repos/{}/{}/pulls/{}/commits", owner, repo, number),
                &(),
                None,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GitHubErrorKind;
    use crate::mocks::{MockHttpTransport, MockResponse};
    use crate::services::test_support::{transport_with, urls};
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_all_with_state_filter() {
        let mock = MockHttpTransport::new()
            .with_response(MockResponse::ok(&json!([{"number": 1}, {"number": 2}])));
        let transport = transport_with(&mock);

        let pulls = PullRequestsService::new(&transport)
            .all("o", "r", &json!({"state": "open"}))
            .await
            .unwrap();

        assert_eq!(pulls.len(), 2);
        assert_eq!(
            urls(&mock),
            vec!["https://api.github.com/repos/o/r/pulls?state=open&page=1&per_page=100"]
        );
    }

    #[tokio::test]
    async fn test_merge_without_body() {
        let mock = MockHttpTransport::new()
            .with_response(MockResponse::ok(&json!({"merged": true, "sha": "abc"})));
        let transport = transport_with(&mock);

        let result = PullRequestsService::new(&transport)
            .merge("o", "r", 42, &())
            .await
            .unwrap();

        assert_eq!(result["merged"], true);
        let request = &mock.requests()[0];
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.url, "https://api.github.com/repos/o/r/pulls/42/merge");
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn test_merge_conflict_is_http_error() {
        let mock = MockHttpTransport::new()
            .with_response(MockResponse::json(405, &json!({"message": "Pull Request is not mergeable"})));
        let transport = transport_with(&mock);

        let error = PullRequestsService::new(&transport)
            .merge("o", "r", 42, &json!({"merge_method": "squash"}))
            .await
            .unwrap_err();

        assert_eq!(*error.kind(), GitHubErrorKind::Http);
        assert_eq!(error.status_code(), Some(405));
        assert_eq!(error.message(), "Pull Request is not mergeable");
    }

    #[tokio::test]
    async fn test_files_and_commits_paths() {
        let mock = MockHttpTransport::new()
            .with_response(MockResponse::ok(&json!([{"filename": "a.rs"}])))
            .with_response(MockResponse::ok(&json!([{"sha": "1"}])));
        let transport = transport_with(&mock);
        let service = PullRequestsService::new(&transport);

        service.files("o", "r", 7).await.unwrap();
        service.commits("o", "r", 7).await.unwrap();

        assert_eq!(
            urls(&mock),
            vec![
                "https://api.github.com/repos/o/r/pulls/7/files?page=1&per_page=100",
                "https://api.github.com/repos/o/r/pulls/7/commits?page=1&per_page=100",
            ]
        );
    }

    #[tokio::test]
    async fn test_create_get_update() {
        let mock = MockHttpTransport::new()
            .with_response(MockResponse::created(&json!({"number": 3})))
            .with_response(MockResponse::ok(&json!({"number": 3})))
            .with_response(MockResponse::ok(&json!({"number": 3, "title": "New"})));
        let transport = transport_with(&mock);
        let service = PullRequestsService::new(&transport);

        let data = json!({"title": "Feature", "head": "feature", "base": "main"});
        assert_eq!(service.create("o", "r", &data).await.unwrap()["number"], 3);
        service.get("o", "r", 3).await.unwrap();
        service.update("o", "r", 3, &json!({"title": "New"})).await.unwrap();

        let methods: Vec<Method> = mock.requests().into_iter().map(|r| r.method).collect();
        assert_eq!(methods, vec![Method::POST, Method::GET, Method::PATCH]);
        assert_eq!(mock.requests()[2].url, "https://api.github.com/repos/o/r/pulls/3");
    }
}
