//! Token scope checks and token introspection.

use crate::errors::GitHubResult;
use crate::transport::Transport;
use serde::Serialize;
use serde_json::Value;

/// OAuth scopes needed for common actions.
pub const SCOPE_REQUIREMENTS: &[(&str, &[&str])] = &[
    ("create_repo", &["repo"]),
    ("delete_repo", &["delete_repo"]),
    ("create_gist", &["gist"]),
    ("manage_org", &["admin:org"]),
    ("manage_webhooks", &["admin:repo_hook", "admin:org_hook"]),
    ("manage_deployments", &["repo_deployment"]),
    ("manage_gpg_keys", &["admin:gpg_key"]),
    ("manage_ssh_keys", &["admin:public_key"]),
    ("access_notifications", &["notifications"]),
    ("manage_workflow", &["workflow"]),
    ("manage_packages", &["write:packages", "read:packages"]),
    ("access_user_email", &["user:email"]),
    ("follow_users", &["user:follow"]),
];

/// Gets the scopes an action needs. Unknown actions need none.
pub fn required_scopes(action: &str) -> &'static [&'static str] {
    SCOPE_REQUIREMENTS
        .iter()
        .find(|(name, _)| *name == action)
        .map(|(_, scopes)| *scopes)
        .unwrap_or(&[])
}

/// Service for authorization checks.
///
/// Scope checks read the transport's scope cache, fetching `/user` once if
/// it is empty.
pub struct AuthorizationService<'a> {
    transport: &'a Transport,
}

impl<'a> AuthorizationService<'a> {
    /// Creates a new authorization service.
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Gets the token scopes.
    pub async fn get_scopes(&self) -> GitHubResult<Vec<String>> {
        self.transport.token_scopes().await
    }

    /// Checks for a single scope.
    pub async fn has_scope(&self, scope: &str) -> GitHubResult<bool> {
        self.transport.has_scope(scope).await
    }

    /// Checks that every scope is granted. Vacuously true for an empty list.
    pub async fn has_all_scopes(&self, scopes: &[&str]) -> GitHubResult<bool> {
        let granted = self.get_scopes().await?;
        Ok(scopes.iter().all(|scope| contains(&granted, scope)))
    }

    /// Checks that at least one scope is granted.
    pub async fn has_any_scope(&self, scopes: &[&str]) -> GitHubResult<bool> {
        let granted = self.get_scopes().await?;
        Ok(scopes.iter().any(|scope| contains(&granted, scope)))
    }

    /// Gets the required scopes that are not granted, in the given order.
    pub async fn get_missing_scopes(&self, required: &[&str]) -> GitHubResult<Vec<String>> {
        let granted = self.get_scopes().await?;
        Ok(required
            .iter()
            .filter(|scope| !contains(&granted, scope))
            .map(|scope| scope.to_string())
            .collect())
    }

    /// Checks whether the token carries every scope an action needs.
    pub async fn can_perform_action(&self, action: &str) -> GitHubResult<bool> {
        self.has_all_scopes(required_scopes(action)).await
    }

    /// Gets the rate limit status document.
    pub async fn get_rate_limit(&self) -> GitHubResult<Value> {
        self.transport.get("/rate_limit").await
    }

    /// Checks whether the credential is accepted. Any failure reads as `false`.
    pub async fn is_token_valid(&self) -> bool {
        self.transport.get::<Value>("/user").await.is_ok()
    }

    /// Gets information about an OAuth token issued to an application.
    pub async fn get_oauth_app_info(&self, client_id: &str, token: &str) -> GitHubResult<Value> {
        self.transport
            .get_with_params(
                &format!("/applications/{}/token", client_id),
                &TokenQuery {
                    access_token: token,
                },
            )
            .await
    }
}

#[derive(Serialize)]
struct TokenQuery<'a> {
    access_token: &'a str,
}

fn contains(granted: &[String], scope: &str) -> bool {
    granted.iter().any(|s| s == scope)
}
