//! User operations.

use crate::errors::GitHubResult;
use crate::transport::Transport;
use serde::Serialize;
use serde_json::Value;

/// Service for user operations.
pub struct UsersService<'a> {
    transport: &'a Transport,
}

impl<'a> UsersService<'a> {
    /// Creates a new users service.
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Gets the authenticated user.
    pub async fn me(&self) -> GitHubResult<Value> {
        self.transport.get("/user").await
    }

    /// Gets a user by username.
    pub async fn get(&self, username: &str) -> GitHubResult<Value> {
        self.transport.get(&format!("/users/{}", username)).await
    }

    /// Updates the authenticated user.
    pub async fn update<B: Serialize + ?Sized>(&self, data: &B) -> GitHubResult<Value> {
        self.transport.patch("/user", data).await
    }

    /// Lists the authenticated user's email addresses (first page only).
    pub async fn emails(&self) -> GitHubResult<Value> {
        self.transport.get("/user/emails").await
    }

    /// Lists every organization of a user, or of the authenticated user.
    pub async fn organizations(&self, username: Option<&str>) -> GitHubResult<Vec<Value>> {
        let path = match username {
            Some(username) => format!("/users/{}/orgs", username),
            None => "/user/orgs".to_string(),
        };
        self.transport.paginate(&path, &(), None).await
    }
}
