//! Scripted HTTP transport for testing code built on [`Transport`].
//!
//! [`Transport`]: crate::transport::Transport

use crate::errors::{GitHubError, GitHubErrorKind, GitHubResult};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A canned response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Status code.
    pub status: u16,
    /// Headers, rendered into a header block in this order.
    pub headers: Vec<(String, String)>,
    /// Raw body.
    pub body: String,
}

impl MockResponse {
    /// Creates a response with an arbitrary status and raw body.
    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Creates a response with a JSON body.
    pub fn json<T: Serialize + ?Sized>(status: u16, body: &T) -> Self {
        Self::raw(status, serde_json::to_string(body).unwrap_or_default())
    }

    /// Creates a successful response with the given body.
    pub fn ok<T: Serialize + ?Sized>(body: &T) -> Self {
        Self::json(200, body)
    }

    /// Creates a 201 Created response.
    pub fn created<T: Serialize + ?Sized>(body: &T) -> Self {
        Self::json(201, body)
    }

    /// Creates a 204 No Content response.
    pub fn no_content() -> Self {
        Self::raw(204, "")
    }

    /// Creates a 401 Unauthorized response.
    pub fn unauthorized(message: &str) -> Self {
        Self::error_body(401, message)
    }

    /// Creates a 403 Forbidden response.
    pub fn forbidden(message: &str) -> Self {
        Self::error_body(403, message)
    }

    /// Creates a 404 Not Found response.
    pub fn not_found(message: &str) -> Self {
        Self::error_body(404, message)
    }

    /// Creates a 422 response whose first validation error carries `message`.
    pub fn validation_failed(message: &str) -> Self {
        Self::json(
            422,
            &serde_json::json!({
                "message": "Validation Failed",
                "errors": [{ "message": message }],
                "documentation_url": "https://docs.github.com/rest"
            }),
        )
    }

    /// Creates a 500 Internal Server Error response.
    pub fn server_error(message: &str) -> Self {
        Self::json(500, &serde_json::json!({ "message": message }))
    }

    fn error_body(status: u16, message: &str) -> Self {
        Self::json(
            status,
            &serde_json::json!({
                "message": message,
                "documentation_url": "https://docs.github.com/rest"
            }),
        )
    }

    /// Adds a header to the response.
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds the four rate limit headers.
    pub fn with_rate_limit(self, limit: i64, remaining: i64, reset: i64, used: i64) -> Self {
        self.with_header("x-ratelimit-limit", &limit.to_string())
            .with_header("x-ratelimit-remaining", &remaining.to_string())
            .with_header("x-ratelimit-reset", &reset.to_string())
            .with_header("x-ratelimit-used", &used.to_string())
    }

    /// Adds an `x-oauth-scopes` header.
    pub fn with_scopes(self, scopes: &str) -> Self {
        self.with_header("x-oauth-scopes", scopes)
    }

    fn into_http_response(self) -> HttpResponse {
        let headers = self
            .headers
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect::<Vec<_>>()
            .join("\n");

        HttpResponse {
            status: self.status,
            headers,
            body: Bytes::from(self.body),
        }
    }
}

enum MockReply {
    Response(MockResponse),
    Error(GitHubErrorKind, String),
}

#[derive(Default)]
struct MockState {
    replies: VecDeque<MockReply>,
    requests: Vec<HttpRequest>,
}

/// HTTP transport that replays queued replies in order and records requests.
///
/// Clones share the same queue and history, so a test can keep one handle
/// while a [`Transport`](crate::transport::Transport) owns another.
#[derive(Clone, Default)]
pub struct MockHttpTransport {
    inner: Arc<Mutex<MockState>>,
}

impl MockHttpTransport {
    /// Creates a mock with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    pub fn with_response(self, response: MockResponse) -> Self {
        self.push_response(response);
        self
    }

    /// Queues a transport-level failure.
    pub fn with_error(self, kind: GitHubErrorKind, message: &str) -> Self {
        self.lock()
            .replies
            .push_back(MockReply::Error(kind, message.to_string()));
        self
    }

    /// Queues a response through a shared handle.
    pub fn push_response(&self, response: MockResponse) {
        self.lock().replies.push_back(MockReply::Response(response));
    }

    /// Gets the requests made so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock().requests.clone()
    }

    /// Gets the number of requests made.
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Gets the number of replies still queued.
    pub fn pending(&self) -> usize {
        self.lock().replies.len()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> GitHubResult<HttpResponse> {
        let mut state = self.lock();
        let description = format!("{} {}", request.method, request.url);
        state.requests.push(request);

        match state.replies.pop_front() {
            Some(MockReply::Response(response)) => Ok(response.into_http_response()),
            Some(MockReply::Error(kind, message)) => Err(GitHubError::new(kind, message)),
            None => Err(GitHubError::new(
                GitHubErrorKind::Unknown,
                format!("No mock response queued for {}", description),
            )),
        }
    }
}
