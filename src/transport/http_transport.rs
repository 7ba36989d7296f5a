//! The single-round-trip HTTP seam and its reqwest implementation.

use crate::errors::{GitHubError, GitHubErrorKind, GitHubResult};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use std::time::Duration;

/// An outgoing request, fully resolved.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL including any query string.
    pub url: String,
    /// Headers in the order they are attached.
    pub headers: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Gets the first header with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A raw response: status, header block and body bytes.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Header block, one `name: value` line per header.
    pub headers: String,
    /// Body bytes.
    pub body: Bytes,
}

/// Performs exactly one HTTP round trip.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the request and returns the raw response, whatever its status.
    async fn send(&self, request: HttpRequest) -> GitHubResult<HttpResponse>;
}

/// HTTP transport implementation using reqwest.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a new transport, optionally bounded by a request timeout.
    ///
    /// Redirects are not followed; a 3xx response is returned as received.
    pub fn new(timeout: Option<Duration>) -> GitHubResult<Self> {
        let mut builder = Client::builder().redirect(Policy::none());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            GitHubError::new(
                GitHubErrorKind::InvalidConfiguration,
                format!("Failed to create HTTP client: {}", e),
            )
            .with_cause(e)
        })?;

        Ok(Self { client })
    }

    /// Wraps an existing reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> GitHubResult<HttpResponse> {
        let mut builder = self.client.request(request.method, &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_send_error)?;
        let status = response.status().as_u16();
        let headers = render_header_block(response.headers());
        let body = response.bytes().await.map_err(map_send_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Renders response headers as `name: value` lines.
pub fn render_header_block(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            format!(
                "{}: {}",
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn map_send_error(e: reqwest::Error) -> GitHubError {
    if e.is_timeout() {
        GitHubError::timeout(format!("Request timed out: {}", e)).with_cause(e)
    } else if e.is_connect() {
        GitHubError::new(
            GitHubErrorKind::ConnectionFailed,
            format!("Connection failed: {}", e),
        )
        .with_cause(e)
    } else {
        GitHubError::new(GitHubErrorKind::Unknown, format!("Request failed: {}", e)).with_cause(e)
    }
}
