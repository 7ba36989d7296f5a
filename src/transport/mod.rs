//! The request pipeline: one HTTP call, classified and introspected.
//!
//! [`Transport`] owns the credential, the HTTP seam and three caches that
//! are updated only inside [`Transport::request`]:
//! - the last raw response,
//! - the rate limit tuple from `x-ratelimit-*` headers,
//! - the OAuth scopes from `x-oauth-scopes`.
//!
//! The caches are sticky. A response without the relevant headers leaves
//! them untouched, and nothing clears them on credential rotation.

mod headers;
mod http_transport;
mod query;

pub use headers::{coerce_int, parse_headers, split_header_line, HeaderMetadata};
pub use http_transport::{render_header_block, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use query::encode_query;

use crate::auth::Credential;
use crate::config::TransportConfig;
use crate::errors::{GitHubError, GitHubResult};
use crate::observability::TracingHooks;
use crate::types::{LastResponse, Params, RateLimitInfo};
use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct TransportState {
    last_response: Option<LastResponse>,
    rate_limit: Option<RateLimitInfo>,
    token_scopes: Vec<String>,
}

/// GitHub REST transport.
pub struct Transport {
    http: Arc<dyn HttpTransport>,
    config: TransportConfig,
    state: RwLock<TransportState>,
}

impl Transport {
    /// Creates a transport backed by reqwest.
    pub fn new(config: TransportConfig) -> GitHubResult<Self> {
        config.validate()?;
        let http = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_http(config, Arc::new(http)))
    }

    /// Creates a transport over a custom HTTP implementation.
    pub fn with_http(config: TransportConfig, http: Arc<dyn HttpTransport>) -> Self {
        Self {
            http,
            config,
            state: RwLock::new(TransportState::default()),
        }
    }

    /// Gets the configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Gets the base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Gets the current credential.
    pub fn credential(&self) -> &Credential {
        &self.config.credential
    }

    /// Replaces the credential. Cached rate limit and scopes are kept.
    pub fn set_credential(&mut self, credential: Credential) -> &mut Self {
        self.config.credential = credential;
        self
    }

    /// Enables or disables verbose header logging.
    pub fn set_debug(&mut self, debug: bool) -> &mut Self {
        self.config.debug = debug;
        self
    }

    // HTTP methods

    /// Makes a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> GitHubResult<T> {
        self.request(Method::GET, path, &Value::Null).await
    }

    /// Makes a GET request with query parameters.
    pub async fn get_with_params<T, P>(&self, path: &str, params: &P) -> GitHubResult<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let params = to_payload(params)?;
        self.request(Method::GET, path, &params).await
    }

    /// Makes a POST request.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> GitHubResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = to_payload(body)?;
        self.request(Method::POST, path, &body).await
    }

    /// Makes a PUT request.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> GitHubResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = to_payload(body)?;
        self.request(Method::PUT, path, &body).await
    }

    /// Makes a PATCH request.
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> GitHubResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = to_payload(body)?;
        self.request(Method::PATCH, path, &body).await
    }

    /// Makes a DELETE request.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> GitHubResult<T> {
        self.request(Method::DELETE, path, &Value::Null).await
    }

    /// Performs one request and decodes the JSON body.
    ///
    /// `data` is the query for GET and the JSON body for POST/PUT/PATCH; it is
    /// ignored when empty and for DELETE. The response is recorded and its
    /// headers parsed before the status is inspected, so error responses
    /// still update the caches. An empty body decodes as `[]`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        data: &Value,
    ) -> GitHubResult<T> {
        let request = self.build_request(&method, path, data)?;
        let url = request.url.clone();

        TracingHooks::on_request_start(method.as_str(), &url);
        if self.config.debug {
            TracingHooks::on_request_headers(method.as_str(), &url, &request.headers);
        }

        let started = Instant::now();
        let response = match self.http.send(request).await {
            Ok(response) => response,
            Err(e) => {
                TracingHooks::on_request_error(method.as_str(), &url, &e.to_string());
                return Err(e);
            }
        };

        TracingHooks::on_request_complete(method.as_str(), &url, response.status, started.elapsed());
        if self.config.debug {
            TracingHooks::on_response_headers(&url, &response.headers);
        }

        self.record_response(&response).await;

        if response.status >= 400 {
            let error = GitHubError::from_response(response.status, &response.body);
            TracingHooks::on_request_error(method.as_str(), &url, &error.to_string());
            return Err(error);
        }

        decode_body(&response.body)
    }

    // Introspection

    /// Gets the rate limit seen on the most recent response that carried one.
    pub async fn rate_limit(&self) -> Option<RateLimitInfo> {
        self.state.read().await.rate_limit
    }

    /// Gets a copy of the last raw response.
    pub async fn last_response(&self) -> Option<LastResponse> {
        self.state.read().await.last_response.clone()
    }

    /// Gets the cached token scopes without touching the network.
    pub async fn cached_scopes(&self) -> Vec<String> {
        self.state.read().await.token_scopes.clone()
    }

    /// Gets the token scopes, fetching `/user` first if none are cached.
    pub async fn token_scopes(&self) -> GitHubResult<Vec<String>> {
        if self.state.read().await.token_scopes.is_empty() {
            let _: Value = self.get("/user").await?;
        }
        Ok(self.cached_scopes().await)
    }

    /// Checks whether the token carries a scope.
    pub async fn has_scope(&self, scope: &str) -> GitHubResult<bool> {
        Ok(self.token_scopes().await?.iter().any(|s| s == scope))
    }

    // Internal methods

    fn build_request(&self, method: &Method, path: &str, data: &Value) -> GitHubResult<HttpRequest> {
        let mut url = format!("{}{}", self.config.base_url, path);

        let mut headers = vec![
            (ACCEPT.to_string(), self.config.accept.clone()),
            (USER_AGENT.to_string(), self.config.user_agent.clone()),
        ];

        let auth_header = self.config.credential.auth_header();
        if let Some((name, value)) = split_header_line(&auth_header) {
            headers.push((name.to_string(), value.to_string()));
        }

        let mut body = None;
        if !is_empty_payload(data) {
            if *method == Method::GET {
                let query = encode_query(data)?;
                if !query.is_empty() {
                    url.push('?');
                    url.push_str(&query);
                }
            } else if is_body_method(method) {
                let bytes = serde_json::to_vec(data).map_err(|e| {
                    GitHubError::invalid_parameter(format!("Failed to serialize request body: {}", e))
                        .with_cause(e)
                })?;
                headers.push((CONTENT_TYPE.to_string(), "application/json".to_string()));
                body = Some(Bytes::from(bytes));
            }
        }

        Ok(HttpRequest {
            method: method.clone(),
            url,
            headers,
            body,
        })
    }

    async fn record_response(&self, response: &HttpResponse) {
        let metadata = parse_headers(&response.headers);
        let mut state = self.state.write().await;

        if let Some(info) = metadata.rate_limit {
            TracingHooks::on_rate_limit_update(&info);
            state.rate_limit = Some(info);
        }

        if let Some(scopes) = metadata.scopes {
            TracingHooks::on_scopes_update(&scopes);
            state.token_scopes = scopes;
        }

        state.last_response = Some(LastResponse {
            status: response.status,
            headers: response.headers.clone(),
            body: response.body.clone(),
        });
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.config.base_url)
            .field("credential", &self.config.credential.label())
            .finish()
    }
}

/// Converts any serializable value into a request payload.
pub(crate) fn to_payload<P: Serialize + ?Sized>(value: &P) -> GitHubResult<Value> {
    serde_json::to_value(value).map_err(|e| {
        GitHubError::invalid_parameter(format!("Failed to serialize parameters: {}", e)).with_cause(e)
    })
}

/// Converts any serializable value into a parameter map.
pub(crate) fn to_params<P: Serialize + ?Sized>(value: &P) -> GitHubResult<Params> {
    match to_payload(value)? {
        Value::Null => Ok(Params::new()),
        Value::Object(map) => Ok(map),
        other => Err(GitHubError::invalid_parameter(format!(
            "Parameters must be an object, got {}",
            other
        ))),
    }
}

fn is_empty_payload(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn is_body_method(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> GitHubResult<T> {
    let body: &[u8] = if body.is_empty() { b"[]" } else { body };
    serde_json::from_slice(body).map_err(|e| {
        GitHubError::deserialization(format!("Failed to deserialize response: {}", e)).with_cause(e)
    })
}
