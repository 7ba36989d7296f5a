//! Structured logging for GitHub API operations.

use crate::types::RateLimitInfo;
use std::time::Duration;
use tracing::{debug, error, info};

/// Tracing hooks for GitHub API operations.
pub struct TracingHooks;

impl TracingHooks {
    /// Logs the start of an API request.
    pub fn on_request_start(method: &str, url: &str) {
        debug!(
            method = %method,
            url = %url,
            "GitHub API request started"
        );
    }

    /// Logs request headers, redacting sensitive values.
    pub fn on_request_headers(method: &str, url: &str, headers: &[(String, String)]) {
        for (name, value) in headers {
            debug!(
                method = %method,
                url = %url,
                header = %name,
                value = %redact_header(name, value),
                "GitHub API request header"
            );
        }
    }

    /// Logs the completion of an API request.
    pub fn on_request_complete(method: &str, url: &str, status: u16, duration: Duration) {
        info!(
            method = %method,
            url = %url,
            status = status,
            duration_ms = duration.as_millis() as u64,
            "GitHub API request completed"
        );
    }

    /// Logs the raw response header block.
    pub fn on_response_headers(url: &str, header_block: &str) {
        debug!(
            url = %url,
            headers = %header_block,
            "GitHub API response headers"
        );
    }

    /// Logs a request error.
    pub fn on_request_error(method: &str, url: &str, error: &str) {
        error!(
            method = %method,
            url = %url,
            error = %error,
            "GitHub API request failed"
        );
    }

    /// Logs rate limit info.
    pub fn on_rate_limit_update(info: &RateLimitInfo) {
        debug!(
            limit = info.limit,
            remaining = info.remaining,
            reset = info.reset,
            used = info.used,
            "Rate limit updated"
        );
    }

    /// Logs a token scope update.
    pub fn on_scopes_update(scopes: &[String]) {
        debug!(scopes = %scopes.join(","), "Token scopes updated");
    }

    /// Logs one fetched page during pagination.
    pub fn on_page_fetched(path: &str, page: u32, items: usize) {
        debug!(
            path = %path,
            page = page,
            items = items,
            "Fetched page"
        );
    }
}

/// Sensitive headers that should be redacted in logs.
pub const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "x-github-token",
    "x-access-token",
    "cookie",
    "set-cookie",
];

/// Redacts sensitive values in headers.
pub fn redact_header(name: &str, value: &str) -> String {
    if SENSITIVE_HEADERS.contains(&name.to_lowercase().as_str()) {
        "[REDACTED]".to_string()
    } else {
        value.to_string()
    }
}
