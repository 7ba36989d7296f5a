//! Shared data types.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Query parameters or request body: a JSON object of string keys.
pub type Params = serde_json::Map<String, serde_json::Value>;

/// Rate limit state derived from `x-ratelimit-*` response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RateLimitInfo {
    /// Maximum requests allowed in the window.
    pub limit: i64,
    /// Remaining requests in the current window.
    pub remaining: i64,
    /// Window reset time, epoch seconds.
    pub reset: i64,
    /// Requests used in the current window.
    pub used: i64,
}

impl RateLimitInfo {
    /// Gets the reset time as a UTC timestamp.
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.reset, 0)
    }
}

/// The most recent raw response seen by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastResponse {
    /// HTTP status code.
    pub status: u16,
    /// Header block, one `name: value` line per header.
    pub headers: String,
    /// Raw body.
    pub body: Bytes,
}

impl LastResponse {
    /// Gets the body as UTF-8 text, replacing invalid sequences.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
