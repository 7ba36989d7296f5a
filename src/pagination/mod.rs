//! Page-number pagination over list endpoints.

use crate::config::DEFAULT_PER_PAGE;
use crate::errors::{GitHubError, GitHubErrorKind, GitHubResult};
use crate::observability::TracingHooks;
use crate::transport::{coerce_int, to_params, Transport};
use serde::Serialize;
use serde_json::Value;

impl Transport {
    /// Fetches every page of a list endpoint and concatenates the items.
    ///
    /// Requests `page=1, 2, ...` with `per_page` defaulting to 100 (a
    /// caller-supplied `page` is overwritten, a caller-supplied `per_page` is
    /// kept). Stops on an empty page, after `max_pages` pages (when non-zero),
    /// on a page shorter than `per_page`, or after the first page when
    /// `per_page` is not a positive integer. Any failed page aborts the whole
    /// call; items gathered so far are dropped.
    pub async fn paginate<P>(
        &self,
        path: &str,
        params: &P,
        max_pages: Option<u32>,
    ) -> GitHubResult<Vec<Value>>
    where
        P: Serialize + ?Sized,
    {
        let mut params = to_params(params)?;
        let mut all_items = Vec::new();
        let mut page: u32 = 1;

        loop {
            params.insert("page".to_string(), Value::from(page));
            if params.get("per_page").map_or(true, Value::is_null) {
                params.insert("per_page".to_string(), Value::from(DEFAULT_PER_PAGE));
            }
            let per_page = params.get("per_page").map_or(0, per_page_hint);

            let response: Value = self.get_with_params(path, &params).await?;
            let items = page_items(response)?;
            TracingHooks::on_page_fetched(path, page, items.len());

            if items.is_empty() {
                break;
            }

            let count = items.len();
            all_items.extend(items);

            if matches!(max_pages, Some(max) if max > 0 && page >= max) {
                break;
            }

            if per_page <= 0 || (count as i64) < per_page {
                break;
            }

            page += 1;
        }

        Ok(all_items)
    }
}

/// Reads the `per_page` value as an integer page-size hint.
fn per_page_hint(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => coerce_int(s),
        Value::Bool(b) => i64::from(*b),
        _ => 0,
    }
}

/// Extracts the items of one page.
fn page_items(response: Value) -> GitHubResult<Vec<Value>> {
    match response {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        Value::Object(map) if map.is_empty() => Ok(Vec::new()),
        other => Err(GitHubError::new(
            GitHubErrorKind::UnexpectedFormat,
            format!(
                "Expected a JSON array page, got {}",
                match other {
                    Value::Object(_) => "an object",
                    _ => "a scalar",
                }
            ),
        )),
    }
}
