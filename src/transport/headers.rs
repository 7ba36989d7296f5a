//! Response header block parsing.

use crate::types::RateLimitInfo;
use std::collections::HashMap;

/// Metadata recognised in a response header block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMetadata {
    /// Present when `x-ratelimit-limit` was sent.
    pub rate_limit: Option<RateLimitInfo>,
    /// Present when `x-oauth-scopes` was sent (possibly empty).
    pub scopes: Option<Vec<String>>,
}

/// Splits a `name: value` line on its first colon, trimming both halves.
pub fn split_header_line(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    Some((name.trim(), value.trim()))
}

/// Parses a raw header block.
///
/// Keys are compared lowercase. A later duplicate key wins.
pub fn parse_headers(header_block: &str) -> HeaderMetadata {
    let headers: HashMap<String, &str> = header_block
        .lines()
        .filter_map(split_header_line)
        .map(|(name, value)| (name.to_ascii_lowercase(), value))
        .collect();

    let field = |name: &str| headers.get(name).copied().map(coerce_int).unwrap_or(0);

    let rate_limit = headers.contains_key("x-ratelimit-limit").then(|| RateLimitInfo {
        limit: field("x-ratelimit-limit"),
        remaining: field("x-ratelimit-remaining"),
        reset: field("x-ratelimit-reset"),
        used: field("x-ratelimit-used"),
    });

    let scopes = headers.get("x-oauth-scopes").map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|scope| !scope.is_empty())
            .map(String::from)
            .collect()
    });

    HeaderMetadata { rate_limit, scopes }
}

/// Converts a header value to an integer with truncating semantics.
///
/// Leading whitespace and one sign are accepted, then the longest run of
/// ASCII digits is read; anything after it is ignored. No digits yields 0,
/// overflow saturates.
pub fn coerce_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
        });

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_rate_limit() {
        let block = "HTTP/2 200\n\
                     x-ratelimit-limit: 5000\n\
                     x-ratelimit-remaining: 4999\n\
                     x-ratelimit-reset: 1700000000\n\
                     x-ratelimit-used: 1";

        let metadata = parse_headers(block);
        assert_eq!(
            metadata.rate_limit,
            Some(RateLimitInfo {
                limit: 5000,
                remaining: 4999,
                reset: 1_700_000_000,
                used: 1,
            })
        );
        assert_eq!(metadata.scopes, None);
    }

    #[test]
    fn test_rate_limit_keys_are_case_insensitive() {
        let block = "X-RateLimit-Limit: 60\r\nX-RateLimit-Remaining: 59\r\n";
        let info = parse_headers(block).rate_limit.unwrap();
        assert_eq!(info.limit, 60);
        assert_eq!(info.remaining, 59);
        assert_eq!(info.reset, 0);
        assert_eq!(info.used, 0);
    }

    #[test]
    fn test_parse_scopes() {
        let metadata = parse_headers("x-oauth-scopes: repo, gist ,  ");
        assert_eq!(
            metadata.scopes,
            Some(vec!["repo".to_string(), "gist".to_string()])
        );
    }

    #[test]
    fn test_empty_scope_header_is_present_but_empty() {
        let metadata = parse_headers("x-oauth-scopes: ");
        assert_eq!(metadata.scopes, Some(Vec::new()));
    }

    #[test]
    fn test_value_split_on_first_colon_only() {
        assert_eq!(
            split_header_line("link: <https://api.github.com/x?page=2>; rel=\"next\""),
            Some(("link", "<https://api.github.com/x?page=2>; rel=\"next\""))
        );
        assert_eq!(split_header_line("HTTP/1.1 200 OK"), None);
    }

    #[test]
    fn test_coerce_int() {
        assert_eq!(coerce_int("5000"), 5000);
        assert_eq!(coerce_int("  42abc"), 42);
        assert_eq!(coerce_int("-7"), -7);
        assert_eq!(coerce_int("abc"), 0);
        assert_eq!(coerce_int(""), 0);
        assert_eq!(coerce_int("99999999999999999999999"), i64::MAX);
    }
}
