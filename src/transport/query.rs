//! Query string encoding for GET parameters.

use crate::errors::{GitHubError, GitHubResult};
use serde_json::Value;

/// Form-encodes parameters into a query string (without the leading `?`).
///
/// Booleans become `1`/`0`, nulls are dropped, arrays and nested objects use
/// bracket keys (`labels[0]=bug`, `filter[state]=open`).
pub fn encode_query(params: &Value) -> GitHubResult<String> {
    let mut pairs = Vec::new();

    match params {
        Value::Null => {}
        Value::Object(map) => {
            for (key, value) in map {
                flatten(key.clone(), value, &mut pairs);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                flatten(index.to_string(), value, &mut pairs);
            }
        }
        other => {
            return Err(GitHubError::invalid_parameter(format!(
                "Query parameters must be an object, got {}",
                other
            )))
        }
    }

    serde_urlencoded::to_string(&pairs).map_err(|e| {
        GitHubError::invalid_parameter(format!("Failed to serialize parameters: {}", e))
            .with_cause(e)
    })
}

fn flatten(key: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => pairs.push((key, if *flag { "1" } else { "0" }.to_string())),
        Value::Number(number) => pairs.push((key, number.to_string())),
        Value::String(text) => pairs.push((key, text.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(format!("{}[{}]", key, index), item, pairs);
            }
        }
        Value::Object(map) => {
            for (name, item) in map {
                flatten(format!("{}[{}]", key, name), item, pairs);
            }
        }
    }
}
