//! Recovering JSON from free-form model text.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::error::ParseError;

/// Largest bracketed span: first `[` through last `]`, across lines.
static JSON_ARRAY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("Invalid JSON array regex"));

/// Parse model output that should be a JSON array.
///
/// The whole text is tried first and returned as-is on success, array or not.
/// Failing that, the widest `[...]` span is tried, which recovers arrays
/// wrapped in prose or markdown fences.
pub fn parse_json_array(raw: &str) -> Result<Value, ParseError> {
    if let Ok(value) = serde_json::from_str::<Value>(raw.trim()) {
        return Ok(value);
    }

    JSON_ARRAY_REGEX
        .find(raw)
        .and_then(|m| serde_json::from_str::<Value>(m.as_str()).ok())
        .ok_or_else(|| ParseError {
            raw: raw.to_string(),
        })
}
