//! Ordered synonym lookup for loosely shaped analysis objects.
//!
//! The analysis service has shipped several field names for the same
//! concept over time. Each concept gets one ordered key list here and every
//! reader resolves through [`first_present`].

use serde_json::Value;

/// Law title keys, most specific last
pub const LAW_TITLE: &[&str] = &["title", "name", "law_name"];
/// Law body keys
pub const LAW_CONTENT: &[&str] = &["description", "content", "text"];
/// Decision case number keys
pub const DECISION_NUMBER: &[&str] = &["case_number", "number"];
/// Decision date keys
pub const DECISION_DATE: &[&str] = &["date", "decision_date"];
/// Decision body keys
pub const DECISION_SUMMARY: &[&str] = &["summary", "content", "text", "description"];
/// Decision court keys
pub const DECISION_COURT: &[&str] = &["court"];
/// External link keys, shared by laws and decisions
pub const LINK: &[&str] = &["url", "link"];

/// Return the first key in `keys` whose value is a usable scalar.
///
/// Strings count when non-empty, numbers are rendered in their JSON form.
/// Nulls, booleans, arrays and objects are skipped so the next synonym gets
/// a chance.
pub fn first_present(value: &Value, keys: &[&str]) -> Option<String> {
    let object = value.as_object()?;
    keys.iter().find_map(|key| match object.get(*key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Like [`first_present`] but falls back to a fixed placeholder.
pub fn first_present_or(value: &Value, keys: &[&str], placeholder: &str) -> String {
    first_present(value, keys).unwrap_or_else(|| placeholder.to_string())
}
