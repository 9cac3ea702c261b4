use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a field that can be either a single item or a vector, but can also be null/missing
pub fn single_or_vec_or_null<'de, T, D>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SingleOrVecOrNull<T> {
        Null,
        Multiple(Vec<T>),
        Single(T),
    }

    match Option::<SingleOrVecOrNull<T>>::deserialize(deserializer)? {
        None | Some(SingleOrVecOrNull::Null) => Ok(Vec::new()),
        Some(SingleOrVecOrNull::Single(val)) => Ok(vec![val]),
        Some(SingleOrVecOrNull::Multiple(vec)) => Ok(vec),
    }
}

/// Deserialize an identifier that may arrive as a JSON string or number
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        _ => Ok(None),
    }
}

/// Deserialize a text field leniently: strings pass through, other
/// non-null values keep their JSON text instead of failing the response
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Ok(Some(other.to_string())),
    }
}

/// Deserialize a flag that some backends send as a string
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => Ok(b),
        Some(Value::String(s)) => Ok(matches!(s.to_lowercase().as_str(), "true" | "1" | "yes")),
        Some(Value::Number(n)) => Ok(n.as_i64().map(|v| v != 0).unwrap_or(false)),
        _ => Ok(false),
    }
}

/// Deserialize a nested object, treating any other JSON value as absent
pub fn object_or_none<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: DeserializeOwned,
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}
