//! Serde helpers for upstream payloads that are loose about types.
//!
//! Use together with `#[serde(default)]` so that absent fields and explicit
//! `null`s both end up as empty strings.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept a string, number or bool; anything else (including `null`) is "".
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// A string field where `null` means empty.
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Posting {
        #[serde(default, deserialize_with = "string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "null_as_empty")]
        title: String,
    }

    #[test]
    fn test_numeric_id() {
        let p: Posting = serde_json::from_str(r#"{"id": 42, "title": "Engineer"}"#).unwrap();
        assert_eq!(p.id, "42");
        assert_eq!(p.title, "Engineer");
    }

    #[test]
    fn test_null_and_missing() {
        let p: Posting = serde_json::from_str(r#"{"title": null}"#).unwrap();
        assert_eq!(p.id, "");
        assert_eq!(p.title, "");
    }
}
