//! JSON Parsing Utilities
//!
//! Safe JSON parsing with proper error handling. REST servers disagree on
//! whether integers are numbers or strings, so the helpers here accept both.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;

use crate::error::{CosmosError, CosmosResult};

/// Safely parse JSON string into a type
pub fn parse_json<T: DeserializeOwned>(json_str: &str) -> CosmosResult<T> {
    serde_json::from_str(json_str)
        .map_err(|e| CosmosError::parse_error(format!("JSON parse error: {}", e)))
}

/// Parse a response body, wrapping non-JSON text as a JSON string
pub fn parse_body_lenient(body: &str) -> serde_json::Value {
    if body.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| serde_json::Value::String(body.to_string()))
}

/// Safely extract a string field from JSON object
pub fn get_json_string(value: &serde_json::Value, field: &str) -> Option<String> {
    value.get(field).and_then(|v| v.as_str()).map(|s| s.to_string())
}

/// Safely extract a u64 field from JSON object (handles both number and string)
pub fn get_json_u64(value: &serde_json::Value, field: &str) -> Option<u64> {
    value.get(field).and_then(value_as_u64)
}

fn value_as_u64(v: &serde_json::Value) -> Option<u64> {
    if let Some(n) = v.as_u64() {
        Some(n)
    } else if let Some(s) = v.as_str() {
        let s = s.trim();
        if s.starts_with("0x") || s.starts_with("0X") {
            u64::from_str_radix(s.trim_start_matches("0x").trim_start_matches("0X"), 16).ok()
        } else {
            s.parse().ok()
        }
    } else {
        None
    }
}

/// serde helper: u64 from `5` or `"5"`
pub fn u64_from_str_or_num<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    value_as_u64(&value)
        .ok_or_else(|| de::Error::custom(format!("expected unsigned integer, got {}", value)))
}

/// serde helper: String from `"200000"` or `200000`
pub fn string_from_str_or_num<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("expected string or number, got {}", other))),
    }
}

/// serde helper: treat an explicit `null` like a missing field
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
