//! Canonical JSON
//!
//! The amino JSON sign document is signed as compact JSON with object keys
//! sorted lexicographically (by code point) at every depth, including
//! objects nested inside arrays. Every verifying node rebuilds these exact
//! bytes, so the ordering here must never depend on insertion order.
//!
//! Strings are escaped the way Go's `encoding/json` writes them (and so
//! the Cosmos SDK's `MustSortJSON`): `<`, `>`, `&`, U+2028 and U+2029 become
//! `\u003c`, `\u003e`, `\u0026`, `\u2028` and `\u2029`.

use serde_json::{Map, Value};

use crate::error::CosmosResult;

/// Recursively sort object keys; arrays keep their order, scalars pass through
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let mut sorted = Map::new();
            for (key, inner) in entries {
                sorted.insert(key.clone(), canonicalize(inner));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        scalar => scalar.clone(),
    }
}

/// Canonicalize then serialize without whitespace
pub fn to_canonical_bytes(value: &Value) -> CosmosResult<Vec<u8>> {
    let json = serde_json::to_string(&canonicalize(value))?;
    Ok(escape_html(&json).into_bytes())
}

// These characters only ever occur inside string literals in serde_json output
fn escape_html(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sorts_nested_keys() {
        let value = json!({
            "z": 1,
            "a": {"y": true, "b": null},
            "m": [{"k2": "v", "k1": "w"}, 3, "s"]
        });

        let bytes = to_canonical_bytes(&value).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"a":{"b":null,"y":true},"m":[{"k1":"w","k2":"v"},3,"s"],"z":1}"#
        );
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(canonicalize(&Value::Null), Value::Null);
        assert_eq!(canonicalize(&json!("text")), json!("text"));
        assert_eq!(canonicalize(&json!(12.5)), json!(12.5));
        assert_eq!(canonicalize(&json!(false)), json!(false));
    }

    #[test]
    fn test_codepoint_order_not_locale() {
        // Uppercase sorts before lowercase, digits before letters
        let value = json!({"b": 1, "B": 2, "a": 3, "1": 4, "_": 5});
        let bytes = to_canonical_bytes(&value).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"1":4,"B":2,"_":5,"a":3,"b":1}"#
        );
    }

    #[test]
    fn test_array_order_preserved() {
        let value = json!([3, 1, 2]);
        assert_eq!(canonicalize(&value), json!([3, 1, 2]));
    }

    #[test]
    fn test_idempotent() {
        let value = json!({"fee": {"gas": "1", "amount": [{"denom": "x", "amount": "1"}]}});
        let once = canonicalize(&value);
        assert_eq!(canonicalize(&once), once);
    }

    #[test]
    fn test_sorts_insertion_ordered_maps() {
        let value: Value = serde_json::from_str(r#"{"z":1,"a":{"y":2,"b":3}}"#).unwrap();

        // parsed maps keep document order
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"z":1,"a":{"y":2,"b":3}}"#);

        let bytes = to_canonical_bytes(&value).unwrap();
        assert_eq!(bytes, br#"{"a":{"b":3,"y":2},"z":1}"#.to_vec());
    }

    #[test]
    fn test_html_characters_escaped() {
        let value = json!({"memo": "a<b&c>", "note": "line\u{2028}sep"});
        let bytes = to_canonical_bytes(&value).unwrap();
        assert_eq!(
            String::from_utf8(bytes.clone()).unwrap(),
            r#"{"memo":"a\u003cb\u0026c\u003e","note":"line\u2028sep"}"#
        );

        let parsed: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, value);
    }
}
