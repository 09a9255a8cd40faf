//! Deterministic fingerprint over the ordered raw-value list.
//!
//! Each value is serialized to a canonical JSON form (object keys sorted
//! recursively, so composite values have a stable property order), the forms
//! are joined with the ASCII unit separator, and the result is SHA-256
//! hashed to hex. JSON string encoding escapes control characters, so the
//! separator can never appear unescaped inside a serialized value and
//! permuting or re-splitting the inputs always changes the digest.
//!
//! This is an identifier, not a security primitive: determinism and order
//! sensitivity are required, collision resistance is not.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Joins canonical forms. U+001F never survives JSON string encoding
/// unescaped.
pub const VALUE_SEPARATOR: &str = "\u{1f}";

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = serde_json::Map::with_capacity(map.len());
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// Canonical deterministic string form of one raw value.
pub fn canonical_form(value: &Value) -> String {
    canonicalize(value).to_string()
}

/// Hash the ordered raw-value list into a fixed-length hex identifier.
pub fn fingerprint(values: &[Value]) -> String {
    let joined = values
        .iter()
        .map(canonical_form)
        .collect::<Vec<_>>()
        .join(VALUE_SEPARATOR);

    let digest = Sha256::digest(joined.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
