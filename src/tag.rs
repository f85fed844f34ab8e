//! Optional type tag carried by dynamic mappings.
use serde_json::{Map, Value};

use crate::error::Reason;

/// Check the type tag of `map` (if any) against `expected`.
///
/// An absent tag passes. A present tag must be the string `expected`,
/// compared case-sensitively.
pub fn check_type_tag(map: &Map<String, Value>, tag_key: &str, expected: &str) -> Result<(), Reason> {
    match map.get(tag_key) {
        None => Ok(()),
        Some(Value::String(found)) if found == expected => Ok(()),
        Some(found) => Err(Reason::TagMismatch {
            found: match found {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
            expected: expected.to_string(),
        }),
    }
}

/// Entries of `map` other than the type tag.
pub fn data_fields<'m>(
    map: &'m Map<String, Value>,
    tag_key: &str,
) -> impl Iterator<Item = (&'m String, &'m Value)> {
    map.iter().filter(move |(key, _)| key.as_str() != tag_key)
}
