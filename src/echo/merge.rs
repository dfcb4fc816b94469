//! Recursive JSON merge.
//!
//! Source values win at every matching key. Objects merge key by key, arrays
//! merge index by index, and every other source value (`null` included)
//! replaces whatever the destination held.

use serde_json::{Map, Value};

/// Merge `source` into `target` in place.
pub fn deep_merge(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(dst), Value::Object(src)) => merge_object(dst, src),
        (Value::Array(dst), Value::Array(src)) => {
            for (index, item) in src.into_iter().enumerate() {
                match dst.get_mut(index) {
                    Some(slot) => deep_merge(slot, item),
                    None => dst.push(item),
                }
            }
        }
        (dst, src) => *dst = src,
    }
}

/// Merge every key of `source` into `target`.
///
/// Keys missing from `source` are left alone.
pub fn merge_object(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        match target.get_mut(&key) {
            Some(existing) => deep_merge(existing, value),
            None => {
                target.insert(key, value);
            }
        }
    }
}

/// Short name of a JSON value's type, used in error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
