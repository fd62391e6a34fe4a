//! Field coercion applied at every extraction boundary.
//!
//! Search payloads are loosely typed: fields go missing, arrive as `null`, or change type
//! between locales. Every read of a raw field goes through one of these helpers so the
//! "missing or wrong-typed means empty" rule lives in one place.

use serde_json::Value;

static NULL: Value = Value::Null;

/// The object at `key`, or `null` when absent or not an object.
///
/// Reads through the returned value keep working: every helper here treats `null` as empty.
pub fn object_or_empty<'a>(value: &'a Value, key: &str) -> &'a Value {
    match value.get(key) {
        Some(v) if v.is_object() => v,
        _ => &NULL,
    }
}

/// The array at `key`, or an empty slice.
pub fn sequence_or_empty<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// The string at `key`, or `""`.
pub fn string_or_empty(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// The string at `key` when present and non-empty.
pub fn optional_string(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Integer view of a citation index; anything that is not an integer is discarded.
///
/// Accepts JSON integers, floats with no fractional part, and strings holding an integer.
pub fn int_or_discard(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Array at `key` as strings. Scalars keep their JSON text; nested values are dropped.
pub fn string_list(value: &Value, key: &str) -> Vec<String> {
    sequence_or_empty(value, key)
        .iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}
