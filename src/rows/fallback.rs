//! Presence checks and fallback resolution between override levels
//!
//! An override that is empty or `"0"` counts as absent: the slicer writes
//! those when a value was cleared, and the level above must show through.

use serde_json::Value;

/// True when `value` is a real override
///
/// Null, empty strings, `"0"`, numeric zero, `false` and empty
/// collections are all absent.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => text_present(s),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// [`is_present`] for values already in string form
pub(crate) fn text_present(text: &str) -> bool {
    !text.is_empty() && text != "0"
}

/// `primary` when present, otherwise `fallback`
pub(crate) fn either(primary: Option<&str>, fallback: &str) -> String {
    match primary {
        Some(text) if text_present(text) => text.to_string(),
        _ => fallback.to_string(),
    }
}

/// The form a setting value is shown and compared in
///
/// Strings are taken as-is, null is empty, everything else uses its JSON
/// representation.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// True when an object-level override differs from the profile value
///
/// Values are compared in display form, so `10` and `"10"` are equal while
/// `"0.20"` and `"0.2"` are not.
pub(crate) fn is_custom(raw: Option<&str>, profile: &Value) -> bool {
    raw.is_some_and(|raw| raw != display_string(profile))
}
