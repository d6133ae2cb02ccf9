use std::collections::BTreeMap;

/// Raw field values keyed by field id, as submitted by the form layer.
pub type FieldValues = BTreeMap<String, serde_json::Value>;

/// A value the form layer uses to mean "nothing selected".
pub fn is_blank(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::String(s) => s.trim().is_empty(),
        serde_json::Value::Array(a) => a.is_empty(),
        _ => false,
    }
}
