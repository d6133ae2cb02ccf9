use serde_json::Value;

use crate::types::{Field, FieldType};
use crate::validate::validator::{Validator, FIELD_ID_RE};

pub(crate) fn validate_field(v: &mut Validator, field: &Field, path: &str) {
    if !FIELD_ID_RE.is_match(&field.id) {
        v.push(
            format!("{path}.id"),
            "must match regex ^[A-Za-z0-9_\\-\\.]+$",
        );
    }
    if field.label.trim().is_empty() {
        v.push(format!("{path}.displayName"), "must not be empty");
    }
    if let Some(default) = &field.default_value {
        if !default_fits(field.field_type, default) {
            v.push(
                format!("{path}.defaultValue"),
                format!("is not a valid {:?} value", field.field_type),
            );
        }
    }
}

fn default_fits(field_type: FieldType, value: &Value) -> bool {
    match field_type {
        FieldType::Boolean => value.is_boolean(),
        FieldType::Number => value.is_number(),
        FieldType::MultiSelect => value.is_array(),
        FieldType::Text | FieldType::Textarea | FieldType::Date => value.is_string(),
        FieldType::Select => !value.is_object() && !value.is_array(),
    }
}
