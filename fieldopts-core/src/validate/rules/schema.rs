use std::collections::HashSet;

use crate::types::Field;
use crate::validate::rules::{dependencies, fields};
use crate::validate::validator::Validator;

pub(crate) fn validate_schema(v: &mut Validator, name: &str, all: &[Field], allow_unbound: bool) {
    if name.trim().is_empty() {
        v.push("$.name", "must not be empty");
    }

    let known: HashSet<&str> = all.iter().map(|f| f.id.as_str()).collect();
    let mut seen = HashSet::<&str>::new();
    for (idx, field) in all.iter().enumerate() {
        let path = format!("$.fields[{idx}]");
        if !seen.insert(field.id.as_str()) {
            v.push(format!("{path}.id"), format!("duplicate field id `{}`", field.id));
        }
        fields::validate_field(v, field, &path);
        if let Some(binding) = &field.binding {
            dependencies::validate_binding(v, field, binding, &path, &known, allow_unbound);
        }
    }
}
