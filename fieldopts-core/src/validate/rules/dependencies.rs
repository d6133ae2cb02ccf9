use std::collections::HashSet;

use crate::types::{DynamicBinding, Field};
use crate::validate::validator::Validator;

pub(crate) fn validate_binding(
    v: &mut Validator,
    field: &Field,
    binding: &DynamicBinding,
    path: &str,
    known: &HashSet<&str>,
    allow_unbound: bool,
) {
    validate_refs(v, field, binding.depends_on.iter(), &format!("{path}.dependsOn"), known);
    validate_refs(v, field, binding.refresh_on.iter(), &format!("{path}.refreshOn"), known);

    if binding.page_size == Some(0) {
        v.push(format!("{path}.pageSize"), "must be greater than 0");
    }

    if !binding.is_bound() && !allow_unbound {
        let message = match &binding.provider_name {
            Some(name) => format!("provider `{name}` is not registered"),
            None => "dynamic field has no options provider".to_string(),
        };
        v.push(format!("{path}.provider"), message);
    }
}

fn validate_refs<'a>(
    v: &mut Validator,
    field: &Field,
    refs: impl Iterator<Item = &'a String>,
    path: &str,
    known: &HashSet<&str>,
) {
    for (idx, r) in refs.enumerate() {
        if r == &field.id {
            v.push(format!("{path}[{idx}]"), "a field cannot depend on itself");
        } else if !known.contains(r.as_str()) {
            v.push(format!("{path}[{idx}]"), format!("references unknown field `{r}`"));
        }
    }
}
