//! Adapter for the older field-builder form definitions.
//!
//! Legacy forms are converted into a [`SchemaDescriptor`] and go through the same validation
//! as every other schema; nothing downstream knows the legacy shape exists.

use crate::error::{ConfigurationError, ParseError, Violation};
use crate::parser::{parse_str, DescriptorFormat, Parsed};
use crate::schema::{FieldDescriptor, SchemaDescriptor};
use crate::types::{FieldKind, FieldType};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LegacyForm {
    pub title: String,
    #[serde(default)]
    pub properties: Vec<LegacyProperty>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LegacyProperty {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type", default = "legacy_string")]
    pub kind: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub dynamic: bool,
    #[serde(rename = "getOptions", default)]
    pub get_options: Option<String>,
    #[serde(rename = "dependsOn", default)]
    pub depends_on: Vec<String>,
    #[serde(rename = "refreshOn", default)]
    pub refresh_on: Vec<String>,
    #[serde(default)]
    pub searchable: bool,
    #[serde(rename = "perPage", default)]
    pub per_page: Option<u32>,
}

fn legacy_string() -> String {
    "string".to_string()
}

pub fn parse_legacy_str(
    input: &str,
    format: DescriptorFormat,
) -> Result<Parsed<LegacyForm>, ParseError> {
    parse_str(input, format)
}

impl LegacyForm {
    pub fn into_descriptor(self) -> Result<SchemaDescriptor, ConfigurationError> {
        let mut violations = Vec::new();
        let mut fields = Vec::with_capacity(self.properties.len());

        for (idx, p) in self.properties.into_iter().enumerate() {
            let Some(field_type) = map_type(&p.kind) else {
                violations.push(Violation::new(
                    format!("$.properties[{idx}].type"),
                    format!("unknown legacy field type `{}`", p.kind),
                ));
                continue;
            };
            fields.push(convert_property(p, field_type));
        }

        if violations.is_empty() {
            Ok(SchemaDescriptor {
                name: self.title,
                fields,
            })
        } else {
            Err(ConfigurationError::new(violations))
        }
    }
}

fn convert_property(p: LegacyProperty, field_type: FieldType) -> FieldDescriptor {
    let dynamic = p.dynamic || p.get_options.is_some();
    if !p.dynamic && p.get_options.is_some() {
        tracing::warn!(field = %p.key, "legacy property has getOptions but dynamic=false; treating it as dynamic");
    }
    if !dynamic && (!p.depends_on.is_empty() || !p.refresh_on.is_empty()) {
        tracing::warn!(field = %p.key, "dropping dependsOn/refreshOn declared on a static legacy property");
    }

    let label = p.label.unwrap_or_else(|| p.key.clone());
    let mut out = FieldDescriptor {
        id: p.key,
        display_name: label,
        required: p.required,
        kind: if dynamic { FieldKind::Dynamic } else { FieldKind::Static },
        field_type,
        help_text: p.description,
        placeholder: p.placeholder,
        default_value: p.default,
        depends_on: None,
        refresh_on: None,
        supports_search: None,
        page_size: None,
        provider: None,
    };
    if dynamic {
        out.depends_on = Some(p.depends_on);
        out.refresh_on = (!p.refresh_on.is_empty()).then_some(p.refresh_on);
        out.supports_search = Some(p.searchable);
        out.page_size = Some(p.per_page);
        out.provider = p.get_options;
    }
    out
}

fn map_type(kind: &str) -> Option<FieldType> {
    match kind.to_ascii_lowercase().as_str() {
        "string" | "text" => Some(FieldType::Text),
        "textarea" => Some(FieldType::Textarea),
        "number" | "integer" => Some(FieldType::Number),
        "bool" | "boolean" => Some(FieldType::Boolean),
        "date" | "datetime" => Some(FieldType::Date),
        "dropdown" | "select" => Some(FieldType::Select),
        "multiselect" | "multi_select" => Some(FieldType::MultiSelect),
        _ => None,
    }
}
