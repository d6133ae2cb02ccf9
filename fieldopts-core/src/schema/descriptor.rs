use crate::error::{ConfigurationError, Violation};
use crate::provider::ProviderRegistry;
use crate::schema::{DynamicOptions, FieldBuilder, FormSchema};
use crate::types::{Field, FieldKind, FieldType};
use crate::validate::Validate;

/// Serialized shape of a built schema, consumed by form renderers.
///
/// Every field carries `id`, `displayName` and `required`; dynamic fields always carry
/// `dependsOn`, `supportsSearch` and `pageSize` (`null` when unpaged).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SchemaDescriptor {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldDescriptor {
    pub id: String,

    #[serde(rename = "displayName")]
    pub display_name: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default = "static_kind")]
    pub kind: FieldKind,

    #[serde(rename = "type", default)]
    pub field_type: FieldType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "helpText")]
    pub help_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "defaultValue")]
    pub default_value: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "dependsOn")]
    pub depends_on: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "refreshOn")]
    pub refresh_on: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "supportsSearch")]
    pub supports_search: Option<bool>,

    /// Outer `Some` means "present on the wire"; `Some(None)` serializes as `null`.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    #[serde(rename = "pageSize")]
    pub page_size: Option<Option<u32>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

/// Keeps an explicit `null` distinct from a missing key.
fn present<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    serde::Deserialize::deserialize(d).map(Some)
}

fn static_kind() -> FieldKind {
    FieldKind::Static
}

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Reject dynamic fields whose provider is missing from the registry.
    pub require_providers: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            require_providers: true,
        }
    }
}

impl FieldDescriptor {
    pub fn from_field(field: &Field) -> Self {
        let mut out = Self {
            id: field.id.clone(),
            display_name: field.label.clone(),
            required: field.required,
            kind: field.kind(),
            field_type: field.field_type,
            help_text: field.help_text.clone(),
            placeholder: field.placeholder.clone(),
            default_value: field.default_value.clone(),
            depends_on: None,
            refresh_on: None,
            supports_search: None,
            page_size: None,
            provider: None,
        };
        if let Some(b) = &field.binding {
            out.depends_on = Some(b.depends_on.iter().cloned().collect());
            out.refresh_on = (!b.refresh_on.is_empty()).then(|| b.refresh_on.iter().cloned().collect());
            out.supports_search = Some(b.supports_search);
            out.page_size = Some(b.page_size);
            out.provider = b.provider_name.clone();
        }
        out
    }

    fn has_dynamic_keys(&self) -> bool {
        self.depends_on.is_some()
            || self.refresh_on.is_some()
            || self.supports_search.is_some()
            || self.page_size.is_some()
            || self.provider.is_some()
    }

    fn to_builder(&self, registry: &ProviderRegistry) -> FieldBuilder {
        let mut b = FieldBuilder::new(self.id.clone(), self.display_name.clone(), self.field_type)
            .set_required(self.required);
        if let Some(t) = &self.help_text {
            b = b.help_text(t.clone());
        }
        if let Some(p) = &self.placeholder {
            b = b.placeholder(p.clone());
        }
        if let Some(d) = &self.default_value {
            b = b.default_value(d.clone());
        }
        if self.kind == FieldKind::Dynamic {
            let mut opts = match self.provider.as_deref().and_then(|name| registry.get(name)) {
                Some(p) => DynamicOptions::shared(p),
                None => DynamicOptions::unbound(),
            };
            if let Some(name) = &self.provider {
                opts = opts.provider_name(name.clone());
            }
            opts = opts
                .depends_on(self.depends_on.clone().unwrap_or_default())
                .refresh_on(self.refresh_on.clone().unwrap_or_default())
                .supports_search(self.supports_search.unwrap_or(false));
            if let Some(Some(size)) = self.page_size {
                opts = opts.page_size(size);
            }
            b = b.with_dynamic_options(opts);
        }
        b
    }
}

impl SchemaDescriptor {
    pub fn from_schema(schema: &FormSchema) -> Self {
        Self {
            name: schema.name().to_string(),
            fields: schema.fields().iter().map(FieldDescriptor::from_field).collect(),
        }
    }

    /// Rebuilds (and re-validates) a schema, binding providers by registry name.
    pub fn into_schema(
        &self,
        registry: &ProviderRegistry,
        options: LoadOptions,
    ) -> Result<FormSchema, ConfigurationError> {
        let mut violations = Vec::new();
        for (idx, f) in self.fields.iter().enumerate() {
            if f.kind == FieldKind::Static && f.has_dynamic_keys() {
                violations.push(Violation::new(
                    format!("$.fields[{idx}]"),
                    "dependsOn/refreshOn/supportsSearch/pageSize/provider are only allowed on dynamic fields",
                ));
            }
        }

        let built = FormSchema::builder(self.name.clone())
            .fields(self.fields.iter().map(|f| f.to_builder(registry)))
            .allow_unbound_providers(!options.require_providers)
            .build();

        match built {
            Ok(schema) if violations.is_empty() => Ok(schema),
            Ok(_) => Err(ConfigurationError::new(violations)),
            Err(e) => {
                violations.extend(e.violations);
                Err(ConfigurationError::new(violations))
            }
        }
    }
}

impl Validate for SchemaDescriptor {
    fn validate(&self) -> Result<(), ConfigurationError> {
        self.into_schema(
            &ProviderRegistry::new(),
            LoadOptions {
                require_providers: false,
            },
        )
        .map(|_| ())
    }
}
