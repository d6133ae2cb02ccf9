use std::sync::Arc;

use crate::error::ConfigurationError;
use crate::graph::{build_dependency_graph, DependencyGraph};
use crate::provider::OptionsProvider;
use crate::schema::FormSchema;
use crate::types::{DynamicBinding, Field, FieldType};
use crate::validate::Validator;

/// Collects fields for a [`FormSchema`]. Nothing is checked until [`SchemaBuilder::build`].
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<Field>,
    allow_unbound: bool,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            allow_unbound: false,
        }
    }

    pub fn field(mut self, field: FieldBuilder) -> Self {
        self.fields.push(field.into_field());
        self
    }

    pub fn fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = FieldBuilder>,
    {
        self.fields.extend(fields.into_iter().map(FieldBuilder::into_field));
        self
    }

    /// Accept dynamic fields without a provider. Resolving them fails per field at runtime.
    /// Meant for tooling that only inspects the schema.
    pub fn allow_unbound_providers(mut self, allow: bool) -> Self {
        self.allow_unbound = allow;
        self
    }

    pub fn build(self) -> Result<FormSchema, ConfigurationError> {
        let mut v = Validator::new();
        v.validate_schema(&self.name, &self.fields, self.allow_unbound);

        let graph = match build_dependency_graph(&self.fields) {
            Ok(g) => g,
            Err(cycle) => {
                v.push("$.fields", cycle.to_string());
                DependencyGraph::default()
            }
        };
        v.finish()?;

        Ok(FormSchema::from_parts(self.name, self.fields, graph))
    }
}

#[derive(Debug, Clone)]
pub struct FieldBuilder {
    field: Field,
}

impl FieldBuilder {
    pub fn new(id: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            field: Field {
                id: id.into(),
                label: label.into(),
                field_type,
                required: false,
                help_text: None,
                placeholder: None,
                default_value: None,
                binding: None,
            },
        }
    }

    pub fn text(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldType::Text)
    }

    pub fn textarea(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldType::Textarea)
    }

    pub fn number(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldType::Number)
    }

    pub fn boolean(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldType::Boolean)
    }

    pub fn date(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldType::Date)
    }

    pub fn select(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldType::Select)
    }

    pub fn multi_select(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldType::MultiSelect)
    }

    /// A dynamic select whose provider is still to be bound with
    /// [`FieldBuilder::with_dynamic_options`]. Left unbound, `build()` rejects it unless
    /// unbound providers are allowed.
    pub fn dynamic(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::select(id, label).with_dynamic_options(DynamicOptions::unbound())
    }

    pub fn required(mut self) -> Self {
        self.field.required = true;
        self
    }

    pub fn set_required(mut self, required: bool) -> Self {
        self.field.required = required;
        self
    }

    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.field.help_text = Some(text.into());
        self
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.field.placeholder = Some(text.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.field.default_value = Some(value.into());
        self
    }

    /// Turns the field into a dynamic field.
    pub fn with_dynamic_options(mut self, options: DynamicOptions) -> Self {
        self.field.binding = Some(options.binding);
        self
    }

    pub(crate) fn into_field(self) -> Field {
        self.field
    }
}

/// Declares where a dynamic field's options come from and what they react to.
#[derive(Debug, Clone, Default)]
pub struct DynamicOptions {
    binding: DynamicBinding,
}

impl DynamicOptions {
    pub fn new<P>(provider: P) -> Self
    where
        P: OptionsProvider + 'static,
    {
        Self::shared(Arc::new(provider))
    }

    pub fn shared(provider: Arc<dyn OptionsProvider>) -> Self {
        Self {
            binding: DynamicBinding {
                provider: Some(provider),
                ..Default::default()
            },
        }
    }

    /// No provider yet; only valid with [`SchemaBuilder::allow_unbound_providers`].
    pub fn unbound() -> Self {
        Self::default()
    }

    /// Registry name; also the key for per-provider concurrency limits.
    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.binding.provider_name = Some(name.into());
        self
    }

    pub fn depends_on<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.binding
            .depends_on
            .extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn refresh_on<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.binding
            .refresh_on
            .extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn supports_search(mut self, supports: bool) -> Self {
        self.binding.supports_search = supports;
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.binding.page_size = Some(size);
        self
    }
}
