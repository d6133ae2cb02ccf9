#![forbid(unsafe_code)]

pub mod context;
pub mod error;
pub mod graph;
pub mod parser;
pub mod provider;
pub mod schema;
pub mod types;
pub mod validate;

pub use crate::context::{decode_values, AuthContext, DynamicFieldContext};
pub use crate::error::{
    ConfigurationError, DecodeError, ParseError, ProviderError, SchemaError, Violation,
};
pub use crate::graph::{build_dependency_graph, CycleError, DependencyGraph};
pub use crate::parser::{
    parse_descriptor_str, parse_legacy_str, DescriptorFormat, LegacyForm, Parsed,
    ParsedDescriptor,
};
pub use crate::provider::{FnProvider, OptionsProvider, ProviderRegistry, StaticOptionsProvider};
pub use crate::schema::{
    DynamicOptions, FieldBuilder, FieldDescriptor, FormSchema, LoadOptions, SchemaBuilder,
    SchemaDescriptor,
};
pub use crate::types::{
    DynamicOptionsResponse, Field, FieldKind, FieldType, FieldValues, OptionItem, Pagination,
    RecordMapping,
};
pub use crate::validate::Validate;

/// Parses a descriptor (new or legacy shape) and builds a schema from it in one step.
pub fn load_schema_str(
    input: &str,
    format: DescriptorFormat,
    legacy: bool,
    registry: &ProviderRegistry,
    options: LoadOptions,
) -> Result<FormSchema, SchemaError> {
    let descriptor = if legacy {
        parse_legacy_str(input, format)?.value.into_descriptor()?
    } else {
        parse_descriptor_str(input, format)?.value
    };
    Ok(descriptor.into_schema(registry, options)?)
}
