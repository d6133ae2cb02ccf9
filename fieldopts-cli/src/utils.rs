use std::path::Path;

use fieldopts_core::{
    parse_descriptor_str, parse_legacy_str, DescriptorFormat, FormSchema, LoadOptions,
    ProviderRegistry, SchemaDescriptor,
};

use crate::exit_codes;
use crate::output::{print_error, print_violations};
use crate::OutputArgs;

/// Why a schema file could not be turned into a [`FormSchema`].
#[derive(Debug)]
pub enum LoadError {
    Io(String),
    Parse(String),
    Invalid(Vec<String>),
}

impl LoadError {
    pub fn report(&self, output: &OutputArgs) -> i32 {
        match self {
            Self::Io(msg) => {
                print_error(output.format, output.quiet, msg);
                exit_codes::RUNTIME_ERROR
            }
            Self::Parse(msg) => {
                print_error(output.format, output.quiet, msg);
                exit_codes::VALIDATION_FAILED
            }
            Self::Invalid(violations) => {
                print_violations(output.format, output.quiet, violations);
                exit_codes::VALIDATION_FAILED
            }
        }
    }
}

pub fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path)
        .map_err(|e| LoadError::Io(format!("failed to read {}: {e}", path.display())))
}

pub fn load_descriptor(
    path: &Path,
    legacy: bool,
) -> Result<(SchemaDescriptor, DescriptorFormat), LoadError> {
    let content = read_file(path)?;
    if legacy {
        let parsed = parse_legacy_str(&content, DescriptorFormat::Auto)
            .map_err(|e| LoadError::Parse(e.to_string()))?;
        let descriptor = parsed
            .value
            .into_descriptor()
            .map_err(|e| LoadError::Invalid(e.messages()))?;
        Ok((descriptor, parsed.format))
    } else {
        let parsed = parse_descriptor_str(&content, DescriptorFormat::Auto)
            .map_err(|e| LoadError::Parse(e.to_string()))?;
        Ok((parsed.value, parsed.format))
    }
}

/// Loads a schema without binding providers; enough for static inspection.
pub fn load_unbound_schema(path: &Path, legacy: bool) -> Result<FormSchema, LoadError> {
    load_schema(
        path,
        legacy,
        &ProviderRegistry::new(),
        LoadOptions {
            require_providers: false,
        },
    )
}

pub fn load_schema(
    path: &Path,
    legacy: bool,
    registry: &ProviderRegistry,
    options: LoadOptions,
) -> Result<FormSchema, LoadError> {
    let (descriptor, _) = load_descriptor(path, legacy)?;
    descriptor
        .into_schema(registry, options)
        .map_err(|e| LoadError::Invalid(e.messages()))
}

/// Parses a JSON or YAML document, trying JSON first.
pub fn parse_json_or_yaml<T: serde::de::DeserializeOwned>(
    content: &str,
    what: &str,
) -> Result<T, LoadError> {
    if let Ok(v) = serde_json::from_str(content) {
        return Ok(v);
    }
    serde_yaml::from_str(content)
        .map_err(|e| LoadError::Parse(format!("{what} is neither valid JSON nor YAML: {e}")))
}
