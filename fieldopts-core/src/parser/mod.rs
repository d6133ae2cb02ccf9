mod legacy;

use serde::de::DeserializeOwned;

use crate::error::ParseError;
use crate::schema::SchemaDescriptor;

pub use legacy::{parse_legacy_str, LegacyForm, LegacyProperty};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct Parsed<T> {
    pub value: T,
    pub format: DescriptorFormat,
}

pub type ParsedDescriptor = Parsed<SchemaDescriptor>;

pub fn parse_descriptor_str(
    input: &str,
    format: DescriptorFormat,
) -> Result<ParsedDescriptor, ParseError> {
    parse_str(input, format)
}

pub(crate) fn parse_str<T: DeserializeOwned>(
    input: &str,
    format: DescriptorFormat,
) -> Result<Parsed<T>, ParseError> {
    match format {
        DescriptorFormat::Json => Ok(Parsed {
            value: serde_json::from_str::<T>(input)?,
            format,
        }),
        DescriptorFormat::Yaml => Ok(Parsed {
            value: serde_yaml::from_str::<T>(input)?,
            format,
        }),
        DescriptorFormat::Auto => parse_auto(input),
    }
}

fn parse_auto<T: DeserializeOwned>(input: &str) -> Result<Parsed<T>, ParseError> {
    // JSON always starts with `{` or `[` after trimming.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str::<T>(input) {
            Ok(value) => Ok(Parsed {
                value,
                format: DescriptorFormat::Json,
            }),
            Err(e) => match serde_yaml::from_str::<T>(input) {
                Ok(value) => Ok(Parsed {
                    value,
                    format: DescriptorFormat::Yaml,
                }),
                Err(_) => Err(ParseError::Json(e)),
            },
        };
    }

    match serde_yaml::from_str::<T>(input) {
        Ok(value) => Ok(Parsed {
            value,
            format: DescriptorFormat::Yaml,
        }),
        Err(e) => {
            if let Ok(value) = serde_json::from_str::<T>(input) {
                return Ok(Parsed {
                    value,
                    format: DescriptorFormat::Json,
                });
            }
            Err(ParseError::Yaml(e))
        }
    }
}
