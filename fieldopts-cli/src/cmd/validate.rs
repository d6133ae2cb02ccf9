use std::path::Path;

use fieldopts_core::{LoadOptions, ProviderRegistry};
use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::utils::load_descriptor;
use crate::{OutputArgs, SchemaArgs};

#[derive(Serialize)]
struct ValidateResult {
    valid: bool,
    format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    fields: usize,
    dynamic_fields: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

pub fn validate_cmd(path: &Path, schema: SchemaArgs, output: OutputArgs) -> i32 {
    let (descriptor, format) = match load_descriptor(path, schema.legacy) {
        Ok(v) => v,
        Err(e) => return e.report(&output),
    };

    let built = descriptor.into_schema(
        &ProviderRegistry::new(),
        LoadOptions {
            require_providers: false,
        },
    );
    let format = format!("{format:?}");

    match built {
        Ok(schema) => {
            let result = ValidateResult {
                valid: true,
                format,
                name: Some(schema.name().to_string()),
                fields: schema.fields().len(),
                dynamic_fields: schema.dynamic_fields().count(),
                errors: vec![],
            };
            if output.format == OutputFormat::Text && !output.quiet {
                println!(
                    "ok: valid form schema `{}` ({} fields, {} dynamic)",
                    schema.name(),
                    result.fields,
                    result.dynamic_fields
                );
            } else {
                print_result(output.format, output.quiet, &result);
            }
            exit_codes::SUCCESS
        }
        Err(err) => report_invalid(err.messages(), format, &output),
    }
}

fn report_invalid(errors: Vec<String>, format: String, output: &OutputArgs) -> i32 {
    if output.format == OutputFormat::Text && !output.quiet {
        eprintln!("error: validation failed");
        for e in &errors {
            eprintln!("- {e}");
        }
    } else {
        let result = ValidateResult {
            valid: false,
            format,
            name: None,
            fields: 0,
            dynamic_fields: 0,
            errors,
        };
        print_result(output.format, output.quiet, &result);
    }
    exit_codes::VALIDATION_FAILED
}
