use std::path::Path;

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::utils::load_unbound_schema;
use crate::{OutputArgs, SchemaArgs};

pub fn describe_cmd(path: &Path, schema: SchemaArgs, output: OutputArgs) -> i32 {
    let schema = match load_unbound_schema(path, schema.legacy) {
        Ok(s) => s,
        Err(e) => return e.report(&output),
    };

    // Descriptors are meant to be read and edited, so text output is YAML.
    let format = match output.format {
        OutputFormat::Text | OutputFormat::Dot => OutputFormat::Yaml,
        other => other,
    };
    print_result(format, output.quiet, &schema.descriptor());
    exit_codes::SUCCESS
}
