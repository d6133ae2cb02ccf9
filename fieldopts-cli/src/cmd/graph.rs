use std::path::Path;

use fieldopts_core::FormSchema;
use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::utils::load_unbound_schema;
use crate::{OutputArgs, SchemaArgs};

pub fn graph_cmd(path: &Path, schema: SchemaArgs, output: OutputArgs) -> i32 {
    let schema = match load_unbound_schema(path, schema.legacy) {
        Ok(s) => s,
        Err(e) => return e.report(&output),
    };
    let graph = schema.graph();

    match output.format {
        OutputFormat::Dot => {
            if !output.quiet {
                print!("{}", graph.to_dot(schema.name()));
            }
        }
        OutputFormat::Text => {
            if !output.quiet {
                println!("form: {}", schema.name());
                for (depth, level) in graph.levels.iter().enumerate() {
                    println!("level {depth}: {}", level.join(", "));
                }
                for field in schema.dynamic_fields() {
                    let deps = graph.dependencies_of(&field.id);
                    if !deps.is_empty() {
                        println!("{} <- {}", field.id, deps.join(", "));
                    }
                }
            }
        }
        _ => print_result(output.format, output.quiet, graph),
    }
    exit_codes::SUCCESS
}

#[derive(Serialize)]
struct CascadeResult<'a> {
    changed: &'a str,
    levels: Vec<Vec<String>>,
}

pub fn cascade_cmd(path: &Path, changed: &str, schema: SchemaArgs, output: OutputArgs) -> i32 {
    let schema = match load_unbound_schema(path, schema.legacy) {
        Ok(s) => s,
        Err(e) => return e.report(&output),
    };
    let Some(levels) = cascade_of(&schema, changed) else {
        print_error(
            output.format,
            output.quiet,
            &format!("unknown field `{changed}`"),
        );
        return exit_codes::VALIDATION_FAILED;
    };

    if output.format == OutputFormat::Text && !output.quiet {
        if levels.is_empty() {
            println!("no dynamic field depends on `{changed}`");
        }
        for (step, level) in levels.iter().enumerate() {
            println!("{}. {}", step + 1, level.join(", "));
        }
    } else {
        print_result(output.format, output.quiet, &CascadeResult { changed, levels });
    }
    exit_codes::SUCCESS
}

fn cascade_of(schema: &FormSchema, changed: &str) -> Option<Vec<Vec<String>>> {
    schema.field(changed)?;
    Some(schema.graph().cascade_levels(changed))
}
