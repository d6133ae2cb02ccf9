use std::path::Path;

use fieldopts_core::Validate;

use crate::exit_codes;
use crate::output::{print_result, print_violations, OutputFormat};
use crate::utils::load_descriptor;
use crate::OutputArgs;

pub fn migrate_cmd(path: &Path, output: OutputArgs) -> i32 {
    let (descriptor, _) = match load_descriptor(path, true) {
        Ok(v) => v,
        Err(e) => return e.report(&output),
    };

    // The converted form must stand on its own as a descriptor.
    if let Err(err) = descriptor.validate() {
        print_violations(output.format, output.quiet, &err.messages());
        return exit_codes::VALIDATION_FAILED;
    }

    let format = match output.format {
        OutputFormat::Text | OutputFormat::Dot => OutputFormat::Yaml,
        other => other,
    };
    print_result(format, output.quiet, &descriptor);
    exit_codes::SUCCESS
}
