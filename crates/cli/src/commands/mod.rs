pub(crate) mod extract;
pub(crate) mod show;
pub(crate) mod validate;

use std::path::Path;
use std::process;

use lrmodel_core::{ModelParser, ModelSpec};

use crate::{report_error, report_failure, OutputFormat};

/// Read and parse a spec file, or report the failure and exit.
pub(crate) fn load_model(
    parser: &ModelParser,
    spec_path: &Path,
    output: OutputFormat,
    quiet: bool,
) -> ModelSpec {
    let text = match lrmodel_core::read_spec(spec_path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", spec_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    parse_or_exit(parser, &text, &spec_path.display().to_string(), output, quiet)
}

/// Parse spec text, or report the failure and exit. `origin` names the
/// text in the error message.
pub(crate) fn parse_or_exit(
    parser: &ModelParser,
    text: &str,
    origin: &str,
    output: OutputFormat,
    quiet: bool,
) -> ModelSpec {
    match parser.parse(text) {
        Ok(model) => model,
        Err(e) => {
            let msg = format!("error in model spec '{}': {}", origin, e);
            report_failure(&msg, &e.to_json_value(), output, quiet);
            process::exit(1);
        }
    }
}
