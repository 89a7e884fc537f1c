use std::path::Path;
use std::process;

use lrmodel_core::ModelParser;
use serde_json::json;

use super::load_model;
use crate::{report_error, report_failure, OutputFormat};

/// A document argument names a file when one exists at that path, and is
/// the JSON text itself otherwise.
fn read_document(arg: &str) -> Result<String, std::io::Error> {
    let path = Path::new(arg);
    if path.is_file() {
        tracing::debug!(path = %path.display(), "reading document file");
        std::fs::read_to_string(path)
    } else {
        Ok(arg.to_owned())
    }
}

pub(crate) fn cmd_validate(
    spec_path: &Path,
    document: &str,
    verify_extended_keys: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let parser = ModelParser::new();
    let model = load_model(&parser, spec_path, output, quiet);

    let text = match read_document(document) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", document, e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    match lrmodel_core::validate_str(&model, &text, verify_extended_keys) {
        Ok(_) => match output {
            OutputFormat::Json => {
                println!("{}", json!({ "valid": true, "model": model.name() }));
            }
            OutputFormat::Text => {
                if !quiet {
                    match model.name() {
                        Some(name) => println!("valid ({})", name),
                        None => println!("valid"),
                    }
                }
            }
        },
        Err(e) => {
            let msg = format!("invalid: {}", e);
            let value = json!({ "valid": false, "error": e.to_json_value() });
            report_failure(&msg, &value, output, quiet);
            process::exit(1);
        }
    }
}
