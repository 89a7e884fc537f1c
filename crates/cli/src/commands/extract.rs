use std::path::Path;
use std::process;

use serde_json::json;

use crate::{report_error, report_failure, OutputFormat};

pub(crate) fn cmd_extract(corpus: &Path, dest: &Path, output: OutputFormat, quiet: bool) {
    let text = match std::fs::read_to_string(corpus) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", corpus.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let models = lrmodel_core::extract_models(&text);
    let written = match lrmodel_core::write_models(&models, dest) {
        Ok(paths) => paths,
        Err(e) => {
            report_failure(&e.to_string(), &e.to_json_value(), output, quiet);
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Json => {
            let entries: Vec<_> = models
                .iter()
                .zip(&written)
                .map(|(m, path)| json!({ "doc_type": m.doc_type, "path": path.display().to_string() }))
                .collect();
            println!("{}", json!({ "dest": dest.display().to_string(), "models": entries }));
        }
        OutputFormat::Text => {
            if !quiet {
                println!("Destination directory: {}", dest.display());
                for path in &written {
                    println!("Created data model spec file: {}", path.display());
                }
            }
        }
    }
}
