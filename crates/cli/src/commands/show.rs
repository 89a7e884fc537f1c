use std::path::Path;
use std::process;

use lrmodel_core::ModelParser;

use super::{load_model, parse_or_exit};
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_show(spec: Option<&Path>, string: Option<&str>, output: OutputFormat, quiet: bool) {
    let parser = ModelParser::new();
    let model = match (spec, string) {
        (_, Some(text)) => parse_or_exit(&parser, text, "<string>", output, quiet),
        (Some(path), None) => load_model(&parser, path, output, quiet),
        (None, None) => {
            report_error("a spec path or --string is required", output, quiet);
            process::exit(1);
        }
    };
    println!("{}", lrmodel_core::to_json_string(&model));
}
