mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Learning Registry data-model toolkit.
#[derive(Parser)]
#[command(
    name = "lrmodel",
    version,
    about = "Learning Registry data-model parser and validator"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a data-model spec and print its JSON form
    Show {
        /// Path to the data-model spec file
        #[arg(required_unless_present = "string", conflicts_with = "string")]
        spec: Option<PathBuf>,
        /// Data-model spec given inline instead of as a file
        #[arg(long, short = 's')]
        string: Option<String>,
    },

    /// Validate a JSON document against a data-model spec
    Validate {
        /// Path to the data-model spec file
        spec: PathBuf,
        /// Path to the JSON document, or the document itself
        document: String,
        /// Accept document keys the model does not declare
        #[arg(long)]
        allow_unknown_keys: bool,
    },

    /// Extract every data model from a spec corpus, one file per doc_type
    Extract {
        /// Path to the spec corpus
        corpus: PathBuf,
        /// Destination directory for the extracted model files
        #[arg(long, short = 'd', default_value = "./models/")]
        dest: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { spec, string } => {
            commands::show::cmd_show(spec.as_deref(), string.as_deref(), cli.output, cli.quiet);
        }
        Commands::Validate {
            spec,
            document,
            allow_unknown_keys,
        } => {
            commands::validate::cmd_validate(
                &spec,
                &document,
                !allow_unknown_keys,
                cli.output,
                cli.quiet,
            );
        }
        Commands::Extract { corpus, dest } => {
            commands::extract::cmd_extract(&corpus, &dest, cli.output, cli.quiet);
        }
    }
}

/// Print an error to stderr in the selected format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

/// Print a failure that has a structured form. The structured form is
/// always printed in json mode; text mode prints `msg` unless quiet.
pub(crate) fn report_failure(
    msg: &str,
    value: &serde_json::Value,
    output: OutputFormat,
    quiet: bool,
) {
    match output {
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(value)
                .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", msg));
            eprintln!("{}", pretty);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("{}", msg);
            }
        }
    }
}
