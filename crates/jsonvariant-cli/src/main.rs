#![allow(clippy::print_stdout, clippy::print_stderr)]
use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use jsonvariant::{Error, Validator, Value};
use tracing_subscriber::EnvFilter;

/// Format JSON documents and validate them against schemas.
#[derive(Parser, Debug)]
#[command(name = "jsonvariant-cli", version, about)]
struct Cli {
    /// Log what the validator does (`RUST_LOG` takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Parse a JSON file and print it back in canonical form.
    Fmt {
        /// The JSON document to format.
        file: PathBuf,
        /// Indent nested values by four spaces.
        #[arg(long)]
        pretty: bool,
    },
    /// Validate one or more JSON files against a schema.
    Validate {
        /// The schema to validate against.
        #[arg(short, long, value_name = "SCHEMA")]
        schema: PathBuf,
        /// The documents to validate.
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },
}

fn read_json(path: &Path) -> Result<Value, String> {
    let text = fs::read_to_string(path).map_err(|error| error.to_string())?;
    jsonvariant::parse(&text).map_err(|error| error.to_string())
}

fn format_file(file: &Path, pretty: bool) -> ExitCode {
    match read_json(file) {
        Ok(value) => {
            println!("{}", value.to_json(pretty));
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}: {error}", file.display());
            ExitCode::FAILURE
        }
    }
}

fn validate_file(validator: &Validator, file: &Path) -> Result<(), String> {
    let instance = read_json(file)?;
    validator.validate(&instance).map_err(|error| match error {
        Error::Validation(error) => format!(
            "{error} (at \"{}\", schema path \"{}\")",
            error.instance_path(),
            error.schema_path()
        ),
        other => other.to_string(),
    })
}

fn validate(schema: &Path, files: &[PathBuf]) -> ExitCode {
    let validator = match read_json(schema).and_then(|schema| {
        jsonvariant::validator_for(&schema).map_err(|error| error.to_string())
    }) {
        Ok(validator) => validator,
        Err(error) => {
            eprintln!("Schema {} is invalid: {error}", schema.display());
            return ExitCode::FAILURE;
        }
    };
    let mut success = true;
    for file in files {
        match validate_file(&validator, file) {
            Ok(()) => println!("{} - VALID", file.display()),
            Err(error) => {
                tracing::debug!(file = %file.display(), %error, "Validation failed");
                println!("{} - INVALID. Error: {error}", file.display());
                success = false;
            }
        }
    }
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "jsonvariant=trace" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Fmt { file, pretty } => format_file(&file, pretty),
        Commands::Validate { schema, files } => validate(&schema, &files),
    }
}
