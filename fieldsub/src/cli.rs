//! This file defines the command-line interface (CLI) for the fieldsub application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "fieldsub",
    author = "Obscura Team (Relay)",
    version = env!("CARGO_PKG_VERSION"),
    about = "Compose text from field values with ordered regex substitution rules",
    long_about = "fieldsub applies a list of (field, regex, template) rules to a set of field values and prints the concatenated result. Rules are read from a YAML file and can be exported to, or validated from, a flat record in JSON, YAML or binary form.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `fieldsub` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Applies the rules to field values and prints the composed text.
    #[command(about = "Applies the rules to field values and prints the composed text.")]
    Apply(ApplyCommand),

    /// Builds the rules and reports problems without applying them.
    #[command(about = "Builds the rules and reports problems without applying them.")]
    Check(CheckCommand),

    /// Writes the rules as a flat record.
    #[command(about = "Writes the rules as a flat record (field ids, patterns, templates).")]
    Encode(EncodeCommand),

    /// Reads a flat record, validates every rule and prints it as a rule file.
    #[command(about = "Reads a flat record, validates every rule and prints it as a YAML rule file.")]
    Decode(DecodeCommand),
}

/// Arguments for the `apply` command.
#[derive(Parser, Debug)]
pub struct ApplyCommand {
    /// Path to the YAML rule file.
    #[arg(long = "rules", short = 'r', value_name = "FILE", help = "Path to the YAML rule file.")]
    pub rules: PathBuf,

    /// YAML or JSON map of field id to value.
    #[arg(long = "values", value_name = "FILE", help = "Read field values from a YAML or JSON map.")]
    pub values: Option<PathBuf>,

    /// Individual field values; these override entries from --values.
    #[arg(long = "field", short = 'f', value_name = "ID=VALUE", value_parser = parse_field_assignment, help = "Set one field value (repeatable).")]
    pub fields: Vec<(String, String)>,

    /// Print skipped rules to stderr.
    #[arg(long = "report", help = "Print rules that were skipped because their template could not be expanded.")]
    pub report: bool,

    /// Print the result and the skipped rules as JSON.
    #[arg(long = "json", help = "Print the result and skipped rules as JSON to stdout.")]
    pub json: bool,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Path to the YAML rule file.
    #[arg(long = "rules", short = 'r', value_name = "FILE", help = "Path to the YAML rule file.")]
    pub rules: PathBuf,
}

/// Arguments for the `encode` command.
#[derive(Parser, Debug)]
pub struct EncodeCommand {
    /// Path to the YAML rule file.
    #[arg(long = "rules", short = 'r', value_name = "FILE", help = "Path to the YAML rule file.")]
    pub rules: PathBuf,

    #[arg(long = "format", value_enum, default_value = "json", help = "Record encoding.")]
    pub format: RecordFormat,

    /// Write the record to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `decode` command.
#[derive(Parser, Debug)]
pub struct DecodeCommand {
    /// Path to the record (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read the record from a file instead of stdin.")]
    pub input: Option<PathBuf>,

    #[arg(long = "format", value_enum, default_value = "json", help = "Record encoding.")]
    pub format: RecordFormat,
}

/// Encodings for a flat rule record.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum RecordFormat {
    Json,
    Yaml,
    /// Compact bincode encoding.
    Bin,
}

fn parse_field_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((id, value)) if !id.is_empty() => Ok((id.to_string(), value.to_string())),
        _ => Err(format!("expected ID=VALUE, got '{}'", s)),
    }
}
