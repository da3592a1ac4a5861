//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Schematics CLI - schema-driven validation and transformation of JSON data
///
/// Validates nested JSON or YAML documents against externally configured
/// field rules, applies transformation chains, and converts between nested
/// and flat key-path representations.
#[derive(Parser, Debug)]
#[command(
    name = "schematics",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SCHEMATICS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate data against a schema
    Validate(ValidateArgs),

    /// Apply a schema's operators to data
    Operate(OperateArgs),

    /// Print the flat key-path view of a document
    Flatten(FlattenArgs),

    /// Rebuild a nested document from a flat key-path view
    Deflate(DeflateArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Options shared by commands that run an engine
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Path to the schema file (JSON or YAML)
    #[arg(short, long, value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Decode the schema as this DSL version instead of its own tag
    #[arg(long, value_name = "VERSION")]
    pub schema_version: Option<String>,

    /// Path segment separator
    #[arg(long)]
    pub separator: Option<String>,

    /// Flat key identifying each row of a collection
    #[arg(long, value_name = "KEY")]
    pub id_key: Option<String>,

    /// Locale for error messages
    #[arg(long)]
    pub locale: Option<String>,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the data file (JSON or YAML), or '-' for stdin
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Message template (placeholders: %validator %message %target %value %data %id)
    #[arg(long)]
    pub template: Option<String>,

    /// Join all messages into one line with this separator
    #[arg(long)]
    pub join: Option<String>,
}

/// Arguments for the operate command
#[derive(Args, Debug, Clone)]
pub struct OperateArgs {
    /// Path to the data file (JSON or YAML), or '-' for stdin
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Write the transformed data to a file instead of stdout
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the flatten command
#[derive(Args, Debug)]
pub struct FlattenArgs {
    /// Path to the data file (JSON or YAML), or '-' for stdin
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Path segment separator
    #[arg(long)]
    pub separator: Option<String>,
}

/// Arguments for the deflate command
#[derive(Args, Debug)]
pub struct DeflateArgs {
    /// Path to a flat document (JSON or YAML), or '-' for stdin
    #[arg(value_name = "FLAT")]
    pub flat: PathBuf,

    /// Path segment separator
    #[arg(long)]
    pub separator: Option<String>,
}

/// Arguments for generating shell completions
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_validate_arguments() {
        let cli = Cli::parse_from([
            "schematics",
            "-vv",
            "-o",
            "json-pretty",
            "validate",
            "--schema",
            "schema.yaml",
            "--id-key",
            "meta.id",
            "--join",
            "; ",
            "data.json",
        ]);
        assert_eq!(cli.verbosity_level(), 2);
        assert_eq!(cli.output, OutputFormat::JsonPretty);

        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.data, PathBuf::from("data.json"));
                assert_eq!(args.engine.schema, PathBuf::from("schema.yaml"));
                assert_eq!(args.engine.id_key.as_deref(), Some("meta.id"));
                assert_eq!(args.join.as_deref(), Some("; "));
                assert!(args.template.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_quiet_overrides_verbosity() {
        let cli = Cli::parse_from(["schematics", "--quiet", "flatten", "data.json"]);
        assert_eq!(cli.verbosity_level(), 0);

        assert!(Cli::try_parse_from(["schematics", "-q", "-v", "flatten", "data.json"]).is_err());
    }

    #[test]
    fn test_operate_requires_schema() {
        assert!(Cli::try_parse_from(["schematics", "operate", "data.json"]).is_err());

        let cli = Cli::parse_from([
            "schematics",
            "operate",
            "-s",
            "s.json",
            "d.json",
            "--save-to",
            "out.yaml",
        ]);
        match cli.command {
            Commands::Operate(args) => assert_eq!(args.save_to, Some(PathBuf::from("out.yaml"))),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
