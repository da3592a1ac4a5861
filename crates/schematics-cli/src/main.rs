//! Schematics CLI - Command-line interface for schema-driven JSON validation
//!
//! This is the main entry point for the Schematics CLI application, providing
//! commands for validating and transforming JSON or YAML data against a
//! schema, and for flattening and deflating documents.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    let result = Config::load_with_file(cli.config.as_deref()).and_then(|config| {
        control::set_override(cli.use_color() && config.output.color);

        if let Err(e) = init_logging(&cli, &config) {
            eprintln!("Failed to initialize logging: {}", e);
        }

        run(cli, &config)
    });

    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: &Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let use_color = cli.use_color() && config.output.color;
    let mut output = OutputWriter::new(cli.output, use_color, cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, config, &mut output),
        Commands::Operate(args) => handlers::handle_operate(args, config, &mut output),
        Commands::Flatten(args) => handlers::handle_flatten(args, config, &mut output),
        Commands::Deflate(args) => handlers::handle_deflate(args, config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let verbosity = cli.verbosity_level();
    let mut logging_config = LoggingConfig::from_verbosity(verbosity);

    // File settings, then environment overrides
    logging_config.merge_with_file(&config.logging, verbosity);
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "schematics",
            "-vv",
            "validate",
            "data.json",
            "-s",
            "schema.yaml",
        ]);
        assert_eq!(cli.verbosity_level(), 2);
        assert!(matches!(cli.command, Commands::Validate(_)));

        let cli = Cli::parse_from(["schematics", "--quiet", "flatten", "data.json"]);
        assert_eq!(cli.verbosity_level(), 0);
        assert!(cli.quiet);
    }
}
