//! Morphic CLI - Command-line interface for the conversion engine
//!
//! This is the main entry point for the Morphic CLI application, providing
//! commands for converting files between formats, listing the known formats
//! and inspecting configuration.

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
use logging::{timing::Timer, LogFormat, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    // Load configuration before logging so it can set defaults
    let config = Config::load_with_file(cli.config.as_deref());

    if let Err(e) = init_logging(&cli, config.as_ref().ok()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let result = config.and_then(|config| run(cli, config));

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
fn run(cli: Cli, config: Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let use_color = cli.use_color() && config.output.color;
    let mut output = OutputWriter::new(cli.output, use_color, cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Convert(args) => handlers::handle_convert(args, &config, &mut output),
        Commands::Formats(args) => handlers::handle_formats(args, &config, &mut output),
        Commands::Config(args) => handlers::handle_config(args, &config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: Option<&Config>) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());

    // Configuration file settings apply when no verbosity flag was given
    if let Some(settings) = config.map(|c| &c.logging) {
        if let Some(level) = settings.level.as_ref().filter(|_| cli.verbose == 0) {
            logging_config.level = level.clone();
        }
        if let Some(format) = LogFormat::parse(&settings.format) {
            if cli.verbose < 3 {
                logging_config.format = format;
            }
        }
    }

    // Apply environment overrides
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
        let cli = Cli::parse_from(["morphic", "formats"]);
        assert_eq!(cli.verbosity_level(), 0);

        let cli = Cli::parse_from(["morphic", "-vv", "convert", "in.csv", "--to", "Data"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["morphic", "--quiet", "config", "paths"]);
        assert_eq!(cli.verbosity_level(), 0);
    }
}
