//! Debrev - Main entrypoint.
//!
//! Command-line front end for the debrev text-expansion engine. It
//! initializes logging, loads configuration, and either runs the expansion
//! loop over standard input or performs configuration housekeeping.

mod config;
mod engine;
mod error;
mod field;
mod notify;
mod session;
mod source;
mod trie;

#[cfg(test)]
mod tests;

use std::io::BufRead;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use error::{set_error_reporter, DebrevError, DebrevResult, TracingErrorReporter};
use field::{EditableField, TextBuffer};
use session::Session;
use source::HttpCellSource;

/// Command line arguments for the debrev engine.
#[derive(Parser, Debug)]
#[clap(name = "debrev", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Load the abbreviation data and expand lines read from stdin
    Run {
        /// Data-source identifier (defaults to the configured sheet)
        #[clap(short, long, value_parser)]
        sheet: Option<String>,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
fn init_logging() -> DebrevResult<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_line_number(true)
        .with_file(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| DebrevError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Expand every line of standard input at its end-of-line cursor and print
/// the result.
async fn run(config: config::DebrevConfig, sheet: Option<String>) -> DebrevResult<()> {
    let source = HttpCellSource::new(config.source.clone()).map_err(DebrevError::Source)?;
    let mut session = Session::new(&config, Arc::new(source));

    let entries = session.activate(sheet.as_deref()).await?;
    info!(entries, "Session activated");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(DebrevError::Io)?;
        let mut field = TextBuffer::with_caret_at_end(&line);
        if let Some(replacement) = session.expand(&field.value(), field.selection_start()) {
            field.apply(&replacement);
        }
        println!("{}", field.value());
    }

    Ok(())
}

/// Main entry point for the application.
#[tokio::main]
async fn main() -> DebrevResult<()> {
    // Initialize logging early to capture any startup errors
    init_logging()?;

    // Set up error reporter
    set_error_reporter(Arc::new(TracingErrorReporter));

    // Parse command-line arguments
    let args = <Args as clap::Parser>::parse();

    // Load configuration
    let env_prefix = "DEBREV";
    let config_loader = config::ConfigLoader::new(args.config.as_deref(), env_prefix);

    match args.command.unwrap_or(Command::Run { sheet: None }) {
        Command::Run { sheet } => {
            info!("Starting debrev");

            // Load and validate configuration
            let config = match config_loader.load() {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("Configuration error: {}", e);
                    process::exit(1);
                }
            };

            config::init_global_config(config);

            // Log startup information
            let config = config::get_global_config().get().clone();
            info!(
                sheet = %config.source.default_sheet_id,
                debounce_ms = config.expander.debounce_ms,
                "Engine configured"
            );

            run(config, sheet).await
        }
        Command::Validate => {
            info!("Validating configuration");
            match config_loader.load() {
                Ok(_) => {
                    info!("Configuration validated successfully");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!("Configuration validation error: {}", e);
                    process::exit(1);
                }
            }
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let default_config = config::DebrevConfig::default();

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent).map_err(DebrevError::Io)?;
            }

            // Serialize to TOML
            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| DebrevError::Custom(format!("Failed to serialize config: {e}")))?;

            // Write to file
            std::fs::write(&output, toml).map_err(DebrevError::Io)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}
