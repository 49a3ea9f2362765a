//! Devfile CLI
//!
//! Parses, flattens and inspects devfiles.

mod cli;
mod commands;
mod error;
mod source;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::{CliError, Result};
use source::Source;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
        tracing::debug!("Verbose mode enabled");
    }

    let parser = cli.parser_args.build();

    match cli.command {
        Commands::Parse { source, raw, json } => {
            commands::run_parse(&parser, &Source::new(&source), raw, json)
        }
        Commands::List {
            kind,
            source,
            filter,
            component_type,
            raw,
            json,
        } => commands::run_list(
            &parser,
            &Source::new(&source),
            kind,
            &filter,
            component_type,
            raw,
            json,
        ),
        Commands::SyncFolder {
            source,
            component,
            json,
        } => commands::run_sync_folder(&parser, &Source::new(&source), component.as_deref(), json),
    }
}
