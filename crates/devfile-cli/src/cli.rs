//! CLI argument parsing using clap derive

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use devfile_api::ComponentType;
use devfile_context::{DevfileLoader, LoaderConfig, loader::DEFAULT_MAX_SIZE};
use devfile_parser::ParserOptions;
use serde_json::Value;

/// Devfile - parse and flatten devfiles with their parents and plugins
#[derive(Parser, Debug)]
#[command(name = "devfile")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub parser_args: ParserArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Settings for loading and flattening
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ParserArgs {
    /// Fail on plugin components without a uri instead of skipping them
    #[arg(long, global = true)]
    pub strict_plugins: bool,

    /// HTTP timeout in seconds for fetching remote devfiles
    #[arg(long, global = true, env = "DEVFILE_HTTP_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Largest accepted devfile, in bytes
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_SIZE)]
    pub max_size: u64,
}

impl ParserArgs {
    pub fn build(&self) -> devfile_parser::Parser {
        let loader = DevfileLoader::with_config(LoaderConfig {
            timeout: self.timeout.map(Duration::from_secs),
            max_size: self.max_size,
        });
        devfile_parser::Parser::new()
            .with_loader(loader)
            .with_options(ParserOptions {
                strict_plugins: self.strict_plugins,
            })
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Print a devfile, flattened unless --raw is given
    ///
    /// SOURCE is a file, a directory holding a devfile, an http(s) URL,
    /// or "-" to read from stdin.
    ///
    /// Examples:
    ///   devfile parse .                     # Flatten ./devfile.yaml
    ///   devfile parse stack.yaml --raw      # Print without resolving references
    ///   devfile parse https://host/d.yaml --json
    Parse {
        /// Devfile location
        #[arg(default_value = ".")]
        source: String,

        /// Do not resolve the parent or plugins
        #[arg(long)]
        raw: bool,

        /// Output as JSON instead of YAML
        #[arg(long)]
        json: bool,
    },

    /// List components, commands or projects
    List {
        /// What to list
        #[arg(value_enum)]
        kind: ListKind,

        /// Devfile location
        #[arg(default_value = ".")]
        source: String,

        /// Only elements whose attribute KEY equals VALUE (repeatable)
        #[arg(short, long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
        filter: Vec<(String, Value)>,

        /// Only components of this type
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        component_type: Option<ComponentType>,

        /// Do not resolve the parent or plugins
        #[arg(long)]
        raw: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show where project sources are synced inside a container
    SyncFolder {
        /// Devfile location
        #[arg(default_value = ".")]
        source: String,

        /// Container component to compute the folders for (default: first container)
        #[arg(short, long)]
        component: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Components,
    Commands,
    Projects,
}

/// Parse `KEY=VALUE`; VALUE is read as JSON when it parses, as a string otherwise.
fn parse_filter(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
