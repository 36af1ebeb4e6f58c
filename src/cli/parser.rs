//! CLI argument parsing with clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Container state notification dispatcher
#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(about = "Dispatch container state changes to notification exporters")]
#[command(long_about = "
herald reads container snapshots, keeps the latest state of every container
and turns state changes into notifications delivered through the configured
exporters (console, log).

EXAMPLES:
    # Replay snapshots from a file
    herald run --input snapshots.jsonl

    # Read snapshots from stdin
    cat snapshots.jsonl | herald run

    # Use a custom configuration file with debug logging
    herald --config /etc/herald/herald.toml --verbose run

    # Validate configuration and exit
    herald check
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute (defaults to `run` reading stdin)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Loads only this TOML file (plus HERALD_* environment overrides)
    /// instead of the layered files in the configuration directory.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` overlay is loaded. Takes precedence
    /// over HERALD_APP_ENV.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Process container snapshots (default)
    ///
    /// Reads one JSON container snapshot per line, e.g.
    ///   {"id":"c1","name":"web","image":"nginx","state":"running"}
    /// Blank lines are skipped. Stops at end of input or on Ctrl-C and
    /// delivers every pending notification before exiting.
    Run {
        /// Read snapshots from this file instead of stdin
        #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_input_path)]
        input: Option<PathBuf>,
    },
    /// Validate configuration and print the resulting wiring
    Check,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
