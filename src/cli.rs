//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// CI Include - Resolve include directives in pipeline configurations
#[derive(Parser, Debug)]
#[command(name = "ci-include")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    ///
    /// `RUST_LOG` takes precedence when set.
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "warn",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve all includes and print the merged configuration
    Resolve(commands::resolve::ResolveArgs),

    /// Fetch every included file and report which ones are invalid
    Check(commands::check::CheckArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&self.log_level))
            .format_timestamp(None)
            .init();

        match self.command {
            Commands::Resolve(args) => commands::resolve::execute(args),
            Commands::Check(args) => commands::check::execute(args, &self.color),
        }
    }
}
