//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `ci-include` command-line tool. Each subcommand is defined in its own file.
//!
//! Each command module contains an `Args` struct derived with `clap` and an
//! `execute` function that calls into the `ci_include` library. Arguments
//! shared by every command live in [`SourceArgs`].

pub mod check;
pub mod resolve;

use anyhow::{Context as _, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

use ci_include::defaults;
use ci_include::document::{self, Document};
use ci_include::external::{Context, Sources};

/// Where the configuration and its external files are read from
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Path to the pipeline configuration file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "CI_INCLUDE_CONFIG",
        default_value = defaults::CONFIG_FILE
    )]
    pub config: PathBuf,

    /// Repository root that local includes are resolved against.
    ///
    /// Defaults to the current directory.
    #[arg(long, value_name = "DIR", env = "CI_INCLUDE_ROOT")]
    pub root: Option<PathBuf>,

    /// Commit to read local includes at.
    ///
    /// When set, local files are read from git at this revision instead of
    /// from the working tree.
    #[arg(long, value_name = "SHA", env = "CI_INCLUDE_SHA")]
    pub sha: Option<String>,

    /// Timeout in seconds for fetching remote includes.
    #[arg(
        long,
        value_name = "SECS",
        env = "CI_INCLUDE_TIMEOUT",
        default_value_t = defaults::HTTP_TIMEOUT_SECS
    )]
    pub timeout: u64,
}

impl SourceArgs {
    /// Reads and parses the configuration file.
    pub fn load(&self) -> Result<Document> {
        document::from_file(&self.config)
            .with_context(|| format!("Failed to load {}", self.config.display()))
    }

    /// Builds the sources used to fetch external files.
    pub fn sources(&self) -> Result<Sources> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("Failed to get current directory")?,
        };

        let context = Context::new(root, self.sha.clone());
        Ok(Sources::new(&context, Duration::from_secs(self.timeout))?)
    }
}
