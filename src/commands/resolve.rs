//! # Resolve Command Implementation
//!
//! Loads the pipeline configuration, resolves every `include` reference in
//! declared order, and writes the merged document as YAML. The first
//! invalid reference aborts the command and nothing is written.

use anyhow::{Context as _, Result};
use clap::Args;
use log::info;
use std::path::PathBuf;

use super::SourceArgs;
use ci_include::document;
use ci_include::processor::Processor;

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write the merged configuration to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Execute the resolve command
pub fn execute(args: ResolveArgs) -> Result<()> {
    let values = args.source.load()?;
    let sources = args.source.sources()?;

    let merged = Processor::new(&values, &sources)
        .perform()
        .with_context(|| {
            format!(
                "Failed to resolve includes in {}",
                args.source.config.display()
            )
        })?;

    let yaml = document::to_string(&merged)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &yaml)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote merged configuration to {}", path.display());
        }
        None => print!("{}", yaml),
    }

    Ok(())
}
