//! # Check Command Implementation
//!
//! This module implements the `check` subcommand, which fetches every file
//! named by the `include` directive and reports, per reference, whether it
//! resolves to a valid configuration fragment.
//!
//! Unlike `resolve`, a failing reference does not stop the others from being
//! checked, so a single run reports every bad entry. The command fails if
//! any reference is invalid.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;

use super::SourceArgs;
use ci_include::output::{OutputConfig, Status};
use ci_include::processor::Processor;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Execute the `check` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: CheckArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    println!(
        "{}",
        out.line(
            Status::Info,
            &format!("Checking includes in {}", args.source.config.display())
        )
    );

    let values = args.source.load()?;
    let sources = args.source.sources()?;
    let reports = Processor::new(&values, &sources).inspect()?;

    if reports.is_empty() {
        println!("{}", out.line(Status::Ok, "No external files included"));
        return Ok(());
    }

    let mut failures = 0;
    for report in &reports {
        match &report.outcome {
            Ok(keys) => println!(
                "{}",
                out.line(Status::Ok, &format!("{} ({} key(s))", report.location, keys))
            ),
            Err(e) => {
                failures += 1;
                println!("{}", out.line(Status::Failed, &report.location));
                println!("   {}", e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} external file(s) are invalid", failures, reports.len());
    }

    println!(
        "{}",
        out.line(
            Status::Ok,
            &format!("All {} external file(s) are valid", reports.len())
        )
    );
    Ok(())
}
