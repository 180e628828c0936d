//! Default values for ci-include configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

/// File name of the pipeline configuration read when `--config` is omitted.
///
/// Can be overridden by the `--config` CLI flag or the `CI_INCLUDE_CONFIG`
/// environment variable.
pub const CONFIG_FILE: &str = ".gitlab-ci.yml";

/// Timeout, in seconds, for the single GET issued per remote reference.
///
/// Can be overridden by the `--timeout` CLI flag or the `CI_INCLUDE_TIMEOUT`
/// environment variable.
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// Returns the `User-Agent` sent with remote fetches.
pub fn user_agent() -> String {
    format!("ci-include/{}", env!("CARGO_PKG_VERSION"))
}
