//! Status lines for the `check` command
//!
//! Every checked reference is reported on one line that starts with a
//! status marker. With color enabled the marker is an emoji and the text is
//! styled through `console`; otherwise the marker is a bracketed tag such as
//! `[ERR]` so logs and CI job output stay greppable.
//!
//! `--color=always|never` decides outright. Under `auto`, `NO_COLOR`,
//! `CLICOLOR`, `CLICOLOR_FORCE` and `TERM=dumb` are honored in that order
//! before falling back to whether stdout is a terminal.

use console::style;
use std::env;

/// The value of the global `--color` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Always,
    Never,
    Auto,
}

impl ColorChoice {
    /// Parses a flag value case-insensitively. Unknown values mean `Auto`.
    pub fn from_flag(flag: &str) -> Self {
        match flag.to_ascii_lowercase().as_str() {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }
}

/// Output settings shared by every line a command prints.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether markers are emoji and text is styled.
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolves color support from the `--color` flag and the environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match ColorChoice::from_flag(color_flag) {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => color_from_env(env_var)
                .unwrap_or_else(|| console::Term::stdout().features().colors_supported()),
        };

        Self { use_color }
    }

    /// Renders `text` as a status line.
    pub fn line(&self, status: Status, text: &str) -> String {
        let marker = marker(self, status);
        if !self.use_color {
            return format!("{} {}", marker, text);
        }

        let text = match status {
            Status::Ok => style(text).green(),
            Status::Failed => style(text).red().bold(),
            Status::Info => style(text).cyan(),
        };
        format!("{} {}", marker, text)
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var_os(name).map(|value| value.to_string_lossy().into_owned())
}

/// Decides color from environment variables alone.
///
/// Returns `None` when nothing in the environment decides, leaving it to
/// terminal detection.
fn color_from_env(var: impl Fn(&str) -> Option<String>) -> Option<bool> {
    // Presence alone disables, even when empty
    if var("NO_COLOR").is_some() {
        return Some(false);
    }
    if var("CLICOLOR").as_deref() == Some("0") {
        return Some(false);
    }
    if var("CLICOLOR_FORCE").is_some_and(|v| !v.is_empty() && v != "0") {
        return Some(true);
    }
    if var("TERM").as_deref() == Some("dumb") {
        return Some(false);
    }
    None
}

/// Status of one line of command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Failed,
    Info,
}

/// Returns the marker printed in front of a status line.
pub fn marker(config: &OutputConfig, status: Status) -> &'static str {
    match (config.use_color, status) {
        (true, Status::Ok) => "✅",
        (true, Status::Failed) => "❌",
        (true, Status::Info) => "🔍",
        (false, Status::Ok) => "[OK]",
        (false, Status::Failed) => "[ERR]",
        (false, Status::Info) => "[SCAN]",
    }
}
