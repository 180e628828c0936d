//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new()
//!     .with_config("include: /templates/ruby.yml\n")
//!     .with_file("templates/ruby.yml", "image: ruby\n");
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::git_available;
    pub use super::TestFixture;
}

/// Returns `true` if a usable `git` binary is on the PATH.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A temporary repository holding a `.gitlab-ci.yml` and template files.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `.gitlab-ci.yml` configuration file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.with_file(".gitlab-ci.yml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the config file.
    #[allow(dead_code)]
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join(".gitlab-ci.yml")
    }

    /// Create a command configured to run in this fixture's directory.
    #[allow(dead_code)]
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("ci-include");
        cmd.current_dir(self.path())
            .env_remove("CI_INCLUDE_CONFIG")
            .env_remove("CI_INCLUDE_ROOT")
            .env_remove("CI_INCLUDE_SHA")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Turn the directory into a git repository, commit everything, and
    /// return the commit sha.
    #[allow(dead_code)]
    pub fn commit_all(&self, message: &str) -> String {
        if !self.path().join(".git").exists() {
            self.git(&["init", "--quiet"]);
        }
        self.git(&["add", "--all"]);
        self.git(&["commit", "--quiet", "--message", message]);
        self.git(&["rev-parse", "HEAD"]).trim().to_string()
    }

    fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .arg("-C")
            .arg(self.path())
            .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
            .args(["-c", "commit.gpgsign=false"])
            .args(args)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("git output is not UTF-8")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
