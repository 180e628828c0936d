//! Local external files
//!
//! A local reference is a path beginning with `/`, interpreted relative to
//! the root of the repository the pipeline belongs to. Content is read
//! through [`RepositoryOperations`] so it can come from a git revision or a
//! plain directory, and so tests can inject mocks.

use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Trait for reading files from the allowed root - allows mocking in tests
pub trait RepositoryOperations: Send + Sync {
    /// Reads the regular file at `path` as of revision `sha`.
    ///
    /// `path` is repository-relative and `/`-separated with no leading slash.
    /// Returns `Ok(None)` when no regular file exists at that path.
    fn read_file(&self, path: &str, sha: &str) -> Result<Option<Vec<u8>>>;

    /// The root this repository reads from, for diagnostics.
    fn root(&self) -> &Path;
}

/// Reads files from a git repository at a pinned revision using the system
/// `git` command.
pub struct GitRepository {
    root: PathBuf,
}

impl GitRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Runs `git -C <root> <args>`, returning stdout on success and `None`
    /// when git exits with a failure status.
    fn git(&self, args: &[&str]) -> Result<Option<Vec<u8>>> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.root)
            .args(args)
            .output()
            .map_err(|e| Error::GitCommand {
                command: args.join(" "),
                repository: self.root.display().to_string(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            debug!(
                "git {} failed in {}: {}",
                args.join(" "),
                self.root.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(None);
        }

        Ok(Some(output.stdout))
    }
}

impl RepositoryOperations for GitRepository {
    fn read_file(&self, path: &str, sha: &str) -> Result<Option<Vec<u8>>> {
        if sha.is_empty() || sha.starts_with('-') {
            return Err(Error::GitCommand {
                command: "ls-tree".to_string(),
                repository: self.root.display().to_string(),
                stderr: format!("invalid revision '{}'", sha),
            });
        }

        let listing = match self.git(&["ls-tree", "-z", "--full-tree", sha, "--", path])? {
            Some(listing) => listing,
            None => return Ok(None),
        };

        let listing = String::from_utf8_lossy(&listing);
        match regular_blob(&listing, path) {
            Some(object) => self.git(&["cat-file", "blob", object]),
            None => Ok(None),
        }
    }

    fn root(&self) -> &Path {
        &self.root
    }
}

/// Tree entry modes of regular files. Symlinks (`120000`) are blobs too.
const REGULAR_FILE_MODES: &[&str] = &["100644", "100755"];

/// Finds the object id of the regular file `path` in `git ls-tree -z` output.
///
/// Entries are `<mode> <type> <object>\t<path>`, NUL-terminated.
fn regular_blob<'a>(listing: &'a str, path: &str) -> Option<&'a str> {
    listing.split('\0').find_map(|entry| {
        let (meta, name) = entry.split_once('\t')?;
        if name != path {
            return None;
        }

        let mut fields = meta.split(' ');
        let mode = fields.next()?;
        let kind = fields.next()?;
        let object = fields.next()?;

        if kind != "blob" || !REGULAR_FILE_MODES.contains(&mode) {
            debug!("{}: tree entry {} {} is not a regular file", path, mode, kind);
            return None;
        }

        Some(object)
    })
}

/// Reads files from a directory on disk. The revision is ignored.
pub struct WorkingTree {
    root: PathBuf,
}

impl WorkingTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl RepositoryOperations for WorkingTree {
    fn read_file(&self, path: &str, _sha: &str) -> Result<Option<Vec<u8>>> {
        let root = self.root.canonicalize()?;

        let resolved = match root.join(path).canonicalize() {
            Ok(resolved) => resolved,
            Err(e) => {
                debug!("{} does not resolve under {}: {}", path, root.display(), e);
                return Ok(None);
            }
        };

        // Symlinks may point anywhere
        if !resolved.starts_with(&root) {
            warn!(
                "{} resolves to {}, outside of {}",
                path,
                resolved.display(),
                root.display()
            );
            return Ok(None);
        }

        if !resolved.is_file() {
            return Ok(None);
        }

        Ok(Some(fs::read(&resolved)?))
    }

    fn root(&self) -> &Path {
        &self.root
    }
}

/// A reference to a file inside the allowed root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    location: String,
}

impl LocalFile {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// The repository-relative path of this reference.
    ///
    /// Returns `None` if the path names the root itself or climbs out of it
    /// with `..`.
    pub fn relative_path(&self) -> Option<String> {
        let mut parts = Vec::new();
        for part in self.location.split('/') {
            match part {
                "" | "." => continue,
                ".." => return None,
                part => parts.push(part),
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("/"))
        }
    }

    /// Reads the raw content of this file from `repository` at `sha`.
    ///
    /// Every failure, including collaborator errors, is reported as an
    /// `Error::File` naming this reference.
    pub fn content(&self, repository: &dyn RepositoryOperations, sha: &str) -> Result<Vec<u8>> {
        let path = self
            .relative_path()
            .ok_or_else(|| Error::file(&self.location))?;

        match repository.read_file(&path, sha) {
            Ok(Some(content)) => Ok(content),
            Ok(None) => {
                debug!(
                    "{}: no regular file under {}",
                    self.location,
                    repository.root().display()
                );
                Err(Error::file(&self.location))
            }
            Err(e) => {
                warn!("{}: {}", self.location, e);
                Err(Error::file(&self.location))
            }
        }
    }
}
