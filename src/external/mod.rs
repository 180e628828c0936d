//! # External File Sources
//!
//! This module resolves a single `include` reference into a parsed
//! configuration fragment. A reference is first classified by shape into an
//! [`ExternalFile`], then fetched from the matching source:
//!
//! - **Local** (`local.rs`): a `/`-prefixed path read from the repository the
//!   pipeline belongs to, pinned to a revision.
//! - **Remote** (`remote.rs`): an `http`/`https` URL fetched with one GET.
//!
//! ## Design
//!
//! Both sources read through traits, `RepositoryOperations` and
//! `HttpOperations`, bundled in [`Sources`]. The defaults shell out to `git`
//! (or read a working tree) and use a blocking `reqwest` client; tests swap
//! in mock implementations to simulate files and responses without touching
//! the filesystem or network.

pub mod file;
pub mod local;
pub mod remote;

pub use file::ExternalFile;
pub use local::{GitRepository, LocalFile, RepositoryOperations, WorkingTree};
pub use remote::{DefaultHttpOperations, HttpOperations, RemoteFile};

use std::path::PathBuf;
use std::time::Duration;

use crate::document::Document;
use crate::error::Result;

/// Where local references are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// Root of the repository local references are resolved against.
    pub root: PathBuf,
    /// Revision to read local files at. `None` reads the working tree.
    pub sha: Option<String>,
}

impl Context {
    pub fn new(root: impl Into<PathBuf>, sha: Option<String>) -> Self {
        Self {
            root: root.into(),
            sha,
        }
    }
}

/// The collaborators used to fetch external files.
pub struct Sources {
    repository: Box<dyn RepositoryOperations>,
    http: Box<dyn HttpOperations>,
    sha: String,
}

impl Sources {
    /// Creates sources for `context` with the default operations.
    ///
    /// A context with a revision reads local files from git at that
    /// revision; without one, it reads the working tree under `root`.
    pub fn new(context: &Context, timeout: Duration) -> Result<Self> {
        let repository: Box<dyn RepositoryOperations> = match &context.sha {
            Some(_) => Box::new(GitRepository::new(&context.root)),
            None => Box::new(WorkingTree::new(&context.root)),
        };

        Ok(Self {
            repository,
            http: Box::new(DefaultHttpOperations::new(timeout)?),
            sha: context.sha.clone().unwrap_or_default(),
        })
    }

    /// Creates sources with custom `RepositoryOperations` and
    /// `HttpOperations` implementations.
    ///
    /// This is primarily used for testing to inject mock operations.
    pub fn with_operations(
        repository: Box<dyn RepositoryOperations>,
        http: Box<dyn HttpOperations>,
        sha: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            http,
            sha: sha.into(),
        }
    }

    pub fn repository(&self) -> &dyn RepositoryOperations {
        self.repository.as_ref()
    }

    pub fn http(&self) -> &dyn HttpOperations {
        self.http.as_ref()
    }

    pub fn sha(&self) -> &str {
        &self.sha
    }
}

/// Classifies, fetches and parses one reference.
pub fn resolve(location: &str, sources: &Sources) -> Result<Document> {
    ExternalFile::classify(location)?.fetch(sources)
}
