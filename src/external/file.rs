//! Classification of external file references

use log::debug;

use super::local::LocalFile;
use super::remote::RemoteFile;
use super::Sources;
use crate::document::{self, Document};
use crate::error::{Error, Result};

/// An external file reference, classified by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalFile {
    /// A path beginning with `/`, relative to the allowed root.
    Local(LocalFile),
    /// An `http` or `https` URL.
    Remote(RemoteFile),
}

impl ExternalFile {
    /// Classifies `location` without touching the filesystem or network.
    ///
    /// # Errors
    ///
    /// Returns `Error::File` if `location` is neither a `/`-prefixed path nor
    /// a URL with an accepted scheme.
    ///
    /// # Examples
    ///
    /// ```
    /// use ci_include::external::ExternalFile;
    ///
    /// assert!(matches!(
    ///     ExternalFile::classify("/templates/ruby.yml"),
    ///     Ok(ExternalFile::Local(_))
    /// ));
    /// assert!(matches!(
    ///     ExternalFile::classify("https://example.com/ci.yml"),
    ///     Ok(ExternalFile::Remote(_))
    /// ));
    /// assert!(ExternalFile::classify("not-valid://example.com/ci.yml").is_err());
    /// ```
    pub fn classify(location: &str) -> Result<Self> {
        let file = if location.starts_with('/') {
            ExternalFile::Local(LocalFile::new(location))
        } else if let Some(remote) = RemoteFile::parse(location) {
            ExternalFile::Remote(remote)
        } else {
            return Err(Error::file(location));
        };

        debug!("{}: classified as {}", location, file.kind());
        Ok(file)
    }

    /// The reference string this file was classified from.
    pub fn location(&self) -> &str {
        match self {
            ExternalFile::Local(file) => file.location(),
            ExternalFile::Remote(file) => file.location(),
        }
    }

    /// A short name for the source kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ExternalFile::Local(_) => "local",
            ExternalFile::Remote(_) => "remote",
        }
    }

    /// Fetches and parses this file.
    ///
    /// Fetch failures are `Error::File`; content that is not a mapping is
    /// `Error::Format`, passed through from the parser.
    pub fn fetch(&self, sources: &Sources) -> Result<Document> {
        match self {
            ExternalFile::Local(file) => {
                let content = file.content(sources.repository(), sources.sha())?;
                document::parse_bytes(&content)
            }
            ExternalFile::Remote(file) => {
                let content = file.content(sources.http())?;
                document::parse_bytes(&content)
            }
        }
    }
}
