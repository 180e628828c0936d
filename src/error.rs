//! # Error Handling
//!
//! This module defines the centralized error type for `ci-include`. It uses
//! the `thiserror` library to derive an `Error` enum whose variants follow the
//! taxonomy callers care about:
//!
//! - **`Error::File`** (reference-invalid): an `include` reference does not
//!   look like a local path or a remote URL, or it could not be resolved.
//! - **`Error::Format`** (malformed-document): fetched content could not be
//!   parsed into a configuration mapping.
//!
//! The remaining variants describe collaborator failures (git, network, I/O).
//! The external file sources log those and convert them into `Error::File`
//! before they reach the processor, so the processor only ever surfaces the
//! two taxonomy variants for a reference.
//!
//! `Result<T>` is an alias for `std::result::Result<T, Error>`.

use thiserror::Error;

/// Main error type for ci-include operations
#[derive(Error, Debug)]
pub enum Error {
    /// An external file reference is not a valid local or remote file.
    ///
    /// The message always names the offending reference so the bad `include`
    /// entry can be located in the configuration source.
    #[error("External file: '{location}' should be a valid local or remote file")]
    File { location: String },

    /// A document could not be parsed into a configuration mapping.
    ///
    /// The message comes verbatim from the document parser.
    #[error("{message}")]
    Format { message: String },

    /// An error occurred while executing a Git command.
    #[error("Git command failed in {repository}: {command} - {stderr}")]
    GitCommand {
        command: String,
        repository: String,
        stderr: String,
    },

    /// An error occurred during a network operation.
    #[error("Network operation error: {url} - {message}")]
    Network { url: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML serialization error, wrapped from `serde_yaml::Error`.
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The reference is malformed or could not be resolved.
    ReferenceInvalid,
    /// The fetched content is not a configuration mapping.
    MalformedDocument,
    /// Any other failure (I/O on the input file, serialization, ...).
    Other,
}

impl Error {
    /// Shorthand for a reference-invalid error naming `location`.
    pub fn file(location: impl Into<String>) -> Self {
        Error::File {
            location: location.into(),
        }
    }

    /// Shorthand for a malformed-document error.
    pub fn format(message: impl Into<String>) -> Self {
        Error::Format {
            message: message.into(),
        }
    }

    /// Returns the taxonomy kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::File { .. } => ErrorKind::ReferenceInvalid,
            Error::Format { .. } => ErrorKind::MalformedDocument,
            _ => ErrorKind::Other,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
