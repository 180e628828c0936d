//! # Configuration Documents
//!
//! A configuration document is an insertion-ordered mapping from key to an
//! arbitrary YAML value. This module wraps `serde_yaml` as the document
//! parser: it turns raw text into a [`Document`] or fails with
//! [`Error::Format`] when the text is not a mapping.
//!
//! Keys keep their insertion order so serialized output and test enumeration
//! are deterministic. Order is not significant for merging.

use serde_yaml::{Mapping, Value};
use std::path::Path;

use crate::error::{Error, Result};

/// A parsed configuration document.
pub type Document = Mapping;

/// The reserved key holding the include directive.
pub const INCLUDE_KEY: &str = "include";

/// Message used when the root of a document is not a mapping.
pub const INVALID_FORMAT: &str = "Invalid configuration format";

/// Parse raw text into a configuration document.
///
/// # Errors
///
/// Returns `Error::Format` if the text is not valid YAML, or if its root is
/// anything other than a mapping (a bare scalar, a sequence, or nothing).
///
/// # Examples
///
/// ```
/// use ci_include::document;
///
/// let doc = document::parse("image: ruby:2.2\n").unwrap();
/// assert_eq!(doc.len(), 1);
///
/// assert!(document::parse("invalid content file ////").is_err());
/// ```
pub fn parse(text: &str) -> Result<Document> {
    let value: Value =
        serde_yaml::from_str(text).map_err(|e| Error::format(e.to_string()))?;

    match value {
        Value::Mapping(map) => Ok(map),
        _ => Err(Error::format(INVALID_FORMAT)),
    }
}

/// Parse raw bytes into a configuration document.
///
/// Bytes that are not valid UTF-8 are a format error, not an I/O error.
pub fn parse_bytes(bytes: &[u8]) -> Result<Document> {
    let text = std::str::from_utf8(bytes).map_err(|e| Error::format(e.to_string()))?;
    parse(text)
}

/// Read and parse a configuration document from disk.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let content = std::fs::read(path.as_ref())?;
    parse_bytes(&content)
}

/// Serialize a document back to YAML text.
pub fn to_string(document: &Document) -> Result<String> {
    Ok(serde_yaml::to_string(document)?)
}

/// Look up a string key in a document.
pub fn get<'a>(document: &'a Document, key: &str) -> Option<&'a Value> {
    document.get(Value::String(key.to_string()))
}
