//! # External File Processor
//!
//! The processor resolves the `include` directive of a pipeline
//! configuration document. It reads the directive, resolves every reference
//! in declared order, and merges each fragment into a copy of the input with
//! first-writer-wins precedence:
//!
//! 1. A document without `include` is returned unchanged, with no I/O.
//! 2. `include` is normalized to a list of references. A single string is a
//!    one-element list.
//! 3. The result starts as the input without `include`, so the caller's own
//!    keys outrank every fragment.
//! 4. Each fragment only fills in keys the result does not hold yet, so
//!    earlier references outrank later ones.
//!
//! The first failing reference aborts the call. No partial result is
//! returned.

use log::{debug, info};
use serde_yaml::Value;

use crate::document::{self, Document, INCLUDE_KEY};
use crate::error::{Error, Result};
use crate::external::{self, ExternalFile, Sources};
use crate::merge;

/// Resolves the `include` directive of one configuration document.
pub struct Processor<'a> {
    values: &'a Document,
    sources: &'a Sources,
}

impl<'a> Processor<'a> {
    pub fn new(values: &'a Document, sources: &'a Sources) -> Self {
        Self { values, sources }
    }

    /// Returns the merged document with `include` resolved and removed.
    ///
    /// # Errors
    ///
    /// - `Error::File` if `include` holds something other than a string or a
    ///   list of strings, or if any reference is invalid or cannot be fetched.
    /// - `Error::Format` if a fetched fragment is not a mapping.
    pub fn perform(&self) -> Result<Document> {
        let Some(include) = document::get(self.values, INCLUDE_KEY) else {
            return Ok(self.values.clone());
        };

        let locations = references(include)?;
        debug!("Resolving {} external file(s)", locations.len());

        let mut result = without_include(self.values);
        for location in &locations {
            let fragment = external::resolve(location, self.sources)?;

            let before = result.len();
            result = merge::fill_absent(result, fragment, location);
            info!("Included {} ({} new key(s))", location, result.len() - before);
        }

        Ok(result)
    }

    /// Resolves every reference independently, without merging.
    ///
    /// Unlike [`perform`](Self::perform), a failing reference does not stop
    /// the others from being checked. A document without `include` yields an
    /// empty report.
    ///
    /// # Errors
    ///
    /// Returns `Error::File` only if the `include` value itself has an
    /// unsupported type.
    pub fn inspect(&self) -> Result<Vec<ReferenceReport>> {
        let Some(include) = document::get(self.values, INCLUDE_KEY) else {
            return Ok(Vec::new());
        };

        let reports = references(include)?
            .into_iter()
            .map(|location| {
                let outcome = ExternalFile::classify(&location)
                    .and_then(|file| file.fetch(self.sources))
                    .map(|fragment| fragment.len());
                ReferenceReport { location, outcome }
            })
            .collect();

        Ok(reports)
    }
}

/// The outcome of resolving one reference in [`Processor::inspect`].
#[derive(Debug)]
pub struct ReferenceReport {
    /// The reference as written in the document.
    pub location: String,
    /// Number of top-level keys in the fragment, or why it failed.
    pub outcome: Result<usize>,
}

/// Normalizes an `include` value into an ordered list of references.
///
/// # Examples
///
/// ```
/// use ci_include::processor::references;
/// use serde_yaml::Value;
///
/// let single = Value::from("/templates/a.yml");
/// assert_eq!(references(&single).unwrap(), vec!["/templates/a.yml"]);
///
/// assert!(references(&Value::from(42)).is_err());
/// ```
pub fn references(include: &Value) -> Result<Vec<String>> {
    match include {
        Value::String(location) => Ok(vec![location.clone()]),
        Value::Sequence(items) => items
            .iter()
            .map(|item| match item {
                Value::String(location) => Ok(location.clone()),
                other => Err(Error::file(render(other))),
            })
            .collect(),
        other => Err(Error::file(render(other))),
    }
}

fn without_include(values: &Document) -> Document {
    values
        .iter()
        .filter(|(key, _)| key.as_str() != Some(INCLUDE_KEY))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Renders a non-string include value for an error message.
fn render(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim().replace('\n', " "))
        .unwrap_or_else(|_| format!("{:?}", value))
}
