//! # CI Include Library
//!
//! This library resolves the `include` directive of a CI pipeline
//! configuration. Referenced fragments are fetched from the repository the
//! pipeline belongs to or from a remote URL, parsed, and merged into a single
//! configuration document. It is designed to be used by the `ci-include`
//! command-line tool but can also be embedded by anything that loads
//! pipeline configurations.
//!
//! ## Quick Example
//!
//! ```no_run
//! use ci_include::document;
//! use ci_include::external::{Context, Sources};
//! use ci_include::processor::Processor;
//! use std::time::Duration;
//!
//! let values = document::parse("include: /templates/ruby.yml\nimage: ruby:2.2").unwrap();
//!
//! let context = Context::new("/srv/project", Some("1a2b3c".to_string()));
//! let sources = Sources::new(&context, Duration::from_secs(10)).unwrap();
//!
//! let merged = Processor::new(&values, &sources).perform().unwrap();
//! assert!(document::get(&merged, "include").is_none());
//! ```
//!
//! ## Core Concepts
//!
//! - **Documents (`document`)**: Ordered key/value mappings parsed from YAML.
//! - **External files (`external`)**: Classification of a reference into a
//!   local path or a remote URL, and the sources that fetch each kind.
//! - **Merging (`merge`)**: First-writer-wins merge of a fragment into the
//!   accumulated document.
//! - **Processor (`processor`)**: Resolves every reference in order and
//!   returns the merged document without `include`.
//!
//! ## Precedence
//!
//! The caller's document outranks every fragment, and earlier references
//! outrank later ones. Any failing reference aborts the whole operation.

pub mod defaults;
pub mod document;
pub mod error;
pub mod external;
pub mod merge;
pub mod output;
pub mod processor;

#[cfg(test)]
mod processor_proptest;
