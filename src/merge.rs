//! Document merge with first-writer-wins precedence
//!
//! Fragments are merged shallowly: only top-level keys that the accumulator
//! does not already hold are copied over. Existing keys are never replaced,
//! so the caller's document and earlier fragments outrank later ones.

use log::debug;
use serde_yaml::Value;

use crate::document::Document;

/// Merge `fragment` into `accumulator`, returning the combined document.
///
/// Keys already present in `accumulator` keep their value. Keys only present
/// in `fragment` are appended in the fragment's order. `origin` names the
/// fragment for log output.
///
/// # Examples
///
/// ```
/// use ci_include::{document, merge};
///
/// let base = document::parse("image: ruby:2.2").unwrap();
/// let fragment = document::parse("image: php:5-fpm\nstages: [build]").unwrap();
///
/// let merged = merge::fill_absent(base, fragment, "/templates/php.yml");
/// assert_eq!(merged.len(), 2);
/// assert_eq!(document::get(&merged, "image").unwrap().as_str(), Some("ruby:2.2"));
/// ```
pub fn fill_absent(accumulator: Document, fragment: Document, origin: &str) -> Document {
    let mut merged = accumulator;

    for (key, value) in fragment {
        if merged.contains_key(&key) {
            debug!(
                "{}: key '{}' is already defined, keeping the existing value",
                origin,
                key_name(&key)
            );
            continue;
        }

        debug!("{}: adding key '{}'", origin, key_name(&key));
        merged.insert(key, value);
    }

    merged
}

fn key_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => format!("{:?}", other),
    }
}
