//! Property-based tests for the external file processor.
//!
//! These tests use proptest to generate random documents and verify that
//! the precedence invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::document::{Document, INCLUDE_KEY};
    use crate::error::Result;
    use crate::external::{HttpOperations, RepositoryOperations, Sources};
    use crate::merge::fill_absent;
    use crate::processor::Processor;
    use proptest::prelude::*;
    use serde_yaml::Value;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use url::Url;

    /// Serves the same fragment for every local path and counts reads
    struct FragmentRepository {
        fragments: Vec<Document>,
        calls: Arc<Mutex<usize>>,
    }

    impl RepositoryOperations for FragmentRepository {
        fn read_file(&self, path: &str, _sha: &str) -> Result<Option<Vec<u8>>> {
            *self.calls.lock().unwrap() += 1;
            let index: usize = path.trim_end_matches(".yml").parse().unwrap_or(usize::MAX);
            Ok(self
                .fragments
                .get(index)
                .map(|doc| serde_yaml::to_string(doc).unwrap().into_bytes()))
        }

        fn root(&self) -> &Path {
            Path::new("/mock")
        }
    }

    struct NoHttp;

    impl HttpOperations for NoHttp {
        fn get(&self, url: &Url) -> Result<Vec<u8>> {
            panic!("unexpected GET {}", url);
        }
    }

    fn sources(fragments: Vec<Document>) -> (Sources, Arc<Mutex<usize>>) {
        let calls = Arc::new(Mutex::new(0));
        let sources = Sources::with_operations(
            Box::new(FragmentRepository {
                fragments,
                calls: calls.clone(),
            }),
            Box::new(NoHttp),
            "12345",
        );
        (sources, calls)
    }

    fn document_strategy() -> impl Strategy<Value = Document> {
        prop::collection::vec(("[a-e]", any::<i64>()), 0..6).prop_map(|entries| {
            entries
                .into_iter()
                .map(|(key, value)| (Value::from(key), Value::from(value)))
                .collect()
        })
    }

    proptest! {
        /// Property: documents without `include` come back unchanged with no I/O
        #[test]
        fn perform_without_include_is_identity(values in document_strategy()) {
            let (sources, calls) = sources(Vec::new());

            let output = Processor::new(&values, &sources).perform().unwrap();

            prop_assert_eq!(output, values);
            prop_assert_eq!(*calls.lock().unwrap(), 0);
        }

        /// Property: the input's keys keep their values over every fragment
        #[test]
        fn perform_keeps_input_values(
            values in document_strategy(),
            fragments in prop::collection::vec(document_strategy(), 1..4),
        ) {
            let include: Vec<Value> = (0..fragments.len())
                .map(|i| Value::from(format!("/{}.yml", i)))
                .collect();
            let mut input = values.clone();
            input.insert(Value::from(INCLUDE_KEY), Value::Sequence(include));

            let (sources, _) = sources(fragments.clone());
            let output = Processor::new(&input, &sources).perform().unwrap();

            prop_assert!(!output.contains_key(INCLUDE_KEY));
            for (key, value) in &values {
                prop_assert_eq!(output.get(key), Some(value));
            }

            // Every other key comes from the first fragment defining it
            for (key, value) in &output {
                if values.contains_key(key) {
                    continue;
                }
                let first = fragments.iter().find_map(|f| f.get(key));
                prop_assert_eq!(first, Some(value));
            }
        }

        /// Property: the merged key set is the union of both documents
        #[test]
        fn fill_absent_is_key_union(a in document_strategy(), b in document_strategy()) {
            let merged = fill_absent(a.clone(), b.clone(), "fragment");

            prop_assert!(a.keys().all(|k| merged.contains_key(k)));
            prop_assert!(b.keys().all(|k| merged.contains_key(k)));
            prop_assert!(merged.keys().all(|k| a.contains_key(k) || b.contains_key(k)));
        }
    }
}
