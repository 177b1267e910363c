// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Ordered, first-wins accumulation of image references.

use std::collections::HashSet;

use crate::reference::ImageReference;

/// Accumulates distinct references keyed by [`ImageReference::key`].
///
/// The first reference offered for a key is kept; later references with the
/// same key are dropped, never merged. Insertion order is preserved.
#[derive(Debug, Default,)]
pub struct ImageCollector
{
    references: Vec<ImageReference,>,
    seen:       HashSet<String,>,
}

impl ImageCollector
{
    /// Creates an empty collector.
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Admits `reference` unless its key was already collected.
    ///
    /// Returns `true` when the reference was appended.
    ///
    /// # Examples
    ///
    /// ```
    /// use dhall_docker_img::{ImageCollector, ImageReference};
    ///
    /// let reference = ImageReference {
    ///     registry: "index.docker.io".to_owned(),
    ///     name:     "sourcegraph/frontend".to_owned(),
    ///     version:  "3.14.0".to_owned(),
    ///     sha256:   "00".repeat(32,),
    ///     key:      "frontend".to_owned(),
    /// };
    ///
    /// let mut collector = ImageCollector::new();
    /// assert!(collector.offer(reference.clone(),));
    /// assert!(!collector.offer(reference,));
    /// assert_eq!(collector.len(), 1);
    /// ```
    pub fn offer(&mut self, reference: ImageReference,) -> bool
    {
        if self.seen.contains(&reference.key,) {
            return false;
        }

        self.seen.insert(reference.key.clone(),);
        self.references.push(reference,);
        true
    }

    /// Number of distinct references collected so far.
    pub fn len(&self,) -> usize
    {
        self.references.len()
    }

    /// Returns `true` when nothing has been collected.
    pub fn is_empty(&self,) -> bool
    {
        self.references.is_empty()
    }

    /// Collected references in first-seen order.
    pub fn references(&self,) -> &[ImageReference]
    {
        &self.references
    }

    /// Consumes the collector, yielding references in first-seen order.
    pub fn into_references(self,) -> Vec<ImageReference,>
    {
        self.references
    }
}

#[cfg(test)]
mod tests
{
    use proptest::prelude::*;

    use super::ImageCollector;
    use crate::reference::ImageReference;

    fn reference(key: &str, version: &str,) -> ImageReference
    {
        ImageReference {
            registry: "index.docker.io".to_owned(),
            name:     format!("sourcegraph/{key}"),
            version:  version.to_owned(),
            sha256:   "ab".repeat(32,),
            key:      key.to_owned(),
        }
    }

    proptest! {
        #[test]
        fn collected_keys_are_unique_and_in_first_seen_order(keys in prop::collection::vec("[a-d]", 0..24)) {
            let mut collector = ImageCollector::new();
            for key in &keys {
                collector.offer(reference(key, "1.0"));
            }

            let mut expected: Vec<&str> = Vec::new();
            for key in &keys {
                if !expected.contains(&key.as_str()) {
                    expected.push(key);
                }
            }

            let collected: Vec<&str> =
                collector.references().iter().map(|reference| reference.key.as_str()).collect();
            prop_assert_eq!(collected, expected);
        }
    }

    #[test]
    fn new_collector_is_empty()
    {
        let collector = ImageCollector::new();
        assert!(collector.is_empty());
        assert_eq!(collector.len(), 0);
        assert!(collector.into_references().is_empty());
    }

    #[test]
    fn first_occurrence_wins()
    {
        let mut collector = ImageCollector::new();
        assert!(collector.offer(reference("frontend", "3.14.0"),));
        assert!(!collector.offer(reference("frontend", "3.15.0"),));

        let references = collector.into_references();
        assert_eq!(references.len(), 1);
        assert_eq!(references[0].version, "3.14.0");
    }

    #[test]
    fn distinct_keys_keep_insertion_order()
    {
        let mut collector = ImageCollector::new();
        collector.offer(reference("symbols", "1"),);
        collector.offer(reference("frontend", "1"),);
        collector.offer(reference("alpine", "1"),);

        let keys: Vec<_,> =
            collector.references().iter().map(|reference| reference.key.as_str(),).collect();
        assert_eq!(keys, ["symbols", "frontend", "alpine"]);
    }
}
