// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Regular expression that recognizes pinned image references in raw text.
//!
//! The grammar follows the container distribution reference format with the
//! tag and digest both required: `<name>:<tag>@<algorithm>:<hex>`. The
//! pattern is not anchored, so references are found anywhere inside YAML
//! values, Dhall strings or comments.

use regex::Regex;

use crate::{
    error::Error,
    reference::{ImageReference, RawMatch},
};

/// Hostname component of a registry domain.
const DOMAIN_COMPONENT: &str = r"(?:[a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9-]*[a-zA-Z0-9])";
/// Lowercase path component with `.`, `_`, `__` or dash-run separators.
const PATH_COMPONENT: &str = r"[a-z0-9]+(?:(?:[._]|__|[-]*)[a-z0-9]+)*";
/// ASCII word characters only, as in the distribution reference grammar.
const TAG: &str = r"[A-Za-z0-9_][A-Za-z0-9_.-]{0,127}";
const DIGEST: &str = r"[A-Za-z][A-Za-z0-9]*(?:[-_+.][A-Za-z][A-Za-z0-9]*)*:[[:xdigit:]]{32,}";

/// Builds the unanchored `name:tag@digest` pattern with three capture
/// groups.
fn reference_pattern() -> String
{
    let domain = format!(r"{DOMAIN_COMPONENT}(?:\.{DOMAIN_COMPONENT})*(?::[0-9]+)?");
    let name = format!(r"(?:{domain}/)?{PATH_COMPONENT}(?:/{PATH_COMPONENT})*");

    format!(r"({name}):({TAG})@({DIGEST})")
}

/// Extracts image references from blocks of text.
///
/// The compiled pattern is owned by the matcher and reused for every block
/// scanned during a run.
#[derive(Debug, Clone,)]
pub struct ReferenceMatcher
{
    pattern: Regex,
}

impl ReferenceMatcher
{
    /// Compiles the reference pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`] when the pattern fails to compile.
    pub fn new() -> Result<Self, Error,>
    {
        let pattern = Regex::new(&reference_pattern(),)?;
        Ok(Self {
            pattern,
        },)
    }

    /// Returns every non-overlapping `name:tag@digest` match in
    /// left-to-right order, regardless of digest algorithm or namespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use dhall_docker_img::ReferenceMatcher;
    ///
    /// let matcher = ReferenceMatcher::new().expect("pattern compiles",);
    /// let text = "image: redis:5.0@sha256:00000000000000000000000000000000";
    /// let found: Vec<_,> = matcher.raw_matches(text,).collect();
    /// assert_eq!(found.len(), 1);
    /// assert_eq!(found[0].name, "redis");
    /// assert_eq!(found[0].tag, "5.0");
    /// ```
    pub fn raw_matches<'matcher, 'text,>(
        &'matcher self,
        text: &'text str,
    ) -> impl Iterator<Item = RawMatch<'text,>,> + 'matcher
    where
        'text: 'matcher,
    {
        self.pattern.captures_iter(text,).filter_map(|captures| {
            Some(RawMatch {
                name:   captures.get(1,)?.as_str(),
                tag:    captures.get(2,)?.as_str(),
                digest: captures.get(3,)?.as_str(),
            },)
        },)
    }

    /// Returns the references in `text` that use a `sha256` digest and whose
    /// name lives under `prefix`, in left-to-right order. Duplicates are
    /// preserved; deduplication is the collector's job.
    pub fn references<'matcher,>(
        &'matcher self,
        text: &'matcher str,
        prefix: &'matcher str,
    ) -> impl Iterator<Item = ImageReference,> + 'matcher
    {
        self.raw_matches(text,).filter_map(move |raw| ImageReference::from_match(&raw, prefix,),)
    }
}
