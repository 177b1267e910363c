// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Scan settings shared by the walker and the reference matcher.
//!
//! The defaults describe the historical behavior of the generator: image
//! names are keyed relative to the `sourcegraph/` namespace and only YAML and
//! Dhall sources are inspected during directory traversal.

use std::path::Path;

use crate::error::Error;

/// Organization namespace used for key derivation when none is configured.
pub const DEFAULT_PREFIX: &str = "sourcegraph/";
/// File extensions inspected during directory traversal.
pub const DEFAULT_EXTENSIONS: [&str; 3] = ["yaml", "yml", "dhall",];

/// Settings controlling which files are scanned and which names are emitted.
///
/// # Examples
///
/// ```
/// use dhall_docker_img::ScanConfig;
///
/// let config = ScanConfig::default().with_prefix("acme/",);
/// assert_eq!(config.prefix(), "acme/");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct ScanConfig
{
    prefix:     String,
    extensions: Vec<String,>,
}

impl Default for ScanConfig
{
    fn default() -> Self
    {
        Self {
            prefix:     DEFAULT_PREFIX.to_owned(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| (*ext).to_owned(),).collect(),
        }
    }
}

impl ScanConfig
{
    /// Replaces the organization prefix used for key derivation.
    pub fn with_prefix(mut self, prefix: impl Into<String,>,) -> Self
    {
        self.prefix = prefix.into();
        self
    }

    /// Replaces the set of recognized file extensions (without the dot).
    pub fn with_extensions<I, S,>(mut self, extensions: I,) -> Self
    where
        I: IntoIterator<Item = S,>,
        S: Into<String,>,
    {
        self.extensions = extensions.into_iter().map(Into::into,).collect();
        self
    }

    /// Organization prefix that image names must start with.
    pub fn prefix(&self,) -> &str
    {
        &self.prefix
    }

    /// Recognized file extensions, without the leading dot.
    pub fn extensions(&self,) -> &[String]
    {
        &self.extensions
    }

    /// Returns `true` when the path carries one of the recognized
    /// extensions. Matching is exact and case-sensitive.
    pub fn accepts(&self, path: &Path,) -> bool
    {
        path.extension()
            .and_then(|ext| ext.to_str(),)
            .is_some_and(|ext| self.extensions.iter().any(|known| known == ext,),)
    }

    /// Checks the invariants required by the scanner.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the prefix or the extension list is
    /// empty.
    pub fn validate(&self,) -> Result<(), Error,>
    {
        if self.prefix.is_empty() {
            return Err(Error::validation("prefix must not be empty",),);
        }
        if self.extensions.is_empty() {
            return Err(Error::validation("at least one file extension is required",),);
        }
        if let Some(bad,) = self.extensions.iter().find(|ext| ext.is_empty() || ext.starts_with('.',),)
        {
            return Err(Error::validation(format!(
                "file extension '{bad}' must be non-empty and given without a leading dot"
            ),),);
        }

        Ok((),)
    }
}
