// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Scan pipeline tying together source discovery, matching and collection.
//!
//! A scan either completes and yields every collected reference, or stops at
//! the first error. Nothing is rendered by this module, which keeps the
//! all-or-nothing output guarantee in the hands of the caller.

use std::{io::Read, path::PathBuf};

use tracing::{debug, info};

use crate::{
    collector::ImageCollector,
    config::ScanConfig,
    error::Error,
    matcher::ReferenceMatcher,
    reference::ImageReference,
    walker::{self, SourceFiles},
};

/// Stateful scanner accumulating references across several text blocks.
#[derive(Debug,)]
pub struct Scanner
{
    config:    ScanConfig,
    matcher:   ReferenceMatcher,
    collector: ImageCollector,
}

impl Scanner
{
    /// Creates a scanner for the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the configuration is invalid and
    /// [`Error::Pattern`] when the reference pattern fails to compile.
    pub fn new(config: ScanConfig,) -> Result<Self, Error,>
    {
        config.validate()?;

        Ok(Self {
            config,
            matcher: ReferenceMatcher::new()?,
            collector: ImageCollector::new(),
        },)
    }

    /// Scans one block of text, offering every qualifying reference to the
    /// collector in left-to-right order. Returns the number of newly admitted
    /// references.
    pub fn scan_text(&mut self, text: &str,) -> usize
    {
        collect_references(&self.matcher, &mut self.collector, self.config.prefix(), text,)
    }

    /// Reads `reader` to the end and scans its contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Stdin`] when the stream cannot be read.
    pub fn scan_reader<R: Read,>(&mut self, reader: R,) -> Result<usize, Error,>
    {
        let contents = walker::read_stream(reader,)?;
        debug!(bytes = contents.len(), "scanning standard input");
        Ok(self.scan_text(&contents,),)
    }

    /// Walks every root and scans each recognized file.
    ///
    /// # Errors
    ///
    /// Returns the first traversal or read error; no further files are
    /// scanned after it.
    pub fn scan_paths(&mut self, roots: Vec<PathBuf,>,) -> Result<usize, Error,>
    {
        let Self {
            config,
            matcher,
            collector,
        } = self;
        let config: &ScanConfig = config;
        let mut admitted = 0;

        for path in SourceFiles::new(roots, config,) {
            let path = path?;
            let contents = walker::read_source(&path,)?;
            debug!(path = %path.display(), bytes = contents.len(), "scanning file");
            admitted += collect_references(matcher, collector, config.prefix(), &contents,);
        }

        Ok(admitted,)
    }

    /// References collected so far, in first-seen order.
    pub fn references(&self,) -> &[ImageReference]
    {
        self.collector.references()
    }

    /// Consumes the scanner and returns the collected references.
    pub fn finish(self,) -> Vec<ImageReference,>
    {
        info!(images = self.collector.len(), "scan complete");
        self.collector.into_references()
    }
}

/// Offers every qualifying reference in `text` to `collector` and returns
/// the number admitted.
fn collect_references(
    matcher: &ReferenceMatcher,
    collector: &mut ImageCollector,
    prefix: &str,
    text: &str,
) -> usize
{
    let mut admitted = 0;

    for reference in matcher.references(text, prefix,) {
        let key = reference.key.clone();
        if collector.offer(reference,) {
            debug!(key = %key, "collected image reference");
            admitted += 1;
        } else {
            debug!(key = %key, "skipping duplicate image reference");
        }
    }

    admitted
}

/// Scans `roots`, or `stdin` when no roots are given, and returns the
/// collected references.
///
/// # Errors
///
/// Propagates configuration, traversal and read errors. Nothing is returned
/// on failure, so callers never observe a partial result.
///
/// # Examples
///
/// ```
/// use dhall_docker_img::{ScanConfig, scan};
///
/// let input = "image: index.docker.io/sourcegraph/frontend:3.14.0@sha256:\
///              0123456789abcdef0123456789abcdef";
/// let references = scan(Vec::new(), input.as_bytes(), ScanConfig::default(),)?;
/// assert_eq!(references.len(), 1);
/// assert_eq!(references[0].key, "frontend");
/// # Ok::<(), dhall_docker_img::Error,>(())
/// ```
pub fn scan<R: Read,>(
    roots: Vec<PathBuf,>,
    stdin: R,
    config: ScanConfig,
) -> Result<Vec<ImageReference,>, Error,>
{
    let mut scanner = Scanner::new(config,)?;

    if roots.is_empty() {
        scanner.scan_reader(stdin,)?;
    } else {
        scanner.scan_paths(roots,)?;
    }

    Ok(scanner.finish(),)
}
