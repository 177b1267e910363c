// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Source discovery and reading.
//!
//! Path arguments are expanded into a lazy, deterministic sequence of
//! candidate files: each root is walked depth-first with directory entries
//! sorted by file name, and only files carrying a recognized extension are
//! yielded. Traversal errors surface as items so callers can abort on the
//! first one.

use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
    vec,
};

use walkdir::WalkDir;

use crate::{
    config::ScanConfig,
    error::{self, Error},
};

/// Lazy iterator over scannable files below a set of roots.
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
///
/// use dhall_docker_img::{ScanConfig, SourceFiles};
///
/// let config = ScanConfig::default();
/// for path in SourceFiles::new(vec![PathBuf::from("deploy",)], &config,) {
///     println!("{}", path?.display());
/// }
/// # Ok::<(), dhall_docker_img::Error,>(())
/// ```
pub struct SourceFiles<'config,>
{
    config:  &'config ScanConfig,
    roots:   vec::IntoIter<PathBuf,>,
    current: Option<(PathBuf, walkdir::IntoIter,),>,
}

impl<'config,> SourceFiles<'config,>
{
    /// Prepares a walk over `roots`. No filesystem access happens until the
    /// iterator is advanced.
    pub fn new(roots: Vec<PathBuf,>, config: &'config ScanConfig,) -> Self
    {
        Self {
            config,
            roots: roots.into_iter(),
            current: None,
        }
    }
}

impl Iterator for SourceFiles<'_,>
{
    type Item = Result<PathBuf, Error,>;

    fn next(&mut self,) -> Option<Self::Item,>
    {
        loop {
            if let Some((root, walk,),) = self.current.as_mut() {
                match walk.next() {
                    Some(Ok(entry,),) => {
                        if entry.file_type().is_dir() || !self.config.accepts(entry.path(),) {
                            continue;
                        }
                        return Some(Ok(entry.into_path(),),);
                    }
                    Some(Err(source,),) => {
                        let failure = error::walk_error(root.as_path(), source,);
                        self.current = None;
                        self.roots = Vec::new().into_iter();
                        return Some(Err(failure,),);
                    }
                    None => self.current = None,
                }
            }

            let root = self.roots.next()?;
            let walk = WalkDir::new(&root,).sort_by_file_name().into_iter();
            self.current = Some((root, walk,),);
        }
    }
}

/// Reads a source file in full.
///
/// Invalid UTF-8 sequences are replaced rather than rejected so that a stray
/// byte never aborts a scan.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be opened or read.
pub fn read_source(path: &Path,) -> Result<String, Error,>
{
    let bytes = fs::read(path,).map_err(|source| error::io_error(path, source,),)?;
    Ok(String::from_utf8_lossy(&bytes,).into_owned(),)
}

/// Reads an input stream (standard input in the CLI) in full.
///
/// # Errors
///
/// Returns [`Error::Stdin`] when reading fails.
pub fn read_stream<R: Read,>(mut reader: R,) -> Result<String, Error,>
{
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes,).map_err(|source| Error::Stdin {
        source,
    },)?;
    Ok(String::from_utf8_lossy(&bytes,).into_owned(),)
}
