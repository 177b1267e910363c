#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the scanner and CLI."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::path::{Path, PathBuf};

/// Unified error type returned by the scan pipeline and CLI.
///
/// Every variant is fatal to a run: the pipeline stops at the first error and
/// the CLI turns it into a non-zero exit status without emitting a record.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Wraps I/O errors that occur while opening or reading a source file.
    #[error("failed to read {path:?}: {source}")]
    Io {
        /// Location of the file being read.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps I/O errors that occur while reading standard input.
    #[error("failed to read standard input: {source}")]
    Stdin {
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps errors reported by the directory walk for a single entry.
    #[error("failed to walk {path:?}: {source}")]
    Walk {
        /// Root of the walk that reported the error.
        path:   PathBuf,
        /// Underlying traversal error.
        source: walkdir::Error
    },
    /// Wraps I/O errors that occur while writing the generated record.
    #[error("failed to write output: {source}")]
    Output {
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Returned when the reference pattern fails to compile.
    #[error("invalid reference pattern: {source}")]
    Pattern {
        /// Underlying regex compilation error.
        source: regex::Error
    },
    /// Returned when the scan configuration violates invariants.
    #[error("invalid configuration: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<regex::Error> for Error {
    fn from(source: regex::Error) -> Self {
        Self::Pattern {
            source
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::Walk`] variant capturing the walk root and source.
///
/// # Parameters
///
/// * `root` - Path argument whose traversal failed.
/// * `source` - Error reported by the directory walker.
pub fn walk_error(root: &Path, source: walkdir::Error) -> Error {
    Error::Walk {
        path: root.to_path_buf(),
        source
    }
}
