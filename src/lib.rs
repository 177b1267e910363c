// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Utilities for generating a Dhall record of pinned container images.
//!
//! The library scans YAML and Dhall sources (or any text stream) for image
//! references of the form `registry/name:tag@sha256:digest`, keeps the first
//! reference for every key inside the configured organization namespace, and
//! renders the result as a Dhall `let images = { … } in images` expression.

mod collector;
mod config;
mod error;
mod matcher;
mod reference;
mod render;
mod scan;
mod walker;

pub use collector::ImageCollector;
pub use config::{DEFAULT_EXTENSIONS, DEFAULT_PREFIX, ScanConfig};
pub use error::{Error, io_error, walk_error};
pub use matcher::ReferenceMatcher;
pub use reference::{ImageReference, RawMatch, derive_key, split_registry};
pub use render::{render_images, render_to_string};
pub use scan::{Scanner, scan};
pub use walker::{SourceFiles, read_source, read_stream};
