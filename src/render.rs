// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Dhall rendering of collected image references.
//!
//! The output binds a record named `images` and evaluates to it:
//!
//! ```text
//! let images =
//! {
//!     frontend = {
//!          registry = "index.docker.io"
//!          , name = "sourcegraph/frontend"
//!          , version = "3.14.0"
//!          , sha256 = "…"
//!       }
//!
//! }
//! in images
//! ```
//!
//! Entries use leading-comma separation. Values are quoted verbatim without
//! escaping. The whitespace layout is stable so regenerated files only
//! change when the referenced images do.

use std::io::{self, Write};

use crate::{error::Error, reference::ImageReference};

const HEADER: &str = "let images =\n{\n  ";
const FOOTER: &str = "\n}\nin images\n";

/// Writes the Dhall record for `references` into `writer`.
///
/// # Errors
///
/// Returns [`Error::Output`] when writing fails.
pub fn render_images<W: Write,>(writer: &mut W, references: &[ImageReference],) -> Result<(), Error,>
{
    write_record(writer, references,).map_err(|source| Error::Output {
        source,
    },)
}

/// Renders the Dhall record for `references` into a string.
///
/// # Examples
///
/// ```
/// use dhall_docker_img::render_to_string;
///
/// let rendered = render_to_string(&[],);
/// assert_eq!(rendered, "let images =\n{\n  \n}\nin images\n");
/// ```
pub fn render_to_string(references: &[ImageReference],) -> String
{
    let mut buffer = Vec::with_capacity(HEADER.len() + FOOTER.len() + references.len() * 192,);
    // Writing into a Vec cannot fail.
    let _ = write_record(&mut buffer, references,);
    String::from_utf8_lossy(&buffer,).into_owned()
}

fn write_record<W: Write,>(writer: &mut W, references: &[ImageReference],) -> io::Result<(),>
{
    writer.write_all(HEADER.as_bytes(),)?;

    for (index, reference,) in references.iter().enumerate() {
        let separator = if index > 0 { "," } else { "" };
        write!(
            writer,
            " {separator} {key} = {{\n         registry = \"{registry}\"\n         , name = \
             \"{name}\"\n         , version = \"{version}\"\n         , sha256 = \
             \"{sha256}\"\n      }}\n  ",
            key = reference.key,
            registry = reference.registry,
            name = reference.name,
            version = reference.version,
            sha256 = reference.sha256,
        )?;
    }

    writer.write_all(FOOTER.as_bytes(),)
}

#[cfg(test)]
mod tests
{
    use std::io::{self, Write};

    use super::{render_images, render_to_string};
    use crate::{Error, reference::ImageReference};

    fn reference(key: &str, registry: &str, version: &str, sha256: &str,) -> ImageReference
    {
        ImageReference {
            registry: registry.to_owned(),
            name:     format!("sourcegraph/{key}"),
            version:  version.to_owned(),
            sha256:   sha256.to_owned(),
            key:      key.to_owned(),
        }
    }

    #[test]
    fn empty_input_renders_empty_record()
    {
        let rendered = render_to_string(&[],);
        assert_eq!(rendered, "let images =\n{\n  \n}\nin images\n");

        let compact: String = rendered.split_whitespace().collect::<Vec<_,>>().join(" ",);
        assert_eq!(compact, "let images = { } in images");
    }

    #[test]
    fn single_entry_layout_is_stable()
    {
        let rendered = render_to_string(&[reference("frontend", "index.docker.io", "3.14.0", "abc",)],);

        let expected = concat!(
            "let images =\n",
            "{\n",
            "    frontend = {\n",
            "         registry = \"index.docker.io\"\n",
            "         , name = \"sourcegraph/frontend\"\n",
            "         , version = \"3.14.0\"\n",
            "         , sha256 = \"abc\"\n",
            "      }\n",
            "  \n",
            "}\n",
            "in images\n",
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn subsequent_entries_use_leading_commas()
    {
        let rendered = render_to_string(&[
            reference("frontend", "index.docker.io", "1", "aa",),
            reference("gitserver", "index.docker.io", "2", "bb",),
            reference("searcher", "index.docker.io", "3", "cc",),
        ],);

        assert!(rendered.contains("\n    frontend = {"));
        assert!(rendered.contains("\n   , gitserver = {"));
        assert!(rendered.contains("\n   , searcher = {"));
        assert_eq!(rendered.matches(", gitserver",).count(), 1);
        assert!(!rendered.contains(", frontend"));

        let frontend = rendered.find("frontend =",).expect("frontend entry",);
        let gitserver = rendered.find("gitserver =",).expect("gitserver entry",);
        let searcher = rendered.find("searcher =",).expect("searcher entry",);
        assert!(frontend < gitserver && gitserver < searcher);
        assert!(rendered.ends_with("}\nin images\n"));
    }

    #[test]
    fn empty_registry_renders_empty_string()
    {
        let rendered = render_to_string(&[reference("alpine", "", "3.10", "dd",)],);
        assert!(rendered.contains("registry = \"\"\n"));
    }

    #[test]
    fn values_are_not_escaped()
    {
        let rendered = render_to_string(&[reference("odd", "reg", "v\"1", "ee",)],);
        assert!(rendered.contains("version = \"v\"1\""));
    }

    #[test]
    fn render_images_matches_render_to_string()
    {
        let references = [reference("symbols", "index.docker.io", "3.14.0", "ff",)];
        let mut buffer = Vec::new();
        render_images(&mut buffer, &references,).expect("render should succeed",);

        assert_eq!(String::from_utf8(buffer,).expect("utf8",), render_to_string(&references));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe
    {
        fn write(&mut self, _buf: &[u8],) -> io::Result<usize,>
        {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed",),)
        }

        fn flush(&mut self,) -> io::Result<(),>
        {
            Ok((),)
        }
    }

    #[test]
    fn write_failures_map_to_output_error()
    {
        let error = render_images(&mut ClosedPipe, &[],).expect_err("write should fail",);
        assert!(matches!(error, Error::Output { .. }));
    }
}
