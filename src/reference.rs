// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Image references discovered in scanned text.
//!
//! A reference is only materialized when its digest uses `sha256` and its
//! name lives inside the configured organization namespace. The derived
//! [`ImageReference::key`] is a label-safe identifier used both for
//! deduplication and as the field name in the generated record.

/// Digest algorithm accepted by the generator.
const SHA256_PREFIX: &str = "sha256:";

/// Raw `name:tag@digest` triple captured by the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub struct RawMatch<'text,>
{
    /// Full name token, including any registry component.
    pub name:   &'text str,
    /// Tag preceding the digest.
    pub tag:    &'text str,
    /// Digest including its algorithm, e.g. `sha256:abc…`.
    pub digest: &'text str,
}

/// One discovered, deduplicated image mention.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct ImageReference
{
    /// First path segment of the name, empty when the name has none.
    pub registry: String,
    /// Image name without the registry segment.
    pub name:     String,
    /// Tag portion preceding the digest.
    pub version:  String,
    /// Hex digest with the `sha256:` prefix stripped.
    pub sha256:   String,
    /// Identifier derived from the name relative to the organization prefix.
    pub key:      String,
}

impl ImageReference
{
    /// Builds a reference from a raw match.
    ///
    /// Returns `None` when the digest algorithm is not `sha256` or when the
    /// name (after splitting off the registry) does not start with `prefix`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dhall_docker_img::{ImageReference, RawMatch};
    ///
    /// let raw = RawMatch {
    ///     name:   "index.docker.io/sourcegraph/frontend",
    ///     tag:    "3.14.0",
    ///     digest: "sha256:0123456789abcdef0123456789abcdef",
    /// };
    /// let reference = ImageReference::from_match(&raw, "sourcegraph/",).expect("accepted",);
    /// assert_eq!(reference.registry, "index.docker.io");
    /// assert_eq!(reference.name, "sourcegraph/frontend");
    /// assert_eq!(reference.key, "frontend");
    /// ```
    pub fn from_match(raw: &RawMatch<'_,>, prefix: &str,) -> Option<Self,>
    {
        let sha256 = raw.digest.strip_prefix(SHA256_PREFIX,)?;
        let (registry, name,) = split_registry(raw.name,);
        let key = derive_key(name, prefix,)?;

        Some(Self {
            registry: registry.to_owned(),
            name: name.to_owned(),
            version: raw.tag.to_owned(),
            sha256: sha256.to_owned(),
            key,
        },)
    }
}

/// Splits a name token into `(registry, name)` on its first `/`.
///
/// Names without `/` have an empty registry.
pub fn split_registry(token: &str,) -> (&str, &str,)
{
    token.split_once('/',).unwrap_or(("", token,),)
}

/// Derives the record key for `name`: the name with `prefix` stripped and
/// every `.` replaced by `_`. Returns `None` outside the namespace.
pub fn derive_key(name: &str, prefix: &str,) -> Option<String,>
{
    name.strip_prefix(prefix,).map(|rest| rest.replace('.', "_",),)
}
