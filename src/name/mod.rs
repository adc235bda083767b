//! Filename derivation from resolved image URLs.
//!
//! Maps a resolved image to a safe, descriptive, extension-bearing filename.
//! A specialized branch handles one known CDN URL convention (see [`cdn`]);
//! everything else takes the general last-path-segment route. Uniqueness
//! within a directory is handled separately by [`UsedNames`].

mod cdn;
mod sanitize;
mod unique;

pub use cdn::KNOWN_CDN_MARKER;
pub use sanitize::{clean_filename, clean_text, usable_text};
pub use unique::UsedNames;

use sha2::{Digest, Sha256};
use url::Url;

use crate::resolve::ResolvedImage;

/// Whether alt/title metadata participates in naming, and whether images are
/// later clustered into subdirectories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingMode {
    /// Plain URL-derived names, everything in one directory.
    Flat,
    /// Alt/title-enriched names plus stem-based grouping.
    Grouped,
}

/// Derivation result: the candidate filename plus the original-name token
/// recovered from CDN URLs, which the grouper prefers as its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedName {
    pub filename: String,
    pub original_name: Option<String>,
}

/// A resolved image paired with its derived local filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedImage {
    pub url: String,
    pub filename: String,
    pub original_name: Option<String>,
}

/// Default extension when the source URL gives none.
const DEFAULT_EXT: &str = ".jpg";

/// Names too generic to keep when alt/title text can do better.
const GENERIC_NAMES: [&str; 4] = ["image.jpg", "img.jpg", "picture.jpg", ".jpg"];

/// Derives a candidate filename for one image.
pub fn derive_name(image: &ResolvedImage, mode: NamingMode) -> DerivedName {
    if image.url.contains(KNOWN_CDN_MARKER) {
        cdn::derive_cdn_name(image, mode)
    } else {
        general_name(image, mode)
    }
}

/// General path: last URL path segment, cleaned, `.jpg` appended when the
/// segment has no extension. In grouped mode a generic or very short result
/// is replaced by cleaned alt/title text suffixed with a URL digest.
fn general_name(image: &ResolvedImage, mode: NamingMode) -> DerivedName {
    let segment = last_path_segment(&image.url).unwrap_or_default();
    let mut filename = clean_filename(&segment);
    if split_extension(&filename).1.is_empty() {
        filename.push_str(DEFAULT_EXT);
    }

    if mode == NamingMode::Grouped && is_generic(&filename) {
        if let Some(text) = usable_text(&image.alt).or_else(|| usable_text(&image.title)) {
            filename = format!("{}_{}{}", text, url_digest(&image.url, 8), DEFAULT_EXT);
        }
    }

    DerivedName {
        filename,
        original_name: None,
    }
}

fn is_generic(filename: &str) -> bool {
    GENERIC_NAMES.contains(&filename) || filename.chars().count() < 5
}

/// Last path segment of the URL, which may be empty for trailing-slash paths.
fn last_path_segment(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path().rsplit('/').next().unwrap_or("");
    Some(segment.to_string())
}

/// Splits `name.ext` at the last dot. A dot at position 0 does not start an
/// extension (hidden-file convention), so `".jpg"` has no extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}

/// Truncated lowercase-hex SHA-256 of the URL string, used as a stable
/// uniqueness suffix when no better identifier exists.
pub(crate) fn url_digest(url: &str, len: usize) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let mut hex = hex::encode(digest);
    hex.truncate(len);
    hex
}
