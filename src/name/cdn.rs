//! Specialized naming for one known CDN URL convention.
//!
//! URLs on this host embed a UUID identifier and sometimes the uploaded
//! file's original name in the path segment right before a processing marker
//! (`format`, `preview`, `quality`). Neither the UUID nor the marker layout
//! is guaranteed, so every extraction step has a hash-based fallback.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{clean_filename, url_digest, usable_text, DerivedName, NamingMode};
use crate::resolve::ResolvedImage;

/// Host substring that selects this naming branch.
pub const KNOWN_CDN_MARKER: &str = "shgcdn.com";

static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12})")
        .expect("uuid pattern")
});

/// Path segment immediately preceding a `format`/`preview`/`quality` marker,
/// e.g. `/sunset-beach.jpg-/format/auto` captures `sunset-beach.jpg`.
static ORIGINAL_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/([^/]+?)(?:-/|-)?(?:format|preview|quality)").expect("original-name pattern")
});

pub(super) fn derive_cdn_name(image: &ResolvedImage, mode: NamingMode) -> DerivedName {
    let url = image.url.as_str();

    let original_name = ORIGINAL_NAME_RE
        .captures(url)
        .map(|caps| clean_filename(&caps[1]))
        .filter(|name| !name.is_empty());
    let uuid = UUID_RE.find(url).map(|m| m.as_str());

    let filename = match (mode, uuid) {
        (NamingMode::Flat, Some(uuid)) => format!("image_{uuid}.jpg"),
        (NamingMode::Flat, None) => format!("image_{}.jpg", url_digest(url, 12)),
        (NamingMode::Grouped, Some(uuid)) => {
            let tail = &uuid[uuid.len() - 8..];
            if let Some(name) = original_name.as_deref() {
                format!("{name}_{tail}.jpg")
            } else if let Some(text) = usable_text(&image.alt) {
                format!("{text}_{tail}.jpg")
            } else if let Some(text) = usable_text(&image.title) {
                format!("{text}_{tail}.jpg")
            } else {
                format!("image_{uuid}.jpg")
            }
        }
        (NamingMode::Grouped, None) => {
            if let Some(name) = original_name.as_deref() {
                format!("{name}_{}.jpg", url_digest(url, 8))
            } else {
                format!("image_{}.jpg", url_digest(url, 12))
            }
        }
    };

    DerivedName {
        filename,
        // Only grouped mode consumes the token; flat mode never groups.
        original_name: match mode {
            NamingMode::Grouped => original_name,
            NamingMode::Flat => None,
        },
    }
}
