//! `<img>` tag extraction from page HTML.
//!
//! Parsing is tolerant: malformed markup degrades to a partial or empty tag
//! list rather than an error, so a page with zero usable tags is a normal
//! run with zero downloads.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// Source attributes in priority order. Lazy-loading pages park the real URL
/// in `data-src` or `data-original` and leave `src` empty or absent.
const SRC_ATTRS: [&str; 3] = ["src", "data-src", "data-original"];

static IMG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("static selector"));

/// One `<img>` tag as found in the page, before URL resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImgTag {
    /// First non-empty of `src`, `data-src`, `data-original`, in that order.
    pub src: String,
    /// `alt` attribute, or empty string when absent.
    pub alt: String,
    /// `title` attribute, or empty string when absent.
    pub title: String,
}

/// Extracts all `<img>` tags with a usable source attribute, in document order.
pub fn extract_img_tags(html: &str) -> Vec<ImgTag> {
    let document = Html::parse_document(html);
    let mut tags = Vec::new();

    for element in document.select(&IMG_SELECTOR) {
        let src = SRC_ATTRS
            .iter()
            .filter_map(|attr| element.value().attr(attr))
            .map(str::trim)
            .find(|s| !s.is_empty());
        let Some(src) = src else { continue };

        tags.push(ImgTag {
            src: src.to_string(),
            alt: element.value().attr("alt").unwrap_or("").to_string(),
            title: element.value().attr("title").unwrap_or("").to_string(),
        });
    }

    tags
}
