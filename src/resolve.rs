//! Image URL resolution against the page URL.
//!
//! Raw `src` values come in four shapes: already absolute, scheme-relative
//! (`//host/path`), root-relative (`/path`), and plain relative. The first
//! three are handled by string assembly against the page's origin; the last
//! goes through standard relative-reference resolution (`.`/`..` collapse
//! against the base path).

use url::Url;

use crate::extract::ImgTag;

/// An image reference with a fully qualified URL and its naming metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub url: String,
    pub alt: String,
    pub title: String,
}

/// Ensures the page URL itself carries a scheme; bare hosts get `https://`.
pub fn normalize_page_url(input: &str) -> String {
    let input = input.trim();
    if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    }
}

/// Resolves one tag to an absolute URL, or drops it.
///
/// Dropped references: empty values, inline `data:image` payloads, and
/// extensionless-vector `.svg` files (case-sensitive suffix).
pub fn resolve(tag: &ImgTag, page: &Url) -> Option<ResolvedImage> {
    let raw = tag.src.trim();
    if raw.is_empty() {
        return None;
    }

    let url = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else if raw.starts_with("//") {
        format!("{}:{}", page.scheme(), raw)
    } else if raw.starts_with('/') {
        // ascii_serialization gives `scheme://host[:port]` with the default
        // port elided, matching what the page's address bar would show.
        format!("{}{}", page.origin().ascii_serialization(), raw)
    } else {
        page.join(raw).ok()?.to_string()
    };

    if url.contains("data:image") || url.ends_with(".svg") {
        tracing::debug!(url = %url, "filtered image reference");
        return None;
    }

    Some(ResolvedImage {
        url,
        alt: tag.alt.clone(),
        title: tag.title.clone(),
    })
}
