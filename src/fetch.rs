//! HTTP fetching via the curl crate (libcurl).
//!
//! One blocking GET per resource: the page fetch returns the body as text,
//! the image fetch returns the raw bytes plus the response `Content-Type`.
//! Everything runs on the calling thread; the pipeline is strictly
//! sequential by design.

use anyhow::{Context, Result};
use std::fmt;
use std::str;
use std::time::Duration;

/// Per-request knobs shared by the page and image fetches.
#[derive(Debug, Clone)]
pub struct FetchOptions<'a> {
    /// User-Agent header value.
    pub user_agent: &'a str,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// Total transfer timeout; `None` means no limit (used for the page fetch).
    pub timeout: Option<Duration>,
}

/// Error from a single image GET, kept classifiable so the pipeline can log
/// and skip the image without aborting the run.
#[derive(Debug)]
pub enum ImageFetchError {
    /// Curl reported an error (timeout, connection, TLS, ...).
    Curl(curl::Error),
    /// HTTP response had a non-2xx status.
    Http(u32),
    /// Response was 2xx but the Content-Type was not `image/*`.
    NotImage(String),
}

impl fmt::Display for ImageFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFetchError::Curl(e) => write!(f, "{}", e),
            ImageFetchError::Http(code) => write!(f, "HTTP {}", code),
            ImageFetchError::NotImage(ct) => {
                write!(f, "non-image content: {}", if ct.is_empty() { "(none)" } else { ct })
            }
        }
    }
}

impl std::error::Error for ImageFetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageFetchError::Curl(e) => Some(e),
            ImageFetchError::Http(_) | ImageFetchError::NotImage(_) => None,
        }
    }
}

/// Body and declared type of a successfully fetched image.
#[derive(Debug)]
pub struct ImageBody {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Fetches the target page and returns its body as text.
///
/// Follows redirects. A transport error or non-2xx status is fatal to the
/// whole run, so this returns a plain `anyhow` error with context.
pub fn fetch_page(url: &str, opts: &FetchOptions) -> Result<String> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(opts.user_agent)?;
    easy.connect_timeout(opts.connect_timeout)?;
    if let Some(timeout) = opts.timeout {
        easy.timeout(timeout)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform().context("GET request failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Fetches a single image and validates its declared content type.
///
/// The body is accumulated chunk by chunk from libcurl's write callback.
/// Any failure is returned as a classifiable [`ImageFetchError`]; the caller
/// decides whether to log-and-skip or abort.
pub fn fetch_image(url: &str, opts: &FetchOptions) -> Result<ImageBody, ImageFetchError> {
    let mut bytes: Vec<u8> = Vec::new();
    let mut content_type: Option<String> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(ImageFetchError::Curl)?;
    easy.follow_location(true).map_err(ImageFetchError::Curl)?;
    easy.max_redirections(10).map_err(ImageFetchError::Curl)?;
    easy.useragent(opts.user_agent).map_err(ImageFetchError::Curl)?;
    easy.connect_timeout(opts.connect_timeout)
        .map_err(ImageFetchError::Curl)?;
    if let Some(timeout) = opts.timeout {
        easy.timeout(timeout).map_err(ImageFetchError::Curl)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                // On redirects every hop's headers pass through here; the
                // final response's Content-Type wins.
                if let Some(value) = header_value(data, "content-type") {
                    content_type = Some(value);
                }
                true
            })
            .map_err(ImageFetchError::Curl)?;
        transfer
            .write_function(|data| {
                bytes.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(ImageFetchError::Curl)?;
        transfer.perform().map_err(ImageFetchError::Curl)?;
    }

    let code = easy.response_code().map_err(ImageFetchError::Curl)?;
    if !(200..300).contains(&code) {
        return Err(ImageFetchError::Http(code));
    }

    let content_type = content_type.unwrap_or_default();
    if !content_type.starts_with("image/") {
        return Err(ImageFetchError::NotImage(content_type));
    }

    Ok(ImageBody { bytes, content_type })
}

/// Parses one raw header line and returns its value if the name matches
/// (ASCII case-insensitive).
fn header_value(line: &[u8], name: &str) -> Option<String> {
    let line = str::from_utf8(line).ok()?;
    let (header, value) = line.split_once(':')?;
    if header.trim().eq_ignore_ascii_case(name) {
        Some(value.trim().to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_value_matches_case_insensitively() {
        assert_eq!(
            header_value(b"Content-Type: image/png\r\n", "content-type").as_deref(),
            Some("image/png")
        );
        assert_eq!(
            header_value(b"content-TYPE: text/html; charset=utf-8", "content-type").as_deref(),
            Some("text/html; charset=utf-8")
        );
    }

    #[test]
    fn header_value_ignores_other_headers() {
        assert_eq!(header_value(b"Content-Length: 42\r\n", "content-type"), None);
        assert_eq!(header_value(b"HTTP/1.1 200 OK\r\n", "content-type"), None);
    }

    #[test]
    fn image_fetch_error_display() {
        assert_eq!(ImageFetchError::Http(404).to_string(), "HTTP 404");
        assert_eq!(
            ImageFetchError::NotImage("text/html".to_string()).to_string(),
            "non-image content: text/html"
        );
        assert_eq!(
            ImageFetchError::NotImage(String::new()).to_string(),
            "non-image content: (none)"
        );
    }
}
