//! End-to-end scrape pipeline: fetch page, extract tags, resolve URLs,
//! derive filenames, optionally group, then download sequentially.
//!
//! Only the initial page fetch can abort the run. Every per-image failure
//! (transport error, non-2xx status, non-image content type, write error)
//! is logged, counted as a skip, and the run continues.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::config::ImgrabConfig;
use crate::extract;
use crate::fetch::{self, FetchOptions, ImageFetchError};
use crate::group;
use crate::name::{self, NamedImage, NamingMode, UsedNames};
use crate::resolve;

/// Outcome of one run, reported on the console by the CLI.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// `<img>` tags found in the page (before resolution and filtering).
    pub tags_found: usize,
    /// Images written to disk.
    pub downloaded: usize,
    /// Images attempted but skipped (fetch failure or non-image content).
    pub skipped: usize,
    /// Number of groups formed; `None` in flat mode.
    pub groups: Option<usize>,
}

/// Runs the whole pipeline for one page.
pub fn run(
    page_url: &str,
    output_dir: &Path,
    mode: NamingMode,
    cfg: &ImgrabConfig,
) -> Result<RunSummary> {
    if !output_dir.exists() {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("create output folder {}", output_dir.display()))?;
        println!("Created folder: {}", output_dir.display());
    }

    let page_url = resolve::normalize_page_url(page_url);
    let page = url::Url::parse(&page_url)
        .with_context(|| format!("invalid page URL: {page_url}"))?;

    println!("Fetching webpage: {page_url}");
    let connect_timeout = Duration::from_secs(cfg.connect_timeout_secs);
    let page_opts = FetchOptions {
        user_agent: &cfg.user_agent,
        connect_timeout,
        timeout: None,
    };
    let html = fetch::fetch_page(&page_url, &page_opts)
        .with_context(|| format!("failed to fetch the webpage {page_url}"))?;

    let tags = extract::extract_img_tags(&html);
    println!("Found {} image tags", tags.len());
    tracing::info!(count = tags.len(), page = %page_url, "extracted image tags");

    let named: Vec<NamedImage> = tags
        .iter()
        .filter_map(|tag| resolve::resolve(tag, &page))
        .map(|image| {
            let derived = name::derive_name(&image, mode);
            NamedImage {
                url: image.url,
                filename: derived.filename,
                original_name: derived.original_name,
            }
        })
        .collect();

    let mut summary = RunSummary {
        tags_found: tags.len(),
        ..RunSummary::default()
    };
    let image_opts = FetchOptions {
        user_agent: &cfg.user_agent,
        connect_timeout,
        timeout: Some(Duration::from_secs(cfg.image_timeout_secs)),
    };
    let delay = Duration::from_millis(cfg.delay_ms);
    let mut used = UsedNames::new();

    match mode {
        NamingMode::Flat => {
            for image in &named {
                let filename = used.claim(output_dir, &image.filename);
                download_one(image, &output_dir.join(filename), &image_opts, delay, &mut summary);
            }
        }
        NamingMode::Grouped => {
            let groups = group::group_images(named);
            summary.groups = Some(groups.len());
            for group in &groups {
                // A subdirectory is only worth creating for genuine repeats.
                let dir = if group.images.len() > 1 {
                    let dir = output_dir.join(&group.key);
                    if !dir.exists() {
                        fs::create_dir_all(&dir).with_context(|| {
                            format!("create group folder {}", dir.display())
                        })?;
                        println!("Created group folder: {}", dir.display());
                    }
                    dir
                } else {
                    output_dir.to_path_buf()
                };

                for image in &group.images {
                    let filename = used.claim(&dir, &image.filename);
                    download_one(image, &dir.join(filename), &image_opts, delay, &mut summary);
                }
            }
        }
    }

    tracing::info!(
        downloaded = summary.downloaded,
        skipped = summary.skipped,
        "run finished"
    );
    Ok(summary)
}

/// Downloads one image to `path`, then pauses for the inter-request delay.
/// Failures are logged and counted; they never propagate.
fn download_one(
    image: &NamedImage,
    path: &Path,
    opts: &FetchOptions,
    delay: Duration,
    summary: &mut RunSummary,
) {
    println!("Downloading: {}", image.url);
    match fetch::fetch_image(&image.url, opts) {
        Ok(body) => match fs::write(path, &body.bytes) {
            Ok(()) => {
                summary.downloaded += 1;
                println!("Saved to: {}", path.display());
                tracing::debug!(
                    url = %image.url,
                    bytes = body.bytes.len(),
                    content_type = %body.content_type,
                    "saved image"
                );
            }
            Err(err) => {
                summary.skipped += 1;
                println!("Failed to save {}: {}", path.display(), err);
                tracing::warn!(url = %image.url, "write failed: {err}");
            }
        },
        Err(ImageFetchError::NotImage(ct)) => {
            summary.skipped += 1;
            println!("Skipping non-image content: {ct}");
            tracing::debug!(url = %image.url, content_type = %ct, "skipped non-image response");
        }
        Err(err) => {
            summary.skipped += 1;
            println!("Failed to download {}: {}", image.url, err);
            tracing::warn!(url = %image.url, "image fetch failed: {err}");
        }
    }

    // Unconditional pause after every attempt, successful or not.
    thread::sleep(delay);
}
