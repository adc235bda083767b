//! CLI for the imgrab image scraper.

use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config;
use crate::name::NamingMode;
use crate::pipeline;

/// One-shot scraper: downloads every image referenced by a single web page.
#[derive(Debug, Parser)]
#[command(name = "imgrab")]
#[command(about = "imgrab: download every image from a web page", long_about = None)]
pub struct Cli {
    /// Page URL to scrape ("https://" is assumed when the scheme is missing).
    /// Prompted for interactively when omitted.
    pub url: Option<String>,

    /// Output directory (defaults to the configured folder, normally "downloaded_images").
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Organize downloads into subdirectories of similarly named images.
    #[arg(long)]
    pub group: bool,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        // Interactive fallback when no URL was given on the command line.
        let (url, output) = match cli.url {
            Some(url) => (url, cli.output),
            None => {
                let url = prompt("Enter the website URL to download images from: ")?;
                let output = match cli.output {
                    Some(dir) => Some(dir),
                    None => {
                        let answer = prompt(
                            "Enter output folder name (or press Enter for the default): ",
                        )?;
                        if answer.is_empty() {
                            None
                        } else {
                            Some(PathBuf::from(answer))
                        }
                    }
                };
                (url, output)
            }
        };
        anyhow::ensure!(!url.trim().is_empty(), "no URL given");

        let output = output.unwrap_or_else(|| PathBuf::from(&cfg.default_output_dir));
        let mode = if cli.group {
            NamingMode::Grouped
        } else {
            NamingMode::Flat
        };

        let summary = pipeline::run(&url, &output, mode, &cfg)?;

        println!();
        println!(
            "Download complete! Downloaded {} images to {}",
            summary.downloaded,
            output.display()
        );
        if let Some(groups) = summary.groups {
            println!("Organized into {} groups", groups);
        }

        Ok(())
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_url_output_and_group_flag() {
        let cli = Cli::try_parse_from(["imgrab", "site.example", "-o", "pics", "--group"]).unwrap();
        assert_eq!(cli.url.as_deref(), Some("site.example"));
        assert_eq!(cli.output.as_deref(), Some(std::path::Path::new("pics")));
        assert!(cli.group);
    }

    #[test]
    fn url_is_optional() {
        let cli = Cli::try_parse_from(["imgrab"]).unwrap();
        assert!(cli.url.is_none());
        assert!(cli.output.is_none());
        assert!(!cli.group);
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["imgrab", "--parallel"]).is_err());
    }
}
