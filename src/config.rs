use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Fixed desktop-browser identifier sent with every request. Some hosts serve
/// image-free placeholder pages to clients that look like bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Global configuration loaded from `~/.config/imgrab/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImgrabConfig {
    /// User-Agent header sent with the page and image requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Connect timeout for every request, in seconds.
    pub connect_timeout_secs: u64,
    /// Total timeout for a single image GET, in seconds. The page fetch has
    /// no total timeout.
    pub image_timeout_secs: u64,
    /// Fixed pause after every image attempt, in milliseconds, to avoid
    /// hammering the origin server.
    pub delay_ms: u64,
    /// Output directory used when none is given on the command line.
    pub default_output_dir: String,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for ImgrabConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout_secs: 15,
            image_timeout_secs: 10,
            delay_ms: 500,
            default_output_dir: "downloaded_images".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgrab")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ImgrabConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ImgrabConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ImgrabConfig = toml::from_str(&data)?;
    Ok(cfg)
}
