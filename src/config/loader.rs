//! Configuration structures and loading logic.

use crate::config::date_format::{DateFormat, DEFAULT_DATE_FORMAT};
use crate::config::modes::{DownloadMode, MediaSize};
use crate::error::{Error, Result};
use crate::fs::NameTemplate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Default number of posts read from a timeline.
pub const DEFAULT_LIMIT: usize = 3000;

/// Main configuration structure, as read from the TOML file and CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub source: SourceConfig,
}

/// What to download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// User handle whose timeline is downloaded.
    #[serde(default)]
    pub user: Option<String>,

    /// Single post ID or status URL.
    #[serde(default)]
    pub tweet: Option<String>,

    /// Maximum number of posts read from the timeline.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            user: None,
            tweet: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Download options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Download images.
    #[serde(default)]
    pub images: bool,

    /// Download videos.
    #[serde(default)]
    pub videos: bool,

    /// Include retweets.
    #[serde(default)]
    pub retweets: bool,

    /// Only download retweets.
    #[serde(default)]
    pub retweets_only: bool,

    /// Only list posts that carry media.
    #[serde(default)]
    pub media_tweets_only: bool,

    /// Preferred image size (small, normal, large, orig).
    #[serde(default = "default_size")]
    pub size: String,

    /// Skip assets whose destination file already exists.
    #[serde(default)]
    pub update: bool,

    /// Base directory for downloads.
    #[serde(default)]
    pub output_directory: Option<PathBuf>,

    /// File name template, e.g. "{DATE}_{ID}".
    #[serde(default)]
    pub file_format: Option<String>,

    /// Date format for the {DATE} placeholder.
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Print media URLs instead of downloading them.
    #[serde(default)]
    pub url_only: bool,

    /// Cap on concurrent fetches. Unbounded when unset.
    #[serde(default)]
    pub max_concurrent_downloads: Option<usize>,

    /// Whether to print the banner.
    #[serde(default = "default_true")]
    pub show_banner: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            images: false,
            videos: false,
            retweets: false,
            retweets_only: false,
            media_tweets_only: false,
            size: default_size(),
            update: false,
            output_directory: None,
            file_format: None,
            date_format: default_date_format(),
            url_only: false,
            max_concurrent_downloads: None,
            show_banner: true,
        }
    }
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Proxy URL (http, https, socks5).
    #[serde(default)]
    pub proxy: Option<String>,

    /// User agent sent with every media request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Session / credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Log in with auth_token and ct0 values.
    #[serde(default)]
    pub login: bool,

    /// Log in with a full browser cookie string.
    #[serde(default)]
    pub use_cookies: bool,

    /// Where credentials are persisted.
    #[serde(default = "default_cookie_file")]
    pub cookie_file: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login: false,
            use_cookies: false,
            cookie_file: default_cookie_file(),
        }
    }
}

/// Post source configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Exported timeline file read by the archive source.
    #[serde(default)]
    pub archive: Option<PathBuf>,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_size() -> String {
    "orig".to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64)".to_string()
}

fn default_cookie_file() -> PathBuf {
    PathBuf::from("twmd_cookies.json")
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Immutable, validated settings shared by every job of a run.
///
/// Built once by [`resolve_run_config`](crate::config::resolve_run_config).
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Target user handle (without `@`).
    pub user: Option<String>,
    /// Single post ID; takes precedence over the timeline.
    pub single_post_id: Option<String>,
    pub limit: usize,
    pub download_images: bool,
    pub download_videos: bool,
    pub include_retweets: bool,
    pub only_retweets: bool,
    pub only_media_tweets: bool,
    pub size: MediaSize,
    pub skip_existing: bool,
    /// Directory that receives the layout (`video/`, `img/` or flat files).
    pub output_root: PathBuf,
    pub name_template: Option<NameTemplate>,
    pub date_format: DateFormat,
    pub url_only: bool,
    pub proxy: Option<Url>,
    pub user_agent: String,
    pub max_concurrent_downloads: Option<usize>,
}

impl RunConfig {
    /// Whether this run targets one post or a timeline.
    pub fn mode(&self) -> DownloadMode {
        if self.single_post_id.is_some() {
            DownloadMode::Single
        } else {
            DownloadMode::Timeline
        }
    }

    /// Whether downloads use the per-user `video/` + `img/` layout.
    pub fn user_layout(&self) -> bool {
        self.user.is_some()
    }

    /// Whether retweets are requested at all.
    pub fn wants_retweets(&self) -> bool {
        self.include_retweets || self.only_retweets
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            user: None,
            single_post_id: None,
            limit: DEFAULT_LIMIT,
            download_images: true,
            download_videos: true,
            include_retweets: false,
            only_retweets: false,
            only_media_tweets: false,
            size: MediaSize::Orig,
            skip_existing: false,
            output_root: PathBuf::from("."),
            name_template: None,
            date_format: DateFormat::default(),
            url_only: false,
            proxy: None,
            user_agent: default_user_agent(),
            max_concurrent_downloads: None,
        }
    }
}
