//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Twitter/X media downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "twmd",
    version,
    about = "Download images and videos from Twitter/X users and posts",
    long_about = "A CLI tool to download images and videos from Twitter/X timelines or single posts.\n\n\
                  Videos are saved with a thumbnail, a library .nfo descriptor and an .ass caption file.",
    after_help = "Examples:\n  \
                  twmd -u Spraytrains -o ~/Downloads -a -r -n 300\n  \
                  twmd -u Spraytrains -o ~/Downloads -R -U -n 300\n  \
                  twmd --proxy socks5://127.0.0.1:9050 -t 156170319961391104\n  \
                  twmd -t 156170319961391104 -f \"{DATE} {ID}\" -d \"%Y-%m-%d_%H-%M-%S\""
)]
pub struct Args {
    /// User whose timeline to download.
    #[arg(short, long, value_name = "USERNAME")]
    pub user: Option<String>,

    /// Single post to download (ID or status URL).
    #[arg(short, long, value_name = "TWEET_ID")]
    pub tweet: Option<String>,

    /// Number of posts to download.
    #[arg(short = 'n', long = "nbr", value_name = "NBR")]
    pub limit: Option<usize>,

    /// Download images.
    #[arg(short = 'i', long = "img")]
    pub images: bool,

    /// Download videos.
    #[arg(short = 'v', long = "video")]
    pub videos: bool,

    /// Download images and videos.
    #[arg(short, long)]
    pub all: bool,

    /// Download retweets too.
    #[arg(short, long)]
    pub retweet: bool,

    /// Print media URLs without downloading them.
    #[arg(short = 'z', long = "url")]
    pub url_only: bool,

    /// Download only retweets.
    #[arg(short = 'R', long = "retweet-only")]
    pub retweet_only: bool,

    /// Download only posts with media.
    #[arg(short = 'M', long = "mediatweet-only")]
    pub media_tweet_only: bool,

    /// Image size: small, normal, large or orig.
    #[arg(short, long)]
    pub size: Option<String>,

    /// Download missing files only.
    #[arg(short = 'U', long)]
    pub update: bool,

    /// Output directory.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// File name template using {DATE} {USERNAME} {NAME} {TITLE} {ID}.
    #[arg(short = 'f', long = "file-format", value_name = "FORMAT")]
    pub file_format: Option<String>,

    /// Date format for {DATE} (strftime, or a Go reference layout).
    #[arg(short = 'd', long = "date-format", value_name = "FORMAT")]
    pub date_format: Option<String>,

    /// Log in with auth_token and ct0 cookies.
    ///
    /// The session is saved to the cookie file. Archive sources read a local
    /// file and do not use it.
    #[arg(short = 'L', long)]
    pub login: bool,

    /// Log in with a browser cookie string (saved like --login).
    #[arg(short = 'C', long)]
    pub cookies: bool,

    /// Proxy URL (http, https, socks5).
    #[arg(short, long, env = "TWMD_PROXY", value_name = "PROTO://HOST:PORT")]
    pub proxy: Option<String>,

    /// Don't print the banner.
    #[arg(short = 'B', long)]
    pub no_banner: bool,

    /// Path to configuration file.
    #[arg(long, default_value = "twmd.toml")]
    pub config: PathBuf,

    /// Exported timeline to read posts from (JSON or NDJSON).
    #[arg(long, env = "TWMD_ARCHIVE", value_name = "FILE")]
    pub archive: Option<PathBuf>,

    /// Maximum number of concurrent downloads.
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// File holding the saved session.
    #[arg(long, value_name = "FILE")]
    pub cookie_file: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(user) = self.user {
            config.target.user = Some(user);
        }

        if let Some(tweet) = self.tweet {
            config.target.tweet = Some(tweet);
        }

        if let Some(limit) = self.limit {
            config.target.limit = limit;
        }

        let options = &mut config.options;

        // Boolean flags (only override if set)
        if self.images || self.all {
            options.images = true;
        }

        if self.videos || self.all {
            options.videos = true;
        }

        if self.retweet {
            options.retweets = true;
        }

        if self.retweet_only {
            options.retweets_only = true;
        }

        if self.media_tweet_only {
            options.media_tweets_only = true;
        }

        if self.update {
            options.update = true;
        }

        if self.url_only {
            options.url_only = true;
        }

        if self.no_banner {
            options.show_banner = false;
        }

        if let Some(size) = self.size {
            options.size = size;
        }

        if let Some(output) = self.output {
            options.output_directory = Some(output);
        }

        if let Some(format) = self.file_format {
            options.file_format = Some(format);
        }

        if let Some(format) = self.date_format {
            options.date_format = format;
        }

        if let Some(concurrency) = self.concurrency {
            options.max_concurrent_downloads = Some(concurrency);
        }

        if let Some(proxy) = self.proxy {
            config.network.proxy = Some(proxy);
        }

        if self.login {
            config.session.login = true;
        }

        if self.cookies {
            config.session.use_cookies = true;
        }

        if let Some(cookie_file) = self.cookie_file {
            config.session.cookie_file = cookie_file;
        }

        if let Some(archive) = self.archive {
            config.source.archive = Some(archive);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let args = Args::try_parse_from([
            "twmd", "-u", "someone", "-a", "-r", "-n", "300", "-U", "-s", "small", "-o", "out",
        ])
        .unwrap();

        let mut config = Config::default();
        args.merge_into_config(&mut config);

        assert_eq!(config.target.user.as_deref(), Some("someone"));
        assert_eq!(config.target.limit, 300);
        assert!(config.options.images && config.options.videos);
        assert!(config.options.retweets);
        assert!(config.options.update);
        assert_eq!(config.options.size, "small");
        assert_eq!(config.options.output_directory, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_merge_keeps_file_values() {
        let mut config = Config::default();
        config.options.size = "normal".to_string();
        config.options.videos = true;
        config.session.cookie_file = PathBuf::from("saved.json");

        let args = Args::try_parse_from(["twmd", "-t", "123", "-C", "-B"]).unwrap();
        args.merge_into_config(&mut config);

        assert_eq!(config.target.tweet.as_deref(), Some("123"));
        assert_eq!(config.options.size, "normal");
        assert!(config.options.videos);
        assert!(!config.options.images);
        assert!(config.session.use_cookies);
        assert!(!config.options.show_banner);
        assert_eq!(config.session.cookie_file, PathBuf::from("saved.json"));
    }
}
