//! Configuration validation logic.

use std::path::PathBuf;

use regex::Regex;
use url::Url;

use crate::config::date_format::DateFormat;
use crate::config::loader::{Config, RunConfig};
use crate::config::modes::MediaSize;
use crate::error::{Error, Result};
use crate::fs::NameTemplate;

/// Maximum handle length accepted by the upstream service.
const MAX_HANDLE_LENGTH: usize = 15;

/// Proxy schemes the HTTP transport understands.
const PROXY_SCHEMES: &[&str] = &["http", "https", "socks5", "socks5h"];

/// Validate the merged configuration and build the run settings.
pub fn resolve_run_config(config: &Config) -> Result<RunConfig> {
    let options = &config.options;

    let user = non_empty(config.target.user.as_deref())
        .map(validate_handle)
        .transpose()?;
    let single_post_id = non_empty(config.target.tweet.as_deref())
        .map(parse_post_id)
        .transpose()?;

    if user.is_none() && single_post_id.is_none() {
        return Err(Error::MissingConfig(
            "target (specify a user with -u/--user or a post with -t/--tweet)".to_string(),
        ));
    }

    if !options.images && !options.videos && single_post_id.is_none() {
        return Err(Error::ConfigValidation {
            field: "media type".to_string(),
            message: "Specify what to download: -i/--img for images, -v/--video for videos or -a/--all for both".to_string(),
        });
    }

    if config.target.limit == 0 {
        return Err(Error::ConfigValidation {
            field: "limit".to_string(),
            message: "Number of posts must be greater than zero".to_string(),
        });
    }

    if options.max_concurrent_downloads == Some(0) {
        return Err(Error::ConfigValidation {
            field: "max_concurrent_downloads".to_string(),
            message: "Concurrency cap must be greater than zero".to_string(),
        });
    }

    let name_template = non_empty(options.file_format.as_deref())
        .map(NameTemplate::parse)
        .transpose()?;
    let date_format = DateFormat::parse(&options.date_format)?;
    let proxy = non_empty(config.network.proxy.as_deref())
        .map(parse_proxy)
        .transpose()?;

    let output_root = match (&single_post_id, &user) {
        (None, Some(user)) => match &options.output_directory {
            Some(dir) => dir.join(user),
            None => PathBuf::from(user),
        },
        _ => options
            .output_directory
            .clone()
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    Ok(RunConfig {
        user,
        single_post_id,
        limit: config.target.limit,
        download_images: options.images,
        download_videos: options.videos,
        include_retweets: options.retweets,
        only_retweets: options.retweets_only,
        only_media_tweets: options.media_tweets_only,
        size: parse_size(&options.size),
        skip_existing: options.update,
        output_root,
        name_template,
        date_format,
        url_only: options.url_only,
        proxy,
        user_agent: config.network.user_agent.clone(),
        max_concurrent_downloads: options.max_concurrent_downloads,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse the preferred size, falling back to native resolution.
pub fn parse_size(input: &str) -> MediaSize {
    match input.parse::<MediaSize>() {
        Ok(size) => size.normalized(),
        Err(_) => {
            tracing::error!("Unknown size '{}', using native resolution", input);
            MediaSize::Normal
        }
    }
}

/// Validate a user handle, returning it without a leading `@`.
pub fn validate_handle(handle: &str) -> Result<String> {
    let handle_pattern = Regex::new(r"^[A-Za-z0-9_]+$").unwrap();
    let clean = handle.trim_start_matches('@');

    if clean.len() > MAX_HANDLE_LENGTH {
        return Err(Error::ConfigValidation {
            field: "user".to_string(),
            message: format!(
                "Handle '{}' is too long (maximum {} characters)",
                handle, MAX_HANDLE_LENGTH
            ),
        });
    }

    if !handle_pattern.is_match(clean) {
        return Err(Error::ConfigValidation {
            field: "user".to_string(),
            message: format!(
                "Handle '{}' contains invalid characters. Only letters, digits and underscores allowed.",
                handle
            ),
        });
    }

    Ok(clean.to_string())
}

/// Extract a post ID from a status URL or a bare ID.
pub fn parse_post_id(input: &str) -> Result<String> {
    let input = input.trim();

    if input.starts_with("http://") || input.starts_with("https://") {
        // Pattern: https://x.com/<handle>/status/1234567890
        let status_pattern =
            Regex::new(r"(?:twitter|x)\.com/[^/]+/status(?:es)?/(\d+)").unwrap();

        if let Some(id) = status_pattern.captures(input).and_then(|c| c.get(1)) {
            return Ok(id.as_str().to_string());
        }

        return Err(Error::ConfigValidation {
            field: "tweet".to_string(),
            message: format!("Could not extract post ID from URL: {}", input),
        });
    }

    if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
        return Ok(input.to_string());
    }

    Err(Error::ConfigValidation {
        field: "tweet".to_string(),
        message: format!(
            "Invalid post ID: '{}'. Must be digits or a status URL.",
            input
        ),
    })
}

/// Parse and check a proxy URL.
pub fn parse_proxy(input: &str) -> Result<Url> {
    let url = Url::parse(input)?;

    if !PROXY_SCHEMES.contains(&url.scheme()) {
        return Err(Error::ConfigValidation {
            field: "proxy".to_string(),
            message: format!(
                "Unsupported proxy scheme '{}' (expected one of {})",
                url.scheme(),
                PROXY_SCHEMES.join(", ")
            ),
        });
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn user_config(user: &str) -> Config {
        let mut config = Config::default();
        config.target.user = Some(user.to_string());
        config.options.images = true;
        config
    }

    #[test]
    fn test_valid_handle() {
        assert_eq!(validate_handle("Spraytrains").unwrap(), "Spraytrains");
        assert_eq!(validate_handle("@user_name1").unwrap(), "user_name1");
    }

    #[test]
    fn test_invalid_handle() {
        assert!(validate_handle("bad-name").is_err());
        assert!(validate_handle("waytoolonghandle_x").is_err());
        assert!(validate_handle("@").is_err());
    }

    #[test]
    fn test_parse_post_id_direct() {
        assert_eq!(
            parse_post_id("156170319961391104").unwrap(),
            "156170319961391104"
        );
    }

    #[test]
    fn test_parse_post_id_url() {
        let url = "https://x.com/someone/status/156170319961391104?s=20";
        assert_eq!(parse_post_id(url).unwrap(), "156170319961391104");
        let url = "https://twitter.com/someone/status/42";
        assert_eq!(parse_post_id(url).unwrap(), "42");
    }

    #[test]
    fn test_parse_post_id_invalid() {
        assert!(parse_post_id("abc").is_err());
        assert!(parse_post_id("https://example.com/post/1").is_err());
    }

    #[test]
    fn test_missing_target() {
        let config = Config::default();
        let err = resolve_run_config(&config).unwrap_err();
        assert!(matches!(err, Error::MissingConfig(_)));
    }

    #[test]
    fn test_no_media_type_for_user() {
        let mut config = user_config("someone");
        config.options.images = false;
        assert!(resolve_run_config(&config).unwrap_err().is_config());
    }

    #[test]
    fn test_single_post_needs_no_media_type() {
        let mut config = Config::default();
        config.target.tweet = Some("156170319961391104".to_string());
        let run = resolve_run_config(&config).unwrap();
        assert_eq!(run.output_root, PathBuf::from("."));
        assert!(!run.user_layout());
    }

    #[test]
    fn test_template_without_placeholder_rejected() {
        let mut config = user_config("someone");
        config.options.file_format = Some("just text".to_string());
        assert!(resolve_run_config(&config).is_err());

        config.options.file_format = Some("{DATE} {ID}".to_string());
        assert!(resolve_run_config(&config).unwrap().name_template.is_some());
    }

    #[test]
    fn test_user_output_root() {
        let mut config = user_config("@someone");
        let run = resolve_run_config(&config).unwrap();
        assert_eq!(run.output_root, PathBuf::from("someone"));

        config.options.output_directory = Some(PathBuf::from("/downloads"));
        let run = resolve_run_config(&config).unwrap();
        assert_eq!(run.output_root, Path::new("/downloads/someone"));
    }

    #[test]
    fn test_size_normalization() {
        assert_eq!(parse_size("large"), MediaSize::Orig);
        assert_eq!(parse_size("small"), MediaSize::Small);
        assert_eq!(parse_size("gigantic"), MediaSize::Normal);
    }

    #[test]
    fn test_proxy_schemes() {
        assert!(parse_proxy("socks5://127.0.0.1:9050").is_ok());
        assert!(parse_proxy("http://proxy:3128").is_ok());
        assert!(parse_proxy("ftp://proxy:21").is_err());
        assert!(parse_proxy("not a url").is_err());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let mut config = user_config("someone");
        config.target.limit = 0;
        assert!(resolve_run_config(&config).is_err());

        let mut config = user_config("someone");
        config.options.max_concurrent_downloads = Some(0);
        assert!(resolve_run_config(&config).is_err());
    }
}
