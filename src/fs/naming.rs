//! File name generation from post content.

use crate::config::DateFormat;
use crate::error::{Error, Result};
use crate::fs::paths::DownloadCategory;
use crate::fs::sanitize::{replace_illegal, sanitize_text};
use crate::media::{raw_name_from_url, split_extension, Post};

/// Name fragment used when a post has no text at all.
pub const NO_TEXT_PLACEHOLDER: &str = "没有推文";

/// Code point budget for the post content part of a file name.
pub const CONTENT_MAX_RUNES: usize = 240;

/// Code point budget for the `{TITLE}` placeholder.
pub const TITLE_MAX_RUNES: usize = 255;

/// Placeholders understood by [`NameTemplate`].
pub const PLACEHOLDERS: &[&str] = &["{DATE}", "{NAME}", "{USERNAME}", "{TITLE}", "{ID}"];

/// User-supplied file name prefix with `{...}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTemplate {
    template: String,
}

impl NameTemplate {
    /// Parse a template; it must use at least one known placeholder.
    pub fn parse(template: &str) -> Result<Self> {
        if !PLACEHOLDERS.iter().any(|p| template.contains(p)) {
            return Err(Error::ConfigValidation {
                field: "file_format".to_string(),
                message: format!(
                    "Template '{}' must contain at least one of {}",
                    template,
                    PLACEHOLDERS.join(" ")
                ),
            });
        }

        Ok(Self {
            template: template.to_string(),
        })
    }

    /// Render the template for a post.
    ///
    /// Placeholders are substituted in one left-to-right pass, so values are
    /// never re-scanned. Unknown `{...}` sequences pass through unchanged.
    pub fn render(&self, post: &Post, date_format: &DateFormat) -> String {
        let mut out = String::with_capacity(self.template.len() * 2);
        let mut rest = self.template.as_str();

        'outer: while let Some(c) = rest.chars().next() {
            if c == '{' {
                for placeholder in PLACEHOLDERS {
                    if let Some(tail) = rest.strip_prefix(placeholder) {
                        out.push_str(&placeholder_value(placeholder, post, date_format));
                        rest = tail;
                        continue 'outer;
                    }
                }
            }
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }

        replace_illegal(&out)
    }
}

fn placeholder_value(placeholder: &str, post: &Post, date_format: &DateFormat) -> String {
    match placeholder {
        "{DATE}" => date_format.format(post.timestamp),
        "{NAME}" => post.author_name.clone(),
        "{USERNAME}" => post.author_handle.clone(),
        "{TITLE}" => sanitize_text(&post.text, TITLE_MAX_RUNES),
        "{ID}" => post.id.clone(),
        _ => placeholder.to_string(),
    }
}

/// Sanitized post content used in every file name of a post.
pub fn tweet_content(post: &Post) -> String {
    if post.text.is_empty() {
        NO_TEXT_PLACEHOLDER.to_string()
    } else {
        sanitize_text(&post.text, CONTENT_MAX_RUNES)
    }
}

/// A derived file name, split so sidecars can share its stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName {
    /// Name of the media file without extension (prefix and template included).
    pub base_name: String,
    /// Extension without the dot; may be empty.
    pub extension: String,
    /// `nameWithoutExt_content`, shared by thumbnail and metadata files.
    pub sidecar_stem: String,
}

impl FileName {
    /// Full media file name.
    pub fn file_name(&self) -> String {
        if self.extension.is_empty() {
            self.base_name.clone()
        } else {
            format!("{}.{}", self.base_name, self.extension)
        }
    }

    /// Sidecar file name with the given extension (`nfo`, `ass`, `jpg`).
    pub fn sidecar(&self, extension: &str) -> String {
        format!("{}.{}", self.sidecar_stem, extension)
    }
}

/// Build the file name for one attachment of a post.
///
/// Pure function of the post, the media URL, the category and the template:
/// the same inputs always yield the same name, which is what makes
/// skip-existing runs work.
pub fn build_file_name(
    post: &Post,
    media_url: &str,
    category: DownloadCategory,
    template: Option<&NameTemplate>,
    date_format: &DateFormat,
) -> FileName {
    let (name_without_ext, extension) = split_extension(raw_name_from_url(media_url));
    let sidecar_stem = format!("{}_{}", replace_illegal(name_without_ext), tweet_content(post));

    let mut base_name = String::from(category.name_prefix());
    if let Some(template) = template {
        base_name.push_str(&template.render(post, date_format));
        base_name.push('_');
    }
    base_name.push_str(&sidecar_stem);

    FileName {
        base_name,
        extension: replace_illegal(extension),
        sidecar_stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        Post {
            id: "1700000000000000000".to_string(),
            author_name: "Some One".to_string(),
            author_handle: "someone".to_string(),
            text: "hello\nworld https://t.co/xyz".to_string(),
            timestamp: 1_700_000_000,
            ..Default::default()
        }
    }

    #[test]
    fn test_cdn_url_name() {
        let name = build_file_name(
            &post(),
            "https://video.example/abc123.mp4?name=large",
            DownloadCategory::Video,
            None,
            &DateFormat::default(),
        );
        assert_eq!(name.base_name, "abc123_hello world");
        assert_eq!(name.extension, "mp4");
        assert_eq!(name.file_name(), "abc123_hello world.mp4");
        assert_eq!(name.sidecar("nfo"), "abc123_hello world.nfo");
    }

    #[test]
    fn test_deterministic() {
        let template = NameTemplate::parse("{DATE}_{ID}").unwrap();
        let build = || {
            build_file_name(
                &post(),
                "https://pbs.twimg.com/media/FxYz.jpg?name=orig",
                DownloadCategory::Image,
                Some(&template),
                &DateFormat::default(),
            )
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_empty_text_placeholder() {
        let mut post = post();
        post.text.clear();
        let name = build_file_name(
            &post,
            "https://pbs.twimg.com/media/FxYz.jpg",
            DownloadCategory::Image,
            None,
            &DateFormat::default(),
        );
        assert_eq!(name.file_name(), format!("FxYz_{}.jpg", NO_TEXT_PLACEHOLDER));
    }

    #[test]
    fn test_template_and_retweet_prefix() {
        let template = NameTemplate::parse("{DATE} {USERNAME} {ID}").unwrap();
        let name = build_file_name(
            &post(),
            "https://pbs.twimg.com/media/FxYz.jpg?name=orig",
            DownloadCategory::RetweetImage,
            Some(&template),
            &DateFormat::default(),
        );
        assert_eq!(
            name.file_name(),
            "RE-2023-11-14 someone 1700000000000000000_FxYz_hello world.jpg"
        );
        // Sidecars keep the untemplated stem
        assert_eq!(name.sidecar_stem, "FxYz_hello world");
    }

    #[test]
    fn test_template_values_are_filesystem_safe() {
        let mut post = post();
        post.author_name = "A/B: C".to_string();
        let template = NameTemplate::parse("{NAME}").unwrap();
        let fmt = DateFormat::parse("%Y/%m/%d").unwrap();
        assert_eq!(template.render(&post, &fmt), "A_B_ C");

        let template = NameTemplate::parse("{DATE}").unwrap();
        assert_eq!(template.render(&post, &fmt), "2023_11_14");
    }

    #[test]
    fn test_template_single_pass() {
        let mut post = post();
        post.author_name = "{ID}".to_string();
        let template = NameTemplate::parse("{NAME}-{UNKNOWN}").unwrap();
        assert_eq!(
            template.render(&post, &DateFormat::default()),
            "{ID}-{UNKNOWN}"
        );
    }

    #[test]
    fn test_template_title() {
        let template = NameTemplate::parse("[{TITLE}]").unwrap();
        assert_eq!(
            template.render(&post(), &DateFormat::default()),
            "[hello world]"
        );
    }

    #[test]
    fn test_template_requires_placeholder() {
        assert!(NameTemplate::parse("static").is_err());
        assert!(NameTemplate::parse("{id}").is_err());
        assert!(NameTemplate::parse("x{ID}").is_ok());
    }
}
