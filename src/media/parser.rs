//! Media URL parsing utilities.

use crate::config::MediaSize;

/// Path marker of video poster frames listed among a post's photos.
const VIDEO_THUMB_MARKER: &str = "video_thumb/";

/// Extract the raw file name from a media URL.
///
/// Takes the last path segment and drops any query string, so CDN URLs such
/// as `.../abc123.jpg?name=large` resolve to `abc123.jpg`.
pub fn raw_name_from_url(url: &str) -> &str {
    let segment = url.rsplit('/').next().unwrap_or(url);
    segment.split(['?', '#']).next().unwrap_or(segment)
}

/// Split a raw name into `(name_without_ext, extension)`.
///
/// The extension is whatever follows the final dot; a name without a dot has
/// an empty extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rsplit_once('.') {
        Some((stem, ext)) => (stem, ext),
        None => (name, ""),
    }
}

/// Drop the query string from a URL.
pub fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Resolve an image URL for the preferred size.
///
/// Sizes with a CDN name (`small`, `orig`) get a `?name=` suffix; anything
/// else is fetched at native resolution.
pub fn image_url_with_size(url: &str, size: MediaSize) -> String {
    match size.query_name() {
        Some(name) => format!("{}?name={}", url, name),
        None => url.to_string(),
    }
}

/// Whether an image URL is actually a video poster frame.
pub fn is_video_thumb(url: &str) -> bool {
    url.contains(VIDEO_THUMB_MARKER)
}

/// Whether a preview URL can be fetched at all.
pub fn is_fetchable(url: &str) -> bool {
    url.starts_with("http")
}
