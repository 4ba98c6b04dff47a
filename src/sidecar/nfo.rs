//! Movie-library (Jellyfin/Kodi) `.nfo` descriptor.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::download::state::{JobKind, JobRecord};
use crate::fs::naming::NO_TEXT_PLACEHOLDER;
use crate::fs::DownloadCategory;
use crate::media::Post;
use crate::sidecar::{sidecar_path, write_sidecar};

/// Appended to the author display name to form the title.
const TITLE_SUFFIX: &str = "的推文";

/// Write the descriptor for a downloaded video.
pub async fn emit_descriptor(
    post: &Post,
    video_url: &str,
    output_root: &Path,
    category: DownloadCategory,
) -> JobRecord {
    let path = sidecar_path(post, video_url, output_root, category, "nfo");
    let outcome = write_sidecar(&path, &render_descriptor(post)).await;

    JobRecord {
        kind: JobKind::Descriptor,
        path,
        url: None,
        outcome,
    }
}

/// Render the descriptor XML for a post.
pub fn render_descriptor(post: &Post) -> String {
    let title = escape_xml(&format!("{}{}", post.author_name, TITLE_SUFFIX));
    let plot = if post.text.is_empty() {
        NO_TEXT_PLACEHOLDER.to_string()
    } else {
        escape_xml(&post.text)
    };
    let author = escape_xml(&post.author_handle);
    let date = DateTime::<Utc>::from_timestamp(post.timestamp, 0)
        .unwrap_or_default()
        .format("%Y-%m-%d")
        .to_string();
    let year = &date[..4];
    let id = escape_xml(&post.id);

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<movie>
  <title>{title}</title>
  <originaltitle>{title}</originaltitle>
  <plot>{plot}</plot>
  <outline>{plot}</outline>
  <year>{year}</year>
  <premiered>{date}</premiered>
  <aired>{date}</aired>
  <studio>Twitter</studio>
  <director>{author}</director>
  <credits>{author}</credits>
  <actor>
    <name>{author}</name>
    <role>作者</role>
  </actor>
  <tag>Twitter</tag>
  <tag>视频</tag>
  <uniqueid type="twitter" default="true">{id}</uniqueid>
</movie>"#
    )
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
