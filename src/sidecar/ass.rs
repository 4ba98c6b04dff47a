//! Placeholder `.ass` subtitle track carrying the post text.

use std::path::Path;

use crate::download::state::{JobKind, JobRecord};
use crate::fs::{tweet_content, DownloadCategory};
use crate::media::Post;
use crate::sidecar::{sidecar_path, write_sidecar};

/// Write the subtitle placeholder for a downloaded video.
pub async fn emit_subtitle_placeholder(
    post: &Post,
    video_url: &str,
    output_root: &Path,
    category: DownloadCategory,
) -> JobRecord {
    let path = sidecar_path(post, video_url, output_root, category, "ass");
    let outcome = write_sidecar(&path, &render_subtitle(post)).await;

    JobRecord {
        kind: JobKind::Subtitle,
        path,
        url: None,
        outcome,
    }
}

/// Render a script with one caption spanning the whole runtime.
pub fn render_subtitle(post: &Post) -> String {
    let caption = tweet_content(post);

    format!(
        r#"[Script Info]
; Script generated by twmd
Title: Twitter Video Subtitle
Original Script: twmd
ScriptType: v4.00+
Collisions: Normal
PlayResX: 1080
PlayResY: 1920
WrapStyle: 3
ScaledBorderAndShadow: yes

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Default,Arial,20,&H00FFFFFF,&H000000FF,&H00000000,&H00000099,0,0,0,0,100,100,0,0,1,2,2,2,40,40,80,1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:00.00,99:59:59.99,Default,,40,40,80,,{caption}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::state::JobOutcome;

    #[test]
    fn test_caption_is_sanitized_text() {
        let post = Post {
            text: "first line\nsecond https://t.co/x 😀".to_string(),
            ..Default::default()
        };
        let script = render_subtitle(&post);
        assert!(script.ends_with("Dialogue: 0,0:00:00.00,99:59:59.99,Default,,40,40,80,,first line second"));
    }

    #[tokio::test]
    async fn test_emit_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("fresh");
        let post = Post {
            text: "clip".to_string(),
            ..Default::default()
        };

        let record = emit_subtitle_placeholder(
            &post,
            "https://video.twimg.com/v/abc.mp4",
            &root,
            DownloadCategory::RetweetVideo,
        )
        .await;

        assert_eq!(record.outcome, JobOutcome::Succeeded);
        assert_eq!(record.path, root.join("video").join("abc_clip.ass"));
        assert!(record.path.is_file());
    }
}
