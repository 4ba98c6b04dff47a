//! Sidecar metadata files written next to downloaded videos.
//!
//! Provides:
//! - Movie-library descriptors (`.nfo`)
//! - Subtitle placeholders (`.ass`)

pub mod ass;
pub mod nfo;

use std::path::{Path, PathBuf};

use crate::config::DateFormat;
use crate::download::media::write_error;
use crate::download::state::JobOutcome;
use crate::fs::{build_file_name, DownloadCategory};
use crate::media::Post;

pub use ass::{emit_subtitle_placeholder, render_subtitle};
pub use nfo::{emit_descriptor, render_descriptor};

/// Path of a sidecar for `video_url`, sharing the video's untemplated stem.
fn sidecar_path(
    post: &Post,
    video_url: &str,
    output_root: &Path,
    category: DownloadCategory,
    extension: &str,
) -> PathBuf {
    let name = build_file_name(post, video_url, category, None, &DateFormat::default());
    category
        .sidecar_dir(output_root)
        .join(name.sidecar(extension))
}

/// Write a sidecar file, creating its directory on demand. Failures are
/// logged and reported, never propagated.
async fn write_sidecar(path: &Path, content: &str) -> JobOutcome {
    let result = async {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| write_error(parent, e))?;
        }
        tokio::fs::write(path, content)
            .await
            .map_err(|e| write_error(path, e))
    }
    .await;

    match result {
        Ok(()) => {
            tracing::info!("Generated sidecar file: {}", path.display());
            JobOutcome::Succeeded
        }
        Err(e) => {
            tracing::error!("Failed to generate sidecar file: {}", e);
            JobOutcome::Failed(e.to_string())
        }
    }
}
