//! Output layout and per-attachment download targets.

use std::path::{Path, PathBuf};

use crate::config::{DownloadMode, RunConfig};
use crate::error::Result;
use crate::fs::naming::{build_file_name, FileName};
use crate::media::{MediaKind, Post};

/// Where an attachment lands and how its name is prefixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadCategory {
    /// Timeline video, under `video/`.
    Video,
    /// Timeline image, under `img/`.
    Image,
    /// Video of a post resolved from a retweet, `RE-` prefixed under `video/`.
    RetweetVideo,
    /// Image of a post resolved from a retweet, `RE-` prefixed under `img/`.
    RetweetImage,
    /// Flat single-post layout.
    Tweet,
}

impl DownloadCategory {
    /// Directory receiving the media file.
    pub fn media_dir(&self, root: &Path) -> PathBuf {
        match self {
            DownloadCategory::Video | DownloadCategory::RetweetVideo => {
                root.join(MediaKind::Video.folder_name())
            }
            DownloadCategory::Image | DownloadCategory::RetweetImage => {
                root.join(MediaKind::Image.folder_name())
            }
            DownloadCategory::Tweet => root.to_path_buf(),
        }
    }

    /// Directory receiving thumbnails and metadata files.
    pub fn sidecar_dir(&self, root: &Path) -> PathBuf {
        match self {
            DownloadCategory::Tweet => root.to_path_buf(),
            _ => root.join(MediaKind::Video.folder_name()),
        }
    }

    /// Prefix added in front of the media file name.
    pub fn name_prefix(&self) -> &'static str {
        match self {
            DownloadCategory::RetweetVideo | DownloadCategory::RetweetImage => "RE-",
            _ => "",
        }
    }
}

/// Everything needed to fetch one attachment. Lives for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub final_url: String,
    pub name: FileName,
    pub file_path: PathBuf,
    pub sidecar_dir: PathBuf,
}

impl DownloadTarget {
    /// Derive the target for an attachment URL of a post.
    pub fn new(
        config: &RunConfig,
        post: &Post,
        final_url: impl Into<String>,
        category: DownloadCategory,
    ) -> Self {
        let final_url = final_url.into();
        let name = build_file_name(
            post,
            &final_url,
            category,
            config.name_template.as_ref(),
            &config.date_format,
        );
        let file_path = category
            .media_dir(&config.output_root)
            .join(name.file_name());

        Self {
            final_url,
            name,
            file_path,
            sidecar_dir: category.sidecar_dir(&config.output_root),
        }
    }

    /// Path of a sidecar file sharing this target's stem.
    pub fn sidecar_path(&self, extension: &str) -> PathBuf {
        self.sidecar_dir.join(self.name.sidecar(extension))
    }

    /// Path of the video thumbnail.
    pub fn thumbnail_path(&self) -> PathBuf {
        self.sidecar_path("jpg")
    }
}

/// Create the output directories a run writes into.
///
/// Timeline runs get `video/` and `img/` for the selected media types; a
/// single-post run only needs the root.
pub fn prepare_output_dirs(config: &RunConfig) -> Result<()> {
    match config.mode() {
        DownloadMode::Single => ensure_dir(&config.output_root)?,
        DownloadMode::Timeline => {
            if config.download_videos {
                ensure_dir(&config.output_root.join(MediaKind::Video.folder_name()))?;
            }
            if config.download_images {
                ensure_dir(&config.output_root.join(MediaKind::Image.folder_name()))?;
            }
        }
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        Post {
            id: "42".to_string(),
            text: "caption".to_string(),
            ..Default::default()
        }
    }

    fn config(root: &str) -> RunConfig {
        RunConfig {
            output_root: PathBuf::from(root),
            ..Default::default()
        }
    }

    #[test]
    fn test_user_layout_dirs() {
        let config = config("/downloads/someone");
        let video = DownloadTarget::new(
            &config,
            &post(),
            "https://video.twimg.com/v/abc.mp4",
            DownloadCategory::Video,
        );
        assert_eq!(
            video.file_path,
            PathBuf::from("/downloads/someone/video/abc_caption.mp4")
        );
        assert_eq!(
            video.thumbnail_path(),
            PathBuf::from("/downloads/someone/video/abc_caption.jpg")
        );

        let image = DownloadTarget::new(
            &config,
            &post(),
            "https://pbs.twimg.com/media/img1.jpg?name=orig",
            DownloadCategory::RetweetImage,
        );
        assert_eq!(
            image.file_path,
            PathBuf::from("/downloads/someone/img/RE-img1_caption.jpg")
        );
    }

    #[test]
    fn test_flat_layout() {
        let config = config("/out");
        let target = DownloadTarget::new(
            &config,
            &post(),
            "https://video.twimg.com/v/abc.mp4",
            DownloadCategory::Tweet,
        );
        assert_eq!(target.file_path, PathBuf::from("/out/abc_caption.mp4"));
        assert_eq!(
            target.sidecar_path("nfo"),
            PathBuf::from("/out/abc_caption.nfo")
        );
    }

    #[test]
    fn test_prepare_output_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("someone");
        let config = RunConfig {
            user: Some("someone".to_string()),
            output_root: root.clone(),
            download_images: false,
            download_videos: true,
            ..Default::default()
        };

        prepare_output_dirs(&config).unwrap();
        assert!(root.join("video").is_dir());
        assert!(!root.join("img").exists());
    }
}
