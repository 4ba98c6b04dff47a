//! Post and media attachment representation.

/// Kind of media attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Get the folder name used for this media kind in a user layout.
    pub fn folder_name(&self) -> &'static str {
        match self {
            MediaKind::Image => "img",
            MediaKind::Video => "video",
        }
    }
}

/// One attachment referenced by a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    /// Media URL, possibly carrying resolution query parameters.
    pub url: String,

    /// Poster frame / thumbnail URL, when the upstream record had one.
    pub preview_url: Option<String>,

    /// Attachment kind.
    pub kind: MediaKind,
}

impl MediaRef {
    /// Create an image attachment.
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            preview_url: None,
            kind: MediaKind::Image,
        }
    }

    /// Create a video attachment with an optional preview.
    pub fn video(url: impl Into<String>, preview_url: Option<String>) -> Self {
        Self {
            url: url.into(),
            preview_url,
            kind: MediaKind::Video,
        }
    }
}

/// A social-media post with its attachments.
///
/// Posts are produced by a [`PostSource`](crate::source::PostSource) and are
/// read-only for the rest of the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub author_name: String,
    pub author_handle: String,
    pub text: String,
    /// Creation time in unix seconds.
    pub timestamp: i64,
    pub is_retweet: bool,
    pub images: Vec<MediaRef>,
    pub videos: Vec<MediaRef>,
}

impl Post {
    /// Whether the post carries at least one attachment.
    pub fn has_media(&self) -> bool {
        !self.images.is_empty() || !self.videos.is_empty()
    }
}
