//! Upstream record types and their conversion into [`Post`].

use serde::{Deserialize, Serialize};

use crate::media::{MediaRef, Post};

/// One entry of a timeline listing: a tweet or an in-band error.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TimelineEntry {
    Error { error: String },
    Tweet(TweetRecord),
}

/// A tweet as delivered by the upstream scraper.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetRecord {
    #[serde(alias = "ID")]
    pub id: String,
    /// Author display name.
    #[serde(default)]
    pub name: String,
    /// Author handle.
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub text: String,
    /// Unix seconds.
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub is_retweet: bool,
    #[serde(default)]
    pub photos: Vec<PhotoRecord>,
    #[serde(default)]
    pub videos: Vec<VideoRecord>,
}

/// Photo attachment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PhotoRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
}

/// Video attachment. The poster frame shows up under several names
/// depending on the upstream record version.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
    #[serde(default, alias = "previewUrl", alias = "preview_url")]
    pub preview: Option<PreviewField>,
}

/// Preview given either as a bare URL or as an object with a `url` field.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PreviewField {
    Url(String),
    Object { url: String },
}

impl PreviewField {
    fn into_url(self) -> String {
        match self {
            PreviewField::Url(url) | PreviewField::Object { url } => url,
        }
    }
}

impl From<VideoRecord> for MediaRef {
    fn from(video: VideoRecord) -> Self {
        let preview_url = video
            .preview
            .map(PreviewField::into_url)
            .filter(|url| !url.is_empty());
        MediaRef::video(video.url, preview_url)
    }
}

impl From<PhotoRecord> for MediaRef {
    fn from(photo: PhotoRecord) -> Self {
        MediaRef::image(photo.url)
    }
}

impl From<TweetRecord> for Post {
    fn from(tweet: TweetRecord) -> Self {
        Post {
            id: tweet.id,
            author_name: tweet.name,
            author_handle: tweet.username,
            text: tweet.text,
            timestamp: tweet.timestamp,
            is_retweet: tweet.is_retweet,
            images: tweet.photos.into_iter().map(MediaRef::from).collect(),
            videos: tweet.videos.into_iter().map(MediaRef::from).collect(),
        }
    }
}
