//! Post source backed by an exported timeline file.
//!
//! The file is either a JSON array or newline-delimited JSON. Each entry is
//! a tweet record or an `{"error": "..."}` marker that is surfaced in-band.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::stream::{self, StreamExt};

use crate::error::{Error, Result};
use crate::media::Post;
use crate::session::Credentials;
use crate::source::types::TimelineEntry;
use crate::source::{PostSource, PostStream, TimelineRequest};

/// Source serving posts from a timeline archive loaded in memory.
#[derive(Debug)]
pub struct ArchivePostSource {
    path: PathBuf,
    entries: Vec<TimelineEntry>,
}

impl ArchivePostSource {
    /// Read and parse an archive file.
    pub fn open(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Source(format!("Cannot read {}: {}", path.display(), e)))?;
        let entries = parse_entries(&content)?;

        tracing::debug!("Loaded {} entries from {}", entries.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn posts(&self) -> impl Iterator<Item = Post> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            TimelineEntry::Tweet(tweet) => Some(Post::from(tweet.clone())),
            TimelineEntry::Error { .. } => None,
        })
    }
}

fn parse_entries(content: &str) -> Result<Vec<TimelineEntry>> {
    if content.trim_start().starts_with('[') {
        return serde_json::from_str(content)
            .map_err(|e| Error::Source(format!("Malformed archive: {}", e)));
    }

    content
        .lines()
        .enumerate()
        .map(|(n, line)| (n + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line)
                .map_err(|e| Error::Source(format!("Malformed archive line {}: {}", n, e)))
        })
        .collect()
}

#[async_trait]
impl PostSource for ArchivePostSource {
    async fn authenticate(&self, credentials: &Credentials) -> Result<()> {
        tracing::warn!(
            "Session saved ({} cookies) but unused: posts come from {}",
            credentials.cookies.len(),
            self.path.display()
        );
        Ok(())
    }

    async fn stream(&self, request: &TimelineRequest) -> Result<PostStream> {
        let handle = request.handle.to_lowercase();
        let mut items = Vec::new();

        for entry in &self.entries {
            if items.len() >= request.limit {
                break;
            }
            match entry {
                TimelineEntry::Error { error } => {
                    items.push(Err(Error::Source(error.clone())));
                }
                TimelineEntry::Tweet(tweet) => {
                    if tweet.username.to_lowercase() != handle {
                        continue;
                    }
                    let post = Post::from(tweet.clone());
                    if request.media_only && !post.has_media() {
                        continue;
                    }
                    items.push(Ok(post));
                }
            }
        }

        tracing::debug!(
            "Archive yields {} items for @{}",
            items.len(),
            request.handle
        );

        Ok(stream::iter(items).boxed())
    }

    async fn get_single_post(&self, id: &str) -> Result<Post> {
        self.posts()
            .find(|post| post.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;
    use std::io::Write;

    const NDJSON: &str = r#"
{"id": "1", "username": "Alice", "text": "no media"}
{"id": "2", "username": "alice", "photos": [{"url": "https://pbs.twimg.com/media/a.jpg"}]}
{"error": "rate limited"}
{"id": "3", "username": "bob", "photos": [{"url": "https://pbs.twimg.com/media/b.jpg"}]}
{"id": "4", "username": "alice", "videos": [{"url": "https://video.twimg.com/v.mp4"}]}
"#;

    fn request(media_only: bool, limit: usize) -> TimelineRequest {
        TimelineRequest {
            handle: "ALICE".to_string(),
            limit,
            media_only,
        }
    }

    fn open(content: &str) -> ArchivePostSource {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        ArchivePostSource::open(file.path()).unwrap()
    }

    #[tokio::test]
    async fn test_stream_filters_by_handle() {
        let source = open(NDJSON);
        let items: Vec<_> = source
            .stream(&request(false, 100))
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(items.len(), 4);
        assert_eq!(items[0].as_ref().unwrap().id, "1");
        assert_eq!(items[1].as_ref().unwrap().id, "2");
        assert!(matches!(items[2], Err(Error::Source(_))));
        assert_eq!(items[3].as_ref().unwrap().id, "4");
    }

    #[tokio::test]
    async fn test_stream_media_only_and_limit() {
        let source = open(NDJSON);
        let items: Vec<_> = source
            .stream(&request(true, 1))
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].as_ref().unwrap().id, "2");
    }

    #[tokio::test]
    async fn test_json_array() {
        let source = open(r#"[{"id": "7", "username": "alice"}]"#);
        let posts: Vec<Post> = source
            .stream(&request(false, 10))
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "7");
    }

    #[tokio::test]
    async fn test_get_single_post() {
        let source = open(NDJSON);
        assert_eq!(source.get_single_post("3").await.unwrap().author_handle, "bob");
        assert!(matches!(
            source.get_single_post("99").await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_accepts_and_ignores_session() {
        let source = open(NDJSON);
        let credentials = Credentials::from_tokens("token", "csrf");
        source.authenticate(&credentials).await.unwrap();
        assert_eq!(source.get_single_post("2").await.unwrap().id, "2");
    }

    #[test]
    fn test_open_missing_file() {
        let err = ArchivePostSource::open(Path::new("/nonexistent/archive.json")).unwrap_err();
        assert!(err.is_source());
    }

    #[test]
    fn test_malformed_line_is_rejected() {
        let err = parse_entries("{\"id\": \"1\"}\nnot json\n").unwrap_err();
        assert!(err.is_source());
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_open_malformed_archive_is_source_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[{\"id\": ").unwrap();
        let err = ArchivePostSource::open(file.path()).unwrap_err();
        assert!(err.is_source());
    }
}
