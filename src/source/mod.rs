//! Post source module.
//!
//! This module provides:
//! - The [`PostSource`] capability the download pipeline consumes
//! - Upstream record types and their conversion into [`Post`]
//! - An archive-backed source reading exported timelines

pub mod archive;
pub mod types;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::Result;
use crate::media::Post;
use crate::session::Credentials;

pub use archive::ArchivePostSource;
pub use types::{TimelineEntry, TweetRecord};

/// Posts of a timeline in source order. Per-item failures arrive in-band.
pub type PostStream = BoxStream<'static, Result<Post>>;

/// Parameters of a timeline listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineRequest {
    pub handle: String,
    pub limit: usize,
    /// Only produce posts carrying attachments.
    pub media_only: bool,
}

/// Capability producing posts for the downloader.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Attach session credentials. Sources without authentication ignore them.
    async fn authenticate(&self, _credentials: &Credentials) -> Result<()> {
        Ok(())
    }

    /// Stream a user's timeline.
    async fn stream(&self, request: &TimelineRequest) -> Result<PostStream>;

    /// Fetch one post by id.
    async fn get_single_post(&self, id: &str) -> Result<Post>;
}

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::stream::{self, StreamExt};

    use super::*;
    use crate::error::Error;

    /// In-memory source. `Err` timeline items become in-band source errors.
    #[derive(Default)]
    pub struct MockSource {
        pub timeline: Vec<std::result::Result<Post, String>>,
        pub posts: Vec<Post>,
        pub single_calls: AtomicUsize,
    }

    impl MockSource {
        pub fn single_calls(&self) -> usize {
            self.single_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PostSource for MockSource {
        async fn stream(&self, request: &TimelineRequest) -> Result<PostStream> {
            let items: Vec<Result<Post>> = self
                .timeline
                .iter()
                .take(request.limit)
                .map(|item| item.clone().map_err(Error::Source))
                .collect();
            Ok(stream::iter(items).boxed())
        }

        async fn get_single_post(&self, id: &str) -> Result<Post> {
            self.single_calls.fetch_add(1, Ordering::SeqCst);
            self.posts
                .iter()
                .find(|post| post.id == id)
                .cloned()
                .ok_or_else(|| Error::NotFound(id.to_string()))
        }
    }
}
