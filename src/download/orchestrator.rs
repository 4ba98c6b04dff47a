//! Per-post download orchestration.
//!
//! Turns the attachments of one post into fetch jobs and sidecar writes,
//! applying the retweet and size policies of the run. Fetch jobs of a post
//! run concurrently; sidecars are written inline while the fetches proceed.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::config::RunConfig;
use crate::download::media::Fetcher;
use crate::download::state::{JobKind, JobRecord, PostReport};
use crate::error::Result;
use crate::fs::{DownloadCategory, DownloadTarget};
use crate::media::parser::{is_fetchable, strip_query};
use crate::media::{image_url_with_size, is_video_thumb, MediaRef, Post};
use crate::sidecar::{emit_descriptor, emit_subtitle_placeholder};
use crate::source::PostSource;

/// Schedules the jobs of individual posts. Cheap to clone.
#[derive(Clone)]
pub struct Orchestrator {
    config: Arc<RunConfig>,
    fetcher: Fetcher,
    source: Arc<dyn PostSource>,
}

impl Orchestrator {
    pub fn new(config: Arc<RunConfig>, fetcher: Fetcher, source: Arc<dyn PostSource>) -> Self {
        Self {
            config,
            fetcher,
            source,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn source(&self) -> &Arc<dyn PostSource> {
        &self.source
    }

    /// Download the videos of a timeline post, with thumbnails and sidecars.
    pub async fn process_videos(&self, post: Arc<Post>) -> PostReport {
        let mut report = PostReport::new(&post.id);
        if post.videos.is_empty() {
            return report;
        }

        if post.is_retweet && !self.config.wants_retweets() {
            tracing::debug!("Skipping retweet {} (retweets not requested)", post.id);
            return report;
        }
        if !post.is_retweet && self.config.only_retweets {
            tracing::debug!("Skipping post {} (retweets only)", post.id);
            return report;
        }

        tracing::info!(
            "Processing {} videos for post: {}",
            post.videos.len(),
            post.id
        );

        let mut jobs = JoinSet::new();
        for video in &post.videos {
            let sidecars = self
                .schedule_video(&mut jobs, &post, video, DownloadCategory::Video)
                .await;
            report.jobs.extend(sidecars);
        }
        drain(&mut jobs, &mut report).await;

        report
    }

    /// Download the images of a timeline post.
    ///
    /// A retweet is resolved to its original post when retweets are
    /// requested, and the original's media are downloaded with the `RE-`
    /// prefix. Failing to resolve it is fatal for the run.
    pub async fn process_images(&self, post: Arc<Post>) -> Result<PostReport> {
        let mut report = PostReport::new(&post.id);

        if post.is_retweet && self.config.wants_retweets() {
            tracing::info!("Resolving original post of retweet {}", post.id);
            report.merge(self.process_single(&post.id).await?);
        }

        if post.is_retweet || self.config.only_retweets {
            return Ok(report);
        }

        let mut jobs = JoinSet::new();
        for image in &post.images {
            self.schedule_image(&mut jobs, &post, image, DownloadCategory::Image);
        }
        drain(&mut jobs, &mut report).await;

        Ok(report)
    }

    /// Download one post by id.
    ///
    /// In a user run only the selected media types are fetched; otherwise
    /// the post is downloaded completely.
    pub async fn process_single(&self, id: &str) -> Result<PostReport> {
        let post = Arc::new(self.source.get_single_post(id).await?);
        let mut report = PostReport::new(&post.id);

        let (videos, images) = if self.config.user_layout() {
            (self.config.download_videos, self.config.download_images)
        } else {
            (true, true)
        };

        if videos {
            report.merge(self.video_single(&post).await);
        }
        if images {
            report.merge(self.photo_single(&post).await);
        }

        Ok(report)
    }

    async fn video_single(&self, post: &Arc<Post>) -> PostReport {
        let mut report = PostReport::new(&post.id);
        let category = self.single_category(DownloadCategory::RetweetVideo);

        let mut jobs = JoinSet::new();
        for video in &post.videos {
            let sidecars = self.schedule_video(&mut jobs, post, video, category).await;
            report.jobs.extend(sidecars);
        }
        drain(&mut jobs, &mut report).await;

        report
    }

    async fn photo_single(&self, post: &Arc<Post>) -> PostReport {
        let mut report = PostReport::new(&post.id);
        let category = self.single_category(DownloadCategory::RetweetImage);

        let mut jobs = JoinSet::new();
        for image in &post.images {
            self.schedule_image(&mut jobs, post, image, category);
        }
        drain(&mut jobs, &mut report).await;

        report
    }

    fn single_category(&self, user_category: DownloadCategory) -> DownloadCategory {
        if self.config.user_layout() {
            user_category
        } else {
            DownloadCategory::Tweet
        }
    }

    /// Spawn the video and thumbnail fetches, then write the sidecars.
    /// Returns the sidecar records; fetch records arrive through `jobs`.
    async fn schedule_video(
        &self,
        jobs: &mut JoinSet<JobRecord>,
        post: &Post,
        video: &MediaRef,
        category: DownloadCategory,
    ) -> Vec<JobRecord> {
        let url = strip_query(&video.url);
        tracing::info!("Processing video: {}", url);

        let target = DownloadTarget::new(&self.config, post, url, category);
        self.spawn_fetch(jobs, JobKind::Video, target.final_url.clone(), target.file_path.clone());

        match video.preview_url.as_deref() {
            Some(preview) if is_fetchable(preview) => {
                self.spawn_fetch(
                    jobs,
                    JobKind::Thumbnail,
                    preview.to_string(),
                    target.thumbnail_path(),
                );
            }
            Some(preview) => tracing::warn!("Invalid thumbnail URL: {}", preview),
            None => tracing::warn!("No thumbnail for video: {}", url),
        }

        if self.fetcher.url_only() {
            return Vec::new();
        }

        let root = &self.config.output_root;
        vec![
            emit_descriptor(post, url, root, category).await,
            emit_subtitle_placeholder(post, url, root, category).await,
        ]
    }

    fn schedule_image(
        &self,
        jobs: &mut JoinSet<JobRecord>,
        post: &Post,
        image: &MediaRef,
        category: DownloadCategory,
    ) {
        if is_video_thumb(&image.url) {
            tracing::debug!("Skipping video poster frame: {}", image.url);
            return;
        }

        let url = image_url_with_size(&image.url, self.config.size);
        let target = DownloadTarget::new(&self.config, post, url, category);
        self.spawn_fetch(jobs, JobKind::Image, target.final_url, target.file_path);
    }

    fn spawn_fetch(&self, jobs: &mut JoinSet<JobRecord>, kind: JobKind, url: String, path: PathBuf) {
        let fetcher = self.fetcher.clone();
        let skip_existing = self.config.skip_existing;

        jobs.spawn(async move {
            let outcome = fetcher.fetch(&url, &path, skip_existing).await;
            JobRecord {
                kind,
                path,
                url: Some(url),
                outcome,
            }
        });
    }
}

/// Wait for every spawned job and collect its record.
async fn drain(jobs: &mut JoinSet<JobRecord>, report: &mut PostReport) {
    while let Some(result) = jobs.join_next().await {
        match result {
            Ok(record) => report.push(record),
            Err(e) => tracing::error!("Download task panicked: {}", e),
        }
    }
}
