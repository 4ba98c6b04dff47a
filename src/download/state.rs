//! Job outcomes and run statistics.

use std::fmt;
use std::path::PathBuf;

/// Result of one attachment-level job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Succeeded,
    /// Destination already present in skip-existing mode; nothing fetched.
    SkippedExisting,
    /// URL-only mode: the URL was reported, nothing fetched or written.
    Listed,
    Failed(String),
}

impl JobOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, JobOutcome::Failed(_))
    }
}

/// What a job produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Image,
    Video,
    Thumbnail,
    Descriptor,
    Subtitle,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobKind::Image => write!(f, "image"),
            JobKind::Video => write!(f, "video"),
            JobKind::Thumbnail => write!(f, "thumbnail"),
            JobKind::Descriptor => write!(f, "descriptor"),
            JobKind::Subtitle => write!(f, "subtitle"),
        }
    }
}

/// One finished job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub kind: JobKind,
    pub path: PathBuf,
    pub url: Option<String>,
    pub outcome: JobOutcome,
}

/// All jobs run for one post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostReport {
    pub post_id: String,
    pub jobs: Vec<JobRecord>,
}

impl PostReport {
    pub fn new(post_id: impl Into<String>) -> Self {
        Self {
            post_id: post_id.into(),
            jobs: Vec::new(),
        }
    }

    pub fn push(&mut self, record: JobRecord) {
        self.jobs.push(record);
    }

    /// Append the jobs of another report (e.g. a resolved original post).
    pub fn merge(&mut self, other: PostReport) {
        self.jobs.extend(other.jobs);
    }

    /// Number of jobs of the given kind.
    pub fn count(&self, kind: JobKind) -> usize {
        self.jobs.iter().filter(|j| j.kind == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Statistics across a whole run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub posts_processed: u64,
    pub images: u64,
    pub videos: u64,
    pub thumbnails: u64,
    pub sidecars: u64,
    pub skipped: u64,
    pub listed: u64,
    pub failed: u64,
}

impl RunStats {
    /// Add one post's report.
    pub fn record(&mut self, report: &PostReport) {
        self.posts_processed += 1;

        for job in &report.jobs {
            match &job.outcome {
                JobOutcome::Succeeded => match job.kind {
                    JobKind::Image => self.images += 1,
                    JobKind::Video => self.videos += 1,
                    JobKind::Thumbnail => self.thumbnails += 1,
                    JobKind::Descriptor | JobKind::Subtitle => self.sidecars += 1,
                },
                JobOutcome::SkippedExisting => self.skipped += 1,
                JobOutcome::Listed => self.listed += 1,
                JobOutcome::Failed(_) => self.failed += 1,
            }
        }
    }

    /// Media files written (images and videos).
    pub fn total_downloaded(&self) -> u64 {
        self.images + self.videos
    }
}
