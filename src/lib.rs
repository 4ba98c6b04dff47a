//! twmd - Twitter/X media downloader
//!
//! This library downloads the images and videos of a user's timeline or of
//! a single post, naming files after the post content and writing library
//! metadata next to every video.
//!
//! # Features
//!
//! - Timeline and single-post downloads
//! - Retweet policies (include, only, exclude)
//! - Templated, filesystem-safe file names
//! - Video thumbnails, `.nfo` descriptors and `.ass` caption files
//! - Skip-existing update mode
//! - HTTP and SOCKS5 proxies
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use twmd::{resolve_run_config, run_timeline, ArchivePostSource, Config, Fetcher, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> twmd::Result<()> {
//!     let mut config = Config::default();
//!     config.target.user = Some("someone".to_string());
//!     config.options.images = true;
//!
//!     let run = Arc::new(resolve_run_config(&config)?);
//!     let source = Arc::new(ArchivePostSource::open(Path::new("timeline.json"))?);
//!     let orchestrator = Orchestrator::new(run.clone(), Fetcher::new(&run)?, source);
//!
//!     let stats = run_timeline(&orchestrator).await?;
//!     println!("{} files downloaded", stats.total_downloaded());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;
pub mod session;
pub mod sidecar;
pub mod source;

// Re-exports for convenience
pub use config::{resolve_run_config, Config, RunConfig};
pub use download::{run_single, run_timeline, Fetcher, Orchestrator, RunStats};
pub use error::{Error, Result};
pub use media::{MediaKind, MediaRef, Post};
pub use session::{Credentials, FileSessionStore, SessionStore};
pub use source::{ArchivePostSource, PostSource};
