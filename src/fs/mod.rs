//! Filesystem module.
//!
//! Provides:
//! - Text sanitizing for file names
//! - File name generation and templates
//! - Output layout and download targets

pub mod naming;
pub mod paths;
pub mod sanitize;

pub use naming::{build_file_name, tweet_content, FileName, NameTemplate};
pub use paths::{ensure_dir, prepare_output_dirs, DownloadCategory, DownloadTarget};
pub use sanitize::{replace_illegal, sanitize_text, FALLBACK_TEXT};
