//! Configuration module for twmd.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Date format and media size parsing
//! - Validation into the immutable [`RunConfig`]

pub mod date_format;
pub mod loader;
pub mod modes;
pub mod validation;

pub use date_format::DateFormat;
pub use loader::{
    Config, NetworkConfig, OptionsConfig, RunConfig, SessionConfig, SourceConfig, TargetConfig,
};
pub use modes::{DownloadMode, MediaSize};
pub use validation::{parse_post_id, resolve_run_config};
