//! Run mode and media size definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Preferred image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaSize {
    Small,
    /// Native resolution, no size suffix.
    Normal,
    Large,
    #[default]
    Orig,
}

impl MediaSize {
    /// The CDN `name=` value for this size, if it has one.
    pub fn query_name(&self) -> Option<&'static str> {
        match self {
            MediaSize::Small => Some("small"),
            MediaSize::Large | MediaSize::Orig => Some("orig"),
            MediaSize::Normal => None,
        }
    }

    /// `large` and `orig` refer to the same CDN rendition.
    pub fn normalized(self) -> Self {
        match self {
            MediaSize::Large => MediaSize::Orig,
            other => other,
        }
    }
}

impl fmt::Display for MediaSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaSize::Small => write!(f, "small"),
            MediaSize::Normal => write!(f, "normal"),
            MediaSize::Large => write!(f, "large"),
            MediaSize::Orig => write!(f, "orig"),
        }
    }
}

impl FromStr for MediaSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" => Ok(MediaSize::Small),
            "normal" => Ok(MediaSize::Normal),
            "large" => Ok(MediaSize::Large),
            "orig" => Ok(MediaSize::Orig),
            _ => Err(format!("Unknown media size: {}", s)),
        }
    }
}

/// What a run downloads: a user's timeline or one post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadMode {
    Timeline,
    Single,
}

impl fmt::Display for DownloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadMode::Timeline => write!(f, "timeline"),
            DownloadMode::Single => write!(f, "single"),
        }
    }
}
