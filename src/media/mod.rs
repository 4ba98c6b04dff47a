//! Media module for post representation and URL parsing.

pub mod item;
pub mod parser;

pub use item::{MediaKind, MediaRef, Post};
pub use parser::{image_url_with_size, is_video_thumb, raw_name_from_url, split_extension};
