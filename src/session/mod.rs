//! Session module.
//!
//! This module provides:
//! - Session cookies and credential validity checks
//! - Persistent credential storage
//! - The interactive login flow

pub mod cookies;
pub mod store;

pub use cookies::{parse_cookie_string, Credentials, SessionCookie};
pub use store::{establish_session, FileSessionStore, SessionStore};
