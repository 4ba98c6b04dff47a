//! Session cookies.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

/// Cookie domain stamped on parsed cookies.
pub const COOKIE_DOMAIN: &str = ".x.com";

/// Cookie carrying the session token.
pub const AUTH_TOKEN: &str = "auth_token";

/// Cookie carrying the CSRF token.
pub const CSRF_TOKEN: &str = "ct0";

/// One browser cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub expires: Option<DateTime<Utc>>,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub secure: bool,
}

impl SessionCookie {
    /// Cookie for the service domain, valid for one year from `now`.
    pub fn new(name: impl Into<String>, value: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: COOKIE_DOMAIN.to_string(),
            path: "/".to_string(),
            expires: now.checked_add_months(Months::new(12)),
            http_only: true,
            secure: true,
        }
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }
}

/// Credentials of a logged-in session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials {
    pub cookies: Vec<SessionCookie>,
}

impl Credentials {
    pub fn new(cookies: Vec<SessionCookie>) -> Self {
        Self { cookies }
    }

    /// Credentials from the two tokens a browser session exposes.
    pub fn from_tokens(auth_token: &str, csrf_token: &str) -> Self {
        let now = Utc::now();
        Self::new(vec![
            SessionCookie::new(AUTH_TOKEN, auth_token, now),
            SessionCookie::new(CSRF_TOKEN, csrf_token, now),
        ])
    }

    /// Value of an unexpired cookie.
    pub fn get(&self, name: &str) -> Option<&str> {
        let now = Utc::now();
        self.cookies
            .iter()
            .find(|c| c.name == name && !c.is_expired(now))
            .map(|c| c.value.as_str())
    }

    /// Whether both session tokens are present and non-empty.
    pub fn is_valid(&self) -> bool {
        [AUTH_TOKEN, CSRF_TOKEN]
            .iter()
            .all(|name| self.get(name).is_some_and(|v| !v.is_empty()))
    }
}

/// Parse a browser `Cookie` header value (`a=b; c="d"`).
///
/// Pairs without `=` are skipped. Surrounding quotes are trimmed from values.
pub fn parse_cookie_string(input: &str) -> Credentials {
    let now = Utc::now();
    let cookies = input
        .trim()
        .split("; ")
        .filter_map(|pair| pair.split_once('='))
        .map(|(name, value)| SessionCookie::new(name, value.trim_matches('"'), now))
        .collect();

    Credentials::new(cookies)
}
