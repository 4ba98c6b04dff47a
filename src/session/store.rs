//! Credential persistence and the login flow.

use std::io::{BufRead, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::output::{print_info, print_warning};
use crate::session::cookies::{parse_cookie_string, Credentials};

const LOGIN_NOTICE: &str = "Password login is not supported. Log in with a browser and copy \
the auth_token and ct0 cookies (Inspect -> Storage -> Cookies).";

/// Storage for session credentials between runs.
pub trait SessionStore {
    /// Stored credentials, if any.
    fn load(&self) -> Result<Option<Credentials>>;

    fn save(&self, credentials: &Credentials) -> Result<()>;

    /// Forget stored credentials. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;
}

/// Credentials kept as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Credentials>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(credentials)?;
        std::fs::write(&self.path, content)?;
        tracing::debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Reuse stored credentials or prompt for new ones.
///
/// With `use_cookie_string` the user pastes a full `Cookie` header value,
/// otherwise the `auth_token` and `ct0` values are asked for separately.
/// Stored credentials that are invalid or unreadable are cleared first.
/// Accepted credentials are saved back to the store.
pub fn establish_session(
    store: &dyn SessionStore,
    use_cookie_string: bool,
    input: &mut dyn BufRead,
) -> Result<Credentials> {
    match store.load() {
        Ok(Some(credentials)) if credentials.is_valid() => {
            tracing::info!("Logged in.");
            return Ok(credentials);
        }
        Ok(None) => {}
        Ok(Some(_)) => {
            print_warning("Stored session is invalid, please log in again");
            store.clear()?;
        }
        Err(e) => {
            print_warning(&format!("Stored session is unreadable: {}", e));
            store.clear()?;
        }
    }

    let credentials = if use_cookie_string {
        let line = prompt(input, "Enter cookies string: ")?;
        parse_cookie_string(&line)
    } else {
        print_info(LOGIN_NOTICE);
        let auth_token = prompt(input, "auth_token cookie: ")?;
        let csrf_token = prompt(input, "ct0 cookie: ")?;
        Credentials::from_tokens(&auth_token, &csrf_token)
    };

    if !credentials.is_valid() {
        return Err(Error::Authentication(
            "auth_token and ct0 cookies are required".to_string(),
        ));
    }

    store.save(&credentials)?;
    tracing::info!("Logged in.");
    Ok(credentials)
}

fn prompt(input: &mut dyn BufRead, label: &str) -> Result<String> {
    print!("{}", label);
    std::io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
