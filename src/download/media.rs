//! Asset fetching over HTTP.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use reqwest::{header, Client, Proxy};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tokio::sync::Semaphore;
use tokio::time::timeout;

use crate::config::RunConfig;
use crate::download::state::JobOutcome;
use crate::error::{Error, Result};
use crate::output::create_download_bar;

/// Minimum file size to show progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// Connect (including TLS handshake) timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Time allowed between sending a request and receiving response headers.
const RESPONSE_HEADER_TIMEOUT: Duration = Duration::from_secs(5);

/// Fetches single assets to disk. Cheap to clone; clones share the transport.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    user_agent: String,
    url_only: bool,
    limiter: Option<Arc<Semaphore>>,
}

impl Fetcher {
    /// Build the process-wide transport from the run configuration.
    pub fn new(config: &RunConfig) -> Result<Self> {
        // Keep-alive disabled: no idle connections are pooled.
        let mut builder = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .pool_max_idle_per_host(0);

        builder = match &config.proxy {
            Some(proxy) => builder.proxy(Proxy::all(proxy.as_str()).map_err(|e| {
                Error::Config(format!("Invalid proxy '{}': {}", proxy, e))
            })?),
            None => builder.no_proxy(),
        };

        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
            url_only: config.url_only,
            limiter: config
                .max_concurrent_downloads
                .map(|n| Arc::new(Semaphore::new(n))),
        })
    }

    /// Whether fetches only report their URL.
    pub fn url_only(&self) -> bool {
        self.url_only
    }

    /// Fetch `url` into `destination`.
    ///
    /// Never returns an error: failures are logged and reported as
    /// [`JobOutcome::Failed`]. A partially written file is left in place.
    pub async fn fetch(&self, url: &str, destination: &Path, skip_if_exists: bool) -> JobOutcome {
        if self.url_only {
            tracing::info!("{}", url);
            return JobOutcome::Listed;
        }

        let name = display_name(destination);

        if skip_if_exists && destination.exists() {
            tracing::info!("File already exists: {}", name);
            return JobOutcome::SkippedExisting;
        }

        let _permit = match &self.limiter {
            Some(limiter) => limiter.acquire().await.ok(),
            None => None,
        };

        tracing::debug!("Starting download: {} from {}", name, url);

        match self.download_to(url, destination).await {
            Ok(bytes) => {
                tracing::info!("Download completed: {} ({} bytes)", name, bytes);
                JobOutcome::Succeeded
            }
            Err(e) => {
                tracing::error!("Download failed: {} ({}): {}", name, url, e);
                JobOutcome::Failed(e.to_string())
            }
        }
    }

    /// Stream the response body verbatim to `destination`.
    async fn download_to(&self, url: &str, destination: &Path) -> Result<u64> {
        let request = self
            .client
            .get(url)
            .header(header::USER_AGENT, &self.user_agent)
            .send();

        let response = timeout(RESPONSE_HEADER_TIMEOUT, request)
            .await
            .map_err(|_| {
                Error::Download(format!(
                    "No response within {} seconds",
                    RESPONSE_HEADER_TIMEOUT.as_secs()
                ))
            })??;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Download(format!("HTTP {}", status)));
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| write_error(parent, e))?;
        }

        let progress = response
            .content_length()
            .filter(|len| *len > PROGRESS_THRESHOLD)
            .map(create_download_bar);

        let mut file = File::create(destination)
            .await
            .map_err(|e| write_error(destination, e))?;
        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| write_error(destination, e))?;
            downloaded += chunk.len() as u64;

            if let Some(ref pb) = progress {
                pb.set_position(downloaded);
            }
        }

        file.flush()
            .await
            .map_err(|e| write_error(destination, e))?;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        Ok(downloaded)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub(crate) fn write_error(path: &Path, err: std::io::Error) -> Error {
    Error::Write {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
