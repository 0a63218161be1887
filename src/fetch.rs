//! Calendar fetcher: one GET for the calendar page, no retries.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("daycycle/", env!("CARGO_PKG_VERSION"));

/// Longest slice of an error body kept for diagnostics.
const EXCERPT_LEN: usize = 200;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to fetch page: Status {status}, {excerpt}")]
    Status { status: u16, excerpt: String },

    #[error("Error fetching page: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where the calendar document comes from.
#[derive(Debug, Clone)]
pub enum Source {
    Url(String),
    /// A saved copy of the page, for offline runs.
    File(PathBuf),
}

pub struct Fetcher {
    http: reqwest::Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Fetcher { http })
    }

    pub async fn fetch(&self, source: &Source) -> Result<String, FetchError> {
        match source {
            Source::Url(url) => self.fetch_url(url).await,
            Source::File(path) => read_file(path).await,
        }
    }

    async fn fetch_url(&self, url: &str) -> Result<String, FetchError> {
        info!(%url, "Fetching calendar page");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                excerpt: excerpt(&body),
            });
        }

        debug!(bytes = body.len(), "Fetched calendar page");
        Ok(body)
    }
}

async fn read_file(path: &Path) -> Result<String, FetchError> {
    info!(path = %path.display(), "Reading calendar page from file");

    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FetchError::File {
            path: path.to_path_buf(),
            source,
        })
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(EXCERPT_LEN) {
        Some((end, _)) => format!("{}...", &trimmed[..end]),
        None => trimmed.to_string(),
    }
}
