//! Replay log retrieval

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub const USER_AGENT: &str = concat!("faintlog/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("{url} did not return a battle log")]
    NotALog { url: String },
}

/// Source of raw replay log text
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Fetch the complete log for a replay page URL
    async fn fetch_log(&self, replay_url: &str) -> Result<String, FetchError>;
}

/// Log URL for a replay page URL
///
/// Showdown serves the raw log next to the replay page with a `.log` suffix.
/// The `?p2` perspective query is dropped first.
pub fn log_url(replay_url: &str) -> String {
    let url = replay_url.trim().replace("?p2", "");
    if url.ends_with(".log") {
        url
    } else {
        format!("{}.log", url)
    }
}

/// Whether `text` looks like a protocol log rather than an HTML error page
pub fn looks_like_log(text: &str) -> bool {
    text.lines().any(|line| line.starts_with('|'))
}

/// Fetches logs from the Showdown replay server
pub struct ShowdownFetcher {
    client: reqwest::Client,
}

impl ShowdownFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl LogSource for ShowdownFetcher {
    async fn fetch_log(&self, replay_url: &str) -> Result<String, FetchError> {
        let url = log_url(replay_url);
        tracing::debug!(url = %url, "fetching replay log");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        let text = response.text().await.map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;

        if !looks_like_log(&text) {
            return Err(FetchError::NotALog { url });
        }

        tracing::debug!(url = %url, bytes = text.len(), "replay log fetched");
        Ok(text)
    }
}
