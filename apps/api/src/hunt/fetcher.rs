//! Content Fetcher: renders a job-listing page to markdown through a reader proxy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use thiserror::Error;
use tracing::info;

use crate::hunt::truncate_chars;

const FETCH_TIMEOUT: Duration = Duration::from_secs(25);
/// Upper bound on returned content, in characters, to bound downstream token usage.
pub const MAX_CONTENT_CHARS: usize = 20_000;
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Why a page could not be fetched. Display strings keep the `Error` prefix
/// the run logs have always used.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Error: 401 Unauthorized")]
    Unauthorized,

    #[error("Error: Scraper returned status {0}")]
    HttpStatus(u16),

    #[error("Error connecting to scraper: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e.to_string())
    }
}

#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Returns a markdown/plain-text rendering of `url`.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetches pages as `GET <base>/<target-url>` on a URL-to-markdown proxy.
pub struct ReaderProxyFetcher {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ReaderProxyFetcher {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn proxy_url(&self, target_url: &str) -> String {
        format!("{}/{}", self.base_url, target_url)
    }
}

#[async_trait]
impl ContentFetcher for ReaderProxyFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        info!("Fetching {url} via reader proxy");

        let mut request = self.client.get(self.proxy_url(url));
        if let Some(key) = &self.api_key {
            request = request.header(header::AUTHORIZATION, format!("Bearer {key}"));
        }

        let response = request.send().await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                Ok(truncate_chars(&body, MAX_CONTENT_CHARS).to_string())
            }
            StatusCode::UNAUTHORIZED => Err(FetchError::Unauthorized),
            other => Err(FetchError::HttpStatus(other.as_u16())),
        }
    }
}
