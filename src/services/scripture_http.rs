//! Scripture API client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use tracing::debug;
use url::Url;

use crate::domain::{AppError, BibleApiConfig, ChapterPayload};
use crate::ports::ScriptureSource;

/// HTTP client for the chapter-per-file scripture API.
#[derive(Debug, Clone)]
pub struct HttpScriptureSource {
    base_url: Url,
    client: Client,
}

impl HttpScriptureSource {
    /// Create a new HTTP client for the configured translation root.
    pub fn new(config: &BibleApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { base_url: config.base_url.clone(), client })
    }

    /// `<base>/<BookId>/<chapter>.json`.
    pub fn chapter_url(&self, book_id: &str, chapter: u32) -> String {
        format!("{}/{}/{}.json", self.base_url.as_str().trim_end_matches('/'), book_id, chapter)
    }
}

impl ScriptureSource for HttpScriptureSource {
    fn fetch_chapter(&self, book_id: &str, chapter: u32) -> Result<ChapterPayload, AppError> {
        let url = self.chapter_url(book_id, chapter);
        debug!(%url, "fetching chapter");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| AppError::Api(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Api(format!("{} returned status {}", url, status.as_u16())));
        }

        response
            .json::<ChapterPayload>()
            .map_err(|e| AppError::Api(format!("Failed to parse chapter payload: {}", e)))
    }
}
