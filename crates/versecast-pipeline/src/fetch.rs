//! Image download abstraction
//!
//! The generation service hands out a temporary URL; the bytes are pulled
//! down once and re-uploaded to the blog. Downloads get a longer timeout
//! than the API calls since they move actual image data.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use versecast_core::{Result, VersecastError};

const DOWNLOAD_TIMEOUT_SECS: u64 = 60;

/// Trait for downloading image bytes (allows mocking in tests)
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Download the bytes behind a result URL
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Real HTTP downloader
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                VersecastError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { http })
    }
}

#[async_trait]
impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::info!("Downloading image from {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| VersecastError::Download(format!("Download request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VersecastError::Download(format!(
                "Download of {} failed with {}",
                url, status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| VersecastError::Download(format!("Download interrupted: {}", e)))?;

        tracing::debug!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}

/// Mock fetcher for testing
#[derive(Clone)]
pub struct MockImageFetcher {
    bytes: Vec<u8>,
    fetched: Arc<Mutex<Vec<String>>>,
    fail: Arc<AtomicBool>,
}

impl Default for MockImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockImageFetcher {
    pub fn new() -> Self {
        Self {
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
            fetched: Arc::new(Mutex::new(Vec::new())),
            fail: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_failure(self) -> Self {
        self.fail.store(true, Ordering::SeqCst);
        self
    }

    /// URLs fetched so far
    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageFetcher for MockImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(VersecastError::Download("mock download failure".to_string()));
        }
        self.fetched.lock().unwrap().push(url.to_string());
        Ok(self.bytes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_fetcher_records_urls() {
        let fetcher = MockImageFetcher::new();
        let bytes = fetcher.fetch("https://img/a.png").await.unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(fetcher.fetched_urls(), vec!["https://img/a.png"]);
    }

    #[tokio::test]
    async fn test_mock_fetcher_failure() {
        let fetcher = MockImageFetcher::new().with_failure();
        let result = fetcher.fetch("https://img/a.png").await;
        assert!(matches!(result, Err(VersecastError::Download(_))));
        assert!(fetcher.fetched_urls().is_empty());
    }
}
