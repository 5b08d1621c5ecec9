//! Freepik Mystic API client
//!
//! Submit returns a task id; completion is observed by polling the status
//! endpoint. The first entry of `generated` is the temporary download URL.

use crate::api::{ImageJob, ImageJobApi, JobStatus};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use versecast_core::{Result, VersecastError};

const REQUEST_TIMEOUT_SECS: u64 = 30;

// Fixed render parameters for blog thumbnails
const RESOLUTION: &str = "1k";
const ASPECT_RATIO: &str = "widescreen_16_9";
const RENDER_MODEL: &str = "realism";

#[derive(Debug, Deserialize)]
struct TaskEnvelope {
    data: TaskData,
}

#[derive(Debug, Deserialize)]
struct TaskData {
    task_id: String,
    status: String,
    #[serde(default)]
    generated: Vec<String>,
}

/// Real Freepik Mystic client
#[derive(Debug, Clone)]
pub struct FreepikClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FreepikClient {
    /// Create a client for the given API base URL and key
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                VersecastError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn job_from_envelope(envelope: TaskEnvelope) -> Result<ImageJob> {
        let status = JobStatus::from_remote(&envelope.data.status)?;
        let result_url = if status == JobStatus::Completed {
            envelope.data.generated.first().cloned()
        } else {
            None
        };

        Ok(ImageJob {
            job_id: envelope.data.task_id,
            status,
            result_url,
        })
    }
}

#[async_trait]
impl ImageJobApi for FreepikClient {
    async fn submit(&self, prompt: &str) -> Result<ImageJob> {
        tracing::info!("Submitting image job ({} char prompt)", prompt.len());

        let response = self
            .http
            .post(&self.base_url)
            .header("x-freepik-api-key", &self.api_key)
            .json(&serde_json::json!({
                "prompt": prompt,
                "resolution": RESOLUTION,
                "aspect_ratio": ASPECT_RATIO,
                "model": RENDER_MODEL,
            }))
            .send()
            .await
            .map_err(|e| VersecastError::ImageGeneration(format!("Submit request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown".to_string());
            return Err(VersecastError::ImageGeneration(format!(
                "Submit rejected with {}: {}",
                status, error_text
            )));
        }

        let envelope: TaskEnvelope = response.json().await.map_err(|e| {
            VersecastError::ImageGeneration(format!("Invalid submit response: {}", e))
        })?;

        let job = Self::job_from_envelope(envelope)?;
        tracing::info!("Image job {} submitted ({})", job.job_id, job.status);
        Ok(job)
    }

    async fn status(&self, job_id: &str) -> Result<ImageJob> {
        let response = self
            .http
            .get(format!("{}/{}", self.base_url, job_id))
            .header("x-freepik-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| VersecastError::ImageGeneration(format!("Status request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown".to_string());
            return Err(VersecastError::ImageGeneration(format!(
                "Status check for {} failed with {}: {}",
                job_id, status, error_text
            )));
        }

        let envelope: TaskEnvelope = response.json().await.map_err(|e| {
            VersecastError::ImageGeneration(format!("Invalid status response: {}", e))
        })?;

        Self::job_from_envelope(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_pending() {
        let envelope: TaskEnvelope = serde_json::from_str(
            r#"{"data": {"task_id": "t-1", "status": "CREATED"}}"#,
        )
        .unwrap();
        let job = FreepikClient::job_from_envelope(envelope).unwrap();
        assert_eq!(job.job_id, "t-1");
        assert_eq!(job.status, JobStatus::Pending);
        assert!(job.result_url.is_none());
    }

    #[test]
    fn test_envelope_completed_takes_first_url() {
        let envelope: TaskEnvelope = serde_json::from_str(
            r#"{"data": {"task_id": "t-2", "status": "COMPLETED",
                "generated": ["https://img/one.png", "https://img/two.png"]}}"#,
        )
        .unwrap();
        let job = FreepikClient::job_from_envelope(envelope).unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.result_url.as_deref(), Some("https://img/one.png"));
    }

    #[test]
    fn test_envelope_unknown_status() {
        let envelope: TaskEnvelope =
            serde_json::from_str(r#"{"data": {"task_id": "t-3", "status": "WEDGED"}}"#).unwrap();
        assert!(FreepikClient::job_from_envelope(envelope).is_err());
    }
}
