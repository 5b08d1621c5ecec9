//! Image job types and the generation API seam

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use versecast_core::{Result, VersecastError};

/// Status of a remote image generation job
///
/// Transitions happen server-side; this system only observes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl JobStatus {
    /// Terminal statuses end polling
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Map a remote status string onto the local enum
    pub fn from_remote(status: &str) -> Result<Self> {
        match status.to_uppercase().as_str() {
            "CREATED" | "PENDING" => Ok(JobStatus::Pending),
            "IN_PROGRESS" | "PROCESSING" => Ok(JobStatus::InProgress),
            "COMPLETED" => Ok(JobStatus::Completed),
            "FAILED" | "ERROR" => Ok(JobStatus::Failed),
            other => Err(VersecastError::ImageGeneration(format!(
                "Unknown job status: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::InProgress => write!(f, "in_progress"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A submitted image generation job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageJob {
    /// Remote job identifier
    pub job_id: String,
    /// Last observed status
    pub status: JobStatus,
    /// Temporary download URL, populated on completion
    pub result_url: Option<String>,
}

/// Trait for the image generation service (allows mocking in tests)
#[async_trait]
pub trait ImageJobApi: Send + Sync {
    /// Submit a generation job for the given prompt
    async fn submit(&self, prompt: &str) -> Result<ImageJob>;

    /// Query the current state of a job
    async fn status(&self, job_id: &str) -> Result<ImageJob>;
}

#[derive(Default)]
struct MockImageState {
    statuses: VecDeque<JobStatus>,
    polls: u32,
    fail_submit: bool,
    omit_result_url: bool,
}

/// Mock image API for testing
///
/// `status` walks a scripted sequence and counts polls; once the script is
/// exhausted it keeps reporting `Pending` so timeout behavior can be tested.
#[derive(Clone)]
pub struct MockImageJobApi {
    state: Arc<Mutex<MockImageState>>,
    result_url: String,
}

impl Default for MockImageJobApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockImageJobApi {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockImageState::default())),
            result_url: "https://mock.images/result.png".to_string(),
        }
    }

    /// Script the statuses returned by successive `status` calls
    pub fn with_status_sequence(self, statuses: impl IntoIterator<Item = JobStatus>) -> Self {
        self.state.lock().unwrap().statuses = statuses.into_iter().collect();
        self
    }

    pub fn with_failing_submit(self) -> Self {
        self.state.lock().unwrap().fail_submit = true;
        self
    }

    /// Report completion without a download URL (malformed remote response)
    pub fn with_missing_result_url(self) -> Self {
        self.state.lock().unwrap().omit_result_url = true;
        self
    }

    /// Number of `status` calls made so far
    pub fn poll_count(&self) -> u32 {
        self.state.lock().unwrap().polls
    }
}

#[async_trait]
impl ImageJobApi for MockImageJobApi {
    async fn submit(&self, _prompt: &str) -> Result<ImageJob> {
        if self.state.lock().unwrap().fail_submit {
            return Err(VersecastError::ImageGeneration(
                "mock submit rejection".to_string(),
            ));
        }
        Ok(ImageJob {
            job_id: "mock-job-1".to_string(),
            status: JobStatus::Pending,
            result_url: None,
        })
    }

    async fn status(&self, job_id: &str) -> Result<ImageJob> {
        let mut state = self.state.lock().unwrap();
        state.polls += 1;
        let status = state.statuses.pop_front().unwrap_or(JobStatus::Pending);
        let has_url = status == JobStatus::Completed && !state.omit_result_url;

        Ok(ImageJob {
            job_id: job_id.to_string(),
            status,
            result_url: has_url.then(|| self.result_url.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_remote() {
        assert_eq!(JobStatus::from_remote("CREATED").unwrap(), JobStatus::Pending);
        assert_eq!(
            JobStatus::from_remote("in_progress").unwrap(),
            JobStatus::InProgress
        );
        assert_eq!(
            JobStatus::from_remote("COMPLETED").unwrap(),
            JobStatus::Completed
        );
        assert_eq!(JobStatus::from_remote("FAILED").unwrap(), JobStatus::Failed);
        assert!(JobStatus::from_remote("EXPLODED").is_err());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::InProgress.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[tokio::test]
    async fn test_mock_walks_script_then_stays_pending() {
        let api = MockImageJobApi::new().with_status_sequence([JobStatus::InProgress]);

        let first = api.status("j").await.unwrap();
        assert_eq!(first.status, JobStatus::InProgress);

        let second = api.status("j").await.unwrap();
        assert_eq!(second.status, JobStatus::Pending);
        assert_eq!(api.poll_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_completed_carries_url() {
        let api = MockImageJobApi::new().with_status_sequence([JobStatus::Completed]);
        let job = api.status("j").await.unwrap();
        assert!(job.result_url.is_some());
    }
}
