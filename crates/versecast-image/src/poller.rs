//! Job poller — waits out asynchronous image generation
//!
//! The budget is `max_poll_attempts` status checks with a fixed
//! `poll_interval` wait between non-terminal checks. Three exits:
//! completed (success), failed (immediate error, remaining budget
//! unconsumed), budget exhausted (timeout). No sleep follows the final
//! check, so worst-case wall clock is `(attempts - 1) * interval` plus the
//! checks themselves.

use crate::api::{ImageJob, ImageJobApi, JobStatus};
use versecast_core::{PollConfig, Result, VersecastError};

/// Poller for asynchronous image generation jobs
#[derive(Debug, Clone, Copy)]
pub struct JobPoller {
    config: PollConfig,
}

impl JobPoller {
    /// Create a poller with the given tunables
    pub fn new(config: PollConfig) -> Self {
        Self { config }
    }

    /// Poll until the job reaches a terminal state or the budget runs out
    ///
    /// Validates the tunables before the first status request.
    pub async fn wait<A: ImageJobApi>(&self, api: &A, job: &ImageJob) -> Result<ImageJob> {
        self.config.validate()?;

        let interval = self.config.poll_interval();
        let max_attempts = self.config.max_poll_attempts;

        for attempt in 1..=max_attempts {
            let current = api.status(&job.job_id).await?;
            tracing::debug!(
                "Poll {}/{} for job {}: {}",
                attempt,
                max_attempts,
                job.job_id,
                current.status
            );

            match current.status {
                JobStatus::Completed => {
                    if current.result_url.is_none() {
                        return Err(VersecastError::ImageGeneration(format!(
                            "Job {} completed without a result URL",
                            job.job_id
                        )));
                    }
                    tracing::info!("Image job {} completed after {} polls", job.job_id, attempt);
                    return Ok(current);
                }
                JobStatus::Failed => {
                    return Err(VersecastError::ImageGeneration(format!(
                        "Job {} reported failure on poll {}",
                        job.job_id, attempt
                    )));
                }
                JobStatus::Pending | JobStatus::InProgress => {
                    if attempt < max_attempts {
                        tokio::time::sleep(interval).await;
                    }
                }
            }
        }

        Err(VersecastError::Timeout(format!(
            "Job {} still not terminal after {} polls",
            job.job_id, max_attempts
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockImageJobApi;
    use tokio::time::Instant;

    fn poll_config(max_poll_attempts: u32, poll_interval_secs: u64) -> PollConfig {
        PollConfig {
            max_poll_attempts,
            poll_interval_secs,
        }
    }

    fn pending_job() -> ImageJob {
        ImageJob {
            job_id: "job-1".to_string(),
            status: JobStatus::Pending,
            result_url: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_completes_after_two_sleeps() {
        let api = MockImageJobApi::new().with_status_sequence([
            JobStatus::Pending,
            JobStatus::Pending,
            JobStatus::Completed,
        ]);
        let poller = JobPoller::new(poll_config(30, 2));

        let started = Instant::now();
        let finished = poller.wait(&api, &pending_job()).await.unwrap();

        assert_eq!(finished.status, JobStatus::Completed);
        assert!(finished.result_url.is_some());
        assert_eq!(api.poll_count(), 3);
        // Two non-terminal polls, two 2s waits
        assert_eq!(started.elapsed().as_secs(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_after_budget() {
        // The mock reports pending forever once its script is exhausted
        let api = MockImageJobApi::new();
        let poller = JobPoller::new(poll_config(3, 2));

        let result = poller.wait(&api, &pending_job()).await;

        assert!(matches!(result, Err(VersecastError::Timeout(_))));
        assert_eq!(api.poll_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_job_aborts_immediately() {
        let api = MockImageJobApi::new().with_status_sequence([JobStatus::Failed]);
        let poller = JobPoller::new(poll_config(30, 2));

        let started = Instant::now();
        let result = poller.wait(&api, &pending_job()).await;

        assert!(matches!(result, Err(VersecastError::ImageGeneration(_))));
        assert_eq!(api.poll_count(), 1);
        // No budget consumed waiting
        assert_eq!(started.elapsed().as_secs(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_rejected_before_polling() {
        let api = MockImageJobApi::new();
        let poller = JobPoller::new(poll_config(0, 2));

        let result = poller.wait(&api, &pending_job()).await;

        assert!(matches!(result, Err(VersecastError::Configuration(_))));
        assert_eq!(api.poll_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_completed_without_url_is_an_error() {
        let api = MockImageJobApi::new()
            .with_status_sequence([JobStatus::Completed])
            .with_missing_result_url();
        let poller = JobPoller::new(poll_config(30, 2));

        let result = poller.wait(&api, &pending_job()).await;

        assert!(matches!(result, Err(VersecastError::ImageGeneration(_))));
        assert_eq!(api.poll_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_progress_counts_against_budget() {
        let api = MockImageJobApi::new().with_status_sequence([
            JobStatus::InProgress,
            JobStatus::InProgress,
        ]);
        let poller = JobPoller::new(poll_config(2, 2));

        let result = poller.wait(&api, &pending_job()).await;

        assert!(matches!(result, Err(VersecastError::Timeout(_))));
        assert_eq!(api.poll_count(), 2);
    }
}
