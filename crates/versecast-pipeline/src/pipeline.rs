//! The five-step publishing pipeline
//!
//! compose poem → create draft → submit image job → poll → attach image and
//! finalize. Every step depends on the previous one's output; a failure
//! anywhere aborts the rest. Nothing is rolled back: a draft created before
//! a later failure stays on the platform as an orphan, logged but not
//! deleted.

use crate::fetch::ImageFetcher;
use chrono::Utc;
use versecast_blog::BlogStore;
use versecast_core::{
    GenerationRequest, PipelineReport, PollConfig, PostHandle, Result, VersecastConfig,
    VersecastError,
};
use versecast_image::{ImageJobApi, JobPoller};
use versecast_poet::{GeneratedPoem, PoemSource};

/// End-to-end publishing pipeline
pub struct Pipeline<P, B, I, F>
where
    P: PoemSource,
    B: BlogStore,
    I: ImageJobApi,
    F: ImageFetcher,
{
    poet: P,
    blog: B,
    images: I,
    fetcher: F,
    poll: PollConfig,
    public: bool,
}

impl<P, B, I, F> Pipeline<P, B, I, F>
where
    P: PoemSource,
    B: BlogStore,
    I: ImageJobApi,
    F: ImageFetcher,
{
    /// Assemble a pipeline from its components and config
    pub fn new(poet: P, blog: B, images: I, fetcher: F, config: &VersecastConfig) -> Self {
        Self {
            poet,
            blog,
            images,
            fetcher,
            poll: config.poll,
            public: config.blog.public,
        }
    }

    /// Run the pipeline once for the given request
    ///
    /// Tunables are validated before the first outbound call.
    pub async fn run(&self, request: &GenerationRequest) -> Result<PipelineReport> {
        self.poll.validate()?;

        tracing::info!("Pipeline start: topic \"{}\"", request.topic);

        let poem = self.poet.compose(request).await?;
        let handle = self.blog.create_draft().await?;

        match self.attach_and_finalize(&poem, &handle).await {
            Ok(report) => {
                tracing::info!("Pipeline complete: {}", report.post_url);
                Ok(report)
            }
            Err(e) => {
                // Documented limitation: the empty draft stays behind.
                tracing::warn!(
                    "Pipeline failed after draft {} was created; leaving it as an orphan: {}",
                    handle.id,
                    e
                );
                Err(e)
            }
        }
    }

    /// Steps 3–5: image job, poll, transfer, finalize
    async fn attach_and_finalize(
        &self,
        poem: &GeneratedPoem,
        handle: &PostHandle,
    ) -> Result<PipelineReport> {
        let job = self.images.submit(&poem.image_prompt).await?;

        let done = JobPoller::new(self.poll).wait(&self.images, &job).await?;
        let result_url = done.result_url.ok_or_else(|| {
            VersecastError::ImageGeneration(format!(
                "Job {} completed without a result URL",
                done.job_id
            ))
        })?;

        let bytes = self.fetcher.fetch(&result_url).await?;
        let image_ref = self.blog.upload_image(handle, bytes).await?;

        let body = format!("{}\n\n{}", image_ref.markdown_url, poem.body);
        self.blog
            .update_post(handle, &poem.title, &body, &poem.tags, self.public)
            .await?;

        Ok(PipelineReport {
            post_id: handle.id,
            post_url: handle.public_url(),
            title: poem.title.clone(),
            completed_at: Utc::now(),
        })
    }
}
