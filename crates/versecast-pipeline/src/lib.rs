//! # versecast-pipeline
//!
//! End-to-end publishing pipeline for versecast.
//!
//! This crate sequences the five fixed steps:
//! 1. compose the poem
//! 2. create an empty draft post
//! 3. submit the image generation job (prompt comes from the poem)
//! 4. poll the job until it completes
//! 5. download the image, re-upload it to the blog, finalize the post
//!
//! There is no retry and no rollback. A failure after step 2 leaves the
//! empty draft behind on the platform; the pipeline logs the orphaned id
//! rather than masking it.

mod fetch;
mod pipeline;

pub use fetch::{HttpFetcher, ImageFetcher, MockImageFetcher};
pub use pipeline::Pipeline;
