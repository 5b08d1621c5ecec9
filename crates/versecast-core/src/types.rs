//! Shared types for the versecast pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, VersecastError};

/// Public blog URL prefix for finished posts
const BLOG_URL_PREFIX: &str = "https://wikidocs.net/blog";

/// Input to a single pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Topic of the poem
    pub topic: String,
    /// Supplementary description the poem builds on
    pub contents: String,
}

impl GenerationRequest {
    /// Create a request, rejecting empty inputs
    pub fn new(topic: impl Into<String>, contents: impl Into<String>) -> Result<Self> {
        let topic = topic.into();
        let contents = contents.into();

        if topic.trim().is_empty() {
            return Err(VersecastError::Configuration(
                "topic must not be empty".to_string(),
            ));
        }
        if contents.trim().is_empty() {
            return Err(VersecastError::Configuration(
                "contents must not be empty".to_string(),
            ));
        }

        Ok(Self { topic, contents })
    }
}

/// Handle to a draft post on the blog platform
///
/// Created empty, finalized once the image is attached. A draft left behind
/// by a mid-pipeline failure is not deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostHandle {
    /// Remote post identifier
    pub id: u64,
}

impl PostHandle {
    /// Public URL of the finished post
    pub fn public_url(&self) -> String {
        format!("{}/{}", BLOG_URL_PREFIX, self.id)
    }
}

/// Permanent reference to an uploaded image
///
/// The blog platform returns a markdown-ready image URL which is prepended
/// to the post body during finalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImageRef {
    pub markdown_url: String,
}

/// Result from a completed pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Identifier of the finalized post
    pub post_id: u64,
    /// Public URL of the finalized post
    pub post_url: String,
    /// Title chosen by the model
    pub title: String,
    /// When the run finished
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_request_rejects_empty() {
        assert!(GenerationRequest::new("", "something").is_err());
        assert!(GenerationRequest::new("topic", "   ").is_err());
        assert!(GenerationRequest::new("spring walk", "a peaceful stroll").is_ok());
    }

    #[test]
    fn test_post_handle_public_url() {
        let handle = PostHandle { id: 42 };
        assert_eq!(handle.public_url(), "https://wikidocs.net/blog/42");
    }
}
