//! Poem source abstraction

use crate::types::GeneratedPoem;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use versecast_core::{GenerationRequest, Result, VersecastError};

/// Trait for poem composition (allows mocking in tests)
#[async_trait]
pub trait PoemSource: Send + Sync {
    /// Compose a poem for the given topic and description
    async fn compose(&self, request: &GenerationRequest) -> Result<GeneratedPoem>;
}

/// Mock poem source for testing
///
/// Returns a canned poem derived from the request topic and counts calls.
#[derive(Clone)]
pub struct MockPoemSource {
    calls: Arc<AtomicU32>,
    fail: Arc<AtomicBool>,
}

impl Default for MockPoemSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPoemSource {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicU32::new(0)),
            fail: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_failure(self) -> Self {
        self.fail.store(true, Ordering::SeqCst);
        self
    }

    /// Number of `compose` calls made so far
    pub fn compose_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PoemSource for MockPoemSource {
    async fn compose(&self, request: &GenerationRequest) -> Result<GeneratedPoem> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            return Err(VersecastError::Generation(
                "mock generation failure".to_string(),
            ));
        }

        Ok(GeneratedPoem {
            title: format!("On {}", request.topic),
            body: format!("A poem about {}\nand {}", request.topic, request.contents),
            tags: "AI시집,versecast".to_string(),
            image_prompt: format!("an illustration of {}", request.topic),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_source_counts_calls() {
        let source = MockPoemSource::new();
        let request = GenerationRequest::new("rain", "soft rain on a tin roof").unwrap();

        let poem = source.compose(&request).await.unwrap();
        assert!(poem.is_complete());
        assert!(poem.title.contains("rain"));
        assert_eq!(source.compose_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_source_failure() {
        let source = MockPoemSource::new().with_failure();
        let request = GenerationRequest::new("rain", "soft rain").unwrap();
        assert!(source.compose(&request).await.is_err());
        assert_eq!(source.compose_count(), 1);
    }
}
