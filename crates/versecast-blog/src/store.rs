//! Blog post store abstraction

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use versecast_core::{PostHandle, Result, UploadedImageRef, VersecastError};

/// Trait for the blog platform's post operations (allows mocking in tests)
///
/// A draft is created empty, then finalized exactly once after the image is
/// attached. The store never deletes drafts; a run that fails mid-pipeline
/// leaves its draft behind.
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// Create an empty draft post and return its handle
    async fn create_draft(&self) -> Result<PostHandle>;

    /// Overwrite the draft with its final title, body, and tags
    async fn update_post(
        &self,
        handle: &PostHandle,
        title: &str,
        body: &str,
        tags: &str,
        public: bool,
    ) -> Result<()>;

    /// Upload image bytes for a post, returning a permanent reference
    async fn upload_image(&self, handle: &PostHandle, bytes: Vec<u8>) -> Result<UploadedImageRef>;
}

/// A recorded `update_post` call
#[derive(Debug, Clone)]
pub struct UpdateCall {
    pub post_id: u64,
    pub title: String,
    pub body: String,
    pub tags: String,
    pub public: bool,
}

#[derive(Default)]
struct MockBlogState {
    next_id: u64,
    created: Vec<u64>,
    uploads: Vec<u64>,
    updates: Vec<UpdateCall>,
    fail_create: bool,
    fail_upload: bool,
    fail_update: bool,
}

/// Mock blog store for testing
///
/// Hands out sequential post ids and records every call so tests can assert
/// on ordering and payloads. Individual operations can be scripted to fail.
#[derive(Clone)]
pub struct MockBlogStore {
    state: Arc<Mutex<MockBlogState>>,
    image_ref: String,
}

impl Default for MockBlogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBlogStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockBlogState {
                next_id: 100,
                ..MockBlogState::default()
            })),
            image_ref: "![image](https://mock.blog/images/1.png)".to_string(),
        }
    }

    pub fn with_failing_create(self) -> Self {
        self.state.lock().unwrap().fail_create = true;
        self
    }

    pub fn with_failing_upload(self) -> Self {
        self.state.lock().unwrap().fail_upload = true;
        self
    }

    pub fn with_failing_update(self) -> Self {
        self.state.lock().unwrap().fail_update = true;
        self
    }

    /// Ids of drafts created so far
    pub fn created_posts(&self) -> Vec<u64> {
        self.state.lock().unwrap().created.clone()
    }

    /// Post ids that received an image upload
    pub fn uploaded_posts(&self) -> Vec<u64> {
        self.state.lock().unwrap().uploads.clone()
    }

    /// Every `update_post` call recorded so far
    pub fn update_calls(&self) -> Vec<UpdateCall> {
        self.state.lock().unwrap().updates.clone()
    }
}

#[async_trait]
impl BlogStore for MockBlogStore {
    async fn create_draft(&self) -> Result<PostHandle> {
        let mut state = self.state.lock().unwrap();
        if state.fail_create {
            return Err(VersecastError::PostStore(
                "mock create failure".to_string(),
            ));
        }
        let id = state.next_id;
        state.next_id += 1;
        state.created.push(id);
        Ok(PostHandle { id })
    }

    async fn update_post(
        &self,
        handle: &PostHandle,
        title: &str,
        body: &str,
        tags: &str,
        public: bool,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_update {
            return Err(VersecastError::PostStore(
                "mock update failure".to_string(),
            ));
        }
        state.updates.push(UpdateCall {
            post_id: handle.id,
            title: title.to_string(),
            body: body.to_string(),
            tags: tags.to_string(),
            public,
        });
        Ok(())
    }

    async fn upload_image(&self, handle: &PostHandle, _bytes: Vec<u8>) -> Result<UploadedImageRef> {
        let mut state = self.state.lock().unwrap();
        if state.fail_upload {
            return Err(VersecastError::Upload("mock upload failure".to_string()));
        }
        state.uploads.push(handle.id);
        Ok(UploadedImageRef {
            markdown_url: self.image_ref.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_store_sequences_ids() {
        let store = MockBlogStore::new();
        let first = store.create_draft().await.unwrap();
        let second = store.create_draft().await.unwrap();
        assert_eq!(second.id, first.id + 1);
        assert_eq!(store.created_posts().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_store_records_update() {
        let store = MockBlogStore::new();
        let handle = store.create_draft().await.unwrap();
        store
            .update_post(&handle, "Title", "Body", "tags", false)
            .await
            .unwrap();

        let calls = store.update_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].post_id, handle.id);
        assert_eq!(calls[0].title, "Title");
        assert!(!calls[0].public);
    }

    #[tokio::test]
    async fn test_mock_store_scripted_failure() {
        let store = MockBlogStore::new().with_failing_upload();
        let handle = store.create_draft().await.unwrap();
        let result = store.upload_image(&handle, vec![1, 2, 3]).await;
        assert!(matches!(result, Err(VersecastError::Upload(_))));
    }
}
