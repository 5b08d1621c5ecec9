//! Wikidocs blog REST client
//!
//! Three endpoints: create an empty draft, upload an image for a draft, and
//! overwrite the draft with its final content. All calls carry a
//! `Authorization: Token <key>` header and a 30 second timeout.

use crate::store::BlogStore;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use versecast_core::{PostHandle, Result, UploadedImageRef, VersecastError};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Response from the create-draft endpoint
#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: u64,
}

/// Response from the image upload endpoint
#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    image_markdown_url: String,
}

/// Real Wikidocs API client
#[derive(Debug, Clone)]
pub struct WikidocsClient {
    http: reqwest::Client,
    base_url: String,
    auth_header: String,
}

impl WikidocsClient {
    /// Create a client for the given API base URL and key
    pub fn new(base_url: impl Into<String>, api_key: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                VersecastError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_header: format!("Token {}", api_key),
        })
    }
}

#[async_trait]
impl BlogStore for WikidocsClient {
    async fn create_draft(&self) -> Result<PostHandle> {
        tracing::info!("Creating empty draft post");

        let response = self
            .http
            .post(format!("{}/create/", self.base_url))
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| VersecastError::PostStore(format!("Create request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown".to_string());
            return Err(VersecastError::PostStore(format!(
                "Create failed with {}: {}",
                status, error_text
            )));
        }

        let created: CreateResponse = response
            .json()
            .await
            .map_err(|e| VersecastError::PostStore(format!("Invalid create response: {}", e)))?;

        tracing::info!("Draft created with id {}", created.id);
        Ok(PostHandle { id: created.id })
    }

    async fn update_post(
        &self,
        handle: &PostHandle,
        title: &str,
        body: &str,
        tags: &str,
        public: bool,
    ) -> Result<()> {
        tracing::info!("Updating post {} (\"{}\")", handle.id, title);

        let response = self
            .http
            .put(format!("{}/{}/", self.base_url, handle.id))
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .json(&serde_json::json!({
                "title": title,
                "content": body,
                "is_public": public,
                "tags": tags,
            }))
            .send()
            .await
            .map_err(|e| VersecastError::PostStore(format!("Update request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown".to_string());
            return Err(VersecastError::PostStore(format!(
                "Update of post {} failed with {}: {}",
                handle.id, status, error_text
            )));
        }

        Ok(())
    }

    async fn upload_image(&self, handle: &PostHandle, bytes: Vec<u8>) -> Result<UploadedImageRef> {
        tracing::info!("Uploading {} image bytes to post {}", bytes.len(), handle.id);

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name("image.png")
            .mime_str("image/png")
            .map_err(|e| VersecastError::Upload(format!("Invalid image part: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("blog_id", handle.id.to_string());

        let response = self
            .http
            .post(format!("{}/images/upload/", self.base_url))
            .header("Authorization", &self.auth_header)
            .multipart(form)
            .send()
            .await
            .map_err(|e| VersecastError::Upload(format!("Upload request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown".to_string());
            return Err(VersecastError::Upload(format!(
                "Upload failed with {}: {}",
                status, error_text
            )));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| VersecastError::Upload(format!("Invalid upload response: {}", e)))?;

        if uploaded.image_markdown_url.is_empty() {
            return Err(VersecastError::Upload(
                "Upload response carried no image URL".to_string(),
            ));
        }

        Ok(UploadedImageRef {
            markdown_url: uploaded.image_markdown_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = WikidocsClient::new("https://wikidocs.net/napi/blog/", "key").unwrap();
        assert_eq!(client.base_url, "https://wikidocs.net/napi/blog");
    }

    #[test]
    fn test_auth_header_format() {
        let client = WikidocsClient::new("https://wikidocs.net/napi/blog", "abc123").unwrap();
        assert_eq!(client.auth_header, "Token abc123");
    }

    #[test]
    fn test_create_response_shape() {
        let created: CreateResponse = serde_json::from_str(r#"{"id": 77, "extra": true}"#).unwrap();
        assert_eq!(created.id, 77);
    }

    #[test]
    fn test_upload_response_defaults_empty() {
        let uploaded: UploadResponse = serde_json::from_str("{}").unwrap();
        assert!(uploaded.image_markdown_url.is_empty());
    }
}
