//! Type definitions for the Messages API and the structured poem it returns

use serde::{Deserialize, Serialize};

/// Messages API message format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub role: String,
    pub content: String,
}

/// Messages API request format
#[derive(Debug, Clone, Serialize)]
pub struct ApiRequest {
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    pub messages: Vec<ApiMessage>,
}

/// Messages API response format
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    #[allow(dead_code)]
    pub id: String,
    pub content: Vec<ContentBlock>,
}

/// Content block in a Messages API response
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    #[allow(dead_code)]
    pub content_type: String,
    pub text: String,
}

/// Structured poem parsed from the model's JSON output
///
/// The model is asked for the post title, the poem body in markdown, the
/// fixed tag list, and an English prompt for the thumbnail image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPoem {
    pub title: String,
    #[serde(rename = "content")]
    pub body: String,
    #[serde(default)]
    pub tags: String,
    pub image_prompt: String,
}

impl GeneratedPoem {
    /// Check that every field the pipeline depends on is present
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.body.trim().is_empty()
            && !self.image_prompt.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poem_parses_model_json() {
        let json = r#"{
            "title": "Spring Walk",
            "content": "A quiet path\nunder warm light",
            "tags": "AI시집,versecast",
            "image_prompt": "a peaceful park path in spring sunlight"
        }"#;

        let poem: GeneratedPoem = serde_json::from_str(json).unwrap();
        assert_eq!(poem.title, "Spring Walk");
        assert!(poem.body.contains("quiet path"));
        assert!(poem.is_complete());
    }

    #[test]
    fn test_poem_missing_body_is_incomplete() {
        let poem = GeneratedPoem {
            title: "t".to_string(),
            body: "  ".to_string(),
            tags: String::new(),
            image_prompt: "p".to_string(),
        };
        assert!(!poem.is_complete());
    }
}
