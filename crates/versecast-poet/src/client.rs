//! Messages API client for poem composition
//!
//! One request per run, no conversation history, no internal retries: a
//! failed or empty generation aborts the pipeline so failure timing stays
//! predictable.

use crate::types::{ApiMessage, ApiRequest, ApiResponse, GeneratedPoem};
use std::time::Duration;
use versecast_core::{GenerationRequest, Result, VersecastError};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: usize = 1024;
const TEMPERATURE: f32 = 0.7;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for composing poems via the Messages API
#[derive(Debug, Clone)]
pub struct PoemClient {
    http: reqwest::Client,
    model: String,
    api_key: String,
    tags: String,
    max_tokens: usize,
}

impl PoemClient {
    /// Create a new poem client for the given model
    pub fn new(
        model: impl Into<String>,
        api_key: impl Into<String>,
        tags: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| VersecastError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            model: model.into(),
            api_key: api_key.into(),
            tags: tags.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    /// Set max tokens for the response
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Compose a poem for the given topic and description
    pub async fn compose(&self, request: &GenerationRequest) -> Result<GeneratedPoem> {
        tracing::info!("Composing poem for topic: {}", request.topic);

        let prompt = build_poem_prompt(request, &self.tags);

        let api_request = ApiRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: TEMPERATURE,
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| VersecastError::Generation(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown".to_string());
            return Err(VersecastError::Generation(format!(
                "Messages API error {}: {}",
                status, error_text
            )));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| VersecastError::Generation(format!("Failed to parse response: {}", e)))?;

        let output = api_response
            .content
            .first()
            .ok_or_else(|| VersecastError::Generation("No content in response".to_string()))?
            .text
            .clone();

        let mut poem = parse_poem_json(&output)?;
        if poem.tags.trim().is_empty() {
            poem.tags = self.tags.clone();
        }

        if !poem.is_complete() {
            return Err(VersecastError::Generation(
                "Model returned an empty title, body, or image prompt".to_string(),
            ));
        }

        tracing::info!(
            "Poem complete: \"{}\" ({} chars)",
            poem.title,
            poem.body.len()
        );

        Ok(poem)
    }
}

#[async_trait::async_trait]
impl crate::source::PoemSource for PoemClient {
    async fn compose(&self, request: &GenerationRequest) -> Result<GeneratedPoem> {
        PoemClient::compose(self, request).await
    }
}

/// Build the composition prompt
///
/// The model must answer with a bare JSON object so the response can be
/// parsed without scraping prose.
fn build_poem_prompt(request: &GenerationRequest, tags: &str) -> String {
    format!(
        "You are a professional poet. Write a free-form poem on the given topic.\n\
         - Topic: {topic}\n\
         - Build the poem on this description: {contents}\n\
         \n\
         Respond with pure JSON only, no other text. Use exactly the tags\n\
         given below, unchanged.\n\
         {{\n\
           \"title\": \"an evocative title\",\n\
           \"content\": \"the poem body in markdown, 50 to 150 characters, no citation markers like [1]\",\n\
           \"tags\": \"{tags}\",\n\
           \"image_prompt\": \"an English prompt for a thumbnail image matching the poem\"\n\
         }}",
        topic = request.topic,
        contents = request.contents,
        tags = tags,
    )
}

/// Strip a surrounding markdown code fence from model output
///
/// Models often wrap JSON in ```json ... ``` despite instructions.
fn strip_code_fence(output: &str) -> String {
    let trimmed = output.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let mut lines: Vec<&str> = trimmed.lines().collect();
    if lines.first().is_some_and(|l| l.starts_with("```")) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|l| l.trim() == "```") {
        lines.pop();
    }
    lines.join("\n").trim().to_string()
}

/// Parse the model's JSON output into a structured poem
fn parse_poem_json(output: &str) -> Result<GeneratedPoem> {
    let cleaned = strip_code_fence(output);
    serde_json::from_str(&cleaned)
        .map_err(|e| VersecastError::Generation(format!("Model output was not valid JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence_plain() {
        let output = r#"{"title": "t"}"#;
        assert_eq!(strip_code_fence(output), output);
    }

    #[test]
    fn test_strip_code_fence_json_block() {
        let output = "```json\n{\"title\": \"t\"}\n```";
        assert_eq!(strip_code_fence(output), "{\"title\": \"t\"}");
    }

    #[test]
    fn test_strip_code_fence_bare_block() {
        let output = "```\n{\"title\": \"t\"}\n```";
        assert_eq!(strip_code_fence(output), "{\"title\": \"t\"}");
    }

    #[test]
    fn test_parse_poem_json_fenced() {
        let output = "```json\n{\"title\": \"Dawn\", \"content\": \"light\", \"tags\": \"x\", \"image_prompt\": \"sunrise\"}\n```";
        let poem = parse_poem_json(output).unwrap();
        assert_eq!(poem.title, "Dawn");
        assert_eq!(poem.body, "light");
    }

    #[test]
    fn test_parse_poem_json_invalid() {
        let result = parse_poem_json("here is your poem: roses are red");
        assert!(matches!(result, Err(VersecastError::Generation(_))));
    }

    #[test]
    fn test_prompt_carries_inputs() {
        let request = GenerationRequest::new("spring walk", "a peaceful stroll").unwrap();
        let prompt = build_poem_prompt(&request, "AI시집,versecast");
        assert!(prompt.contains("spring walk"));
        assert!(prompt.contains("a peaceful stroll"));
        assert!(prompt.contains("AI시집,versecast"));
    }

    #[test]
    fn test_poem_client_builder() {
        let client = PoemClient::new("claude-sonnet-4-5-20250929", "sk-test", "tags")
            .unwrap()
            .with_max_tokens(2048);
        assert_eq!(client.max_tokens, 2048);
        assert_eq!(client.model, "claude-sonnet-4-5-20250929");
    }
}
