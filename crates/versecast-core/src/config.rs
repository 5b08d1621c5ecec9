//! Configuration management for versecast
//!
//! This module provides configuration structures for the publishing pipeline,
//! including model selection, blog platform settings, and poll tunables.
//! Credentials are never stored here; config only names the environment
//! variables they are read from.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::{Result, VersecastError};

/// Process-wide versecast configuration
///
/// Loaded from `.versecast/config.toml` in the working directory, or defaults.
/// Constructed once at startup and passed by reference into every component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersecastConfig {
    /// Poem model selection
    #[serde(default)]
    pub model: ModelConfig,

    /// Blog platform settings
    #[serde(default)]
    pub blog: BlogConfig,

    /// Image generation settings
    #[serde(default)]
    pub image: ImageConfig,

    /// Image job poll tunables
    #[serde(default)]
    pub poll: PollConfig,
}

/// Model configuration for poem generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model identifier sent to the Messages API
    #[serde(default = "default_model")]
    pub name: String,

    /// Environment variable containing the API key
    #[serde(default = "default_model_api_key_env")]
    pub api_key_env: String,
}

/// Blog platform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogConfig {
    /// Base URL of the blog REST API
    #[serde(default = "default_blog_base_url")]
    pub base_url: String,

    /// Environment variable containing the API key
    #[serde(default = "default_blog_api_key_env")]
    pub api_key_env: String,

    /// Comma-separated tags applied to every post
    #[serde(default = "default_tags")]
    pub tags: String,

    /// Publish posts publicly; drafts stay private by default
    #[serde(default)]
    pub public: bool,
}

/// Image generation API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Base URL of the image generation API
    #[serde(default = "default_image_base_url")]
    pub base_url: String,

    /// Environment variable containing the API key
    #[serde(default = "default_image_api_key_env")]
    pub api_key_env: String,
}

/// Poll tunables for the image job poller
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PollConfig {
    /// Maximum status checks before giving up
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,

    /// Seconds to wait between status checks
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

// Default value providers
fn default_model() -> String {
    "claude-sonnet-4-5-20250929".to_string()
}

fn default_model_api_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

fn default_blog_base_url() -> String {
    "https://wikidocs.net/napi/blog".to_string()
}

fn default_blog_api_key_env() -> String {
    "WIKIDOCS_API_KEY".to_string()
}

fn default_tags() -> String {
    "AI시집,versecast".to_string()
}

fn default_image_base_url() -> String {
    "https://api.freepik.com/v1/ai/mystic".to_string()
}

fn default_image_api_key_env() -> String {
    "FREEPIK_API_KEY".to_string()
}

fn default_max_poll_attempts() -> u32 {
    30
}

fn default_poll_interval_secs() -> u64 {
    2
}

impl VersecastConfig {
    /// Load configuration from `.versecast/config.toml` or use defaults
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let config_path = root.join(".versecast/config.toml");

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Ok(toml::from_str(&content).map_err(|e| {
                VersecastError::Configuration(format!("Failed to parse config file: {}", e))
            })?)
        } else {
            Ok(Self::default())
        }
    }

    /// Write default configuration to `.versecast/config.toml`
    pub fn write_default(root: &Path) -> Result<()> {
        let config_dir = root.join(".versecast");
        std::fs::create_dir_all(&config_dir)?;

        let config_path = config_dir.join("config.toml");
        let config = Self::default();
        let content = toml::to_string_pretty(&config).map_err(|e| {
            VersecastError::Configuration(format!("Failed to serialize config: {}", e))
        })?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

impl PollConfig {
    /// Validate tunables before any network call is made
    ///
    /// A zero attempt budget or a zero interval would either skip polling
    /// entirely or spin without waiting; both are rejected up front.
    pub fn validate(&self) -> Result<()> {
        if self.max_poll_attempts == 0 {
            return Err(VersecastError::Configuration(
                "max_poll_attempts must be greater than 0".to_string(),
            ));
        }
        if self.poll_interval_secs == 0 {
            return Err(VersecastError::Configuration(
                "poll_interval_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Wait between status checks as a `Duration`
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Default for VersecastConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            blog: BlogConfig::default(),
            image: ImageConfig::default(),
            poll: PollConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            api_key_env: default_model_api_key_env(),
        }
    }
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            base_url: default_blog_base_url(),
            api_key_env: default_blog_api_key_env(),
            tags: default_tags(),
            public: false,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: default_image_base_url(),
            api_key_env: default_image_api_key_env(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_poll_attempts: default_max_poll_attempts(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}
