//! Unified error types for versecast

use thiserror::Error;

/// Unified error type for all versecast operations
#[derive(Error, Debug)]
pub enum VersecastError {
    // Content generation errors
    #[error("Poem generation failed: {0}")]
    Generation(String),

    // Blog platform errors
    #[error("Post store error: {0}")]
    PostStore(String),

    #[error("Image upload failed: {0}")]
    Upload(String),

    // Image generation errors
    #[error("Image generation failed: {0}")]
    ImageGeneration(String),

    #[error("Image download failed: {0}")]
    Download(String),

    #[error("Image job timed out: {0}")]
    Timeout(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

/// Result type alias using VersecastError
pub type Result<T> = std::result::Result<T, VersecastError>;
