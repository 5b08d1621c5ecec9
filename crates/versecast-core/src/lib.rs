//! # versecast-core
//!
//! Core types for the versecast publishing pipeline.
//!
//! versecast turns a topic into a finished blog post: a language model writes
//! a short poem, an image API renders a matching illustration, and both land
//! on the blog platform through its REST API. This crate holds the pieces
//! every other crate shares:
//!
//! - the unified error type covering each stage of the pipeline
//! - configuration loaded once at startup and passed by reference
//! - the small value types that flow between stages

mod auth;
mod config;
mod error;
mod types;

pub use auth::api_key;
pub use config::{BlogConfig, ImageConfig, ModelConfig, PollConfig, VersecastConfig};
pub use error::{Result, VersecastError};
pub use types::{GenerationRequest, PipelineReport, PostHandle, UploadedImageRef};
