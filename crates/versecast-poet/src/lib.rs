//! # versecast-poet
//!
//! Messages API client for poem composition.
//!
//! The model is asked for a single JSON object carrying the post title, the
//! poem body, the fixed tag list, and an English image prompt for the
//! thumbnail. One call per run; an empty or unparseable generation is an
//! error, never retried.

mod client;
mod source;
mod types;

pub use client::PoemClient;
pub use source::{MockPoemSource, PoemSource};
pub use types::GeneratedPoem;
