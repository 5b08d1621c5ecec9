//! # versecast-blog
//!
//! Blog platform REST client for versecast.
//!
//! The post lifecycle is create-empty, upload-image, update-with-content.
//! `BlogStore` is the seam the pipeline is written against; `WikidocsClient`
//! is the real implementation and `MockBlogStore` backs the tests.

mod store;
mod wikidocs;

pub use store::{BlogStore, MockBlogStore, UpdateCall};
pub use wikidocs::WikidocsClient;
