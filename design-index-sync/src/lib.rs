//! # design-index-sync
//!
//! Fetch → normalize → sort → write pipeline over the Figma REST API.
//!
//! Call [`pipeline::run`] with an [`ApiClient`] (or any other [`JsonSource`])
//! and a resolved [`design_index_core::Config`].

pub mod client;
pub mod error;
pub mod files;
pub mod pipeline;
pub mod projects;
pub mod writer;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use client::{ApiClient, JsonSource};
pub use error::SyncError;
pub use pipeline::{SyncOptions, SyncReport};
pub use writer::WriteResult;
