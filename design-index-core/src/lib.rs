//! design-index core library: domain types, configuration, normalization, ordering.
//!
//! Public API surface:
//! - [`types`]: newtypes, upstream records, and the persisted [`NormalizedEntry`]
//! - [`config`]: [`Config`] resolution from environment-style keys
//! - [`normalize`]: raw file record → [`NormalizedEntry`]
//! - [`sort`]: deterministic ordering of the index
//! - [`error`]: [`ConfigError`]

pub mod config;
pub mod error;
pub mod normalize;
pub mod sort;
pub mod types;

pub use config::{Config, ProjectSource};
pub use error::ConfigError;
pub use normalize::normalize;
pub use sort::sort_entries;
pub use types::{
    EntryStatus, FilesPage, NormalizedEntry, Project, ProjectId, ProjectName, ProjectsPage,
    RawFile,
};
