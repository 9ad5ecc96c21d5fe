//! Error types for design-index-core.

use thiserror::Error;

/// Configuration problems detected before any network call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No API token was supplied.
    #[error("{key} is not set; a Figma access token is required")]
    MissingToken { key: &'static str },

    /// Neither a team nor any explicit project was supplied.
    #[error("nothing to index: set {team_key} or {projects_key}")]
    MissingProjectSource {
        team_key: &'static str,
        projects_key: &'static str,
    },
}
