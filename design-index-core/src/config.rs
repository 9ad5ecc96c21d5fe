//! Run configuration resolved from environment-style keys.
//!
//! # API pattern
//!
//! - [`Config::from_lookup`]: resolves from an arbitrary key lookup; used by
//!   tests and by the CLI to layer flags over the environment
//! - [`Config::from_env_with`]: consults `overrides` first and the process
//!   environment second, delegates to `from_lookup`
//!
//! Empty values count as unset. The resolved [`Config`] is built once at
//! startup and passed explicitly to every stage of a run.

use std::fmt;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::types::{ProjectId, ProjectName};

/// Environment keys understood by [`Config::from_lookup`].
pub mod keys {
    pub const TOKEN: &str = "FIGMA_TOKEN";
    pub const TEAM_ID: &str = "FIGMA_TEAM_ID";
    pub const PROJECT_IDS: &str = "FIGMA_PROJECT_IDS";
    pub const OUTPUT: &str = "DESIGN_INDEX_OUT";
    pub const PROJECT_NAMES: &str = "FIGMA_PROJECT_NAMES";
    pub const API_BASE: &str = "FIGMA_API_BASE";
    pub const ORG: &str = "DESIGN_INDEX_ORG";
}

pub const DEFAULT_OUTPUT: &str = "design-index.json";
pub const DEFAULT_API_BASE: &str = "https://api.figma.com/v1";
pub const DEFAULT_ORG: &str = "figma";

/// How the list of projects to scan is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectSource {
    /// Every project of a team, fetched from the API.
    Team(String),
    /// A fixed list of project ids; names are not looked up.
    Explicit(Vec<ProjectId>),
}

/// Fully resolved configuration for one run.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub token: String,
    pub source: ProjectSource,
    pub output: PathBuf,
    /// Exact-match project name filter; empty means every project.
    pub allow_list: Vec<ProjectName>,
    /// API root without a trailing slash.
    pub api_base: String,
    /// Literal written to every entry's `org` field.
    pub org: String,
}

impl Config {
    /// Resolve from the process environment, letting `overrides` (e.g. CLI
    /// flags) shadow individual keys.
    pub fn from_env_with<F>(overrides: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(|key| overrides(key).or_else(|| std::env::var(key).ok()))
    }

    /// Resolve from `lookup`, which maps a key from [`keys`] to its raw value.
    ///
    /// Explicit project ids take precedence over a team id when both are set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = get(keys::TOKEN).ok_or(ConfigError::MissingToken { key: keys::TOKEN })?;

        let project_ids: Vec<ProjectId> = get(keys::PROJECT_IDS)
            .map(|raw| split_list(&raw))
            .unwrap_or_default()
            .into_iter()
            .map(ProjectId::from)
            .collect();

        let source = if !project_ids.is_empty() {
            ProjectSource::Explicit(project_ids)
        } else if let Some(team) = get(keys::TEAM_ID) {
            ProjectSource::Team(team.trim().to_owned())
        } else {
            return Err(ConfigError::MissingProjectSource {
                team_key: keys::TEAM_ID,
                projects_key: keys::PROJECT_IDS,
            });
        };

        let allow_list = get(keys::PROJECT_NAMES)
            .map(|raw| split_list(&raw))
            .unwrap_or_default()
            .into_iter()
            .map(ProjectName::from)
            .collect();

        Ok(Self {
            token,
            source,
            output: PathBuf::from(get(keys::OUTPUT).unwrap_or_else(|| DEFAULT_OUTPUT.into())),
            allow_list,
            api_base: get(keys::API_BASE)
                .unwrap_or_else(|| DEFAULT_API_BASE.into())
                .trim_end_matches('/')
                .to_owned(),
            org: get(keys::ORG).unwrap_or_else(|| DEFAULT_ORG.into()),
        })
    }

    /// Whether a project with `name` passes the allow-list.
    pub fn allows(&self, name: &ProjectName) -> bool {
        self.allow_list.is_empty() || self.allow_list.contains(name)
    }
}

// Keeps the token out of logs and error reports.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .field("output", &self.output)
            .field("allow_list", &self.allow_list)
            .field("api_base", &self.api_base)
            .field("org", &self.org)
            .finish()
    }
}

/// Split a comma-separated list, trimming items and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
