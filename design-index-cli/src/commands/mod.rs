//! Subcommands and the flags they share.

pub mod projects;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use design_index_core::{config::keys, Config};

/// Project selection flags; each overrides its environment key.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Team whose projects are scanned [env: FIGMA_TEAM_ID].
    #[arg(long)]
    pub team: Option<String>,

    /// Comma-separated project ids; wins over a team [env: FIGMA_PROJECT_IDS].
    #[arg(long, value_name = "IDS")]
    pub project_ids: Option<String>,

    /// Comma-separated project names to keep [env: FIGMA_PROJECT_NAMES].
    #[arg(long, value_name = "NAMES")]
    pub allow: Option<String>,

    /// API root [env: FIGMA_API_BASE].
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,
}

impl SourceArgs {
    /// Resolve the run configuration: flags first, then the environment.
    pub fn resolve(&self, output: Option<&PathBuf>) -> Result<Config> {
        let flag = |key: &str| -> Option<String> {
            match key {
                keys::TEAM_ID => self.team.clone(),
                keys::PROJECT_IDS => self.project_ids.clone(),
                keys::PROJECT_NAMES => self.allow.clone(),
                keys::API_BASE => self.api_base.clone(),
                keys::OUTPUT => output.map(|p| p.display().to_string()),
                _ => None,
            }
        };
        Config::from_env_with(flag).context("invalid configuration")
    }
}
