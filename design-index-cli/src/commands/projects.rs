//! `design-index projects`: list the projects a sync would scan.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use design_index_sync::{projects, ApiClient};

use super::SourceArgs;

/// Arguments for `design-index projects`.
#[derive(Args, Debug)]
pub struct ProjectsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ProjectRow<'a> {
    id: &'a str,
    name: &'a str,
}

impl ProjectsArgs {
    pub fn run(self) -> Result<()> {
        let config = self.source.resolve(None)?;
        let client = ApiClient::new(&config);
        let found = projects::resolve(&client, &config).context("failed to resolve projects")?;

        if self.json {
            let rows: Vec<ProjectRow<'_>> = found
                .iter()
                .map(|p| ProjectRow {
                    id: &p.id.0,
                    name: &p.name.0,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        if found.is_empty() {
            println!("No projects matched.");
            return Ok(());
        }
        for project in &found {
            println!("{}\t{}", project.id, project.name);
        }
        Ok(())
    }
}
