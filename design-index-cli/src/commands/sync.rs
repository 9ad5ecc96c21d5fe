//! `design-index sync`: fetch, sort and write the index.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use design_index_sync::{
    pipeline::{self, SyncOptions},
    ApiClient, WriteResult,
};

use super::SourceArgs;

/// Arguments for `design-index sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Destination file [env: DESIGN_INDEX_OUT] [default: design-index.json].
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Projects fetched concurrently; 1 fetches one project at a time.
    #[arg(long, short = 'j', default_value_t = 1)]
    pub jobs: usize,

    /// Build the index without writing it.
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let config = self.source.resolve(self.output.as_ref())?;
        tracing::debug!(?config, jobs = self.jobs, "starting sync");
        let client = ApiClient::new(&config);
        let options = SyncOptions {
            jobs: self.jobs,
            dry_run: self.dry_run,
        };

        let report = pipeline::run(&client, &config, options).context("sync failed")?;
        match &report.write {
            WriteResult::Written { path, entries } => {
                println!("Wrote {entries} entries to {}", path.display())
            }
            WriteResult::WouldWrite { path, entries } => {
                println!("[dry-run] Would write {entries} entries to {}", path.display())
            }
        }
        Ok(())
    }
}
