//! Shared sync pipeline entrypoint used by the CLI.
//!
//! resolve projects → collect files → sort → write. Nothing is written unless
//! every preceding step succeeded.

use design_index_core::{sort_entries, Config, NormalizedEntry};

use crate::client::JsonSource;
use crate::error::SyncError;
use crate::writer::{self, WriteResult};
use crate::{files, projects};

/// Knobs for a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Concurrent project fetches; `1` keeps collection strictly sequential.
    pub jobs: usize,
    /// Build the index but do not write it.
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            dry_run: false,
        }
    }
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub projects: usize,
    pub write: WriteResult,
}

/// Fetch, normalize and sort the full index without writing it.
pub fn build_index<S>(
    source: &S,
    config: &Config,
    jobs: usize,
) -> Result<(usize, Vec<NormalizedEntry>), SyncError>
where
    S: JsonSource + ?Sized,
{
    let projects = projects::resolve(source, config)?;
    let mut entries = files::collect(source, config, &projects, jobs)?;
    sort_entries(&mut entries);
    Ok((projects.len(), entries))
}

/// Run the pipeline and write the index to `config.output`.
pub fn run<S>(source: &S, config: &Config, options: SyncOptions) -> Result<SyncReport, SyncError>
where
    S: JsonSource + ?Sized,
{
    let (projects, entries) = build_index(source, config, options.jobs)?;
    let write = writer::write_index(&config.output, &entries, options.dry_run)?;
    Ok(SyncReport { projects, write })
}
