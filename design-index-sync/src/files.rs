//! File collection: one request per project, mapped through the normalizer.
//!
//! With `jobs <= 1` projects are fetched strictly in list order and the first
//! failure stops the walk. With `jobs > 1` a scoped pool of at most `jobs`
//! threads drains the project list; per-project results are reassembled in list
//! order and the first failure in list order is returned. Output order is
//! decided later by the sorter, never here.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use design_index_core::{normalize, types::FilesPage, Config, NormalizedEntry, Project};

use crate::client::{self, JsonSource};
use crate::error::SyncError;

type ProjectResult = Result<Vec<NormalizedEntry>, SyncError>;

/// Fetch and normalize the files of every project.
pub fn collect<S>(
    source: &S,
    config: &Config,
    projects: &[Project],
    jobs: usize,
) -> Result<Vec<NormalizedEntry>, SyncError>
where
    S: JsonSource + ?Sized,
{
    if jobs <= 1 || projects.len() <= 1 {
        let mut entries = Vec::new();
        for project in projects {
            entries.extend(collect_project(source, config, project)?);
        }
        return Ok(entries);
    }
    collect_pooled(source, config, projects, jobs)
}

/// Fetch one project's files and normalize them.
pub fn collect_project<S>(source: &S, config: &Config, project: &Project) -> ProjectResult
where
    S: JsonSource + ?Sized,
{
    let url = client::project_files_url(&config.api_base, &project.id.0);
    let page: FilesPage = client::fetch(source, &url)?;
    let files = page.files.unwrap_or_default();

    tracing::info!(project = %project.name, files = files.len(), "collected files");

    let name = (!project.name.0.is_empty()).then_some(&project.name);
    Ok(files
        .into_iter()
        .map(|file| normalize(file, name, &config.org))
        .collect())
}

fn collect_pooled<S>(
    source: &S,
    config: &Config,
    projects: &[Project],
    jobs: usize,
) -> Result<Vec<NormalizedEntry>, SyncError>
where
    S: JsonSource + ?Sized,
{
    let next = AtomicUsize::new(0);
    let failed = AtomicBool::new(false);
    let mut slots: Vec<Option<ProjectResult>> = projects.iter().map(|_| None).collect();

    thread::scope(|scope| {
        let workers: Vec<_> = (0..jobs.min(projects.len()))
            .map(|_| {
                scope.spawn(|| {
                    let mut done = Vec::new();
                    while !failed.load(Ordering::Acquire) {
                        let index = next.fetch_add(1, Ordering::AcqRel);
                        let Some(project) = projects.get(index) else {
                            break;
                        };
                        let result = collect_project(source, config, project);
                        if result.is_err() {
                            failed.store(true, Ordering::Release);
                        }
                        done.push((index, result));
                    }
                    done
                })
            })
            .collect();

        for worker in workers {
            match worker.join() {
                Ok(done) => {
                    for (index, result) in done {
                        slots[index] = Some(result);
                    }
                }
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
    });

    // Indices are claimed in increasing order, so every slot before the first
    // unclaimed one is filled and any failure precedes it.
    let mut entries = Vec::new();
    for slot in slots {
        match slot {
            Some(Ok(found)) => entries.extend(found),
            Some(Err(err)) => return Err(err),
            None => break,
        }
    }
    Ok(entries)
}
