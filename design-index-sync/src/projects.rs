//! Project enumeration: which projects a run scans.

use design_index_core::{types::ProjectsPage, Config, Project, ProjectSource};

use crate::client::{self, JsonSource};
use crate::error::SyncError;

/// Resolve the projects to scan, then apply the configured allow-list.
///
/// Explicit ids become pseudo-projects named after their id without any
/// request. A team is enumerated with one request; a response without a
/// `projects` field yields no projects. Filtering is exact-match and keeps
/// the upstream order.
pub fn resolve<S>(source: &S, config: &Config) -> Result<Vec<Project>, SyncError>
where
    S: JsonSource + ?Sized,
{
    let projects = match &config.source {
        ProjectSource::Explicit(ids) => ids.iter().cloned().map(Project::from_id).collect(),
        ProjectSource::Team(team) => {
            let url = client::team_projects_url(&config.api_base, team);
            let page: ProjectsPage = client::fetch(source, &url)?;
            page.projects.unwrap_or_default()
        }
    };

    let found = projects.len();
    let selected: Vec<Project> = projects
        .into_iter()
        .filter(|p| config.allows(&p.name))
        .collect();

    tracing::info!(found, selected = selected.len(), "resolved projects");
    Ok(selected)
}
