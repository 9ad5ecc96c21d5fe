//! Authenticated JSON GETs against the Figma REST API.
//!
//! [`JsonSource`] is the single network seam of a run. [`ApiClient`] is the
//! real implementation; tests substitute canned sources. There is no retry,
//! timeout, or rate limiting: any failure aborts the run.

use serde::de::DeserializeOwned;
use serde_json::Value;

use design_index_core::normalize::escape_component;
use design_index_core::Config;

use crate::error::SyncError;

/// Header carrying the personal access token.
pub const TOKEN_HEADER: &str = "X-Figma-Token";

/// Anything that can answer a GET with a JSON document.
pub trait JsonSource: Send + Sync {
    /// Fetch `url` and parse the body as JSON.
    ///
    /// A status outside 200..=299 must yield [`SyncError::Http`].
    fn fetch_json(&self, url: &str) -> Result<Value, SyncError>;
}

/// Blocking client for the Figma REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    token: String,
}

impl ApiClient {
    /// Build a client from the resolved configuration.
    ///
    /// Redirects are not followed, so a 3xx surfaces as [`SyncError::Http`].
    pub fn new(config: &Config) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().redirects(0).build(),
            token: config.token.clone(),
        }
    }
}

impl JsonSource for ApiClient {
    fn fetch_json(&self, url: &str) -> Result<Value, SyncError> {
        tracing::debug!(url, "GET");
        let response = match self.agent.get(url).set(TOKEN_HEADER, &self.token).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                return Err(http_error(url, status, response))
            }
            Err(ureq::Error::Transport(source)) => {
                return Err(SyncError::Transport {
                    url: url.to_owned(),
                    source: Box::new(source),
                })
            }
        };

        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(http_error(url, status, response));
        }

        // Streamed: `into_string` caps bodies at 10 MB.
        serde_json::from_reader(response.into_reader()).map_err(|source| SyncError::Decode {
            url: url.to_owned(),
            source,
        })
    }
}

fn http_error(url: &str, status: u16, response: ureq::Response) -> SyncError {
    let body = response.into_string().unwrap_or_else(|e| {
        tracing::debug!(url, status, error = %e, "failed to read error body");
        format!("<unreadable body: {e}>")
    });
    tracing::debug!(url, status, "non-success response");
    SyncError::Http {
        status,
        url: url.to_owned(),
        body,
    }
}

/// `{base}/teams/{team}/projects`, with `team` escaped as one path segment.
pub fn team_projects_url(base: &str, team: &str) -> String {
    format!("{base}/teams/{}/projects", escape_component(team))
}

/// `{base}/projects/{project}/files`, with `project` escaped as one path segment.
pub fn project_files_url(base: &str, project: &str) -> String {
    format!("{base}/projects/{}/files", escape_component(project))
}

/// Fetch `url` from `source` and deserialize the body into `T`.
pub fn fetch<T, S>(source: &S, url: &str) -> Result<T, SyncError>
where
    T: DeserializeOwned,
    S: JsonSource + ?Sized,
{
    let value = source.fetch_json(url)?;
    serde_json::from_value(value).map_err(|source| SyncError::Decode {
        url: url.to_owned(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
