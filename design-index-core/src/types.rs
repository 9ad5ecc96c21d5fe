//! Domain types for the design index.
//!
//! Upstream records ([`Project`], [`RawFile`]) mirror the Figma REST payloads and
//! only live for the duration of one run. [`NormalizedEntry`] is the persisted
//! output record; its serialized field names and order are part of the file format.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Upstream project identifier.
///
/// Figma has returned project ids both as JSON strings and as numbers; both
/// deserialize into the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProjectId(pub String);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for ProjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WireId::deserialize(deserializer)? {
            WireId::Text(s) => Self(s),
            WireId::Number(n) => Self(n.to_string()),
        })
    }
}

/// Display name of an upstream project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ProjectName(pub String);

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Upstream records
// ---------------------------------------------------------------------------

/// A project to scan for files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    #[serde(default)]
    pub name: ProjectName,
}

impl Project {
    /// Pseudo-project for an explicitly configured id.
    ///
    /// The real name is unknown without an extra lookup, so the id doubles as
    /// the name (and therefore as the `_project` value of its entries).
    pub fn from_id(id: ProjectId) -> Self {
        let name = ProjectName(id.0.clone());
        Self { id, name }
    }
}

/// A file record as returned by `GET /projects/{id}/files`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawFile {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// Body of `GET /teams/{id}/projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectsPage {
    #[serde(default)]
    pub projects: Option<Vec<Project>>,
}

/// Body of `GET /projects/{id}/files`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilesPage {
    #[serde(default)]
    pub files: Option<Vec<RawFile>>,
}

// ---------------------------------------------------------------------------
// Output record
// ---------------------------------------------------------------------------

/// Lifecycle status of an index entry. Every synced file is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Active,
}

/// One record of the written index.
///
/// `brand_key`, `category`, `path`, `tags` and `thumb` are reserved for a later
/// enrichment pass and are always null/empty when produced by [`crate::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEntry {
    pub id: String,
    pub title: String,
    pub org: String,
    #[serde(rename = "brandKey")]
    pub brand_key: Option<String>,
    pub category: Vec<String>,
    pub path: Vec<String>,
    pub status: EntryStatus,
    pub tags: Vec<String>,
    pub thumb: Option<String>,
    #[serde(rename = "figmaUrl")]
    pub figma_url: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
    #[serde(rename = "_project")]
    pub project: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
