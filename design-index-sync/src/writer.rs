//! Index writer.
//!
//! The document is a pretty-printed JSON array (2-space indent) followed by a
//! newline. Each run replaces the whole file; nothing from a previous run is
//! merged. The write happens only once the complete, sorted index exists.

use std::path::{Path, PathBuf};

use design_index_core::NormalizedEntry;

use crate::error::{io_err, SyncError};

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of writing the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// The file was (over)written.
    Written { path: PathBuf, entries: usize },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf, entries: usize },
}

impl WriteResult {
    pub fn entries(&self) -> usize {
        match self {
            WriteResult::Written { entries, .. } | WriteResult::WouldWrite { entries, .. } => {
                *entries
            }
        }
    }
}

// ---------------------------------------------------------------------------
// render / write
// ---------------------------------------------------------------------------

/// Serialize `entries` exactly as they are written to disk.
pub fn render(entries: &[NormalizedEntry]) -> Result<String, SyncError> {
    let mut doc = serde_json::to_string_pretty(entries)?;
    doc.push('\n');
    Ok(doc)
}

/// Overwrite `path` with the rendered index.
///
/// Missing parent directories are created first.
pub fn write_index(
    path: &Path,
    entries: &[NormalizedEntry],
    dry_run: bool,
) -> Result<WriteResult, SyncError> {
    let doc = render(entries)?;

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
            entries: entries.len(),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::write(path, doc).map_err(|e| io_err(path, e))?;

    tracing::info!(entries = entries.len(), "wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
        entries: entries.len(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
