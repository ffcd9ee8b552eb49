//! Recently opened projects.
//!
//! A bounded side record kept outside any project snapshot: most recent
//! first, de-duplicated by path, at most [`MAX_RECENT_PROJECTS`] entries.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::project::ProjectError;

pub const MAX_RECENT_PROJECTS: usize = 10;

/// One entry of the recent-projects list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentProject {
    pub name: String,
    pub path: String,
    /// Unix time in milliseconds when the project was last opened.
    pub last_modified: i64,
    /// File size in bytes.
    pub size: u64,
}

impl RecentProject {
    /// Describe a project file just opened at `path`.
    pub fn opened_now(path: &Path, size: u64) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name: file_name.replace(".json", ""),
            path: path.to_string_lossy().into_owned(),
            last_modified: chrono::Utc::now().timestamp_millis(),
            size,
        }
    }
}

/// The recent-projects list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentProjects {
    entries: Vec<RecentProject>,
}

impl RecentProjects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `entry` first, dropping any older entry with the same path.
    pub fn record(&mut self, entry: RecentProject) {
        self.entries.retain(|e| e.path != entry.path);
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_RECENT_PROJECTS);
    }

    pub fn entries(&self) -> &[RecentProject] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load the list, treating a missing or unreadable file as empty.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(list) => list,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to parse recent projects");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read recent projects");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ProjectError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ProjectError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| ProjectError::IoError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Recent-projects list bound to its backing file.
#[derive(Debug, Clone)]
pub struct RecentProjectsStore {
    path: PathBuf,
}

impl RecentProjectsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> RecentProjects {
        RecentProjects::load(&self.path)
    }

    /// Record an opened project and persist the list.
    pub fn record(&self, entry: RecentProject) -> Result<RecentProjects, ProjectError> {
        let mut list = self.list();
        list.record(entry);
        list.save(&self.path)?;
        Ok(list)
    }
}
