//! Flat persisted form of a project.
//!
//! A snapshot carries the tracks (clips nested) plus the timeline zoom and
//! output format. Transport state (playhead, play/pause, selection, magnetic
//! mode) is not persisted. Loading is tolerant: every field but `tracks`
//! falls back to its default when missing, null, or zero.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::project::{
    Project, ProjectError, DEFAULT_FPS, DEFAULT_HEIGHT, DEFAULT_WIDTH, DEFAULT_ZOOM_LEVEL,
    MIN_PROJECT_DURATION_SECS,
};
use crate::track::Track;

/// The persisted project document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    pub tracks: Vec<Track>,
    pub duration: f64,
    pub zoom_level: f64,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

/// Wire shape accepted on load, before defaults are applied.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    tracks: Option<Vec<Track>>,
    duration: Option<f64>,
    zoom_level: Option<f64>,
    width: Option<u32>,
    height: Option<u32>,
    fps: Option<u32>,
}

fn positive_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v > 0.0 && v.is_finite() => v,
        _ => default,
    }
}

fn nonzero_or(value: Option<u32>, default: u32) -> u32 {
    match value {
        Some(v) if v > 0 => v,
        _ => default,
    }
}

impl ProjectSnapshot {
    /// Parse a snapshot, applying defaults for optional fields.
    ///
    /// Fails when the document is not JSON or has no `tracks` array.
    pub fn from_json(json: &str) -> Result<Self, ProjectError> {
        let raw: RawSnapshot = serde_json::from_str(json)?;

        let mut tracks = raw.tracks.ok_or_else(|| ProjectError::ValidationError {
            message: "missing `tracks`".to_string(),
        })?;

        for track in &mut tracks {
            for clip in &mut track.clips {
                clip.track_id = track.id.clone();
            }
        }

        Ok(Self {
            tracks,
            duration: positive_or(raw.duration, MIN_PROJECT_DURATION_SECS),
            zoom_level: positive_or(raw.zoom_level, DEFAULT_ZOOM_LEVEL),
            width: nonzero_or(raw.width, DEFAULT_WIDTH),
            height: nonzero_or(raw.height, DEFAULT_HEIGHT),
            fps: nonzero_or(raw.fps, DEFAULT_FPS),
        })
    }

    /// Compact JSON, as written by the editor.
    pub fn to_json(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Read and parse a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ProjectError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json).map_err(|e| match e {
            ProjectError::Json(source) => ProjectError::ParseError {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Write the snapshot as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ProjectError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ProjectError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ProjectError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| ProjectError::IoError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Default download name, e.g. `project-2026-10-18.json`.
    pub fn default_file_name(date: chrono::NaiveDate) -> String {
        format!("project-{}.json", date.format("%Y-%m-%d"))
    }

    /// Number of clips across all tracks.
    pub fn clip_count(&self) -> usize {
        self.tracks.iter().map(|t| t.clips.len()).sum()
    }
}

impl Project {
    /// Capture the persisted part of the project.
    pub fn to_snapshot(&self) -> ProjectSnapshot {
        ProjectSnapshot {
            tracks: self.tracks.clone(),
            duration: self.duration,
            zoom_level: self.zoom_level,
            width: self.width,
            height: self.height,
            fps: self.fps,
        }
    }

    /// Replace the persisted part of the project wholesale.
    ///
    /// The playhead returns to 0 and the selection is cleared. The stored
    /// duration is advisory; the total is recomputed from the loaded clips.
    pub fn apply_snapshot(&mut self, snapshot: ProjectSnapshot) {
        self.tracks = snapshot.tracks;
        self.zoom_level = snapshot.zoom_level;
        self.width = snapshot.width;
        self.height = snapshot.height;
        self.fps = snapshot.fps;
        self.current_time = 0.0;
        self.selected_clip_id = None;
        self.recalculate_duration();
    }

    /// Build a project from a snapshot with default transport state.
    pub fn from_snapshot(snapshot: ProjectSnapshot) -> Self {
        let mut project = Project::new();
        project.apply_snapshot(snapshot);
        project
    }
}
