//! Editor state store.
//!
//! `EditorStore` owns the project and the media pool and is the only place
//! they are mutated. After every applied change it publishes an immutable
//! `Arc<Project>` through a `tokio::sync::watch` channel, so readers such as
//! the preview compositor always see a consistent snapshot.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::watch;

use cutline_common::error::{CutlineError, CutlineResult};
use cutline_project_model::{
    find_preset, Clip, ClipId, FormatPreset, MediaItem, MediaPool, Project, ProjectError,
    ProjectSnapshot, RecentProject, RecentProjectsStore, TrackId, TrackKind,
};

use crate::ops::{self, ClipUpdate, EditResult};

/// Owned editor state with change notification.
pub struct EditorStore {
    project: Project,
    media: MediaPool,
    tx: watch::Sender<Arc<Project>>,
    revision: u64,
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorStore {
    /// A store holding a fresh project and an empty media pool.
    pub fn new() -> Self {
        Self::with_project(Project::new())
    }

    pub fn with_project(project: Project) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(project.clone()));
        Self {
            project,
            media: MediaPool::new(),
            tx,
            revision: 0,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn media(&self) -> &MediaPool {
        &self.media
    }

    /// Number of changes published so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Receive a fresh snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Project>> {
        self.tx.subscribe()
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> Arc<Project> {
        self.tx.borrow().clone()
    }

    fn publish(&mut self) {
        self.revision += 1;
        self.tx.send_replace(Arc::new(self.project.clone()));
    }

    fn commit<T>(&mut self, op: &'static str, result: EditResult<T>) -> EditResult<T> {
        match &result {
            Ok(_) => self.publish(),
            Err(reason) => tracing::debug!(op, %reason, "Edit not applied"),
        }
        result
    }

    // Transport and view state

    pub fn set_playhead(&mut self, time: f64) {
        self.project.set_playhead(time);
        self.publish();
    }

    pub fn set_zoom_level(&mut self, level: f64) {
        self.project.set_zoom_level(level);
        self.publish();
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.project.set_playing(playing);
        tracing::debug!(playing, at = self.project.current_time, "Transport");
        self.publish();
    }

    pub fn toggle_playing(&mut self) {
        let playing = !self.project.is_playing;
        self.set_playing(playing);
    }

    pub fn set_selected_clip(&mut self, clip_id: Option<ClipId>) {
        self.project.set_selected_clip(clip_id);
        self.publish();
    }

    pub fn set_magnetic(&mut self, magnetic: bool) {
        self.project.set_magnetic(magnetic);
        self.publish();
    }

    pub fn toggle_magnetic(&mut self) {
        self.project.toggle_magnetic();
        self.publish();
    }

    pub fn set_dimensions(&mut self, width: u32, height: u32, fps: u32) {
        self.project.set_dimensions(width, height, fps);
        self.publish();
    }

    /// Switch the output format to a named preset.
    pub fn apply_preset(&mut self, preset_id: &str) -> CutlineResult<&'static FormatPreset> {
        let preset = find_preset(preset_id)
            .ok_or_else(|| CutlineError::config(format!("unknown format preset `{preset_id}`")))?;
        self.set_dimensions(preset.width, preset.height, preset.fps);
        tracing::info!(preset = preset.id, width = preset.width, height = preset.height, "Format preset applied");
        Ok(preset)
    }

    // Edit operations

    pub fn add_track(&mut self, kind: TrackKind) -> TrackId {
        let id = ops::add_track(&mut self.project, kind);
        self.publish();
        id
    }

    pub fn delete_track(&mut self, track_id: &str) -> EditResult {
        let result = ops::delete_track(&mut self.project, track_id);
        self.commit("delete_track", result)
    }

    pub fn add_media(&mut self, item: MediaItem) {
        ops::add_media(&mut self.media, item);
        self.publish();
    }

    pub fn remove_media(&mut self, media_id: &str) -> EditResult {
        let result = ops::remove_media(&self.project, &mut self.media, media_id);
        self.commit("remove_media", result)
    }

    pub fn add_clip(&mut self, track_id: &str, clip: Clip) -> EditResult {
        let result = ops::add_clip(&mut self.project, track_id, clip);
        self.commit("add_clip", result)
    }

    pub fn update_clip(&mut self, clip_id: &str, update: &ClipUpdate) -> EditResult {
        let result = ops::update_clip(&mut self.project, clip_id, update);
        self.commit("update_clip", result)
    }

    pub fn trim_clip(&mut self, clip_id: &str, update: &ClipUpdate) -> EditResult {
        let result = ops::trim_clip(&mut self.project, clip_id, update);
        self.commit("trim_clip", result)
    }

    pub fn delete_clip(&mut self, clip_id: &str) -> EditResult {
        let result = ops::delete_clip(&mut self.project, clip_id);
        self.commit("delete_clip", result)
    }

    pub fn split_clip(&mut self) -> EditResult<ClipId> {
        let result = ops::split_clip(&mut self.project);
        self.commit("split_clip", result)
    }

    pub fn reset_project(&mut self) {
        ops::reset_project(&mut self.project, &mut self.media);
        self.publish();
    }

    // Persistence

    /// Replace the project with a parsed snapshot.
    ///
    /// Malformed documents are logged and leave the store untouched.
    pub fn load_snapshot_json(&mut self, json: &str) -> Result<(), ProjectError> {
        match ProjectSnapshot::from_json(json) {
            Ok(snapshot) => {
                self.load_snapshot(snapshot);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Ignoring malformed project");
                Err(e)
            }
        }
    }

    pub fn load_snapshot(&mut self, snapshot: ProjectSnapshot) {
        let clips = snapshot.clip_count();
        self.project.apply_snapshot(snapshot);
        tracing::info!(
            tracks = self.project.tracks.len(),
            clips,
            duration = self.project.duration,
            "Project loaded"
        );
        self.publish();
    }

    /// Load a snapshot file and record it in the recent-projects list.
    pub fn load_file(
        &mut self,
        path: impl AsRef<Path>,
        recent: Option<&RecentProjectsStore>,
    ) -> CutlineResult<()> {
        let path = path.as_ref();
        let snapshot = ProjectSnapshot::load(path).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to load project");
            project_error(e)
        })?;
        self.load_snapshot(snapshot);

        if let Some(recent) = recent {
            let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            if let Err(e) = recent.record(RecentProject::opened_now(path, size)) {
                tracing::warn!(error = %e, "Failed to update recent projects");
            }
        }
        Ok(())
    }

    pub fn to_snapshot_json(&self) -> CutlineResult<String> {
        self.project.to_snapshot().to_json().map_err(project_error)
    }

    pub fn save_file(&self, path: impl AsRef<Path>) -> CutlineResult<()> {
        let path = path.as_ref();
        self.project.to_snapshot().save(path).map_err(project_error)?;
        tracing::info!(path = %path.display(), "Project saved");
        Ok(())
    }
}

/// Lift a model error into the workspace error type.
pub fn project_error(e: ProjectError) -> CutlineError {
    match e {
        ProjectError::IoError { path, source } if source.kind() == std::io::ErrorKind::NotFound => {
            CutlineError::FileNotFound { path }
        }
        ProjectError::Json(source) => CutlineError::Json(source),
        other => CutlineError::project(other.to_string()),
    }
}
