//! The project aggregate root.
//!
//! A project ties together the ordered track list, transport state
//! (playhead, play/pause, selection), timeline zoom, and the output format.
//! Scalar setters perform no validation; consistency is the edit engine's
//! job.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::clip::Clip;
use crate::track::{Track, TrackKind};

/// The total duration never drops below this many seconds.
pub const MIN_PROJECT_DURATION_SECS: f64 = 60.0;

pub const DEFAULT_WIDTH: u32 = 1920;
pub const DEFAULT_HEIGHT: u32 = 1080;
pub const DEFAULT_FPS: u32 = 30;
pub const DEFAULT_ZOOM_LEVEL: f64 = 1.0;

/// In-memory editor project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Tracks in creation order. Later tracks paint underneath earlier ones.
    pub tracks: Vec<Track>,

    /// Playhead position in seconds.
    pub current_time: f64,

    /// Total timeline duration: `max(60, latest clip end)`.
    pub duration: f64,

    /// Pixels-per-second multiplier of the timeline view.
    pub zoom_level: f64,

    pub is_playing: bool,

    /// At most one selected clip.
    pub selected_clip_id: Option<String>,

    /// Magnetic snapping and ripple delete.
    pub is_magnetic: bool,

    /// Output surface width in pixels.
    pub width: u32,

    /// Output surface height in pixels.
    pub height: u32,

    pub fps: u32,
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

impl Project {
    /// A fresh project with one empty video track and one empty audio track.
    pub fn new() -> Self {
        Self {
            tracks: Self::default_tracks(),
            current_time: 0.0,
            duration: MIN_PROJECT_DURATION_SECS,
            zoom_level: DEFAULT_ZOOM_LEVEL,
            is_playing: false,
            selected_clip_id: None,
            is_magnetic: false,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fps: DEFAULT_FPS,
        }
    }

    /// The two tracks every fresh project starts with.
    pub fn default_tracks() -> Vec<Track> {
        vec![
            Track::new("video-1", "Video 1", TrackKind::Video),
            Track::new("audio-1", "Audio 1", TrackKind::Audio),
        ]
    }

    pub fn set_playhead(&mut self, time: f64) {
        self.current_time = time;
    }

    pub fn set_zoom_level(&mut self, level: f64) {
        self.zoom_level = level;
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    pub fn set_selected_clip(&mut self, clip_id: Option<String>) {
        self.selected_clip_id = clip_id;
    }

    pub fn set_magnetic(&mut self, magnetic: bool) {
        self.is_magnetic = magnetic;
    }

    pub fn toggle_magnetic(&mut self) {
        self.is_magnetic = !self.is_magnetic;
    }

    /// Set output dimensions and frame rate.
    pub fn set_dimensions(&mut self, width: u32, height: u32, fps: u32) {
        self.width = width;
        self.height = height;
        self.fps = fps;
    }

    pub fn track(&self, track_id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == track_id)
    }

    pub fn track_mut(&mut self, track_id: &str) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id == track_id)
    }

    /// Locate a clip as `(track index, clip index)`.
    pub fn locate_clip(&self, clip_id: &str) -> Option<(usize, usize)> {
        self.tracks.iter().enumerate().find_map(|(ti, track)| {
            track
                .clips
                .iter()
                .position(|c| c.id == clip_id)
                .map(|ci| (ti, ci))
        })
    }

    pub fn clip(&self, clip_id: &str) -> Option<&Clip> {
        self.locate_clip(clip_id)
            .map(|(ti, ci)| &self.tracks[ti].clips[ci])
    }

    pub fn clip_mut(&mut self, clip_id: &str) -> Option<&mut Clip> {
        let (ti, ci) = self.locate_clip(clip_id)?;
        Some(&mut self.tracks[ti].clips[ci])
    }

    /// The selected clip, if the selection still points at an existing clip.
    pub fn selected_clip(&self) -> Option<&Clip> {
        self.selected_clip_id
            .as_deref()
            .and_then(|id| self.clip(id))
    }

    /// Every clip on every track.
    pub fn clips(&self) -> impl Iterator<Item = &Clip> {
        self.tracks.iter().flat_map(|t| t.clips.iter())
    }

    pub fn contains_clip(&self, clip_id: &str) -> bool {
        self.clips().any(|c| c.id == clip_id)
    }

    /// Latest clip end across all tracks (0 when there are no clips).
    pub fn content_end(&self) -> f64 {
        self.tracks.iter().map(Track::content_end).fold(0.0, f64::max)
    }

    /// Total duration implied by the current clips.
    pub fn computed_duration(&self) -> f64 {
        self.content_end().max(MIN_PROJECT_DURATION_SECS)
    }

    /// Re-establish `duration = max(60, latest clip end)`.
    pub fn recalculate_duration(&mut self) {
        self.duration = self.computed_duration();
    }
}

/// Errors that can occur when working with projects.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Malformed project JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid project: {message}")]
    ValidationError { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::ClipKind;

    #[test]
    fn test_new_project_defaults() {
        let project = Project::new();
        assert_eq!(project.tracks.len(), 2);
        assert_eq!(project.tracks[0].kind, TrackKind::Video);
        assert_eq!(project.tracks[1].kind, TrackKind::Audio);
        assert_eq!(project.duration, 60.0);
        assert_eq!((project.width, project.height, project.fps), (1920, 1080, 30));
        assert!(project.selected_clip_id.is_none());
    }

    #[test]
    fn test_computed_duration_has_floor() {
        let mut project = Project::new();
        project.tracks[0]
            .clips
            .push(Clip::new("a", "a", "/a.mp4", ClipKind::Video, 0.0, 10.0));
        assert_eq!(project.computed_duration(), 60.0);

        project.tracks[1]
            .clips
            .push(Clip::new("b", "b", "/b.wav", ClipKind::Audio, 55.0, 10.0));
        project.recalculate_duration();
        assert_eq!(project.duration, 65.0);
    }

    #[test]
    fn test_locate_clip_and_selection() {
        let mut project = Project::new();
        project.tracks[1]
            .clips
            .push(Clip::new("b", "b", "/b.wav", ClipKind::Audio, 1.0, 2.0));

        assert_eq!(project.locate_clip("b"), Some((1, 0)));
        assert!(project.selected_clip().is_none());

        project.set_selected_clip(Some("b".to_string()));
        assert_eq!(project.selected_clip().map(|c| c.start), Some(1.0));

        project.set_selected_clip(Some("gone".to_string()));
        assert!(project.selected_clip().is_none());
    }
}
