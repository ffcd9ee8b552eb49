//! Pointer gesture state machine for the timeline.
//!
//! Exactly one gesture is active at a time. A clip drag or edge resize
//! suppresses scrubbing until the pointer is released or leaves the
//! timeline.

use cutline_common::config::EditorConfig;
use cutline_edit_engine::{
    resolve_drag_start, ClipUpdate, EditResult, EditorStore, NoOp, SnapConfig,
};
use cutline_project_model::{new_id, Clip, ClipId, TrackKind};

use crate::metrics::{TimelineMetrics, TimelineViewport};

/// Which clip edge a resize handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
}

/// The gesture currently in progress.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Idle,
    Scrubbing,
    DraggingClip {
        clip_id: ClipId,
        start_x: f64,
        original_start: f64,
    },
    Resizing {
        clip_id: ClipId,
        edge: Edge,
        start_x: f64,
        original_start: f64,
        original_duration: f64,
        original_offset: f64,
    },
}

/// Where dragged media was released.
#[derive(Debug, Clone, PartialEq)]
pub enum DropTarget {
    Track(String),
    /// The "new track" zone below the last track.
    NewTrack,
}

/// Drives edits from pointer input.
#[derive(Debug, Clone)]
pub struct GestureController {
    metrics: TimelineMetrics,
    snap: SnapConfig,
    drop_zero_snap: f64,
    min_clip_duration: f64,
    gesture: Gesture,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl GestureController {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            metrics: TimelineMetrics::from(config),
            snap: SnapConfig::from(config),
            drop_zero_snap: config.drop_zero_snap_secs,
            min_clip_duration: config.min_clip_duration,
            gesture: Gesture::Idle,
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn metrics(&self) -> &TimelineMetrics {
        &self.metrics
    }

    fn is_editing(&self) -> bool {
        matches!(
            self.gesture,
            Gesture::DraggingClip { .. } | Gesture::Resizing { .. }
        )
    }

    /// Pointer down on the ruler or empty track area.
    ///
    /// Returns `false` when a clip drag or resize is in progress.
    pub fn begin_scrub(
        &mut self,
        store: &mut EditorStore,
        viewport: &TimelineViewport,
        client_x: f64,
    ) -> bool {
        if self.is_editing() {
            return false;
        }
        self.gesture = Gesture::Scrubbing;
        self.scrub_to(store, viewport, client_x);
        true
    }

    fn scrub_to(&self, store: &mut EditorStore, viewport: &TimelineViewport, client_x: f64) {
        let zoom = store.project().zoom_level;
        let time = self.metrics.time_at(viewport, client_x, zoom);
        store.set_playhead(time);
    }

    /// Pointer down on a clip body: select it and start moving it.
    pub fn begin_clip_drag(
        &mut self,
        store: &mut EditorStore,
        clip_id: &str,
        client_x: f64,
    ) -> EditResult {
        let original_start = store
            .project()
            .clip(clip_id)
            .map(|c| c.start)
            .ok_or_else(|| NoOp::UnknownClip(clip_id.to_string()))?;

        self.gesture = Gesture::DraggingClip {
            clip_id: clip_id.to_string(),
            start_x: client_x,
            original_start,
        };
        store.set_selected_clip(Some(clip_id.to_string()));
        Ok(())
    }

    /// Pointer down on a resize handle of a clip.
    pub fn begin_resize(
        &mut self,
        store: &mut EditorStore,
        clip_id: &str,
        edge: Edge,
        client_x: f64,
    ) -> EditResult {
        let clip = store
            .project()
            .clip(clip_id)
            .ok_or_else(|| NoOp::UnknownClip(clip_id.to_string()))?;

        self.gesture = Gesture::Resizing {
            clip_id: clip_id.to_string(),
            edge,
            start_x: client_x,
            original_start: clip.start,
            original_duration: clip.duration,
            original_offset: clip.offset,
        };
        store.set_selected_clip(Some(clip_id.to_string()));
        Ok(())
    }

    /// Pointer moved while a gesture may be active.
    pub fn pointer_move(
        &mut self,
        store: &mut EditorStore,
        viewport: &TimelineViewport,
        client_x: f64,
    ) -> EditResult {
        let zoom = store.project().zoom_level;
        match &self.gesture {
            Gesture::Idle => Ok(()),
            Gesture::Scrubbing => {
                self.scrub_to(store, viewport, client_x);
                Ok(())
            }
            Gesture::DraggingClip {
                clip_id,
                start_x,
                original_start,
            } => {
                let delta = self.metrics.delta_secs(client_x - start_x, zoom);
                let candidate = (original_start + delta).max(0.0);
                let start = resolve_drag_start(store.project(), clip_id, candidate, &self.snap);
                store.trim_clip(clip_id, &ClipUpdate::new().start(start))
            }
            Gesture::Resizing {
                clip_id,
                edge: Edge::Right,
                start_x,
                original_duration,
                ..
            } => {
                let delta = self.metrics.delta_secs(client_x - start_x, zoom);
                let duration = (original_duration + delta).max(self.min_clip_duration);
                store.trim_clip(clip_id, &ClipUpdate::new().duration(duration))
            }
            Gesture::Resizing {
                clip_id,
                edge: Edge::Left,
                start_x,
                original_start,
                original_duration,
                original_offset,
            } => {
                let delta = self.metrics.delta_secs(client_x - start_x, zoom);
                let min_delta = -original_start.min(*original_offset);
                let max_delta = original_duration - self.min_clip_duration;
                let delta = delta.max(min_delta).min(max_delta);
                store.trim_clip(
                    clip_id,
                    &ClipUpdate::new()
                        .start(original_start + delta)
                        .duration(original_duration - delta)
                        .offset(original_offset + delta),
                )
            }
        }
    }

    /// Pointer released or left the timeline: end any gesture.
    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Place pooled media on a track at the drop position.
    ///
    /// Dropping on the new-track zone first appends a video track.
    pub fn drop_media(
        &mut self,
        store: &mut EditorStore,
        target: DropTarget,
        media_id: &str,
        viewport: &TimelineViewport,
        client_x: f64,
    ) -> EditResult<ClipId> {
        let media = store
            .media()
            .get(media_id)
            .cloned()
            .ok_or_else(|| NoOp::UnknownMedia(media_id.to_string()))?;

        let track_id = match target {
            DropTarget::Track(id) => id,
            DropTarget::NewTrack => store.add_track(TrackKind::Video),
        };

        let zoom = store.project().zoom_level;
        let mut start = self.metrics.time_at(viewport, client_x, zoom);
        if start < self.drop_zero_snap {
            start = 0.0;
        }

        let clip_id = new_id();
        let clip = Clip::new(
            clip_id.clone(),
            media.file_name(),
            media.url.clone(),
            media.kind.clip_kind(),
            start,
            media.duration,
        );
        store.add_clip(&track_id, clip)?;
        tracing::debug!(clip_id = %clip_id, track_id = %track_id, start, "Media dropped");
        Ok(clip_id)
    }
}
