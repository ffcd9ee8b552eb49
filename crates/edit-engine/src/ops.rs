//! Edit operations over a project and its media pool.
//!
//! Each operation either applies completely and re-establishes
//! `duration = max(60, latest clip end)`, or returns a [`NoOp`] and leaves
//! the project untouched.

use cutline_project_model::{
    new_id, Clip, ClipId, MediaItem, MediaPool, Position, Project, Track, TrackId, TrackKind,
};

/// Why an edit was not applied.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NoOp {
    #[error("no track with id {0}")]
    UnknownTrack(String),

    #[error("no clip with id {0}")]
    UnknownClip(String),

    #[error("no media with id {0}")]
    UnknownMedia(String),

    #[error("no clip is selected")]
    NoSelection,

    #[error("playhead at {time:.3}s is not inside clip {clip_id}")]
    PlayheadOutsideClip { clip_id: String, time: f64 },

    #[error("invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },

    #[error("media {media_id} is used by {clip_count} clip(s)")]
    MediaInUse { media_id: String, clip_count: usize },
}

/// Outcome of an edit: `Err` means nothing changed.
pub type EditResult<T = ()> = Result<T, NoOp>;

/// A partial set of clip fields to merge into an existing clip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipUpdate {
    pub name: Option<String>,
    pub start: Option<f64>,
    pub duration: Option<f64>,
    pub offset: Option<f64>,
    pub volume: Option<f64>,
    pub speed: Option<f64>,
    pub opacity: Option<f64>,
    pub scale: Option<f64>,
    pub position: Option<Position>,
}

impl ClipUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, start: f64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Reset volume and speed to neutral, leaving placement untouched.
    pub fn reset_playback() -> Self {
        Self::new().volume(Clip::DEFAULT_VOLUME).speed(Clip::DEFAULT_SPEED)
    }

    /// Check every provided field against its allowed range.
    pub fn validate(&self) -> EditResult {
        fn check(field: &'static str, value: Option<f64>, ok: impl Fn(f64) -> bool) -> EditResult {
            match value {
                Some(v) if !v.is_finite() || !ok(v) => Err(NoOp::InvalidValue { field, value: v }),
                _ => Ok(()),
            }
        }

        check("start", self.start, |v| v >= 0.0)?;
        check("duration", self.duration, |v| v > 0.0)?;
        check("offset", self.offset, |v| v >= 0.0)?;
        check("volume", self.volume, |v| (0.0..=2.0).contains(&v))?;
        check("speed", self.speed, |v| v > 0.0)?;
        check("opacity", self.opacity, |v| (0.0..=1.0).contains(&v))?;
        check("scale", self.scale, |v| v > 0.0)?;
        if let Some(p) = self.position {
            check("position.x", Some(p.x), |_| true)?;
            check("position.y", Some(p.y), |_| true)?;
        }
        Ok(())
    }

    fn merge_into(&self, clip: &mut Clip) {
        if let Some(name) = &self.name {
            clip.name = name.clone();
        }
        if let Some(start) = self.start {
            clip.start = start;
        }
        if let Some(duration) = self.duration {
            clip.duration = duration;
        }
        if let Some(offset) = self.offset {
            clip.offset = offset;
        }
        if self.volume.is_some() {
            clip.volume = self.volume;
        }
        if self.speed.is_some() {
            clip.speed = self.speed;
        }
        if self.opacity.is_some() {
            clip.opacity = self.opacity;
        }
        if self.scale.is_some() {
            clip.scale = self.scale;
        }
        if self.position.is_some() {
            clip.position = self.position;
        }
    }
}

/// Append a new empty track and return its id.
pub fn add_track(project: &mut Project, kind: TrackKind) -> TrackId {
    let id = new_id();
    project
        .tracks
        .push(Track::new(id.clone(), format!("{} Track", kind.label()), kind));
    tracing::debug!(track_id = %id, ?kind, "Track added");
    id
}

/// Remove a track together with its clips.
pub fn delete_track(project: &mut Project, track_id: &str) -> EditResult {
    let idx = project
        .tracks
        .iter()
        .position(|t| t.id == track_id)
        .ok_or_else(|| NoOp::UnknownTrack(track_id.to_string()))?;

    let removed = project.tracks.remove(idx);
    if let Some(selected) = &project.selected_clip_id {
        if removed.clip(selected).is_some() {
            project.selected_clip_id = None;
        }
    }
    project.recalculate_duration();
    tracing::debug!(track_id, clips = removed.clips.len(), "Track deleted");
    Ok(())
}

/// Register imported media. Duplicates are kept.
pub fn add_media(pool: &mut MediaPool, item: MediaItem) {
    tracing::debug!(media_id = %item.id, url = %item.url, "Media added");
    pool.add(item);
}

/// Remove media that no clip references.
pub fn remove_media(project: &Project, pool: &mut MediaPool, media_id: &str) -> EditResult {
    let item = pool
        .get(media_id)
        .ok_or_else(|| NoOp::UnknownMedia(media_id.to_string()))?;

    let clip_count = project
        .clips()
        .filter(|c| c.source_path == item.url)
        .count();
    if clip_count > 0 {
        return Err(NoOp::MediaInUse {
            media_id: media_id.to_string(),
            clip_count,
        });
    }

    pool.remove(media_id);
    Ok(())
}

/// Place a clip on a track. Overlaps with existing clips are allowed.
pub fn add_clip(project: &mut Project, track_id: &str, mut clip: Clip) -> EditResult {
    if clip.duration <= 0.0 || !clip.duration.is_finite() {
        return Err(NoOp::InvalidValue {
            field: "duration",
            value: clip.duration,
        });
    }
    if clip.start < 0.0 || !clip.start.is_finite() {
        return Err(NoOp::InvalidValue {
            field: "start",
            value: clip.start,
        });
    }

    let track = project
        .track_mut(track_id)
        .ok_or_else(|| NoOp::UnknownTrack(track_id.to_string()))?;
    clip.track_id = track.id.clone();
    tracing::debug!(clip_id = %clip.id, track_id, start = clip.start, duration = clip.duration, "Clip added");
    track.clips.push(clip);

    project.recalculate_duration();
    Ok(())
}

/// Merge fields into a clip, time-stretching when the duration changes.
///
/// A new `duration` keeps the consumed source content fixed:
/// `new_speed = old_duration * old_speed / new_duration`. An explicit
/// `speed` in the same update takes precedence over the stretch.
pub fn update_clip(project: &mut Project, clip_id: &str, update: &ClipUpdate) -> EditResult {
    update.validate()?;
    let clip = project
        .clip_mut(clip_id)
        .ok_or_else(|| NoOp::UnknownClip(clip_id.to_string()))?;

    let stretched_speed = match (update.duration, update.speed) {
        (Some(new_duration), None) => Some(clip.content_duration() / new_duration),
        _ => None,
    };

    update.merge_into(clip);
    if let Some(speed) = stretched_speed {
        clip.speed = Some(speed);
    }

    project.recalculate_duration();
    Ok(())
}

/// Merge fields into a clip without any time-stretch.
///
/// Used by direct manipulation (drag, resize handles) where `start`,
/// `duration`, and `offset` are the free variables.
pub fn trim_clip(project: &mut Project, clip_id: &str, update: &ClipUpdate) -> EditResult {
    update.validate()?;
    let clip = project
        .clip_mut(clip_id)
        .ok_or_else(|| NoOp::UnknownClip(clip_id.to_string()))?;

    update.merge_into(clip);
    project.recalculate_duration();
    Ok(())
}

/// Remove a clip, rippling later clips on the same track in magnetic mode.
pub fn delete_clip(project: &mut Project, clip_id: &str) -> EditResult {
    let (ti, ci) = project
        .locate_clip(clip_id)
        .ok_or_else(|| NoOp::UnknownClip(clip_id.to_string()))?;

    let magnetic = project.is_magnetic;
    let track = &mut project.tracks[ti];
    let deleted = track.clips.remove(ci);

    if magnetic {
        for clip in track.clips.iter_mut().filter(|c| c.start > deleted.start) {
            // Non-overlapping clips move by exactly the deleted duration. A
            // clip that overlapped the deleted one stops at 0.
            clip.start = (clip.start - deleted.duration).max(0.0);
        }
    }

    if project.selected_clip_id.as_deref() == Some(clip_id) {
        project.selected_clip_id = None;
    }

    project.recalculate_duration();
    tracing::debug!(clip_id, ripple = magnetic, "Clip deleted");
    Ok(())
}

/// Split the selected clip at the playhead. Returns the id of the new
/// right-hand clip.
pub fn split_clip(project: &mut Project) -> EditResult<ClipId> {
    let selected = project.selected_clip_id.clone().ok_or(NoOp::NoSelection)?;
    let time = project.current_time;
    split_clip_at(project, &selected, time)
}

/// Split `clip_id` at timeline time `time`.
///
/// The original keeps its start and shrinks to end at `time`; the new clip
/// starts at `time`, continues the source from where the original stops, and
/// carries the original's presentation parameters with neutral defaults
/// filled in.
pub fn split_clip_at(project: &mut Project, clip_id: &str, time: f64) -> EditResult<ClipId> {
    let (ti, ci) = project
        .locate_clip(clip_id)
        .ok_or_else(|| NoOp::UnknownClip(clip_id.to_string()))?;

    let track = &mut project.tracks[ti];
    let original = &mut track.clips[ci];
    if !original.strictly_contains(time) {
        return Err(NoOp::PlayheadOutsideClip {
            clip_id: clip_id.to_string(),
            time,
        });
    }

    let split_point = time - original.start;
    let mut right = original.clone().with_presentation_defaults();
    right.id = new_id();
    right.start = time;
    right.duration = original.duration - split_point;
    right.offset = original.offset + split_point;
    original.duration = split_point;

    let right_id = right.id.clone();
    track.clips.insert(ci + 1, right);

    project.recalculate_duration();
    tracing::debug!(clip_id, new_clip_id = %right_id, at = time, "Clip split");
    Ok(right_id)
}

/// Restore a fresh project: two empty default tracks, default transport and
/// output format, and an empty media pool.
pub fn reset_project(project: &mut Project, pool: &mut MediaPool) {
    let magnetic = project.is_magnetic;
    let zoom = project.zoom_level;
    *project = Project::new();
    project.is_magnetic = magnetic;
    project.zoom_level = zoom;
    pool.clear();
    tracing::debug!("Project reset");
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutline_project_model::{ClipKind, MediaKind};

    fn video(id: &str, start: f64, duration: f64) -> Clip {
        Clip::new(id, id, format!("/m/{id}.mp4"), ClipKind::Video, start, duration)
    }

    fn project_with(clips: &[(&str, f64, f64)]) -> Project {
        let mut project = Project::new();
        for (id, start, duration) in clips {
            add_clip(&mut project, "video-1", video(id, *start, *duration)).unwrap();
        }
        project
    }

    #[test]
    fn test_add_track_appends_with_fresh_id() {
        let mut project = Project::new();
        let a = add_track(&mut project, TrackKind::Video);
        let b = add_track(&mut project, TrackKind::Audio);
        assert_ne!(a, b);
        assert_eq!(project.tracks.len(), 4);
        assert_eq!(project.tracks[2].id, a);
        assert_eq!(project.tracks[3].name, "Audio Track");
    }

    #[test]
    fn test_add_clip_duration_floor_and_growth() {
        let mut project = Project::new();
        let track = add_track(&mut project, TrackKind::Video);
        add_clip(&mut project, &track, video("a", 0.0, 10.0)).unwrap();
        assert_eq!(project.duration, 60.0);

        add_clip(&mut project, &track, video("b", 55.0, 10.0)).unwrap();
        assert_eq!(project.duration, 65.0);
        assert_eq!(project.clip("b").unwrap().track_id, track);
    }

    #[test]
    fn test_add_clip_to_unknown_track_is_noop() {
        let mut project = Project::new();
        let before = project.clone();
        let result = add_clip(&mut project, "missing", video("a", 0.0, 1.0));
        assert_eq!(result, Err(NoOp::UnknownTrack("missing".to_string())));
        assert_eq!(project, before);
    }

    #[test]
    fn test_update_duration_time_stretches() {
        let mut project = project_with(&[("a", 0.0, 10.0)]);
        update_clip(&mut project, "a", &ClipUpdate::new().duration(5.0)).unwrap();

        let clip = project.clip("a").unwrap();
        assert_eq!(clip.duration, 5.0);
        assert!((clip.speed() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_update_explicit_speed_wins_over_stretch() {
        let mut project = project_with(&[("a", 0.0, 10.0)]);
        update_clip(
            &mut project,
            "a",
            &ClipUpdate::new().duration(5.0).speed(1.0),
        )
        .unwrap();
        assert_eq!(project.clip("a").unwrap().speed(), 1.0);
    }

    #[test]
    fn test_update_rejects_non_positive_duration() {
        let mut project = project_with(&[("a", 0.0, 10.0)]);
        let before = project.clone();
        let result = update_clip(&mut project, "a", &ClipUpdate::new().duration(0.0));
        assert!(matches!(result, Err(NoOp::InvalidValue { field: "duration", .. })));
        assert_eq!(project, before);
    }

    #[test]
    fn test_trim_changes_duration_without_stretch() {
        let mut project = project_with(&[("a", 0.0, 10.0)]);
        trim_clip(&mut project, "a", &ClipUpdate::new().duration(70.0)).unwrap();
        let clip = project.clip("a").unwrap();
        assert_eq!(clip.speed(), 1.0);
        assert_eq!(project.duration, 70.0);
    }

    #[test]
    fn test_delete_without_magnet_leaves_gap() {
        let mut project = project_with(&[("a", 0.0, 5.0), ("b", 5.0, 5.0)]);
        delete_clip(&mut project, "a").unwrap();
        assert_eq!(project.clip("b").unwrap().start, 5.0);
    }

    #[test]
    fn test_ripple_delete_shifts_only_later_clips_on_same_track() {
        let mut project = project_with(&[("a", 0.0, 5.0), ("b", 5.0, 5.0), ("c", 12.0, 3.0)]);
        add_clip(&mut project, "audio-1", video("other", 20.0, 2.0)).unwrap();
        project.set_magnetic(true);

        delete_clip(&mut project, "b").unwrap();
        assert_eq!(project.clip("a").unwrap().start, 0.0);
        assert_eq!(project.clip("c").unwrap().start, 7.0);
        assert_eq!(project.clip("other").unwrap().start, 20.0);
    }

    #[test]
    fn test_ripple_delete_stops_overlapping_clip_at_zero() {
        let mut project = project_with(&[("a", 0.0, 10.0), ("b", 3.0, 2.0), ("c", 10.0, 4.0)]);
        project.set_magnetic(true);

        delete_clip(&mut project, "a").unwrap();
        assert_eq!(project.clip("b").unwrap().start, 0.0);
        assert_eq!(project.clip("c").unwrap().start, 0.0);
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut project = project_with(&[("a", 0.0, 5.0)]);
        project.set_selected_clip(Some("a".to_string()));
        delete_clip(&mut project, "a").unwrap();
        assert!(project.selected_clip_id.is_none());
    }

    #[test]
    fn test_split_preserves_extent_and_source() {
        let mut project = project_with(&[("a", 4.0, 10.0)]);
        project.clip_mut("a").unwrap().offset = 1.0;
        project.set_selected_clip(Some("a".to_string()));
        project.set_playhead(7.0);

        let right_id = split_clip(&mut project).unwrap();
        let left = project.clip("a").unwrap().clone();
        let right = project.clip(&right_id).unwrap().clone();

        assert_eq!((left.start, left.duration), (4.0, 3.0));
        assert_eq!((right.start, right.duration), (7.0, 7.0));
        assert_eq!(right.offset, 4.0);
        assert_eq!(right.source_path, left.source_path);
        assert_eq!(right.volume, Some(1.0));
        assert_eq!(right.position, Some(Position::ORIGIN));
        assert_eq!(project.tracks[0].clips[1].id, right_id);
    }

    #[test]
    fn test_split_requires_selection_and_interior_playhead() {
        let mut project = project_with(&[("a", 4.0, 10.0)]);
        project.set_playhead(7.0);
        assert_eq!(split_clip(&mut project), Err(NoOp::NoSelection));

        project.set_selected_clip(Some("a".to_string()));
        project.set_playhead(4.0);
        let before = project.clone();
        assert!(matches!(
            split_clip(&mut project),
            Err(NoOp::PlayheadOutsideClip { .. })
        ));
        assert_eq!(project, before);
    }

    #[test]
    fn test_delete_track_recomputes_duration() {
        let mut project = Project::new();
        let track = add_track(&mut project, TrackKind::Video);
        add_clip(&mut project, &track, video("long", 0.0, 90.0)).unwrap();
        project.set_selected_clip(Some("long".to_string()));
        assert_eq!(project.duration, 90.0);

        delete_track(&mut project, &track).unwrap();
        assert_eq!(project.duration, 60.0);
        assert!(project.selected_clip_id.is_none());
        assert_eq!(project.tracks.len(), 2);
    }

    #[test]
    fn test_remove_media_refuses_referenced_items() {
        let mut pool = MediaPool::new();
        let used = MediaItem::from_file("/m/a.mp4", 10.0, MediaKind::Video);
        let unused = MediaItem::from_file("/m/b.mp4", 10.0, MediaKind::Video);
        add_media(&mut pool, used.clone());
        add_media(&mut pool, unused.clone());
        let project = project_with(&[("a", 0.0, 5.0)]);

        assert!(matches!(
            remove_media(&project, &mut pool, &used.id),
            Err(NoOp::MediaInUse { clip_count: 1, .. })
        ));
        remove_media(&project, &mut pool, &unused.id).unwrap();
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_reset_project_restores_defaults() {
        let mut project = project_with(&[("a", 0.0, 90.0)]);
        let mut pool = MediaPool::new();
        pool.add(MediaItem::from_file("/m/a.mp4", 90.0, MediaKind::Video));
        project.set_dimensions(1080, 1920, 60);
        project.set_playhead(30.0);

        reset_project(&mut project, &mut pool);
        assert_eq!(project.tracks.len(), 2);
        assert_eq!(project.duration, 60.0);
        assert_eq!(project.current_time, 0.0);
        assert_eq!((project.width, project.height, project.fps), (1920, 1080, 30));
        assert!(pool.is_empty());
    }
}
