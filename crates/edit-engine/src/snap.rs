//! Snap resolution for dragged edit points.
//!
//! In magnetic mode a dragged clip start is pulled to the nearest snap point
//! (timeline origin and the edges of every other clip) inside a threshold.
//! Independently of magnetic mode, starts very close to zero land on zero.

use cutline_common::config::EditorConfig;
use cutline_project_model::Project;

/// Snap radii in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapConfig {
    /// Magnetic snap radius.
    pub threshold: f64,
    /// Starts below this always resolve to 0.
    pub zero_threshold: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            zero_threshold: 0.1,
        }
    }
}

impl From<&EditorConfig> for SnapConfig {
    fn from(config: &EditorConfig) -> Self {
        Self {
            threshold: config.snap_threshold_secs,
            zero_threshold: config.zero_snap_secs,
        }
    }
}

/// Candidate snap points: `0`, then each other clip's start and end in
/// track/clip scan order.
pub fn snap_points(project: &Project, exclude_clip_id: &str) -> Vec<f64> {
    let mut points = vec![0.0];
    for clip in project.clips().filter(|c| c.id != exclude_clip_id) {
        points.push(clip.start);
        points.push(clip.end());
    }
    points
}

/// The point closest to `candidate` within `threshold`, if any.
///
/// Distances must be strictly below the threshold. On ties the point that
/// appears first wins.
pub fn resolve_snap(candidate: f64, points: &[f64], threshold: f64) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for &point in points {
        let distance = (candidate - point).abs();
        if distance >= threshold {
            continue;
        }
        match best {
            Some((_, d)) if d <= distance => {}
            _ => best = Some((point, distance)),
        }
    }
    best.map(|(point, _)| point)
}

/// Resolve the start of a clip being dragged.
///
/// `candidate` is already clamped to `>= 0`. Magnetic snapping runs first
/// when enabled; the zero rule applies afterwards regardless of mode.
pub fn resolve_drag_start(
    project: &Project,
    clip_id: &str,
    candidate: f64,
    config: &SnapConfig,
) -> f64 {
    let mut start = candidate.max(0.0);

    if project.is_magnetic {
        let points = snap_points(project, clip_id);
        if let Some(snapped) = resolve_snap(start, &points, config.threshold) {
            start = snapped;
        }
    }

    if start < config.zero_threshold {
        start = 0.0;
    }
    start
}
