//! Timeline pixel geometry.

use serde::{Deserialize, Serialize};

use cutline_common::config::EditorConfig;
use cutline_project_model::Clip;

/// Seconds between ruler marks.
pub const RULER_STEP_SECS: f64 = 5.0;

/// Extra scrollable room past the end of the project, in pixels.
const TRAILING_ROOM_PX: f64 = 500.0;

/// Where the scrollable timeline sits on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineViewport {
    /// Left edge of the scroll container in client coordinates.
    pub left: f64,
    /// Horizontal scroll offset of the container.
    pub scroll_left: f64,
}

impl TimelineViewport {
    pub fn new(left: f64, scroll_left: f64) -> Self {
        Self { left, scroll_left }
    }
}

/// Converts between timeline seconds and pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineMetrics {
    /// Pixels per second at zoom 1.0.
    pub pixels_per_second: f64,
    /// Width of the track header column.
    pub header_width: f64,
}

impl Default for TimelineMetrics {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}

impl From<&EditorConfig> for TimelineMetrics {
    fn from(config: &EditorConfig) -> Self {
        Self {
            pixels_per_second: config.pixels_per_second,
            header_width: config.header_width,
        }
    }
}

/// A labelled ruler tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RulerMark {
    pub time: f64,
    pub x: f64,
    /// `MM:SS` label.
    pub label: String,
}

impl TimelineMetrics {
    /// Effective pixels per second at `zoom`.
    pub fn scale(&self, zoom: f64) -> f64 {
        self.pixels_per_second * zoom
    }

    /// Convert a horizontal pixel distance to seconds.
    pub fn delta_secs(&self, dx: f64, zoom: f64) -> f64 {
        dx / self.scale(zoom)
    }

    /// Timeline time under a pointer at `client_x`, clamped to `>= 0`.
    pub fn time_at(&self, viewport: &TimelineViewport, client_x: f64, zoom: f64) -> f64 {
        let offset_x = client_x - viewport.left + viewport.scroll_left - self.header_width;
        (offset_x / self.scale(zoom)).max(0.0)
    }

    /// Content x-coordinate of timeline time `t`.
    pub fn x_of(&self, t: f64, zoom: f64) -> f64 {
        t * self.scale(zoom)
    }

    /// Left edge and width of a clip block.
    pub fn clip_span(&self, clip: &Clip, zoom: f64) -> (f64, f64) {
        (self.x_of(clip.start, zoom), self.x_of(clip.duration, zoom))
    }

    /// Width of the scrollable content for a project of `duration`.
    pub fn content_width(&self, duration: f64, zoom: f64, min_width: f64) -> f64 {
        min_width.max(self.x_of(duration, zoom) + TRAILING_ROOM_PX)
    }

    /// Ruler marks every [`RULER_STEP_SECS`] seconds covering `duration`.
    pub fn ruler_marks(&self, duration: f64, zoom: f64) -> Vec<RulerMark> {
        let count = (duration / RULER_STEP_SECS).ceil().max(0.0) as usize;
        (0..count)
            .map(|i| {
                let time = i as f64 * RULER_STEP_SECS;
                RulerMark {
                    time,
                    x: self.x_of(time, zoom),
                    label: ruler_label(time),
                }
            })
            .collect()
    }
}

/// `MM:SS` from total minutes; minutes grow past 59 instead of wrapping.
fn ruler_label(time: f64) -> String {
    let total = time.max(0.0).floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
