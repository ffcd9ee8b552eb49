//! Clip placement types.
//!
//! A clip places a window of one media source on one track. `start` and
//! `duration` are in timeline seconds, `offset` is where in the source the
//! window begins. Presentation parameters are optional; unset values read
//! back as neutral defaults.

use serde::{Deserialize, Serialize};

use crate::geometry::Position;

/// Identifier of a clip.
pub type ClipId = String;

/// What a clip renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipKind {
    Video,
    Audio,
    Image,
    Text,
}

/// A timed placement of one media source on a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub id: ClipId,

    /// Owning track. Rewritten by the model when the clip is placed.
    #[serde(default)]
    pub track_id: String,

    /// Display name (usually the source file name).
    #[serde(default)]
    pub name: String,

    /// Playable handle of the source (path or URL).
    pub source_path: String,

    /// Timeline position in seconds.
    pub start: f64,

    /// Timeline footprint in seconds.
    pub duration: f64,

    /// Seconds into the source at which playback begins.
    #[serde(default)]
    pub offset: f64,

    #[serde(rename = "type")]
    pub kind: ClipKind,

    /// Output level in `[0, 2]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,

    /// Playback-rate multiplier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,

    /// Global alpha in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    /// Zoom about the fitted content center.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,

    /// Pixel offset from the centered placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Clip {
    pub const DEFAULT_VOLUME: f64 = 1.0;
    pub const DEFAULT_SPEED: f64 = 1.0;
    pub const DEFAULT_OPACITY: f64 = 1.0;
    pub const DEFAULT_SCALE: f64 = 1.0;

    /// Create a clip with no presentation overrides.
    pub fn new(
        id: impl Into<ClipId>,
        name: impl Into<String>,
        source_path: impl Into<String>,
        kind: ClipKind,
        start: f64,
        duration: f64,
    ) -> Self {
        Self {
            id: id.into(),
            track_id: String::new(),
            name: name.into(),
            source_path: source_path.into(),
            start,
            duration,
            offset: 0.0,
            kind,
            volume: None,
            speed: None,
            opacity: None,
            scale: None,
            position: None,
        }
    }

    /// Builder-style source offset.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Builder-style playback speed.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Timeline time at which the clip stops being active.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Whether the clip covers timeline time `t` (`start <= t < end`).
    pub fn is_active_at(&self, t: f64) -> bool {
        t >= self.start && t < self.end()
    }

    /// Whether `t` lies strictly inside the clip, excluding both edges.
    pub fn strictly_contains(&self, t: f64) -> bool {
        t > self.start && t < self.end()
    }

    pub fn volume(&self) -> f64 {
        self.volume.unwrap_or(Self::DEFAULT_VOLUME)
    }

    pub fn speed(&self) -> f64 {
        self.speed.unwrap_or(Self::DEFAULT_SPEED)
    }

    pub fn opacity(&self) -> f64 {
        self.opacity.unwrap_or(Self::DEFAULT_OPACITY)
    }

    pub fn scale(&self) -> f64 {
        self.scale.unwrap_or(Self::DEFAULT_SCALE)
    }

    pub fn position(&self) -> Position {
        self.position.unwrap_or(Position::ORIGIN)
    }

    /// Source position that corresponds to timeline time `t`.
    pub fn source_time_at(&self, t: f64) -> f64 {
        (t - self.start) * self.speed() + self.offset
    }

    /// Seconds of source content the clip consumes.
    pub fn content_duration(&self) -> f64 {
        self.duration * self.speed()
    }

    /// Fill every unset presentation parameter with its neutral default.
    pub fn with_presentation_defaults(mut self) -> Self {
        self.volume = Some(self.volume());
        self.speed = Some(self.speed());
        self.opacity = Some(self.opacity());
        self.scale = Some(self.scale());
        self.position = Some(self.position());
        self
    }
}
