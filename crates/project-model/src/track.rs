//! Track types.

use serde::{Deserialize, Serialize};

use crate::clip::Clip;

/// Identifier of a track.
pub type TrackId = String;

/// The kind of content a track lane carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
    Text,
    Image,
}

impl TrackKind {
    /// Whether clips on this track contribute to the visual composite.
    pub fn is_visual(&self) -> bool {
        matches!(self, TrackKind::Video | TrackKind::Image)
    }

    /// Human-readable label used for default track names.
    pub fn label(&self) -> &'static str {
        match self {
            TrackKind::Video => "Video",
            TrackKind::Audio => "Audio",
            TrackKind::Text => "Text",
            TrackKind::Image => "Image",
        }
    }
}

/// A stackable lane of clips. Clip order carries no timeline meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: TrackId,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type")]
    pub kind: TrackKind,

    #[serde(default)]
    pub clips: Vec<Clip>,

    /// Muted tracks are neither drawn nor played.
    #[serde(default)]
    pub is_muted: bool,

    /// Reserved; no edit path consults it.
    #[serde(default)]
    pub is_locked: bool,
}

impl Track {
    pub fn new(id: impl Into<TrackId>, name: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            clips: Vec::new(),
            is_muted: false,
            is_locked: false,
        }
    }

    /// The clip that is active at timeline time `t`.
    ///
    /// Overlapping placements resolve last-write-wins: the clip latest in
    /// the track's clip list takes precedence.
    pub fn active_clip_at(&self, t: f64) -> Option<&Clip> {
        self.clips.iter().rev().find(|c| c.is_active_at(t))
    }

    pub fn clip(&self, clip_id: &str) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == clip_id)
    }

    /// Latest end time over this track's clips (0 when empty).
    pub fn content_end(&self) -> f64 {
        self.clips.iter().map(Clip::end).fold(0.0, f64::max)
    }
}
