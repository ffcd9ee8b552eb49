//! Media handle abstraction used by the compositor.
//!
//! A playback handle is a seekable, playable decoder for one clip; an image
//! handle is a decoded still shared by every clip that shows the same
//! source. Both are polled: readiness is queried every tick rather than
//! signalled.

use cutline_common::error::CutlineResult;
use cutline_project_model::Size;

/// How much data a playback handle has buffered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReadyState {
    HaveNothing,
    HaveMetadata,
    HaveCurrentData,
    HaveFutureData,
    HaveEnoughData,
}

impl ReadyState {
    /// Whether a frame for the current position can be drawn.
    pub fn can_draw(&self) -> bool {
        *self >= ReadyState::HaveCurrentData
    }
}

/// A seekable, playable source bound to a single clip.
pub trait PlaybackHandle: Send {
    fn ready_state(&self) -> ReadyState;

    /// (Re)start loading the source.
    fn load(&mut self);

    fn is_paused(&self) -> bool;

    /// Start playback. May be refused by the backend.
    fn play(&mut self) -> CutlineResult<()>;

    fn pause(&mut self);

    /// Current source position in seconds.
    fn position(&self) -> f64;

    fn seek(&mut self, secs: f64);

    fn rate(&self) -> f64;

    fn set_rate(&mut self, rate: f64);

    fn volume(&self) -> f64;

    fn set_volume(&mut self, volume: f64);

    fn is_muted(&self) -> bool;

    fn set_muted(&mut self, muted: bool);

    /// Whether the source is buffered ahead of playback.
    fn preload(&self) -> bool;

    fn set_preload(&mut self, preload: bool);

    /// Intrinsic frame size. Empty until metadata is available.
    fn natural_size(&self) -> Size;

    /// Release the underlying source.
    fn clear_source(&mut self);
}

/// A still image source.
pub trait ImageHandle: Send {
    fn is_loaded(&self) -> bool;

    fn natural_size(&self) -> Size;
}

/// Opens handles for clip sources.
pub trait MediaBackend: Send {
    fn open_video(&mut self, source: &str) -> Box<dyn PlaybackHandle>;

    fn open_image(&mut self, source: &str) -> Box<dyn ImageHandle>;
}
