//! In-memory media backend.
//!
//! Handles become ready as soon as they are loaded and report the size
//! registered for their source. Playback position only changes on seek.
//! Used by the command-line frame renderer and by tests.

use std::collections::HashMap;

use cutline_common::error::{CutlineError, CutlineResult};
use cutline_project_model::Size;

use crate::media::{ImageHandle, MediaBackend, PlaybackHandle, ReadyState};

#[derive(Debug, Clone, Copy)]
struct SourceInfo {
    size: Size,
    refuse_play: bool,
}

/// Backend whose sources are described up front.
#[derive(Debug, Clone, Default)]
pub struct SimulatedBackend {
    sources: HashMap<String, SourceInfo>,
    fallback: Option<Size>,
    opened_videos: usize,
    opened_images: usize,
}

impl SimulatedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every source, registered or not, is available at `size`.
    pub fn all_ready(size: Size) -> Self {
        Self {
            fallback: Some(size),
            ..Self::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>, size: Size) -> Self {
        self.sources.insert(
            source.into(),
            SourceInfo {
                size,
                refuse_play: false,
            },
        );
        self
    }

    /// A source that loads but refuses to start playing.
    pub fn with_unplayable_source(mut self, source: impl Into<String>, size: Size) -> Self {
        self.sources.insert(
            source.into(),
            SourceInfo {
                size,
                refuse_play: true,
            },
        );
        self
    }

    pub fn opened_videos(&self) -> usize {
        self.opened_videos
    }

    pub fn opened_images(&self) -> usize {
        self.opened_images
    }

    fn lookup(&self, source: &str) -> Option<SourceInfo> {
        self.sources.get(source).copied().or_else(|| {
            self.fallback.map(|size| SourceInfo {
                size,
                refuse_play: false,
            })
        })
    }
}

impl MediaBackend for SimulatedBackend {
    fn open_video(&mut self, source: &str) -> Box<dyn PlaybackHandle> {
        self.opened_videos += 1;
        Box::new(SimulatedVideo::new(source, self.lookup(source)))
    }

    fn open_image(&mut self, source: &str) -> Box<dyn ImageHandle> {
        self.opened_images += 1;
        Box::new(SimulatedImage {
            info: self.lookup(source),
        })
    }
}

/// Playback handle over a described source.
#[derive(Debug, Clone)]
pub struct SimulatedVideo {
    source: String,
    info: Option<SourceInfo>,
    ready: ReadyState,
    paused: bool,
    position: f64,
    rate: f64,
    volume: f64,
    muted: bool,
    preload: bool,
}

impl SimulatedVideo {
    fn new(source: &str, info: Option<SourceInfo>) -> Self {
        Self {
            source: source.to_string(),
            info,
            ready: ReadyState::HaveNothing,
            paused: true,
            position: 0.0,
            rate: 1.0,
            volume: 1.0,
            muted: false,
            preload: false,
        }
    }
}

impl PlaybackHandle for SimulatedVideo {
    fn ready_state(&self) -> ReadyState {
        self.ready
    }

    fn load(&mut self) {
        if self.info.is_some() && !self.source.is_empty() {
            self.ready = ReadyState::HaveEnoughData;
        }
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn play(&mut self) -> CutlineResult<()> {
        match self.info {
            Some(info) if !info.refuse_play => {
                self.paused = false;
                Ok(())
            }
            _ => Err(CutlineError::media(format!(
                "playback refused for {}",
                self.source
            ))),
        }
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, secs: f64) {
        self.position = secs;
    }

    fn rate(&self) -> f64 {
        self.rate
    }

    fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn preload(&self) -> bool {
        self.preload
    }

    fn set_preload(&mut self, preload: bool) {
        self.preload = preload;
    }

    fn natural_size(&self) -> Size {
        match (self.ready, self.info) {
            (ReadyState::HaveNothing, _) | (_, None) => Size::new(0.0, 0.0),
            (_, Some(info)) => info.size,
        }
    }

    fn clear_source(&mut self) {
        self.source.clear();
        self.ready = ReadyState::HaveNothing;
    }
}

struct SimulatedImage {
    info: Option<SourceInfo>,
}

impl ImageHandle for SimulatedImage {
    fn is_loaded(&self) -> bool {
        self.info.is_some()
    }

    fn natural_size(&self) -> Size {
        self.info
            .map(|i| i.size)
            .unwrap_or_else(|| Size::new(0.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_source_never_becomes_ready() {
        let mut backend = SimulatedBackend::new();
        let mut video = backend.open_video("/missing.mp4");
        video.load();
        assert_eq!(video.ready_state(), ReadyState::HaveNothing);
        assert!(video.play().is_err());
        assert!(video.is_paused());
    }

    #[test]
    fn test_registered_source_loads() {
        let mut backend = SimulatedBackend::new().with_source("/a.mp4", Size::new(640.0, 360.0));
        let mut video = backend.open_video("/a.mp4");
        assert!(video.natural_size().is_empty());
        video.load();
        assert!(video.ready_state().can_draw());
        assert_eq!(video.natural_size(), Size::new(640.0, 360.0));
        video.play().unwrap();
        assert!(!video.is_paused());

        video.clear_source();
        assert_eq!(video.ready_state(), ReadyState::HaveNothing);
        assert_eq!(backend.opened_videos(), 1);
    }
}
