//! Frame compositor: samples every visible track at the transport time and
//! draws the result onto one surface.
//!
//! The compositor reads an immutable project snapshot from the store's
//! watch channel on every tick. While playing it keeps its own transport
//! time, advanced by wall-clock deltas, and hands a throttled copy back to
//! the host for publication. A store time that changes for any other reason
//! (scrub, keyboard step, load) is adopted on the next tick.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;

use cutline_common::clock::{DriftMeasurement, RateController, TransportClock};
use cutline_common::config::PreviewConfig;
use cutline_project_model::{
    Clip, ClipId, ClipKind, Project, Size, Track, TrackKind, DEFAULT_HEIGHT, DEFAULT_WIDTH,
};

use crate::layout::DrawTransform;
use crate::media::{ImageHandle, MediaBackend, PlaybackHandle, ReadyState};
use crate::surface::{Layer, Surface};

/// What a single tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Timeline time the frame was rendered at.
    pub time: f64,
    /// Transport time the host should write back to the store.
    pub publish: Option<f64>,
    /// Number of layers drawn.
    pub layers: usize,
    /// No surface was available; nothing was drawn.
    pub skipped: bool,
}

/// Per-frame compositor owning the media handles.
pub struct Compositor<B: MediaBackend> {
    backend: B,
    project_rx: watch::Receiver<Arc<Project>>,
    config: PreviewConfig,
    clock: TransportClock,
    publisher: RateController,
    local_time: f64,
    observed_store_time: f64,
    last_published: Option<f64>,
    videos: HashMap<ClipId, Box<dyn PlaybackHandle>>,
    images: HashMap<String, Box<dyn ImageHandle>>,
}

impl<B: MediaBackend> Compositor<B> {
    pub fn new(
        backend: B,
        project_rx: watch::Receiver<Arc<Project>>,
        config: PreviewConfig,
    ) -> Self {
        let start = project_rx.borrow().current_time;
        Self {
            backend,
            project_rx,
            publisher: RateController::new(config.publish_hz),
            config,
            clock: TransportClock::new(),
            local_time: start,
            observed_store_time: start,
            last_published: None,
            videos: HashMap::new(),
            images: HashMap::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Transport time of the last tick.
    pub fn current_time(&self) -> f64 {
        self.local_time
    }

    pub fn video_handle(&self, clip_id: &str) -> Option<&dyn PlaybackHandle> {
        self.videos.get(clip_id).map(|h| h.as_ref())
    }

    pub fn video_handle_count(&self) -> usize {
        self.videos.len()
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Render one frame.
    pub fn tick(&mut self, surface: Option<&mut dyn Surface>, now: Instant) -> TickReport {
        let project = Arc::clone(&self.project_rx.borrow_and_update());
        let (time, publish) = self.transport_time(&project, now);

        let Some(surface) = surface else {
            return TickReport {
                time,
                publish,
                layers: 0,
                skipped: true,
            };
        };

        let width = nonzero_or(project.width, DEFAULT_WIDTH);
        let height = nonzero_or(project.height, DEFAULT_HEIGHT);
        if surface.size() != (width, height) {
            tracing::debug!(width, height, "Resizing preview surface");
            surface.resize(width, height);
        }
        surface.clear();

        let surface_size = Size::new(width as f64, height as f64);
        let mut layers = 0;
        for track in project.tracks.iter().rev() {
            if track.is_muted || !track.kind.is_visual() {
                continue;
            }
            let Some(clip) = track.active_clip_at(time) else {
                continue;
            };

            let layer = match clip.kind {
                ClipKind::Image => self.image_layer(track, clip, surface_size),
                ClipKind::Video | ClipKind::Audio => {
                    self.video_layer(track, clip, time, project.is_playing, surface_size)
                }
                ClipKind::Text => None,
            };
            if let Some(layer) = layer {
                surface.draw(&layer);
                layers += 1;
            }
        }

        self.release_handles(&project, time);

        TickReport {
            time,
            publish,
            layers,
            skipped: false,
        }
    }

    fn transport_time(&mut self, project: &Project, now: Instant) -> (f64, Option<f64>) {
        let delta = self.clock.delta_secs(now);
        let store_time = project.current_time;

        if store_time != self.observed_store_time && Some(store_time) != self.last_published {
            self.local_time = store_time;
        }
        self.observed_store_time = store_time;

        if !project.is_playing {
            self.local_time = store_time;
            self.last_published = None;
            return (store_time, None);
        }

        self.local_time += delta;
        let publish = self.publisher.should_tick(now).then_some(self.local_time);
        if publish.is_some() {
            self.last_published = publish;
        }
        (self.local_time, publish)
    }

    fn image_layer(&mut self, track: &Track, clip: &Clip, surface: Size) -> Option<Layer> {
        let backend = &mut self.backend;
        let image = self
            .images
            .entry(clip.source_path.clone())
            .or_insert_with(|| backend.open_image(&clip.source_path));

        if !image.is_loaded() {
            return None;
        }
        let natural_size = image.natural_size();
        let transform = DrawTransform::for_clip(clip, surface, natural_size)?;
        Some(Layer {
            clip_id: clip.id.clone(),
            track_id: track.id.clone(),
            kind: clip.kind,
            source_path: clip.source_path.clone(),
            source_time: None,
            natural_size,
            transform,
        })
    }

    fn video_layer(
        &mut self,
        track: &Track,
        clip: &Clip,
        time: f64,
        playing: bool,
        surface: Size,
    ) -> Option<Layer> {
        let backend = &mut self.backend;
        let handle = self.videos.entry(clip.id.clone()).or_insert_with(|| {
            let mut handle = backend.open_video(&clip.source_path);
            handle.set_muted(true);
            handle.set_preload(true);
            handle.load();
            handle
        });

        let speed = clip.speed();
        let clip_time = clip.source_time_at(time);

        if handle.ready_state() == ReadyState::HaveNothing {
            handle.load();
        }

        let tolerance = if playing {
            if handle.is_paused() {
                if let Err(e) = handle.play() {
                    tracing::warn!(clip_id = %clip.id, error = %e, "Video play failed");
                }
            }
            self.config.play_drift_tolerance
        } else {
            if !handle.is_paused() {
                handle.pause();
            }
            self.config.pause_drift_tolerance
        };

        let drift = DriftMeasurement {
            expected_secs: clip_time,
            actual_secs: handle.position(),
        };
        if drift.exceeds(tolerance) {
            handle.seek(clip_time);
        }

        if handle.rate() != speed {
            handle.set_rate(speed);
        }
        handle.set_volume(clip.volume());

        if !handle.ready_state().can_draw() {
            return None;
        }
        let natural_size = handle.natural_size();
        let transform = DrawTransform::for_clip(clip, surface, natural_size)?;
        Some(Layer {
            clip_id: clip.id.clone(),
            track_id: track.id.clone(),
            kind: clip.kind,
            source_path: clip.source_path.clone(),
            source_time: Some(clip_time),
            natural_size,
            transform,
        })
    }

    /// Pause handles that are off screen and drop handles whose clip is gone.
    fn release_handles(&mut self, project: &Project, time: f64) {
        let visible: HashSet<&str> = project
            .tracks
            .iter()
            .filter(|t| !t.is_muted && t.kind == TrackKind::Video)
            .filter_map(|t| t.active_clip_at(time))
            .map(|c| c.id.as_str())
            .collect();

        for (clip_id, handle) in self.videos.iter_mut() {
            if !visible.contains(clip_id.as_str()) && !handle.is_paused() {
                handle.pause();
            }
        }

        let existing: HashSet<&str> = project.clips().map(|c| c.id.as_str()).collect();
        self.videos.retain(|clip_id, handle| {
            if existing.contains(clip_id.as_str()) {
                return true;
            }
            handle.pause();
            handle.clear_source();
            tracing::debug!(clip_id = %clip_id, "Released playback handle");
            false
        });
    }

    /// Pause and release every playback handle.
    pub fn shutdown(&mut self) {
        for (_, mut handle) in self.videos.drain() {
            handle.pause();
            handle.clear_source();
        }
        self.images.clear();
    }
}

fn nonzero_or(value: u32, default: u32) -> u32 {
    if value == 0 {
        default
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulated::SimulatedBackend;
    use crate::surface::DrawList;
    use cutline_edit_engine::{ClipUpdate, EditorStore};
    use cutline_project_model::Position;
    use std::time::Duration;

    const HD: Size = Size {
        width: 1920.0,
        height: 1080.0,
    };

    fn video(id: &str, source: &str, start: f64, duration: f64) -> Clip {
        Clip::new(id, id, source, ClipKind::Video, start, duration)
    }

    fn compositor(store: &EditorStore, backend: SimulatedBackend) -> Compositor<SimulatedBackend> {
        Compositor::new(backend, store.subscribe(), PreviewConfig::default())
    }

    #[test]
    fn test_paused_frame_samples_store_time() {
        let mut store = EditorStore::new();
        store
            .add_clip("video-1", video("a", "/a.mp4", 2.0, 10.0).with_offset(1.0))
            .unwrap();
        store.set_playhead(5.0);

        let mut comp = compositor(&store, SimulatedBackend::all_ready(HD));
        let mut surface = DrawList::new();
        let report = comp.tick(Some(&mut surface), Instant::now());

        assert_eq!(report.time, 5.0);
        assert_eq!(report.publish, None);
        assert_eq!(surface.size(), (1920, 1080));
        assert_eq!(surface.layers().len(), 1);
        assert_eq!(surface.layers()[0].source_time, Some(4.0));

        let handle = comp.video_handle("a").unwrap();
        assert!(handle.is_paused());
        assert!(handle.is_muted());
        assert!(handle.preload());
        assert_eq!(handle.position(), 4.0);
    }

    #[test]
    fn test_tracks_paint_in_reverse_order() {
        let mut store = EditorStore::new();
        let top = store.project().tracks[0].id.clone();
        let lower = store.add_track(TrackKind::Video);
        store.add_clip(&top, video("top", "/t.mp4", 0.0, 5.0)).unwrap();
        store.add_clip(&lower, video("low", "/l.mp4", 0.0, 5.0)).unwrap();
        store.add_clip("audio-1", video("aud", "/x.wav", 0.0, 5.0)).unwrap();

        let mut comp = compositor(&store, SimulatedBackend::all_ready(HD));
        let mut surface = DrawList::new();
        comp.tick(Some(&mut surface), Instant::now());

        let ids: Vec<_> = surface.layers().iter().map(|l| l.clip_id.as_str()).collect();
        assert_eq!(ids, vec!["low", "top"]);
    }

    #[test]
    fn test_muted_track_is_skipped_and_paused() {
        let mut project = Project::new();
        project.tracks[0].clips.push(video("a", "/a.mp4", 0.0, 5.0));
        project.tracks[0].is_muted = true;
        let store = EditorStore::with_project(project);

        let mut comp = compositor(&store, SimulatedBackend::all_ready(HD));
        let mut surface = DrawList::new();
        let report = comp.tick(Some(&mut surface), Instant::now());
        assert_eq!(report.layers, 0);
        assert_eq!(comp.video_handle_count(), 0);
    }

    #[test]
    fn test_playing_advances_and_publishes_time() {
        let mut store = EditorStore::new();
        store.add_clip("video-1", video("a", "/a.mp4", 0.0, 30.0)).unwrap();
        store.set_playing(true);

        let mut comp = compositor(&store, SimulatedBackend::all_ready(HD));
        let mut surface = DrawList::new();
        let t0 = Instant::now();

        let first = comp.tick(Some(&mut surface), t0);
        assert_eq!(first.time, 0.0);
        assert_eq!(first.publish, Some(0.0));
        assert!(!comp.video_handle("a").unwrap().is_paused());

        let second = comp.tick(Some(&mut surface), t0 + Duration::from_millis(16));
        assert!((second.time - 0.016).abs() < 1e-9);
        assert_eq!(second.publish, None);

        let third = comp.tick(Some(&mut surface), t0 + Duration::from_millis(50));
        assert!((third.time - 0.05).abs() < 1e-9);
        let published = third.publish.unwrap();
        store.set_playhead(published);

        // The echo of our own publication is not treated as a scrub.
        let fourth = comp.tick(Some(&mut surface), t0 + Duration::from_millis(66));
        assert!((fourth.time - 0.066).abs() < 1e-9);
    }

    #[test]
    fn test_external_seek_while_playing_is_adopted() {
        let mut store = EditorStore::new();
        store.add_clip("video-1", video("a", "/a.mp4", 0.0, 30.0)).unwrap();
        store.set_playing(true);

        let mut comp = compositor(&store, SimulatedBackend::all_ready(HD));
        let mut surface = DrawList::new();
        let t0 = Instant::now();
        comp.tick(Some(&mut surface), t0);

        store.set_playhead(12.0);
        let report = comp.tick(Some(&mut surface), t0 + Duration::from_millis(10));
        assert!((report.time - 12.01).abs() < 1e-9);
        // Drift beyond the playing tolerance forces a resync.
        let handle = comp.video_handle("a").unwrap();
        assert!((handle.position() - 12.01).abs() < 1e-9);
    }

    #[test]
    fn test_rate_and_volume_follow_clip() {
        let mut store = EditorStore::new();
        store.add_clip("video-1", video("a", "/a.mp4", 0.0, 10.0)).unwrap();
        store
            .update_clip("a", &ClipUpdate::new().speed(2.0).volume(0.5))
            .unwrap();
        store.set_playhead(3.0);

        let mut comp = compositor(&store, SimulatedBackend::all_ready(HD));
        let mut surface = DrawList::new();
        comp.tick(Some(&mut surface), Instant::now());

        let handle = comp.video_handle("a").unwrap();
        assert_eq!(handle.rate(), 2.0);
        assert_eq!(handle.volume(), 0.5);
        assert_eq!(handle.position(), 6.0);
    }

    #[test]
    fn test_unplayable_source_stays_paused_and_retries() {
        let mut store = EditorStore::new();
        store.add_clip("video-1", video("a", "/bad.mp4", 0.0, 10.0)).unwrap();
        store.set_playing(true);

        let backend = SimulatedBackend::new().with_unplayable_source("/bad.mp4", HD);
        let mut comp = compositor(&store, backend);
        let mut surface = DrawList::new();
        let report = comp.tick(Some(&mut surface), Instant::now());

        assert!(comp.video_handle("a").unwrap().is_paused());
        // Still drawable from buffered data.
        assert_eq!(report.layers, 1);
    }

    #[test]
    fn test_unready_source_is_not_drawn() {
        let mut store = EditorStore::new();
        store.add_clip("video-1", video("a", "/missing.mp4", 0.0, 10.0)).unwrap();

        let mut comp = compositor(&store, SimulatedBackend::new());
        let mut surface = DrawList::new();
        let report = comp.tick(Some(&mut surface), Instant::now());
        assert_eq!(report.layers, 0);
        assert_eq!(comp.video_handle_count(), 1);
    }

    #[test]
    fn test_images_are_cached_by_source() {
        let mut store = EditorStore::new();
        let logo = Clip::new("i1", "logo", "/logo.png", ClipKind::Image, 0.0, 5.0);
        let again = Clip::new("i2", "logo", "/logo.png", ClipKind::Image, 5.0, 5.0);
        store.add_clip("video-1", logo).unwrap();
        store.add_clip("video-1", again).unwrap();

        let backend = SimulatedBackend::new().with_source("/logo.png", Size::new(500.0, 500.0));
        let mut comp = compositor(&store, backend);
        let mut surface = DrawList::new();

        comp.tick(Some(&mut surface), Instant::now());
        store.set_playhead(6.0);
        comp.tick(Some(&mut surface), Instant::now());

        assert_eq!(comp.backend().opened_images(), 1);
        assert_eq!(comp.image_count(), 1);
        assert_eq!(surface.layers()[0].clip_id, "i2");
        assert_eq!(surface.layers()[0].source_time, None);
    }

    #[test]
    fn test_transform_uses_clip_presentation() {
        let mut store = EditorStore::new();
        store.add_clip("video-1", video("a", "/a.mp4", 0.0, 10.0)).unwrap();
        store
            .update_clip(
                "a",
                &ClipUpdate::new()
                    .opacity(0.5)
                    .scale(2.0)
                    .position(Position::new(10.0, 20.0)),
            )
            .unwrap();

        let mut comp = compositor(&store, SimulatedBackend::all_ready(Size::new(960.0, 540.0)));
        let mut surface = DrawList::new();
        comp.tick(Some(&mut surface), Instant::now());

        let transform = surface.layers()[0].transform;
        assert_eq!(transform.alpha, 0.5);
        assert_eq!(transform.scale, 2.0);
        assert_eq!(transform.dest.x, 10.0);
        assert_eq!(transform.dest.y, 20.0);
        assert_eq!(transform.dest.w, 1920.0);
    }

    #[test]
    fn test_offscreen_handles_pause_and_deleted_handles_are_released() {
        let mut store = EditorStore::new();
        store.add_clip("video-1", video("a", "/a.mp4", 0.0, 5.0)).unwrap();
        store.add_clip("video-1", video("b", "/b.mp4", 5.0, 5.0)).unwrap();
        store.set_playing(true);

        let mut comp = compositor(&store, SimulatedBackend::all_ready(HD));
        let mut surface = DrawList::new();
        let t0 = Instant::now();
        comp.tick(Some(&mut surface), t0);
        assert!(!comp.video_handle("a").unwrap().is_paused());

        store.set_playhead(6.0);
        comp.tick(Some(&mut surface), t0);
        assert!(comp.video_handle("a").unwrap().is_paused());
        assert!(!comp.video_handle("b").unwrap().is_paused());

        store.delete_clip("a").unwrap();
        comp.tick(Some(&mut surface), t0);
        assert!(comp.video_handle("a").is_none());
        assert_eq!(comp.video_handle_count(), 1);
    }

    #[test]
    fn test_missing_surface_skips_drawing() {
        let mut store = EditorStore::new();
        store.add_clip("video-1", video("a", "/a.mp4", 0.0, 5.0)).unwrap();
        let mut comp = compositor(&store, SimulatedBackend::all_ready(HD));

        let report = comp.tick(None, Instant::now());
        assert!(report.skipped);
        assert_eq!(comp.video_handle_count(), 0);
    }

    #[test]
    fn test_surface_follows_project_dimensions() {
        let mut store = EditorStore::new();
        let mut comp = compositor(&store, SimulatedBackend::all_ready(HD));
        let mut surface = DrawList::new();

        comp.tick(Some(&mut surface), Instant::now());
        comp.tick(Some(&mut surface), Instant::now());
        assert_eq!(surface.resizes, 1);

        store.apply_preset("tiktok").unwrap();
        comp.tick(Some(&mut surface), Instant::now());
        assert_eq!(surface.size(), (1080, 1920));
        assert_eq!(surface.resizes, 2);
    }
}
