//! Preview loop driver.
//!
//! Runs the compositor at the display refresh rate on a tokio task and
//! writes the transport time it publishes back into the shared store. The
//! loop is stopped through a shared flag that is checked before every tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;

use cutline_common::config::PreviewConfig;
use cutline_edit_engine::EditorStore;

use crate::compositor::Compositor;
use crate::media::MediaBackend;
use crate::surface::Surface;

/// Schedules compositor ticks until stopped.
#[derive(Debug, Clone)]
pub struct PreviewLoop {
    refresh_interval: Duration,
    stop_flag: Arc<AtomicBool>,
}

/// Cancels a running [`PreviewLoop`].
#[derive(Debug, Clone)]
pub struct PreviewStopHandle {
    stop_flag: Arc<AtomicBool>,
}

impl PreviewStopHandle {
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::SeqCst)
    }
}

impl PreviewLoop {
    pub fn new(config: &PreviewConfig) -> Self {
        let hz = config.refresh_hz.max(1) as u64;
        Self {
            refresh_interval: Duration::from_nanos(1_000_000_000 / hz),
            stop_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn stop_handle(&self) -> PreviewStopHandle {
        PreviewStopHandle {
            stop_flag: Arc::clone(&self.stop_flag),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Tick until stopped. Returns the number of frames rendered.
    ///
    /// All playback handles are released when the loop ends.
    pub async fn run<B, S>(
        &self,
        compositor: &mut Compositor<B>,
        surface: &mut S,
        store: Arc<Mutex<EditorStore>>,
    ) -> u64
    where
        B: MediaBackend,
        S: Surface,
    {
        let mut interval = tokio::time::interval(self.refresh_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::debug!(interval_ms = self.refresh_interval.as_millis() as u64, "Preview loop started");
        let mut frames = 0u64;
        loop {
            interval.tick().await;
            if self.stop_flag.load(Ordering::SeqCst) {
                break;
            }

            let report = compositor.tick(Some(&mut *surface), std::time::Instant::now());
            frames += 1;

            if let Some(time) = report.publish {
                store.lock().await.set_playhead(time);
            }
        }

        compositor.shutdown();
        tracing::debug!(frames, "Preview loop stopped");
        frames
    }
}
