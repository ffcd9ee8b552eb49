//! Transport clock and timing utilities for the preview loop.
//!
//! The render loop advances timeline time from wall-clock deltas between
//! ticks, compares media handle positions against timeline time, and
//! throttles how often the playing transport publishes time back to shared
//! state. This module provides:
//! - Wall-clock delta measurement between ticks
//! - Drift measurement between a media handle and timeline time
//! - A rate controller for throttled publication

use std::time::{Duration, Instant};

/// Measures wall-clock time elapsed between successive render ticks.
#[derive(Debug, Clone, Default)]
pub struct TransportClock {
    last_tick: Option<Instant>,
}

impl TransportClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds elapsed since the previous call. The first call returns 0.
    pub fn delta_secs(&mut self, now: Instant) -> f64 {
        let delta = match self.last_tick {
            Some(last) => now.saturating_duration_since(last).as_secs_f64(),
            None => 0.0,
        };
        self.last_tick = Some(now);
        delta
    }

    /// Re-anchor the clock without measuring a delta.
    pub fn reset(&mut self, now: Instant) {
        self.last_tick = Some(now);
    }
}

/// Drift between a media handle's position and where timeline time says it
/// should be.
#[derive(Debug, Clone, Copy)]
pub struct DriftMeasurement {
    /// Source position the timeline expects (seconds).
    pub expected_secs: f64,
    /// Source position the handle reports (seconds).
    pub actual_secs: f64,
}

impl DriftMeasurement {
    /// Drift in seconds (positive = handle is ahead).
    pub fn drift_secs(&self) -> f64 {
        self.actual_secs - self.expected_secs
    }

    /// Drift in milliseconds.
    pub fn drift_ms(&self) -> f64 {
        self.drift_secs() * 1000.0
    }

    /// Whether drift exceeds an acceptable threshold (seconds).
    pub fn exceeds(&self, tolerance_secs: f64) -> bool {
        self.drift_secs().abs() > tolerance_secs
    }
}

/// Rate controller used to throttle periodic work below the tick rate.
#[derive(Debug)]
pub struct RateController {
    target_interval: Duration,
    last_tick: Option<Instant>,
}

impl RateController {
    /// Create a controller targeting the given Hz rate.
    pub fn new(target_hz: u32) -> Self {
        Self {
            target_interval: Duration::from_nanos(1_000_000_000 / target_hz.max(1) as u64),
            last_tick: None,
        }
    }

    /// Check if enough time has passed for the next tick.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_tick(&mut self, now: Instant) -> bool {
        match self.last_tick {
            None => {
                self.last_tick = Some(now);
                true
            }
            Some(last) if now.saturating_duration_since(last) >= self.target_interval => {
                self.last_tick = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Target interval between ticks.
    pub fn interval(&self) -> Duration {
        self.target_interval
    }
}

/// Format seconds as `HH:MM:SS:cc` (centiseconds), the timeline readout.
pub fn format_timecode(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).floor() as u64;
    let hh = total_ms / 3_600_000;
    let mm = (total_ms / 60_000) % 60;
    let ss = (total_ms / 1000) % 60;
    let cs = (total_ms % 1000) / 10;
    format!("{hh:02}:{mm:02}:{ss:02}:{cs:02}")
}
