//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory where project snapshots are saved by default.
    pub projects_dir: PathBuf,

    /// Timeline editing behaviour.
    pub editor: EditorConfig,

    /// Preview render loop tuning.
    pub preview: PreviewConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// File backing the recent-projects list.
    pub recent_projects_file: PathBuf,
}

/// Timeline geometry and snapping parameters used by the interaction layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Base horizontal resolution of the timeline at zoom 1.0.
    pub pixels_per_second: f64,

    /// Width of the track header column in pixels.
    pub header_width: f64,

    /// Magnetic snap radius in seconds.
    pub snap_threshold_secs: f64,

    /// Drag starts below this value always land on 0.
    pub zero_snap_secs: f64,

    /// Dropped media starting below this value lands on 0.
    pub drop_zero_snap_secs: f64,

    /// Shortest duration a resize gesture can produce.
    pub min_clip_duration: f64,

    /// Playhead step for arrow keys.
    pub keyboard_step_secs: f64,
}

/// Preview loop parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Target display refresh rate of the render loop.
    pub refresh_hz: u32,

    /// Rate at which the playing transport publishes time back to the store.
    pub publish_hz: u32,

    /// Allowed drift (seconds) between a playing handle and timeline time.
    pub play_drift_tolerance: f64,

    /// Allowed drift (seconds) while paused or scrubbing.
    pub pause_drift_tolerance: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "cutline=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            projects_dir: dirs_default_projects(),
            editor: EditorConfig::default(),
            preview: PreviewConfig::default(),
            logging: LoggingConfig::default(),
            recent_projects_file: config_dir().join("recent-projects.json"),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            pixels_per_second: 20.0,
            header_width: 48.0,
            snap_threshold_secs: 0.5,
            zero_snap_secs: 0.1,
            drop_zero_snap_secs: 0.5,
            min_clip_duration: 0.1,
            keyboard_step_secs: 1.0,
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            refresh_hz: 60,
            publish_hz: 30,
            play_drift_tolerance: 0.3,
            pause_drift_tolerance: 0.05,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Directory holding Cutline's configuration and side records.
pub fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("cutline")
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Default projects directory.
fn dirs_default_projects() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("cutline").join("projects")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_defaults_match_timeline_geometry() {
        let editor = EditorConfig::default();
        assert_eq!(editor.pixels_per_second, 20.0);
        assert_eq!(editor.header_width, 48.0);
        assert!((editor.snap_threshold_secs - 0.5).abs() < 1e-12);
        assert!((editor.min_clip_duration - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let raw = r#"{ "preview": { "refresh_hz": 120 } }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.preview.refresh_hz, 120);
        assert_eq!(config.preview.publish_hz, 30);
        assert_eq!(config.logging.level, "info");
        assert!((config.editor.keyboard_step_secs - 1.0).abs() < 1e-12);
    }
}
