//! Media import.
//!
//! Still images are registered immediately with a default duration. Audio
//! and video are registered only after their intrinsic duration has been
//! probed; a file whose probe fails is logged and skipped.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::task::JoinSet;

use cutline_common::error::{CutlineError, CutlineResult};
use cutline_project_model::{MediaItem, MediaKind, DEFAULT_IMAGE_DURATION_SECS};

use crate::store::EditorStore;

/// Reads the intrinsic duration of a timed media file.
#[async_trait]
pub trait DurationProbe: Send + Sync {
    async fn probe_duration(&self, path: &Path) -> CutlineResult<f64>;
}

/// Probes durations with `ffprobe`.
#[derive(Debug, Clone)]
pub struct FfprobeDurationProbe {
    binary: PathBuf,
}

impl Default for FfprobeDurationProbe {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("ffprobe"),
        }
    }
}

impl FfprobeDurationProbe {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl DurationProbe for FfprobeDurationProbe {
    async fn probe_duration(&self, path: &Path) -> CutlineResult<f64> {
        let output = Command::new(&self.binary)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .output()
            .await
            .map_err(|e| CutlineError::media(format!("failed to run ffprobe: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CutlineError::media(format!(
                "ffprobe failed for {}: {}",
                path.display(),
                stderr.trim()
            )));
        }

        parse_probe_output(&String::from_utf8_lossy(&output.stdout)).ok_or_else(|| {
            CutlineError::media(format!("no duration reported for {}", path.display()))
        })
    }
}

fn parse_probe_output(raw: &str) -> Option<f64> {
    let duration = raw.lines().next()?.trim().parse::<f64>().ok()?;
    (duration.is_finite() && duration > 0.0).then_some(duration)
}

/// Resolves files to media items, probing timed media concurrently.
pub struct MediaImporter {
    probe: Arc<dyn DurationProbe>,
}

impl MediaImporter {
    pub fn new(probe: Arc<dyn DurationProbe>) -> Self {
        Self { probe }
    }

    /// Importer backed by the system `ffprobe`.
    pub fn with_ffprobe() -> Self {
        Self::new(Arc::new(FfprobeDurationProbe::default()))
    }

    /// Build media items for `files`.
    ///
    /// Images come first in input order; timed media follow as their probes
    /// complete.
    pub async fn resolve(&self, files: &[PathBuf]) -> Vec<MediaItem> {
        let (mut items, mut probes) = self.start(files);
        while let Some(joined) = probes.join_next().await {
            if let Some(item) = probed_item(joined) {
                items.push(item);
            }
        }
        items
    }

    /// Register `files` with the store as each one becomes available.
    ///
    /// Images are added before any probe is awaited. Each timed item is
    /// added as soon as its own probe completes.
    pub async fn import_into(&self, store: &mut EditorStore, files: &[PathBuf]) -> usize {
        let (images, mut probes) = self.start(files);
        let mut count = 0;
        for item in images {
            register(store, item);
            count += 1;
        }
        while let Some(joined) = probes.join_next().await {
            if let Some(item) = probed_item(joined) {
                register(store, item);
                count += 1;
            }
        }
        count
    }

    /// Build image items and spawn one duration probe per timed file.
    fn start(&self, files: &[PathBuf]) -> (Vec<MediaItem>, JoinSet<ProbeOutcome>) {
        let mut images = Vec::new();
        let mut probes = JoinSet::new();

        for file in files {
            let kind = MediaKind::from_path(file);
            if !kind.is_timed() {
                images.push(MediaItem::from_file(
                    file.clone(),
                    DEFAULT_IMAGE_DURATION_SECS,
                    kind,
                ));
                continue;
            }

            let probe = Arc::clone(&self.probe);
            let file = file.clone();
            probes.spawn(async move {
                let duration = probe.probe_duration(&file).await;
                (file, kind, duration)
            });
        }
        (images, probes)
    }
}

type ProbeOutcome = (PathBuf, MediaKind, CutlineResult<f64>);

fn probed_item(joined: Result<ProbeOutcome, tokio::task::JoinError>) -> Option<MediaItem> {
    match joined {
        Ok((file, kind, Ok(duration))) => Some(MediaItem::from_file(file, duration, kind)),
        Ok((file, _, Err(e))) => {
            tracing::warn!(file = %file.display(), error = %e, "Skipping media");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Media probe task failed");
            None
        }
    }
}

fn register(store: &mut EditorStore, item: MediaItem) {
    tracing::info!(file = %item.file.display(), kind = ?item.kind, duration = item.duration, "Media imported");
    store.add_media(item);
}
