//! Imported media sources and the pool that holds them.
//!
//! Clips refer to media by playable URL (`Clip::source_path`); the pool does
//! not own clips and clips do not own media.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::clip::ClipKind;

/// Default timeline duration given to still images on import.
pub const DEFAULT_IMAGE_DURATION_SECS: f64 = 5.0;

/// Kind of an imported source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
    Image,
}

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "mov", "mkv", "webm", "avi", "ogv"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "oga", "flac", "aac", "m4a", "opus"];

impl MediaKind {
    /// Infer the media kind from a file extension.
    ///
    /// Anything that is not recognisably video or audio is treated as an image.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Video
        } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Audio
        } else {
            MediaKind::Image
        }
    }

    /// Whether the intrinsic duration must be probed before registration.
    pub fn is_timed(&self) -> bool {
        matches!(self, MediaKind::Video | MediaKind::Audio)
    }

    /// Clip kind produced when this media is placed on a track.
    pub fn clip_kind(&self) -> ClipKind {
        match self {
            MediaKind::Video => ClipKind::Video,
            MediaKind::Audio => ClipKind::Audio,
            MediaKind::Image => ClipKind::Image,
        }
    }
}

/// An imported source. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,

    /// Underlying file on disk.
    pub file: PathBuf,

    /// Playable handle (path or URL) that clips reference.
    pub url: String,

    /// Intrinsic duration in seconds.
    pub duration: f64,

    pub kind: MediaKind,
}

impl MediaItem {
    /// Register a file whose playable handle is its own path.
    pub fn from_file(file: impl Into<PathBuf>, duration: f64, kind: MediaKind) -> Self {
        let file = file.into();
        Self {
            id: crate::new_id(),
            url: file.to_string_lossy().into_owned(),
            file,
            duration,
            kind,
        }
    }

    /// File name used as the default clip name.
    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.url.clone())
    }
}

/// The pool of imported media, in import order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaPool {
    items: Vec<MediaItem>,
}

impl MediaPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. Duplicates are allowed.
    pub fn add(&mut self, item: MediaItem) {
        self.items.push(item);
    }

    pub fn get(&self, id: &str) -> Option<&MediaItem> {
        self.items.iter().find(|m| m.id == id)
    }

    pub fn find_by_url(&self, url: &str) -> Option<&MediaItem> {
        self.items.iter().find(|m| m.url == url)
    }

    /// Remove and return an item. Callers check references first.
    pub fn remove(&mut self, id: &str) -> Option<MediaItem> {
        let idx = self.items.iter().position(|m| m.id == id)?;
        Some(self.items.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(MediaKind::from_path(Path::new("a/b/clip.MP4")), MediaKind::Video);
        assert_eq!(MediaKind::from_path(Path::new("voice.wav")), MediaKind::Audio);
        assert_eq!(MediaKind::from_path(Path::new("logo.png")), MediaKind::Image);
        assert_eq!(MediaKind::from_path(Path::new("README")), MediaKind::Image);
    }

    #[test]
    fn test_pool_keeps_duplicates_in_order() {
        let mut pool = MediaPool::new();
        let a = MediaItem::from_file("/m/a.mp4", 12.0, MediaKind::Video);
        let b = MediaItem::from_file("/m/a.mp4", 12.0, MediaKind::Video);
        pool.add(a.clone());
        pool.add(b.clone());

        assert_eq!(pool.len(), 2);
        assert_ne!(a.id, b.id);
        assert_eq!(pool.find_by_url("/m/a.mp4").unwrap().id, a.id);
        assert_eq!(pool.remove(&a.id).unwrap().id, a.id);
        assert_eq!(pool.len(), 1);
        assert!(pool.remove(&a.id).is_none());
    }

    #[test]
    fn test_file_name() {
        let item = MediaItem::from_file("/media/holiday/beach.mov", 3.0, MediaKind::Video);
        assert_eq!(item.file_name(), "beach.mov");
    }
}
