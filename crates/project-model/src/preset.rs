//! Named output format presets.

/// A named output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatPreset {
    pub id: &'static str,
    pub title: &'static str,
    /// Aspect ratio label, e.g. `16:9`.
    pub ratio: &'static str,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub description: &'static str,
}

pub const PRESETS: &[FormatPreset] = &[
    FormatPreset {
        id: "youtube-hd",
        title: "YouTube HD",
        ratio: "16:9",
        width: 1280,
        height: 720,
        fps: 30,
        description: "Standard HD video for YouTube",
    },
    FormatPreset {
        id: "youtube-fhd",
        title: "YouTube FHD",
        ratio: "16:9",
        width: 1920,
        height: 1080,
        fps: 60,
        description: "Full HD video for YouTube",
    },
    FormatPreset {
        id: "youtube-4k",
        title: "YouTube 4K",
        ratio: "16:9",
        width: 3840,
        height: 2160,
        fps: 60,
        description: "Ultra HD 4K video",
    },
    FormatPreset {
        id: "tiktok",
        title: "TikTok",
        ratio: "9:16",
        width: 1080,
        height: 1920,
        fps: 60,
        description: "Vertical video for TikTok",
    },
    FormatPreset {
        id: "instagram-reel",
        title: "Instagram Reel",
        ratio: "9:16",
        width: 1080,
        height: 1920,
        fps: 60,
        description: "Vertical video for Reels",
    },
    FormatPreset {
        id: "instagram-post",
        title: "Instagram Post",
        ratio: "1:1",
        width: 1080,
        height: 1080,
        fps: 30,
        description: "Square video for Posts",
    },
];

/// Look up a preset by id.
pub fn find_preset(id: &str) -> Option<&'static FormatPreset> {
    PRESETS.iter().find(|p| p.id == id)
}

/// The first preset whose dimensions match, if any.
pub fn preset_for_dimensions(width: u32, height: u32) -> Option<&'static FormatPreset> {
    PRESETS
        .iter()
        .find(|p| p.width == width && p.height == height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_preset() {
        let tiktok = find_preset("tiktok").unwrap();
        assert_eq!((tiktok.width, tiktok.height), (1080, 1920));
        assert!(find_preset("vhs").is_none());
    }

    #[test]
    fn test_preset_ids_are_unique() {
        for (i, a) in PRESETS.iter().enumerate() {
            assert!(PRESETS[i + 1..].iter().all(|b| b.id != a.id));
        }
    }

    #[test]
    fn test_preset_for_dimensions() {
        assert_eq!(preset_for_dimensions(1920, 1080).map(|p| p.id), Some("youtube-fhd"));
        assert!(preset_for_dimensions(640, 480).is_none());
    }
}
