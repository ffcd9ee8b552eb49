//! Show project information.

use std::path::PathBuf;

use cutline_common::clock::format_timecode;
use cutline_common::config::AppConfig;
use cutline_edit_engine::EditorStore;
use cutline_project_model::{preset_for_dimensions, RecentProjectsStore};

pub fn run(path: PathBuf, config: &AppConfig) -> anyhow::Result<()> {
    let recent = RecentProjectsStore::new(&config.recent_projects_file);
    let mut store = EditorStore::new();
    store
        .load_file(&path, Some(&recent))
        .map_err(|e| anyhow::anyhow!("Failed to load project: {e}"))?;

    let p = store.project();

    println!("Project: {}", path.display());
    println!(
        "  Duration: {} ({:.2}s)",
        format_timecode(p.duration),
        p.duration
    );
    println!("  Content ends at: {:.2}s", p.content_end());
    println!("  Zoom: {}x", p.zoom_level);
    println!();

    println!("Format:");
    println!("  Resolution: {}x{} @ {}fps", p.width, p.height, p.fps);
    match preset_for_dimensions(p.width, p.height) {
        Some(preset) => println!("  Preset: {} ({})", preset.title, preset.ratio),
        None => println!("  Preset: custom"),
    }
    println!();

    println!("Tracks:");
    for track in &p.tracks {
        let mut flags = Vec::new();
        if track.is_muted {
            flags.push("muted");
        }
        if track.is_locked {
            flags.push("locked");
        }
        println!(
            "  {} [{}] {:?}, {} clip(s){}",
            track.name,
            track.id,
            track.kind,
            track.clips.len(),
            if flags.is_empty() {
                String::new()
            } else {
                format!(" ({})", flags.join(", "))
            }
        );
        for clip in &track.clips {
            println!(
                "    {} {} -> {} ({:?}, {:.2}s @ {}x) {}",
                clip.name,
                format_timecode(clip.start),
                format_timecode(clip.end()),
                clip.kind,
                clip.duration,
                clip.speed(),
                clip.source_path
            );
        }
    }

    Ok(())
}
