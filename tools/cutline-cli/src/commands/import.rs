//! Import media into a project and append it to a track.

use std::path::PathBuf;
use std::sync::Arc;

use cutline_edit_engine::{EditorStore, FfprobeDurationProbe, MediaImporter};
use cutline_project_model::{new_id, Clip, MediaItem, MediaKind, Project, TrackKind};

pub async fn run(
    path: PathBuf,
    files: Vec<PathBuf>,
    track: Option<String>,
    ffprobe: PathBuf,
    dry_run: bool,
) -> anyhow::Result<()> {
    let importer = MediaImporter::new(Arc::new(FfprobeDurationProbe::new(ffprobe)));
    let items = importer.resolve(&files).await;

    println!("Resolved {}/{} file(s):", items.len(), files.len());
    for item in &items {
        println!(
            "  {} ({:?}, {:.2}s)",
            item.file.display(),
            item.kind,
            item.duration
        );
    }
    if items.len() < files.len() {
        println!(
            "  {} file(s) skipped (see log for details)",
            files.len() - items.len()
        );
    }
    if dry_run || items.is_empty() {
        return Ok(());
    }

    let mut store = EditorStore::new();
    store
        .load_file(&path, None)
        .map_err(|e| anyhow::anyhow!("Failed to load project: {e}"))?;

    for item in items {
        let track_id = match &track {
            Some(id) => id.clone(),
            None => default_track(store.project(), &item)
                .ok_or_else(|| anyhow::anyhow!("Project has no track for {:?} media", item.kind))?,
        };
        let start = store
            .project()
            .track(&track_id)
            .map(|t| t.content_end())
            .ok_or_else(|| anyhow::anyhow!("Unknown track: {track_id}"))?;

        let clip = Clip::new(
            new_id(),
            item.file_name(),
            item.url.clone(),
            item.kind.clip_kind(),
            start,
            item.duration,
        );
        let name = clip.name.clone();
        store.add_media(item);
        store
            .add_clip(&track_id, clip)
            .map_err(|e| anyhow::anyhow!("Failed to place clip: {e}"))?;
        println!("  Placed '{name}' on {track_id} at {start:.2}s");
    }

    store
        .save_file(&path)
        .map_err(|e| anyhow::anyhow!("Failed to save project: {e}"))?;
    println!(
        "Project saved: {} (duration {:.2}s)",
        path.display(),
        store.project().duration
    );

    Ok(())
}

/// Audio goes to the first audio track, everything else to the first video
/// track.
fn default_track(project: &Project, item: &MediaItem) -> Option<String> {
    let kind = match item.kind {
        MediaKind::Audio => TrackKind::Audio,
        MediaKind::Video | MediaKind::Image => TrackKind::Video,
    };
    project
        .tracks
        .iter()
        .find(|t| t.kind == kind)
        .map(|t| t.id.clone())
}
