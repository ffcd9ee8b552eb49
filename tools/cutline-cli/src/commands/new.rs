//! Create a new Cutline project snapshot.

use std::path::PathBuf;

use cutline_edit_engine::EditorStore;

pub fn run(
    path: PathBuf,
    preset: Option<String>,
    width: u32,
    height: u32,
    fps: u32,
    force: bool,
) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let mut store = EditorStore::new();
    match preset {
        Some(id) => {
            let preset = store
                .apply_preset(&id)
                .map_err(|e| anyhow::anyhow!("Failed to apply preset: {e}"))?;
            println!("Using preset '{}' ({})", preset.title, preset.ratio);
        }
        None => store.set_dimensions(width, height, fps),
    }

    store
        .save_file(&path)
        .map_err(|e| anyhow::anyhow!("Failed to create project: {e}"))?;

    let project = store.project();
    println!("Project created: {}", path.display());
    println!(
        "  Format: {}x{} @ {}fps",
        project.width, project.height, project.fps
    );
    println!("  Duration: {:.1}s", project.duration);
    println!("  Tracks:");
    for track in &project.tracks {
        println!("    {} [{}] ({:?})", track.name, track.id, track.kind);
    }

    Ok(())
}
