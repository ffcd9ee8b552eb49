//! Composite a single preview frame.
//!
//! Sources are not decoded; every file is assumed ready at the given
//! natural size, so the output shows which clip lands where and with what
//! transform.

use std::path::PathBuf;
use std::time::Instant;

use cutline_common::config::AppConfig;
use cutline_edit_engine::EditorStore;
use cutline_project_model::Size;
use cutline_render_engine::{Compositor, DrawList, SimulatedBackend};

pub fn run(
    path: PathBuf,
    at: f64,
    source_width: f64,
    source_height: f64,
    config: &AppConfig,
) -> anyhow::Result<()> {
    if !at.is_finite() || at < 0.0 {
        anyhow::bail!("Frame time must be a non-negative number of seconds, got {at}");
    }

    let mut store = EditorStore::new();
    store
        .load_file(&path, None)
        .map_err(|e| anyhow::anyhow!("Failed to load project: {e}"))?;
    store.set_playhead(at);

    let backend = SimulatedBackend::all_ready(Size::new(source_width, source_height));
    let mut compositor = Compositor::new(backend, store.subscribe(), config.preview.clone());
    let mut surface = DrawList::new();

    let report = compositor.tick(Some(&mut surface), Instant::now());
    compositor.shutdown();
    tracing::debug!(time = report.time, layers = report.layers, "Frame composited");

    println!("{}", serde_json::to_string_pretty(&surface)?);
    Ok(())
}
