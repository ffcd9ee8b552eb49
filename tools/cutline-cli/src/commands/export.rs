//! Export a project to video.

use std::path::PathBuf;

use cutline_edit_engine::EditorStore;
use cutline_render_engine::{
    export_project, ExportFormat, ExportRequest, ExportResolution, PlaceholderExporter,
};

pub async fn run(
    path: PathBuf,
    name: String,
    output: PathBuf,
    format: String,
    resolution: String,
) -> anyhow::Result<()> {
    println!("Exporting project at: {}", path.display());

    let mut store = EditorStore::new();
    store
        .load_file(&path, None)
        .map_err(|e| anyhow::anyhow!("Failed to load project: {e}"))?;

    let format = match format.as_str() {
        "mp4" => ExportFormat::Mp4,
        "webm" => ExportFormat::Webm,
        "gif" => ExportFormat::Gif,
        _ => {
            return Err(anyhow::anyhow!(
                "Unknown format: {format}. Use: mp4, webm, gif"
            ));
        }
    };
    let resolution = match resolution.as_str() {
        "720p" => ExportResolution::Hd720,
        "1080p" => ExportResolution::FullHd1080,
        "4k" => ExportResolution::Uhd4k,
        _ => {
            return Err(anyhow::anyhow!(
                "Unknown resolution: {resolution}. Use: 720p, 1080p, 4k"
            ));
        }
    };

    let request = ExportRequest {
        file_name: name,
        resolution,
        format,
        output_dir: output,
    };
    let project = store.project();
    let (width, height) = resolution.dimensions_for(project.width, project.height);

    println!("  Output: {}", request.output_path().display());
    println!("  Format: {:?}", format);
    println!("  Resolution: {width}x{height}");

    match export_project(&PlaceholderExporter, project, store.media(), &request).await {
        Ok(written) => {
            println!("Export complete: {}", written.display());
        }
        Err(e) => {
            println!("Export failed: {e}");
        }
    }

    Ok(())
}
