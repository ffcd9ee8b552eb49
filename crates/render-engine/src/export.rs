//! Export configuration and the export collaborator.
//!
//! Encoding is not performed by this crate. An [`ExportBackend`] receives the
//! in-memory timeline and a request; the shipped [`PlaceholderExporter`]
//! validates the request and reports that export is unsupported.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use cutline_common::error::{CutlineError, CutlineResult};
use cutline_project_model::{MediaPool, Project};

/// Container/codec of the exported file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Mp4,
    Webm,
    Gif,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Mp4 => "mp4",
            ExportFormat::Webm => "webm",
            ExportFormat::Gif => "gif",
        }
    }
}

/// Output resolution choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExportResolution {
    #[serde(rename = "720p")]
    Hd720,
    #[default]
    #[serde(rename = "1080p")]
    FullHd1080,
    #[serde(rename = "4k")]
    Uhd4k,
}

impl ExportResolution {
    /// Output height in pixels. Width follows the project aspect ratio.
    pub fn height(&self) -> u32 {
        match self {
            ExportResolution::Hd720 => 720,
            ExportResolution::FullHd1080 => 1080,
            ExportResolution::Uhd4k => 2160,
        }
    }

    /// Output dimensions for a project of `width`x`height`, rounded to even
    /// pixel counts.
    pub fn dimensions_for(&self, width: u32, height: u32) -> (u32, u32) {
        let target_h = self.height();
        if width == 0 || height == 0 {
            return (target_h * 16 / 9, target_h);
        }
        let short = width.min(height) as f64;
        let factor = target_h as f64 / short;
        let even = |v: f64| ((v / 2.0).round() as u32) * 2;
        (even(width as f64 * factor), even(height as f64 * factor))
    }
}

/// What the user asked to export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// File name without extension.
    pub file_name: String,
    pub resolution: ExportResolution,
    pub format: ExportFormat,
    /// Directory the file is written to.
    pub output_dir: PathBuf,
}

impl Default for ExportRequest {
    fn default() -> Self {
        Self {
            file_name: "cutline-export".to_string(),
            resolution: ExportResolution::default(),
            format: ExportFormat::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl ExportRequest {
    pub fn output_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.file_name, self.format.extension()))
    }

    pub fn validate(&self) -> CutlineResult<()> {
        let name = self.file_name.trim();
        if name.is_empty() {
            return Err(CutlineError::render("Export file name is empty"));
        }
        if name.contains(['/', '\\']) {
            return Err(CutlineError::render(format!(
                "Export file name `{name}` must not contain path separators"
            )));
        }
        Ok(())
    }
}

/// Receives the timeline for export and produces the encoded file.
#[async_trait]
pub trait ExportBackend: Send + Sync {
    async fn export(
        &self,
        project: &Project,
        media: &MediaPool,
        request: &ExportRequest,
    ) -> CutlineResult<PathBuf>;

    /// Check if this backend can run on the system.
    fn is_available(&self) -> bool;

    /// Backend name.
    fn name(&self) -> &str;
}

/// Export collaborator that accepts requests but never encodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderExporter;

#[async_trait]
impl ExportBackend for PlaceholderExporter {
    async fn export(
        &self,
        project: &Project,
        media: &MediaPool,
        request: &ExportRequest,
    ) -> CutlineResult<PathBuf> {
        request.validate()?;
        let (width, height) = request
            .resolution
            .dimensions_for(project.width, project.height);
        tracing::info!(
            output = %request.output_path().display(),
            format = ?request.format,
            width,
            height,
            clips = project.clips().count(),
            media = media.len(),
            "Export requested"
        );
        Err(CutlineError::unsupported(
            "Video export is not available in this build",
        ))
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "placeholder"
    }
}

/// Hand the timeline to `backend`.
pub async fn export_project(
    backend: &dyn ExportBackend,
    project: &Project,
    media: &MediaPool,
    request: &ExportRequest,
) -> CutlineResult<PathBuf> {
    if !backend.is_available() {
        return Err(CutlineError::unsupported(format!(
            "Export backend `{}` is not available",
            backend.name()
        )));
    }
    tracing::info!(backend = backend.name(), "Using export backend");
    backend.export(project, media, request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_placeholder_reports_unsupported() {
        let project = Project::new();
        let result = export_project(
            &PlaceholderExporter,
            &project,
            &MediaPool::new(),
            &ExportRequest::default(),
        )
        .await;
        assert!(matches!(result, Err(CutlineError::Unsupported { .. })));
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected_first() {
        let request = ExportRequest {
            file_name: "  ".to_string(),
            ..ExportRequest::default()
        };
        let result = PlaceholderExporter
            .export(&Project::new(), &MediaPool::new(), &request)
            .await;
        assert!(matches!(result, Err(CutlineError::Render { .. })));
    }

    #[test]
    fn test_output_path() {
        let request = ExportRequest {
            file_name: "trailer".to_string(),
            format: ExportFormat::Webm,
            output_dir: PathBuf::from("/out"),
            ..ExportRequest::default()
        };
        assert_eq!(request.output_path(), PathBuf::from("/out/trailer.webm"));
    }

    #[test]
    fn test_resolution_follows_project_aspect() {
        assert_eq!(ExportResolution::Hd720.dimensions_for(1920, 1080), (1280, 720));
        assert_eq!(ExportResolution::FullHd1080.dimensions_for(1080, 1920), (1080, 1920));
        assert_eq!(ExportResolution::Uhd4k.dimensions_for(1080, 1080), (2160, 2160));
    }

    #[test]
    fn test_request_json_shape() {
        let json = r#"{"fileName":"a","resolution":"4k","format":"gif","outputDir":"/tmp"}"#;
        let request: ExportRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.resolution, ExportResolution::Uhd4k);
        assert_eq!(request.format, ExportFormat::Gif);
    }
}
