//! Output surfaces.

use serde::Serialize;

use cutline_project_model::{ClipKind, Size};

use crate::layout::DrawTransform;

/// One clip's content placed on the surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub clip_id: String,
    pub track_id: String,
    pub kind: ClipKind,
    pub source_path: String,
    /// Source position sampled for this frame. `None` for stills.
    pub source_time: Option<f64>,
    pub natural_size: Size,
    pub transform: DrawTransform,
}

/// A 2D drawing target.
pub trait Surface {
    fn size(&self) -> (u32, u32);

    fn resize(&mut self, width: u32, height: u32);

    /// Fill the whole surface with opaque black.
    fn clear(&mut self);

    fn draw(&mut self, layer: &Layer);
}

/// A surface that records what was drawn on the last frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawList {
    pub width: u32,
    pub height: u32,
    pub layers: Vec<Layer>,
    /// Number of times the surface was reallocated.
    #[serde(skip)]
    pub resizes: u32,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers bottom to top.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
}

impl Surface for DrawList {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.resizes += 1;
        self.layers.clear();
    }

    fn clear(&mut self) {
        self.layers.clear();
    }

    fn draw(&mut self, layer: &Layer) {
        self.layers.push(layer.clone());
    }
}
