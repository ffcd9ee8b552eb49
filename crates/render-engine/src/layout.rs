//! Placement of clip content on the output surface.
//!
//! Content is first fitted inside the surface preserving its aspect ratio
//! (letterbox or pillarbox), then moved by the clip's position offset and
//! scaled about the center of the moved rectangle.

use serde::Serialize;

use cutline_project_model::{Clip, Position, Rect, Size};

/// Largest rectangle with the content's aspect ratio that fits inside
/// `surface`, centered on the free axis.
pub fn contain_fit(surface: Size, content: Size) -> Option<Rect> {
    let surface_ratio = surface.aspect_ratio()?;
    let content_ratio = content.aspect_ratio()?;

    let rect = if content_ratio > surface_ratio {
        let h = surface.width * content.height / content.width;
        Rect::new(0.0, (surface.height - h) / 2.0, surface.width, h)
    } else {
        let w = surface.height * content.width / content.height;
        Rect::new((surface.width - w) / 2.0, 0.0, w, surface.height)
    };
    Some(rect)
}

/// Where and how a clip's content is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawTransform {
    /// Fitted rectangle moved by the clip position, before scaling.
    pub dest: Rect,
    /// Scale pivot: the center of `dest`.
    pub pivot: Position,
    pub scale: f64,
    /// Global alpha in `[0, 1]`.
    pub alpha: f64,
}

impl DrawTransform {
    /// Transform for `clip` content of `content` size on `surface`.
    pub fn for_clip(clip: &Clip, surface: Size, content: Size) -> Option<Self> {
        let fitted = contain_fit(surface, content)?;
        let position = clip.position();
        let dest = fitted.translated(position);
        Some(Self {
            dest,
            pivot: dest.center(),
            scale: clip.scale(),
            alpha: clip.opacity().clamp(0.0, 1.0),
        })
    }

    /// The rectangle actually covered on the surface.
    pub fn effective_rect(&self) -> Rect {
        self.dest.scaled_about(self.pivot, self.scale)
    }
}
