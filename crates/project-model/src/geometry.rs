//! Plain 2D geometry shared by the model and the compositor.
//!
//! Positions are in output-surface pixels, `(0.0, 0.0)` meaning "no offset"
//! from the fitted, centered placement.

use serde::{Deserialize, Serialize};

/// A 2D offset in output pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width over height. `None` for degenerate sizes.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width > 0.0 && self.height > 0.0 {
            Some(self.width / self.height)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle in output pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// The center point of this rectangle.
    pub fn center(&self) -> Position {
        Position::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// The same rectangle moved by `offset`.
    pub fn translated(&self, offset: Position) -> Rect {
        Rect::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }

    /// Scale the rectangle about `pivot`.
    pub fn scaled_about(&self, pivot: Position, factor: f64) -> Rect {
        Rect {
            x: pivot.x + (self.x - pivot.x) * factor,
            y: pivot.y + (self.y - pivot.y) * factor,
            w: self.w * factor,
            h: self.h * factor,
        }
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}
