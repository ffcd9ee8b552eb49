//! Cutline Interaction
//!
//! Translates timeline input into edit operations:
//! - **metrics:** pixel/time conversion for the timeline view
//! - **gesture:** the one-at-a-time pointer gesture state machine (scrub,
//!   clip drag, edge resize, media drop)
//! - **keyboard:** transport and edit shortcuts
//!
//! All mutations go through [`cutline_edit_engine::EditorStore`].

pub mod gesture;
pub mod keyboard;
pub mod metrics;

pub use gesture::*;
pub use keyboard::*;
pub use metrics::*;
