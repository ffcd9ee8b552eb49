//! Cutline Project Model
//!
//! Defines the core data contracts for Cutline projects:
//! - **Clips:** Timed placements of one media source on one track
//! - **Tracks:** Stackable lanes holding clips, ordered by creation
//! - **Project:** The aggregate root (tracks, transport, output format)
//! - **Media:** The pool of imported sources clips refer to
//! - **Snapshot:** The flat persisted form of a project
//!
//! All times are in seconds. Timeline positions (`start`, `duration`) and
//! source positions (`offset`) are never mixed without going through a
//! clip's `speed`.

pub mod clip;
pub mod geometry;
pub mod media;
pub mod preset;
pub mod project;
pub mod recent;
pub mod snapshot;
pub mod track;

pub use clip::*;
pub use geometry::*;
pub use media::*;
pub use preset::*;
pub use project::*;
pub use recent::*;
pub use snapshot::*;
pub use track::*;

/// Generate a fresh identifier for tracks, clips, and media.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
