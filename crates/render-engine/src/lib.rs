//! Cutline Render Engine
//!
//! Real-time preview compositing. Every tick the compositor samples each
//! visible track at the transport time and draws the active clip onto one
//! output surface, keeping per-clip playback handles in sync with
//! play/pause/scrub state.
//!
//! # Pipeline Architecture
//!
//! ```text
//! EditorStore ──watch──► Arc<Project> snapshot
//!                              │
//!                              ├── transport time (wall-clock delta while playing)
//!                              │
//!                              ├── tracks, last to first ── skip muted / audio
//!                              │         │
//!                              │         ├── active clip ── image handle (by source)
//!                              │         │              └── playback handle (by clip)
//!                              │         │
//!                              │         └── contain fit → position → scale → alpha
//!                              │                                  │
//!                              │                                  ▼
//!                              │                               Surface
//!                              │
//!                              └── handle cleanup (pause hidden, drop deleted)
//! ```
//!
//! Export is delegated to an [`ExportBackend`]; no encoding happens here.

pub mod compositor;
pub mod export;
pub mod layout;
pub mod media;
pub mod preview;
pub mod simulated;
pub mod surface;

pub use compositor::*;
pub use export::*;
pub use layout::*;
pub use media::*;
pub use preview::*;
pub use simulated::*;
pub use surface::*;
