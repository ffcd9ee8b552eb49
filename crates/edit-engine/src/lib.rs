//! Cutline Edit Engine
//!
//! The mutation side of the editor:
//! - **ops:** add/update/trim/delete/split clips, tracks, and media while
//!   keeping the project's total-duration invariant
//! - **snap:** magnetic snap-point resolution for dragged edit points
//! - **store:** the owned editor state that wraps a project and media pool
//!   and publishes a fresh snapshot to subscribers after every change
//! - **import:** the media import collaborator (duration probing, deferred
//!   registration)
//!
//! Every operation is synchronous and total: a failed precondition is
//! reported as a [`NoOp`] and leaves state untouched.

pub mod import;
pub mod ops;
pub mod snap;
pub mod store;

pub use import::*;
pub use ops::*;
pub use snap::*;
pub use store::*;
