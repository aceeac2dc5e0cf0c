#![forbid(unsafe_code)]

//! Core: pixel geometry and pointer primitives.
//!
//! # Role in lwpc
//! `lwpc-core` is the leaf of the workspace. It owns the [`Rect`] record every
//! layout pass writes and the pointer types the drag controller consumes.
//! It carries no layout logic of its own.
//!
//! # How it fits in the system
//! `lwpc-layout` builds flex graphs and computes [`Rect`]s, `lwpc-runtime`
//! hands those rects to chart frames, and `lwpc-web` turns browser pointer
//! events into [`PointerPosition`]s for the drag controller.

pub mod event;
pub mod geometry;

pub use event::{PointerButton, PointerPosition};
pub use geometry::Rect;
