#![forbid(unsafe_code)]

//! `lwpc-web` is the DOM-facing edge of the lwpc layout engine.
//!
//! The embedding JavaScript host owns the actual elements. It forwards
//! browser pointer events to [`SeparatorPointerAdapter`], applies the
//! returned [`DomCommand`]s to the document, and writes
//! [`render_style_sheet`] output into the container's `<style>` element after
//! every resize. Nothing here touches `web-sys`, so the same code runs under
//! native tests.

pub mod dom;
pub mod pointer;

pub use dom::{NTH_CHILD_OFFSET, render_style_sheet, separator_cursor};
pub use pointer::{
    DomCommand, IgnoredReason, PointerDispatch, PointerLogEntry, PointerLogOutcome, PointerPhase,
    SeparatorPointerAdapter, SeparatorPointerConfig,
};
