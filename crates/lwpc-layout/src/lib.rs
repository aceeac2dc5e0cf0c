#![forbid(unsafe_code)]

//! Flex layouts for multi-frame chart containers.
//!
//! A container shows one of seventeen fixed [`Topology`] arrangements of up
//! to four chart frames separated by draggable handles. [`build_layout`]
//! turns a topology into a [`FlexGraph`], [`recompute`] maps the graph's
//! fractional shares onto pixels, and the [`drag`] module moves separators
//! while keeping every frame above the configured minimum size.
//!
//! ```
//! use lwpc_core::Rect;
//! use lwpc_layout::{LayoutConfig, Topology, build_layout, recompute};
//!
//! let mut layout = build_layout(Topology::DoubleVert, &LayoutConfig::default());
//! recompute(Rect::from_size(1000, 500), layout.graph_mut());
//! let rects = layout.graph().rects();
//! assert_eq!(rects[0], Rect::new(0, 0, 500, 500));
//! assert_eq!(rects[2].left, 508);
//! ```

pub mod config;
pub mod drag;
pub mod flex;
pub mod resize;
pub mod table;
pub mod topology;

pub use config::{
    ConfigError, DEFAULT_MIN_FRAME_HEIGHT, DEFAULT_MIN_FRAME_WIDTH, HALF_HANDLE_WIDTH,
    LayoutConfig, RESIZE_HANDLE_WIDTH,
};
pub use drag::{
    DragClamp, DragController, DragError, DragSplit, DragState, ListenerCommand, apply_drag,
    split_for_pointer,
};
pub use flex::{FlexGraph, FlexGraphError, FlexNode, FlexRect, NodeId, NodeKind, Orientation};
pub use lwpc_core::geometry::Rect;
pub use resize::{recompute, style_string};
pub use table::{Layout, LinkSpec, NodeSpec, TopologySpec, build_layout, topology_spec};
pub use topology::{Topology, UnknownTopology};
