//! Flex frame/separator graph.
//!
//! # Design
//!
//! A layout is a flat, ordered arena of [`FlexNode`]s. Each node is either a
//! content **frame** or a draggable **separator**, and carries its fractional
//! share of the container (`flex_width`, `flex_height`) together with two edge
//! lists pointing at other nodes in the same arena:
//!
//! - `resize_pos`: for a separator, the nodes whose share grows as the pointer
//!   coordinate increases (index 0 is the primary neighbor used for drag
//!   math); for a frame, the separators that anchor its top/left edges.
//! - `resize_neg`: for a separator, the nodes whose share shrinks as the
//!   pointer coordinate increases (index 0 is the primary neighbor). Frames
//!   never carry `resize_neg` entries.
//!
//! Arena order is evaluation order. Geometry only ever flows through
//! `resize_pos`, and every `resize_pos` edge points at an earlier node, so a
//! single front-to-back pass always reads already-updated upstream geometry.
//!
//! ```text
//!  DOUBLE_VERT          arena: [f1, s1, f2]
//!  +------+|+------+    s1.resize_pos = [f1]   s1.resize_neg = [f2]
//!  |  f1  |||  f2  |    f2.resize_pos = [s1]
//!  +------+|+------+
//! ```

use std::fmt;

use lwpc_core::geometry::Rect;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

// ============================================================================
// NodeId
// ============================================================================

/// Handle into a [`FlexGraph`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Create a NodeId from a raw arena index.
    #[must_use]
    pub const fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw arena index.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

// ============================================================================
// Node kinds
// ============================================================================

/// Axis of pixel movement a separator supports.
///
/// A `Vertical` separator is a vertical line dragged left/right that trades
/// **width** between its neighbors. A `Horizontal` separator is a horizontal
/// line dragged up/down that trades **height**.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// What a node in the graph represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Content region hosting one chart frame.
    Frame,
    /// Draggable divider.
    Separator(Orientation),
}

impl NodeKind {
    #[must_use]
    pub const fn is_frame(self) -> bool {
        matches!(self, Self::Frame)
    }

    #[must_use]
    pub const fn orientation(self) -> Option<Orientation> {
        match self {
            Self::Frame => None,
            Self::Separator(orientation) => Some(orientation),
        }
    }
}

// ============================================================================
// FlexNode
// ============================================================================

/// One frame or separator in a layout graph.
#[derive(Debug, Clone, PartialEq)]
pub struct FlexNode {
    pub kind: NodeKind,
    /// Fraction of the container width in `[0, 1]`.
    pub flex_width: f64,
    /// Fraction of the container height in `[0, 1]`.
    pub flex_height: f64,
    /// Last computed pixel geometry.
    pub rect: Rect,
    /// Positioning style derived from `rect`, applied verbatim by the DOM layer.
    pub style: String,
    pub resize_pos: Vec<NodeId>,
    pub resize_neg: Vec<NodeId>,
}

impl FlexNode {
    /// A content frame with the given shares.
    #[must_use]
    pub fn frame(flex_width: f64, flex_height: f64) -> Self {
        Self {
            kind: NodeKind::Frame,
            flex_width,
            flex_height,
            rect: Rect::default(),
            style: String::new(),
            resize_pos: Vec::new(),
            resize_neg: Vec::new(),
        }
    }

    /// A separator spanning `size` of the container along its long axis.
    ///
    /// Only the spanning share is meaningful; the share across the handle is
    /// zero because handle thickness is a fixed pixel constant.
    #[must_use]
    pub fn separator(orientation: Orientation, size: f64) -> Self {
        let (flex_width, flex_height) = match orientation {
            Orientation::Vertical => (0.0, size),
            Orientation::Horizontal => (size, 0.0),
        };
        Self {
            kind: NodeKind::Separator(orientation),
            flex_width,
            flex_height,
            rect: Rect::default(),
            style: String::new(),
            resize_pos: Vec::new(),
            resize_neg: Vec::new(),
        }
    }

    #[must_use]
    pub const fn orientation(&self) -> Option<Orientation> {
        self.kind.orientation()
    }

    #[must_use]
    pub const fn is_frame(&self) -> bool {
        self.kind.is_frame()
    }
}

// ============================================================================
// FlexGraphError
// ============================================================================

/// Structural defect found by [`FlexGraph::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlexGraphError {
    /// An edge names a node outside the arena.
    DanglingEdge { from: NodeId, to: NodeId },
    /// A node lists itself as a neighbor.
    SelfEdge { node: NodeId },
    /// A geometry edge points at a node evaluated at the same time or later.
    ForwardDependency { from: NodeId, to: NodeId },
    /// A separator lacks its primary growing or shrinking neighbor.
    MissingPrimaryNeighbor { separator: NodeId },
    /// A frame carries `resize_neg` entries.
    FrameWithNegativeEdges { frame: NodeId },
    /// A frame is anchored to something other than a separator.
    FrameAnchoredToFrame { frame: NodeId, anchor: NodeId },
    /// A frame is anchored by two separators of the same orientation.
    DuplicateAnchor {
        frame: NodeId,
        orientation: Orientation,
    },
}

impl fmt::Display for FlexGraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingEdge { from, to } => {
                write!(f, "edge {from} -> {to} points outside the graph")
            }
            Self::SelfEdge { node } => write!(f, "node {node} lists itself as a neighbor"),
            Self::ForwardDependency { from, to } => write!(
                f,
                "geometry of {from} depends on {to}, which is evaluated later"
            ),
            Self::MissingPrimaryNeighbor { separator } => {
                write!(f, "separator {separator} has no primary neighbor pair")
            }
            Self::FrameWithNegativeEdges { frame } => {
                write!(f, "frame {frame} must not carry resize_neg edges")
            }
            Self::FrameAnchoredToFrame { frame, anchor } => {
                write!(f, "frame {frame} is anchored to non-separator {anchor}")
            }
            Self::DuplicateAnchor { frame, orientation } => write!(
                f,
                "frame {frame} has more than one {orientation:?} anchor separator"
            ),
        }
    }
}

impl std::error::Error for FlexGraphError {}

// ============================================================================
// FlexGraph
// ============================================================================

/// Fractional rectangle of a node in flex space (container = unit square).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlexRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl FlexRect {
    fn spans_row(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }

    fn spans_column(&self, x: f64) -> bool {
        x >= self.left && x < self.left + self.width
    }
}

/// Ordered arena of flex nodes for one layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlexGraph {
    nodes: Vec<FlexNode>,
}

impl FlexGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node, returning its id. Arena order is evaluation order.
    pub fn push(&mut self, node: FlexNode) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&FlexNode> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut FlexNode> {
        self.nodes.get_mut(id.index())
    }

    /// Iterate `(id, node)` pairs in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &FlexNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::from_raw(i as u32), node))
    }

    pub(crate) fn nodes(&self) -> &[FlexNode] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [FlexNode] {
        &mut self.nodes
    }

    /// Frame node ids in evaluation order.
    ///
    /// The n-th id is the slot the container binds its n-th frame to.
    pub fn frames(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(|(_, node)| node.is_frame())
            .map(|(id, _)| id)
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_frame()).count()
    }

    /// Separator node ids in evaluation order.
    pub fn separators(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(|(_, node)| !node.is_frame())
            .map(|(id, _)| id)
    }

    /// Pixel rects in evaluation order.
    #[must_use]
    pub fn rects(&self) -> Vec<Rect> {
        self.nodes.iter().map(|node| node.rect).collect()
    }

    /// Check every structural invariant, returning the first violation.
    pub fn validate(&self) -> Result<(), FlexGraphError> {
        let len = self.nodes.len();
        for (id, node) in self.iter() {
            for &to in node.resize_pos.iter().chain(&node.resize_neg) {
                if to.index() >= len {
                    return Err(FlexGraphError::DanglingEdge { from: id, to });
                }
                if to == id {
                    return Err(FlexGraphError::SelfEdge { node: id });
                }
            }
            for &to in &node.resize_pos {
                if to >= id {
                    return Err(FlexGraphError::ForwardDependency { from: id, to });
                }
            }

            match node.kind {
                NodeKind::Separator(_) => {
                    if node.resize_pos.is_empty() || node.resize_neg.is_empty() {
                        return Err(FlexGraphError::MissingPrimaryNeighbor { separator: id });
                    }
                }
                NodeKind::Frame => {
                    if !node.resize_neg.is_empty() {
                        return Err(FlexGraphError::FrameWithNegativeEdges { frame: id });
                    }
                    let mut seen = FxHashSet::default();
                    for &anchor in &node.resize_pos {
                        let Some(orientation) = self.nodes[anchor.index()].orientation() else {
                            return Err(FlexGraphError::FrameAnchoredToFrame { frame: id, anchor });
                        };
                        if !seen.insert(orientation) {
                            return Err(FlexGraphError::DuplicateAnchor {
                                frame: id,
                                orientation,
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Fractional geometry of every node, ignoring separator thickness.
    ///
    /// Mirrors the pixel pass in [`crate::resize`] but in flex units, so band
    /// coverage can be checked without rounding noise.
    #[must_use]
    pub fn flex_rects(&self) -> Vec<FlexRect> {
        let mut out: Vec<FlexRect> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let anchor = |orientation: Orientation| {
                node.resize_pos
                    .iter()
                    .copied()
                    .find(|id| {
                        self.nodes.get(id.index()).and_then(FlexNode::orientation)
                            == Some(orientation)
                    })
                    .and_then(|id| out.get(id.index()).copied())
            };
            let rect = match node.kind {
                NodeKind::Separator(Orientation::Vertical) => {
                    let reference = node
                        .resize_pos
                        .first()
                        .and_then(|id| out.get(id.index()))
                        .copied()
                        .unwrap_or_default();
                    FlexRect {
                        top: reference.top,
                        left: reference.left + reference.width,
                        width: 0.0,
                        height: node.flex_height,
                    }
                }
                NodeKind::Separator(Orientation::Horizontal) => {
                    let reference = node
                        .resize_pos
                        .first()
                        .and_then(|id| out.get(id.index()))
                        .copied()
                        .unwrap_or_default();
                    FlexRect {
                        top: reference.top + reference.height,
                        left: reference.left,
                        width: node.flex_width,
                        height: 0.0,
                    }
                }
                NodeKind::Frame => FlexRect {
                    top: anchor(Orientation::Horizontal).map_or(0.0, |s| s.top),
                    left: anchor(Orientation::Vertical).map_or(0.0, |s| s.left),
                    width: node.flex_width,
                    height: node.flex_height,
                },
            };
            out.push(rect);
        }
        out
    }

    /// Sum of frame `flex_width` across the horizontal band at `y` (flex units).
    #[must_use]
    pub fn row_share(&self, y: f64) -> f64 {
        self.flex_rects()
            .iter()
            .zip(&self.nodes)
            .filter(|(rect, node)| node.is_frame() && rect.spans_row(y))
            .map(|(_, node)| node.flex_width)
            .sum()
    }

    /// Sum of frame `flex_height` across the vertical band at `x` (flex units).
    #[must_use]
    pub fn column_share(&self, x: f64) -> f64 {
        self.flex_rects()
            .iter()
            .zip(&self.nodes)
            .filter(|(rect, node)| node.is_frame() && rect.spans_column(x))
            .map(|(_, node)| node.flex_height)
            .sum()
    }
}
