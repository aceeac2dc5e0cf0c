//! Pixel pass over a flex graph.
//!
//! [`recompute`] walks the arena front to back and writes each node's
//! [`Rect`] and style string. Because every geometry edge points at an earlier
//! node, the anchors a node reads have always been refreshed in the same pass.
//!
//! Pixel sizes are `round(container * share)` with no drift compensation, so
//! siblings may be off by a pixel against the container edge.

use lwpc_core::geometry::Rect;

use crate::config::{HALF_HANDLE_WIDTH, RESIZE_HANDLE_WIDTH};
use crate::flex::{FlexGraph, FlexNode, NodeKind, Orientation};

/// Recompute every node's rect and style for a container of the given size.
///
/// Only `container.width` and `container.height` are read: node rects are
/// relative to the container origin. A container with a non-positive
/// dimension is a transient state (detached or hidden) and leaves the graph
/// untouched.
pub fn recompute(container: Rect, graph: &mut FlexGraph) {
    if container.width <= 0 || container.height <= 0 {
        return;
    }
    let width = f64::from(container.width);
    let height = f64::from(container.height);

    let nodes = graph.nodes_mut();
    for i in 0..nodes.len() {
        let (done, rest) = nodes.split_at_mut(i);
        let node = &mut rest[0];
        let rect = node_rect(node, done, width, height);
        node.style = style_string(node.kind, rect);
        node.rect = rect;
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(
        container_width = container.width,
        container_height = container.height,
        nodes = graph.len(),
        "recomputed layout geometry"
    );
}

fn scaled(total: f64, share: f64) -> i32 {
    (total * share).round() as i32
}

/// Rect of `node` given the already-updated nodes before it.
fn node_rect(node: &FlexNode, done: &[FlexNode], width: f64, height: f64) -> Rect {
    let upstream = |id: crate::flex::NodeId| done.get(id.index()).map(|n| (n.kind, n.rect));
    match node.kind {
        NodeKind::Separator(Orientation::Vertical) => {
            let reference = node
                .resize_pos
                .first()
                .and_then(|&id| upstream(id))
                .map(|(_, rect)| rect)
                .unwrap_or_default();
            Rect::new(
                reference.top,
                reference.right(),
                RESIZE_HANDLE_WIDTH,
                scaled(height, node.flex_height),
            )
        }
        NodeKind::Separator(Orientation::Horizontal) => {
            let reference = node
                .resize_pos
                .first()
                .and_then(|&id| upstream(id))
                .map(|(_, rect)| rect)
                .unwrap_or_default();
            Rect::new(
                reference.bottom(),
                reference.left,
                scaled(width, node.flex_width),
                RESIZE_HANDLE_WIDTH,
            )
        }
        NodeKind::Frame => {
            let mut top = 0;
            let mut left = 0;
            for (kind, rect) in node.resize_pos.iter().filter_map(|&id| upstream(id)) {
                match kind {
                    NodeKind::Separator(Orientation::Horizontal) => top = rect.bottom(),
                    NodeKind::Separator(Orientation::Vertical) => left = rect.right(),
                    NodeKind::Frame => {}
                }
            }
            Rect::new(
                top,
                left,
                scaled(width, node.flex_width),
                scaled(height, node.flex_height),
            )
        }
    }
}

/// Inline positioning style for a node with the given rect.
///
/// Separator handles are shifted back by half their thickness along the drag
/// axis so the handle straddles the boundary it controls.
#[must_use]
pub fn style_string(kind: NodeKind, rect: Rect) -> String {
    let (top, left) = match kind {
        NodeKind::Separator(Orientation::Vertical) => (rect.top, rect.left - HALF_HANDLE_WIDTH),
        NodeKind::Separator(Orientation::Horizontal) => (rect.top - HALF_HANDLE_WIDTH, rect.left),
        NodeKind::Frame => (rect.top, rect.left),
    };
    format!(
        "{{top:{top}px; left:{left}px; width:{}px; height:{}px}}",
        rect.width, rect.height
    )
}
