//! Separator drag math and lifecycle.
//!
//! A drag moves the boundary between a separator's two primary neighbors
//! (`resize_pos[0]` and `resize_neg[0]`). The pair's combined share stays
//! fixed; the pointer decides how it is split, subject to the configured
//! minimum frame fraction. Every node on each side of the separator receives
//! the same new share, so a nested group listed on one side keeps its
//! internal ratios while the outer split moves.
//!
//! [`DragController`] owns the listener lifecycle: document-level move/up
//! listeners exist only between [`DragController::begin`] and the matching
//! [`DragController::end`] (or a forced [`DragController::cancel`]), and
//! every attach command is paired with exactly one detach command.

use std::fmt;

use lwpc_core::event::PointerPosition;
use lwpc_core::geometry::Rect;

use crate::config::LayoutConfig;
use crate::flex::{FlexGraph, NodeId, Orientation};
use crate::resize::recompute;

// ============================================================================
// Errors
// ============================================================================

/// Why a drag could not be started or applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragError {
    /// The node id is outside the graph.
    UnknownNode(NodeId),
    /// The node is a frame.
    NotASeparator(NodeId),
    /// The separator lacks `resize_pos[0]` or `resize_neg[0]`.
    MissingPrimaryNeighbor(NodeId),
    /// A drag on another separator (or with another pointer) is in progress.
    AlreadyDragging { active: NodeId, pointer_id: u32 },
}

impl fmt::Display for DragError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "node {id} is not in the layout"),
            Self::NotASeparator(id) => write!(f, "node {id} is a frame, not a separator"),
            Self::MissingPrimaryNeighbor(id) => {
                write!(f, "separator {id} has no primary neighbor pair")
            }
            Self::AlreadyDragging { active, pointer_id } => write!(
                f,
                "separator {active} is already being dragged by pointer {pointer_id}"
            ),
        }
    }
}

impl std::error::Error for DragError {}

// ============================================================================
// Split math
// ============================================================================

/// Which side of a split was raised to the minimum fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragClamp {
    Lead,
    Trail,
}

/// Result of mapping a pointer coordinate onto a primary neighbor pair.
///
/// `lead` is the share of the left (vertical separator) or top (horizontal
/// separator) side; `trail` is the remainder. `lead + trail == flex_total`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSplit {
    pub flex_total: f64,
    pub lead: f64,
    pub trail: f64,
    pub clamp: Option<DragClamp>,
}

/// Split `flex_total` at a pointer `relative` pixels past the lead edge.
///
/// `pixel_total` is the current pixel extent of the pair. Returns `None` when
/// the pair has no pixel extent yet, since no ratio can be derived from it.
///
/// The lead side is clamped first; the trail side is only clamped when the
/// lead side already satisfies the minimum.
#[must_use]
pub fn split_for_pointer(
    flex_total: f64,
    pixel_total: f64,
    relative: f64,
    min_fraction: f64,
) -> Option<DragSplit> {
    if !(pixel_total > 0.0) || !relative.is_finite() {
        return None;
    }
    let lead = (relative / pixel_total) * flex_total;
    let trail = flex_total - lead;
    let split = if lead < min_fraction {
        DragSplit {
            flex_total,
            lead: min_fraction,
            trail: flex_total - min_fraction,
            clamp: Some(DragClamp::Lead),
        }
    } else if trail < min_fraction {
        DragSplit {
            flex_total,
            lead: flex_total - min_fraction,
            trail: min_fraction,
            clamp: Some(DragClamp::Trail),
        }
    } else {
        DragSplit {
            flex_total,
            lead,
            trail,
            clamp: None,
        }
    };
    Some(split)
}

/// Move `separator` to follow `pointer`, then recompute the whole graph.
///
/// `container` is the layout container's rect in the same (client) coordinate
/// space as `pointer`. Returns the committed split, or `Ok(None)` when the
/// primary pair has not been laid out yet and the move was ignored.
pub fn apply_drag(
    graph: &mut FlexGraph,
    separator: NodeId,
    pointer: PointerPosition,
    container: Rect,
    config: &LayoutConfig,
) -> Result<Option<DragSplit>, DragError> {
    let node = graph.get(separator).ok_or(DragError::UnknownNode(separator))?;
    let orientation = node
        .orientation()
        .ok_or(DragError::NotASeparator(separator))?;
    let (Some(&pos0), Some(&neg0)) = (node.resize_pos.first(), node.resize_neg.first()) else {
        return Err(DragError::MissingPrimaryNeighbor(separator));
    };
    let (Some(lead), Some(trail)) = (graph.get(pos0), graph.get(neg0)) else {
        return Err(DragError::MissingPrimaryNeighbor(separator));
    };

    let (flex_total, pixel_total, relative, min_fraction) = match orientation {
        Orientation::Vertical => (
            lead.flex_width + trail.flex_width,
            f64::from(lead.rect.width + trail.rect.width),
            pointer.x - f64::from(container.left + lead.rect.left),
            config.min_frame_width,
        ),
        Orientation::Horizontal => (
            lead.flex_height + trail.flex_height,
            f64::from(lead.rect.height + trail.rect.height),
            pointer.y - f64::from(container.top + lead.rect.top),
            config.min_frame_height,
        ),
    };

    let Some(split) = split_for_pointer(flex_total, pixel_total, relative, min_fraction) else {
        return Ok(None);
    };

    let (pos, neg) = {
        let node = graph.get(separator).ok_or(DragError::UnknownNode(separator))?;
        (node.resize_pos.clone(), node.resize_neg.clone())
    };
    let assign = |graph: &mut FlexGraph, ids: &[NodeId], share: f64| {
        for &id in ids {
            if let Some(node) = graph.get_mut(id) {
                match orientation {
                    Orientation::Vertical => node.flex_width = share,
                    Orientation::Horizontal => node.flex_height = share,
                }
            }
        }
    };
    assign(graph, &pos, split.lead);
    assign(graph, &neg, split.trail);

    recompute(container, graph);
    Ok(Some(split))
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Host instruction for the document-level `pointermove`/`pointerup` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerCommand {
    Attach { separator: NodeId, pointer_id: u32 },
    Detach { separator: NodeId, pointer_id: u32 },
}

/// Drag lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { separator: NodeId, pointer_id: u32 },
}

/// One-drag-at-a-time controller for a layout's separators.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Separator currently being dragged.
    #[must_use]
    pub const fn active_separator(&self) -> Option<NodeId> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { separator, .. } => Some(separator),
        }
    }

    /// Start dragging `separator` with `pointer_id` (separator `pointerdown`).
    pub fn begin(
        &mut self,
        graph: &FlexGraph,
        separator: NodeId,
        pointer_id: u32,
    ) -> Result<ListenerCommand, DragError> {
        if let DragState::Dragging {
            separator: active,
            pointer_id: active_pointer,
        } = self.state
        {
            return Err(DragError::AlreadyDragging {
                active,
                pointer_id: active_pointer,
            });
        }
        let node = graph.get(separator).ok_or(DragError::UnknownNode(separator))?;
        if node.is_frame() {
            return Err(DragError::NotASeparator(separator));
        }
        if node.resize_pos.is_empty() || node.resize_neg.is_empty() {
            return Err(DragError::MissingPrimaryNeighbor(separator));
        }

        self.state = DragState::Dragging {
            separator,
            pointer_id,
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(%separator, pointer_id, "separator drag started");
        Ok(ListenerCommand::Attach {
            separator,
            pointer_id,
        })
    }

    /// Apply a document `pointermove`.
    ///
    /// Moves from a pointer other than the one that started the drag, or
    /// while idle, are ignored and return `Ok(None)`.
    pub fn drag_move(
        &mut self,
        graph: &mut FlexGraph,
        pointer_id: u32,
        pointer: PointerPosition,
        container: Rect,
        config: &LayoutConfig,
    ) -> Result<Option<DragSplit>, DragError> {
        match self.state {
            DragState::Dragging {
                separator,
                pointer_id: active,
            } if active == pointer_id => apply_drag(graph, separator, pointer, container, config),
            _ => Ok(None),
        }
    }

    /// Finish the drag on document `pointerup`.
    ///
    /// Returns `None` when idle or when `pointer_id` is not the dragging pointer.
    pub fn end(&mut self, pointer_id: u32) -> Option<ListenerCommand> {
        match self.state {
            DragState::Dragging {
                pointer_id: active, ..
            } if active == pointer_id => self.release(),
            _ => None,
        }
    }

    /// Abort any active drag regardless of pointer (cancel, blur, teardown).
    pub fn cancel(&mut self) -> Option<ListenerCommand> {
        self.release()
    }

    fn release(&mut self) -> Option<ListenerCommand> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging {
                separator,
                pointer_id,
            } => {
                #[cfg(feature = "tracing")]
                tracing::debug!(%separator, pointer_id, "separator drag released");
                Some(ListenerCommand::Detach {
                    separator,
                    pointer_id,
                })
            }
        }
    }
}
