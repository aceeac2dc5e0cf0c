//! Layout containers.
//!
//! A [`Container`] is one tab of the window. It owns an ordered list of
//! frames, the flex graph of its current topology, and the drag state of that
//! graph's separators. Frames are bound to the graph's frame slots by list
//! position: frame `i` fills the `i`-th frame node, frames past the
//! topology's frame count are kept but hidden.

use std::fmt;

use lwpc_core::{PointerPosition, Rect};
use lwpc_layout::{
    DragController, DragError, DragSplit, DragState, Layout, LayoutConfig, ListenerCommand, NodeId,
    NodeKind, Orientation, Topology, build_layout, recompute,
};

use crate::chart::ChartFactory;
use crate::frame::Frame;
use crate::schedule::DeferredTick;

/// What the element at one position of the container's display list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplaySlot {
    /// The `slot`-th frame node, showing `frames[slot]`.
    Frame { node: NodeId, slot: usize },
    Separator { node: NodeId, orientation: Orientation },
}

impl DisplaySlot {
    #[must_use]
    pub const fn node(self) -> NodeId {
        match self {
            Self::Frame { node, .. } | Self::Separator { node, .. } => node,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// The topology needs more frames than the container holds.
    NotEnoughFrames { required: usize, available: usize },
    /// The operation needs a layout and none has been set.
    NoLayout,
    IndexOutOfRange { index: usize, len: usize },
    Drag(DragError),
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotEnoughFrames {
                required,
                available,
            } => write!(
                f,
                "layout needs {required} frames but the container has {available}"
            ),
            Self::NoLayout => f.write_str("container has no layout"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "frame index {index} out of range for {len} frames")
            }
            Self::Drag(e) => write!(f, "separator drag failed: {e}"),
        }
    }
}

impl std::error::Error for ContainerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Drag(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DragError> for ContainerError {
    fn from(e: DragError) -> Self {
        Self::Drag(e)
    }
}

#[derive(Debug)]
pub struct Container {
    id: String,
    config: LayoutConfig,
    frames: Vec<Frame>,
    layout: Option<Layout>,
    display: Vec<DisplaySlot>,
    bounds: Rect,
    visible: bool,
    drag: DragController,
    frame_resize: DeferredTick,
}

impl Container {
    /// An empty container with no frames and no layout.
    pub fn new(id: impl Into<String>, config: LayoutConfig) -> Self {
        Self {
            id: id.into(),
            config,
            frames: Vec::new(),
            layout: None,
            display: Vec::new(),
            bounds: Rect::default(),
            visible: false,
            drag: DragController::new(),
            frame_resize: DeferredTick::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut [Frame] {
        &mut self.frames
    }

    #[must_use]
    pub fn frame(&self, id: &str) -> Option<&Frame> {
        self.frames.iter().find(|frame| frame.id() == id)
    }

    pub fn frame_mut(&mut self, id: &str) -> Option<&mut Frame> {
        self.frames.iter_mut().find(|frame| frame.id() == id)
    }

    #[must_use]
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    #[must_use]
    pub fn topology(&self) -> Option<Topology> {
        self.layout.as_ref().map(Layout::topology)
    }

    /// Number of frames the current topology displays.
    #[must_use]
    pub fn displayed_frame_count(&self) -> usize {
        self.topology().map_or(0, Topology::frame_count)
    }

    /// Display list in graph node order.
    #[must_use]
    pub fn display(&self) -> &[DisplaySlot] {
        &self.display
    }

    /// Frame shown in the `slot`-th frame node.
    #[must_use]
    pub fn frame_in_slot(&self, slot: usize) -> Option<&Frame> {
        if slot < self.displayed_frame_count() {
            self.frames.get(slot)
        } else {
            None
        }
    }

    /// Last measured container rect, in client coordinates.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub const fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// True while a frame resize is waiting for the next tick.
    #[must_use]
    pub const fn frame_resize_pending(&self) -> bool {
        self.frame_resize.is_armed()
    }

    /// Bind a host frame id.
    ///
    /// The first frame still waiting for an id (one created by a layout
    /// switch) adopts it; otherwise a new, hidden frame is appended.
    pub fn add_frame(&mut self, id: impl Into<String>, factory: &mut dyn ChartFactory) -> &mut Frame {
        let id = id.into();
        let index = match self.frames.iter().position(Frame::is_placeholder) {
            Some(index) => {
                self.frames[index].assign_id(id);
                index
            }
            None => {
                self.frames.push(Frame::new(id, factory));
                self.frames.len() - 1
            }
        };
        tracing::debug!(
            container = %self.id,
            frame = %self.frames[index].id(),
            index,
            "frame added"
        );
        &mut self.frames[index]
    }

    /// Replace the layout.
    ///
    /// Fails without touching any state when the container holds fewer
    /// frames than `topology` displays. Otherwise the old graph, including
    /// any dragged separator positions, is discarded and frames are bound to
    /// the new graph's slots in list order. An in-progress drag on the old
    /// graph is dropped.
    pub fn set_layout(&mut self, topology: Topology) -> Result<(), ContainerError> {
        let required = topology.frame_count();
        if self.frames.len() < required {
            return Err(ContainerError::NotEnoughFrames {
                required,
                available: self.frames.len(),
            });
        }

        if let Some(ListenerCommand::Detach { separator, .. }) = self.drag.cancel() {
            tracing::debug!(container = %self.id, %separator, "drag dropped by layout switch");
        }

        let layout = build_layout(topology, &self.config);
        self.display = display_list(&layout);
        self.layout = Some(layout);
        self.sync_frame_visibility();
        tracing::debug!(
            container = %self.id,
            %topology,
            frames = self.frames.len(),
            "layout applied"
        );
        self.resize(None);
        Ok(())
    }

    /// Like [`set_layout`](Self::set_layout), creating placeholder frames
    /// (`<container>_f<n>`) until the topology can be filled.
    pub fn set_layout_with(
        &mut self,
        topology: Topology,
        factory: &mut dyn ChartFactory,
    ) -> Result<(), ContainerError> {
        while self.frames.len() < topology.frame_count() {
            let element_id = format!("{}_f{}", self.id, self.frames.len());
            self.frames.push(Frame::placeholder(&element_id, factory));
        }
        self.set_layout(topology)
    }

    /// Lay the graph out in `rect`, or in the stored bounds when `None`.
    ///
    /// Chart resizes are deferred to the next [`on_tick`](Self::on_tick).
    /// An empty rect (detached or hidden container) does nothing.
    pub fn resize(&mut self, rect: Option<Rect>) {
        if let Some(rect) = rect {
            self.bounds = rect;
        }
        if self.bounds.is_empty() {
            return;
        }
        let Some(layout) = self.layout.as_mut() else {
            return;
        };
        recompute(self.bounds, layout.graph_mut());
        self.frame_resize.arm();
    }

    /// Run deferred work. Returns true when frames were resized.
    pub fn on_tick(&mut self) -> bool {
        if !self.frame_resize.take() {
            return false;
        }
        let Some(layout) = self.layout.as_ref() else {
            return false;
        };
        for (node, frame) in layout.graph().frames().zip(self.frames.iter_mut()) {
            if !frame.is_visible() {
                continue;
            }
            if let Some(flex) = layout.graph().get(node) {
                frame.apply_rect(flex.rect);
            }
        }
        true
    }

    /// Move the frame at `from` to `to`, shifting the frames between.
    ///
    /// Only the frame-to-slot binding changes; the graph keeps its shares.
    pub fn reorder_frames(&mut self, from: usize, to: usize) -> Result<(), ContainerError> {
        let len = self.frames.len();
        for index in [from, to] {
            if index >= len {
                return Err(ContainerError::IndexOutOfRange { index, len });
            }
        }
        if from == to {
            return Ok(());
        }
        let frame = self.frames.remove(from);
        self.frames.insert(to, frame);
        self.sync_frame_visibility();
        self.frame_resize.arm();
        tracing::debug!(container = %self.id, from, to, "frames reordered");
        Ok(())
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.sync_frame_visibility();
        self.resize(None);
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.sync_frame_visibility();
    }

    fn sync_frame_visibility(&mut self) {
        let shown = if self.visible {
            self.displayed_frame_count()
        } else {
            0
        };
        for (index, frame) in self.frames.iter_mut().enumerate() {
            if index < shown {
                frame.show();
            } else {
                frame.hide();
            }
        }
    }

    // ------------------------------------------------------------------
    // Separator drags
    // ------------------------------------------------------------------

    /// `pointerdown` on a separator element.
    pub fn separator_pointer_down(
        &mut self,
        separator: NodeId,
        pointer_id: u32,
    ) -> Result<ListenerCommand, ContainerError> {
        let layout = self.layout.as_ref().ok_or(ContainerError::NoLayout)?;
        Ok(self.drag.begin(layout.graph(), separator, pointer_id)?)
    }

    /// Document `pointermove` while a drag may be active.
    ///
    /// A committed move re-lays the graph and schedules the frame resize.
    pub fn separator_pointer_move(
        &mut self,
        pointer_id: u32,
        pointer: PointerPosition,
    ) -> Result<Option<DragSplit>, ContainerError> {
        let Some(layout) = self.layout.as_mut() else {
            return Ok(None);
        };
        let config = *layout.config();
        let split = self.drag.drag_move(
            layout.graph_mut(),
            pointer_id,
            pointer,
            self.bounds,
            &config,
        )?;
        if split.is_some() {
            self.frame_resize.arm();
        }
        Ok(split)
    }

    /// Document `pointerup`.
    pub fn separator_pointer_up(&mut self, pointer_id: u32) -> Option<ListenerCommand> {
        self.drag.end(pointer_id)
    }

    /// Abort any drag (pointer cancel, window blur, teardown).
    pub fn cancel_drag(&mut self) -> Option<ListenerCommand> {
        self.drag.cancel()
    }
}

fn display_list(layout: &Layout) -> Vec<DisplaySlot> {
    let mut slot = 0;
    layout
        .graph()
        .iter()
        .map(|(node, flex)| match flex.kind {
            NodeKind::Frame => {
                let entry = DisplaySlot::Frame { node, slot };
                slot += 1;
                entry
            }
            NodeKind::Separator(orientation) => DisplaySlot::Separator { node, orientation },
        })
        .collect()
}
