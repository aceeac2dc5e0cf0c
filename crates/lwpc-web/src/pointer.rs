#![forbid(unsafe_code)]

//! Host-driven pointer adapter for separator drags.
//!
//! The browser reports `pointerdown` on a separator element, then `pointermove`
//! and `pointerup` on the document. This adapter turns those signals into
//! [`Container`] drag calls while enforcing:
//! - one active pointer at a time,
//! - explicit attach/detach commands for the document-level listeners, and
//! - cancellation on interruption paths (pointer cancel, blur, teardown).
//!
//! Listener balance is tracked here and not delegated to the container: if
//! the container dropped its drag on its own (for example because the layout
//! was switched mid-drag), the adapter still emits the detach for the
//! listeners it asked the host to attach.

use lwpc_core::event::{PointerButton, PointerPosition};
use lwpc_layout::{DragSplit, ListenerCommand, NodeId};
use lwpc_runtime::{Container, ContainerError};

/// Adapter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparatorPointerConfig {
    /// Button required to begin a drag.
    pub activation_button: PointerButton,
}

impl Default for SeparatorPointerConfig {
    fn default() -> Self {
        Self {
            activation_button: PointerButton::Primary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    pointer_id: u32,
    separator: NodeId,
    button: PointerButton,
}

/// Host command for the document-level `pointermove`/`pointerup` listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomCommand {
    AttachDocumentListeners { separator: NodeId, pointer_id: u32 },
    DetachDocumentListeners { separator: NodeId, pointer_id: u32 },
}

impl From<ListenerCommand> for DomCommand {
    fn from(command: ListenerCommand) -> Self {
        match command {
            ListenerCommand::Attach {
                separator,
                pointer_id,
            } => Self::AttachDocumentListeners {
                separator,
                pointer_id,
            },
            ListenerCommand::Detach {
                separator,
                pointer_id,
            } => Self::DetachDocumentListeners {
                separator,
                pointer_id,
            },
        }
    }
}

/// Lifecycle phase recorded for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    Blur,
    Teardown,
}

/// Why an incoming lifecycle signal was ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoredReason {
    InvalidPointerId,
    ButtonNotAllowed,
    ButtonMismatch,
    ActivePointerAlreadyInProgress,
    NoActivePointer,
    PointerMismatch,
    ContainerRejected(ContainerError),
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerLogOutcome {
    /// The signal reached the container.
    Forwarded,
    Ignored(IgnoredReason),
}

/// Structured log record for one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerLogEntry {
    pub phase: PointerPhase,
    pub sequence: Option<u64>,
    pub pointer_id: Option<u32>,
    pub separator: Option<NodeId>,
    pub position: Option<PointerPosition>,
    pub dom_command: Option<DomCommand>,
    pub outcome: PointerLogOutcome,
}

/// Result of one pointer lifecycle dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerDispatch {
    pub dom_command: Option<DomCommand>,
    /// Split committed by a move, if any.
    pub split: Option<DragSplit>,
    pub log: PointerLogEntry,
}

impl PointerDispatch {
    fn ignored(
        phase: PointerPhase,
        reason: IgnoredReason,
        pointer_id: Option<u32>,
        separator: Option<NodeId>,
        position: Option<PointerPosition>,
    ) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(?phase, ?reason, ?pointer_id, "separator pointer signal ignored");
        Self {
            dom_command: None,
            split: None,
            log: PointerLogEntry {
                phase,
                sequence: None,
                pointer_id,
                separator,
                position,
                dom_command: None,
                outcome: PointerLogOutcome::Ignored(reason),
            },
        }
    }

    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self.log.outcome, PointerLogOutcome::Ignored(_))
    }
}

/// Pointer adapter for one container's separators.
#[derive(Debug, Clone)]
pub struct SeparatorPointerAdapter {
    config: SeparatorPointerConfig,
    active: Option<ActiveDrag>,
    next_sequence: u64,
}

impl Default for SeparatorPointerAdapter {
    fn default() -> Self {
        Self::new(SeparatorPointerConfig::default())
    }
}

impl SeparatorPointerAdapter {
    #[must_use]
    pub const fn new(config: SeparatorPointerConfig) -> Self {
        Self {
            config,
            active: None,
            next_sequence: 1,
        }
    }

    #[must_use]
    pub const fn config(&self) -> SeparatorPointerConfig {
        self.config
    }

    /// Pointer currently driving a drag.
    #[must_use]
    pub fn active_pointer_id(&self) -> Option<u32> {
        self.active.map(|active| active.pointer_id)
    }

    /// Separator currently being dragged.
    #[must_use]
    pub fn active_separator(&self) -> Option<NodeId> {
        self.active.map(|active| active.separator)
    }

    /// Handle `pointerdown` on a separator element.
    pub fn pointer_down(
        &mut self,
        container: &mut Container,
        separator: NodeId,
        pointer_id: u32,
        button: PointerButton,
        position: PointerPosition,
    ) -> PointerDispatch {
        let phase = PointerPhase::PointerDown;
        if pointer_id == 0 {
            return PointerDispatch::ignored(
                phase,
                IgnoredReason::InvalidPointerId,
                Some(pointer_id),
                Some(separator),
                Some(position),
            );
        }
        if button != self.config.activation_button {
            return PointerDispatch::ignored(
                phase,
                IgnoredReason::ButtonNotAllowed,
                Some(pointer_id),
                Some(separator),
                Some(position),
            );
        }
        if self.active.is_some() {
            return PointerDispatch::ignored(
                phase,
                IgnoredReason::ActivePointerAlreadyInProgress,
                Some(pointer_id),
                Some(separator),
                Some(position),
            );
        }

        match container.separator_pointer_down(separator, pointer_id) {
            Ok(command) => {
                self.active = Some(ActiveDrag {
                    pointer_id,
                    separator,
                    button,
                });
                self.forwarded(
                    phase,
                    pointer_id,
                    separator,
                    Some(position),
                    Some(command.into()),
                    None,
                )
            }
            Err(error) => PointerDispatch::ignored(
                phase,
                IgnoredReason::ContainerRejected(error),
                Some(pointer_id),
                Some(separator),
                Some(position),
            ),
        }
    }

    /// Handle a document `pointermove`.
    pub fn pointer_move(
        &mut self,
        container: &mut Container,
        pointer_id: u32,
        position: PointerPosition,
    ) -> PointerDispatch {
        let phase = PointerPhase::PointerMove;
        let active = match self.active_for(phase, Some(pointer_id), Some(position)) {
            Ok(active) => active,
            Err(dispatch) => return dispatch,
        };
        match container.separator_pointer_move(pointer_id, position) {
            Ok(split) => self.forwarded(
                phase,
                pointer_id,
                active.separator,
                Some(position),
                None,
                split,
            ),
            Err(error) => PointerDispatch::ignored(
                phase,
                IgnoredReason::ContainerRejected(error),
                Some(pointer_id),
                Some(active.separator),
                Some(position),
            ),
        }
    }

    /// Handle a document `pointerup`.
    pub fn pointer_up(
        &mut self,
        container: &mut Container,
        pointer_id: u32,
        button: PointerButton,
        position: PointerPosition,
    ) -> PointerDispatch {
        let phase = PointerPhase::PointerUp;
        let active = match self.active_for(phase, Some(pointer_id), Some(position)) {
            Ok(active) => active,
            Err(dispatch) => return dispatch,
        };
        if button != active.button {
            return PointerDispatch::ignored(
                phase,
                IgnoredReason::ButtonMismatch,
                Some(pointer_id),
                Some(active.separator),
                Some(position),
            );
        }
        // The container may already be idle if its layout changed mid-drag.
        let _ = container.separator_pointer_up(pointer_id);
        self.release(phase, active, Some(position))
    }

    /// Handle `pointercancel`. `None` cancels whatever pointer is active.
    pub fn pointer_cancel(
        &mut self,
        container: &mut Container,
        pointer_id: Option<u32>,
    ) -> PointerDispatch {
        self.cancel_active(container, PointerPhase::PointerCancel, pointer_id)
    }

    /// Handle window blur.
    pub fn blur(&mut self, container: &mut Container) -> PointerDispatch {
        self.cancel_active(container, PointerPhase::Blur, None)
    }

    /// Release everything before the container's element is removed.
    pub fn teardown(&mut self, container: &mut Container) -> PointerDispatch {
        self.cancel_active(container, PointerPhase::Teardown, None)
    }

    fn cancel_active(
        &mut self,
        container: &mut Container,
        phase: PointerPhase,
        pointer_id: Option<u32>,
    ) -> PointerDispatch {
        let active = match self.active_for(phase, pointer_id, None) {
            Ok(active) => active,
            Err(dispatch) => return dispatch,
        };
        let _ = container.cancel_drag();
        self.release(phase, active, None)
    }

    /// Resolve the active drag for a follow-up signal.
    ///
    /// `pointer_id == None` matches any active pointer.
    fn active_for(
        &self,
        phase: PointerPhase,
        pointer_id: Option<u32>,
        position: Option<PointerPosition>,
    ) -> Result<ActiveDrag, PointerDispatch> {
        let Some(active) = self.active else {
            return Err(PointerDispatch::ignored(
                phase,
                IgnoredReason::NoActivePointer,
                pointer_id,
                None,
                position,
            ));
        };
        if let Some(id) = pointer_id
            && id != active.pointer_id
        {
            return Err(PointerDispatch::ignored(
                phase,
                IgnoredReason::PointerMismatch,
                Some(id),
                Some(active.separator),
                position,
            ));
        }
        Ok(active)
    }

    fn release(
        &mut self,
        phase: PointerPhase,
        active: ActiveDrag,
        position: Option<PointerPosition>,
    ) -> PointerDispatch {
        self.active = None;
        let command = DomCommand::DetachDocumentListeners {
            separator: active.separator,
            pointer_id: active.pointer_id,
        };
        self.forwarded(
            phase,
            active.pointer_id,
            active.separator,
            position,
            Some(command),
            None,
        )
    }

    fn forwarded(
        &mut self,
        phase: PointerPhase,
        pointer_id: u32,
        separator: NodeId,
        position: Option<PointerPosition>,
        dom_command: Option<DomCommand>,
        split: Option<DragSplit>,
    ) -> PointerDispatch {
        let sequence = self.next_sequence();
        PointerDispatch {
            dom_command,
            split,
            log: PointerLogEntry {
                phase,
                sequence: Some(sequence),
                pointer_id: Some(pointer_id),
                separator: Some(separator),
                position,
                dom_command,
                outcome: PointerLogOutcome::Forwarded,
            },
        }
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        sequence
    }
}
