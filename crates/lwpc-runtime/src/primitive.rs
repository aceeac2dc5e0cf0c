//! Chart primitives and their event subscriptions.
//!
//! A primitive (trend line, marker, drawing) declares which chart events it
//! reacts to as [`Capabilities`]. The [`PrimitiveRegistry`] subscribes it to
//! exactly those events when it is attached, provided it is tangible, and
//! drops the subscriptions when it is detached.

use std::fmt;

use bitflags::bitflags;
use lwpc_core::PointerPosition;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::chart::ChartHandle;

bitflags! {
    /// Chart events a primitive can subscribe to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        const CLICK          = 1 << 0;
        const DOUBLE_CLICK   = 1 << 1;
        const MOUSE_DOWN     = 1 << 2;
        const MOUSE_UP       = 1 << 3;
        const CROSSHAIR_MOVE = 1 << 4;
        /// Series data changed.
        const DATA_UPDATE    = 1 << 5;
    }
}

/// Display options shared by every primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimitiveOptions {
    pub visible: bool,
    /// Receives pointer and data events. An intangible primitive is drawn
    /// but never subscribed.
    pub tangible: bool,
    /// Included when the price scale autoscales.
    pub autoscale: bool,
}

impl Default for PrimitiveOptions {
    fn default() -> Self {
        Self {
            visible: true,
            tangible: true,
            autoscale: false,
        }
    }
}

/// Partial update for [`PrimitiveOptions`]; `None` keeps the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimitiveOptionsPatch {
    pub visible: Option<bool>,
    pub tangible: Option<bool>,
    pub autoscale: Option<bool>,
}

impl PrimitiveOptions {
    #[must_use]
    pub fn merged(self, patch: PrimitiveOptionsPatch) -> Self {
        Self {
            visible: patch.visible.unwrap_or(self.visible),
            tangible: patch.tangible.unwrap_or(self.tangible),
            autoscale: patch.autoscale.unwrap_or(self.autoscale),
        }
    }
}

/// Where a chart mouse event happened.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseParams {
    /// Bar time under the pointer, if any.
    pub time: Option<i64>,
    pub logical: Option<f64>,
    /// Pointer position relative to the chart pane.
    pub point: Option<PointerPosition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataScope {
    Full,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimitiveEvent {
    Click(MouseParams),
    DoubleClick(MouseParams),
    MouseDown(MouseParams),
    MouseUp(MouseParams),
    CrosshairMove(MouseParams),
    DataUpdate(DataScope),
}

impl PrimitiveEvent {
    /// Capability a primitive needs to receive this event.
    #[must_use]
    pub const fn capability(&self) -> Capabilities {
        match self {
            Self::Click(_) => Capabilities::CLICK,
            Self::DoubleClick(_) => Capabilities::DOUBLE_CLICK,
            Self::MouseDown(_) => Capabilities::MOUSE_DOWN,
            Self::MouseUp(_) => Capabilities::MOUSE_UP,
            Self::CrosshairMove(_) => Capabilities::CROSSHAIR_MOVE,
            Self::DataUpdate(_) => Capabilities::DATA_UPDATE,
        }
    }
}

pub trait Primitive {
    fn id(&self) -> &str;

    /// Type name shown in the object tree, e.g. `"TrendLine"`.
    fn kind(&self) -> &str;

    fn capabilities(&self) -> Capabilities;

    fn options(&self) -> PrimitiveOptions;

    fn apply_options(&mut self, patch: PrimitiveOptionsPatch);

    /// Called only for events covered by the primitive's subscriptions.
    fn handle(&mut self, event: &PrimitiveEvent);

    /// New parameters from the host, in the primitive's own schema.
    fn update_data(&mut self, params: &serde_json::Value);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    DuplicateId(String),
}

impl fmt::Display for PrimitiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "primitive {id:?} is already attached"),
        }
    }
}

impl std::error::Error for PrimitiveError {}

struct Attached {
    primitive: Box<dyn Primitive>,
    listeners: Capabilities,
}

/// Primitives attached to one chart, with their active subscriptions.
///
/// Events are delivered in attach order.
#[derive(Default)]
pub struct PrimitiveRegistry {
    attached: Vec<Attached>,
    index: FxHashMap<String, usize>,
}

impl PrimitiveRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attached.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    fn entry_mut(&mut self, id: &str) -> Option<&mut Attached> {
        let index = *self.index.get(id)?;
        self.attached.get_mut(index)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn Primitive> {
        let index = *self.index.get(id)?;
        self.attached.get(index).map(|a| a.primitive.as_ref())
    }

    /// Events the primitive is subscribed to, if attached.
    #[must_use]
    pub fn listeners(&self, id: &str) -> Option<Capabilities> {
        let index = *self.index.get(id)?;
        self.attached.get(index).map(|a| a.listeners)
    }

    /// Attached primitive ids, oldest first.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.attached.iter().map(|a| a.primitive.id())
    }

    /// Attach to `chart` and subscribe to the declared capabilities.
    ///
    /// Intangible primitives get no subscriptions. Returns the subscribed set.
    pub fn attach(
        &mut self,
        primitive: Box<dyn Primitive>,
        chart: &mut dyn ChartHandle,
    ) -> Result<Capabilities, PrimitiveError> {
        let id = primitive.id().to_owned();
        if self.index.contains_key(&id) {
            return Err(PrimitiveError::DuplicateId(id));
        }
        let listeners = if primitive.options().tangible {
            primitive.capabilities()
        } else {
            Capabilities::empty()
        };
        chart.attach_primitive(&id);
        tracing::debug!(
            primitive = %id,
            kind = primitive.kind(),
            listeners = ?listeners,
            "primitive attached"
        );
        self.index.insert(id, self.attached.len());
        self.attached.push(Attached {
            primitive,
            listeners,
        });
        Ok(listeners)
    }

    /// Drop every subscription and hand the primitive back.
    pub fn detach(&mut self, id: &str, chart: &mut dyn ChartHandle) -> Option<Box<dyn Primitive>> {
        let removed = self.index.remove(id)?;
        let attached = self.attached.remove(removed);
        for index in self.index.values_mut() {
            if *index > removed {
                *index -= 1;
            }
        }
        chart.detach_primitive(id);
        tracing::debug!(primitive = %id, "primitive detached");
        Some(attached.primitive)
    }

    /// Deliver `event` to every subscribed primitive. Returns how many
    /// received it.
    pub fn dispatch(&mut self, event: &PrimitiveEvent) -> usize {
        let needed = event.capability();
        let mut delivered = 0;
        for attached in &mut self.attached {
            if attached.listeners.contains(needed) {
                attached.primitive.handle(event);
                delivered += 1;
            }
        }
        delivered
    }

    /// Forward host parameters to one primitive.
    pub fn update_data(&mut self, id: &str, params: &serde_json::Value) -> bool {
        match self.entry_mut(id) {
            Some(attached) => {
                attached.primitive.update_data(params);
                true
            }
            None => false,
        }
    }

    /// Change display options. Subscriptions are fixed at attach time.
    pub fn apply_options(&mut self, id: &str, patch: PrimitiveOptionsPatch) -> bool {
        match self.entry_mut(id) {
            Some(attached) => {
                attached.primitive.apply_options(patch);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for PrimitiveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for attached in &self.attached {
            map.entry(&attached.primitive.id(), &attached.listeners);
        }
        map.finish()
    }
}
