#![forbid(unsafe_code)]

//! Pointer input primitives shared by the drag controller and DOM adapter.

use serde::{Deserialize, Serialize};

/// Pointer location in client (viewport) coordinates.
///
/// Browsers report fractional positions on high-DPI displays, so these stay
/// `f64` until the drag math converts them into flex shares.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pointer button associated with a press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    /// Map the DOM `MouseEvent.button` index.
    ///
    /// Unknown indices (back/forward buttons) yield `None`.
    #[must_use]
    pub const fn from_dom_index(index: i16) -> Option<Self> {
        match index {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_button_indices() {
        assert_eq!(PointerButton::from_dom_index(0), Some(PointerButton::Primary));
        assert_eq!(PointerButton::from_dom_index(1), Some(PointerButton::Middle));
        assert_eq!(PointerButton::from_dom_index(2), Some(PointerButton::Secondary));
        assert_eq!(PointerButton::from_dom_index(3), None);
    }
}
