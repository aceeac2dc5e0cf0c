//! Bridge to the host process that owns data and persistence.
//!
//! Traffic is fire-and-forget in both directions. User actions that need
//! the host's cooperation leave through [`HostApi`]; the host drives the
//! layout through [`HostCommand`]s decoded from JSON.

use std::fmt;

use lwpc_layout::Topology;
use serde::{Deserialize, Serialize};

use crate::chart::SeriesType;
use crate::favorites::{Interval, Timeframe};
use crate::frame::Symbol;

/// Outbound calls to the host.
///
/// None of these return anything. The host answers, if at all, with later
/// [`HostCommand`]s.
pub trait HostApi {
    /// The user asked for a new container tab.
    fn add_container(&mut self);

    fn remove_container(&mut self, container_id: &str);

    /// The user dragged a container tab from `from` to `to`.
    fn reorder_containers(&mut self, from: usize, to: usize);

    /// The user picked a layout. The host confirms with
    /// [`HostCommand::SetLayout`] after creating any frames it needs.
    fn layout_change(&mut self, container_id: &str, layout: Topology);

    fn series_change(&mut self, container_id: &str, frame_id: &str, series_type: SeriesType);

    /// The user picked a symbol or timeframe for a frame.
    fn data_request(
        &mut self,
        container_id: &str,
        frame_id: &str,
        symbol: &Symbol,
        multiplier: u32,
        period: Interval,
    );

    fn symbol_search(&mut self, query: &SymbolSearch);
}

/// Filters typed into the symbol search dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SymbolSearch {
    pub symbol: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub brokers: Vec<String>,
    #[serde(default)]
    pub exchanges: Vec<String>,
    /// True once the user committed the search rather than typing.
    #[serde(default)]
    pub confirmed: bool,
}

/// Commands the host sends to the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum HostCommand {
    AddContainer {
        container_id: String,
    },
    RemoveContainer {
        container_id: String,
    },
    SetLayout {
        container_id: String,
        layout: Topology,
    },
    AddFrame {
        frame_id: String,
        container_id: String,
    },
    AddPane {
        pane_id: String,
        frame_id: String,
    },
    ReorderFrames {
        container_id: String,
        from: usize,
        to: usize,
    },
    /// Timeframe menu settings, in the shape
    /// [`TimeframeMenu::from_json`](crate::favorites::TimeframeMenu::from_json) reads.
    SetTimeframes {
        settings: serde_json::Value,
    },
    SetLayoutFavorites {
        favorites: Vec<Topology>,
    },
    SetSeriesFavorites {
        favorites: Vec<SeriesType>,
    },
    SetFrameSymbol {
        frame_id: String,
        symbol: Symbol,
    },
    SetFrameTimeframe {
        frame_id: String,
        timeframe: Timeframe,
    },
    SetFrameSeriesType {
        frame_id: String,
        series_type: SeriesType,
    },
}

impl HostCommand {
    pub fn from_json(json: &str) -> Result<Self, HostCommandError> {
        serde_json::from_str(json).map_err(HostCommandError::Json)
    }

    pub fn to_json(&self) -> Result<String, HostCommandError> {
        serde_json::to_string(self).map_err(HostCommandError::Json)
    }

    /// Wire name of the command, for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddContainer { .. } => "add_container",
            Self::RemoveContainer { .. } => "remove_container",
            Self::SetLayout { .. } => "set_layout",
            Self::AddFrame { .. } => "add_frame",
            Self::AddPane { .. } => "add_pane",
            Self::ReorderFrames { .. } => "reorder_frames",
            Self::SetTimeframes { .. } => "set_timeframes",
            Self::SetLayoutFavorites { .. } => "set_layout_favorites",
            Self::SetSeriesFavorites { .. } => "set_series_favorites",
            Self::SetFrameSymbol { .. } => "set_frame_symbol",
            Self::SetFrameTimeframe { .. } => "set_frame_timeframe",
            Self::SetFrameSeriesType { .. } => "set_frame_series_type",
        }
    }
}

/// A host message that could not be decoded.
#[derive(Debug)]
pub enum HostCommandError {
    Json(serde_json::Error),
}

impl fmt::Display for HostCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "malformed host command: {e}"),
        }
    }
}

impl std::error::Error for HostCommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
        }
    }
}
