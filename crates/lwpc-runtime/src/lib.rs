#![forbid(unsafe_code)]

//! Runtime: containers, frames and the host bridge.
//!
//! # Role in lwpc
//! `lwpc-runtime` binds the flex graphs from `lwpc-layout` to chart frames.
//! A [`Window`] owns [`Container`]s (one per tab), each container owns its
//! [`Frame`]s and current [`Layout`](lwpc_layout::Layout), and every frame
//! owns the chart handles of its panes.
//!
//! # Host round trips
//! The host process owns data, symbols and persistence. User actions that
//! need it (switching layout, series type or timeframe) go out through
//! [`HostApi`] and the host answers with [`HostCommand`]s that
//! [`Window::dispatch`] applies. Nothing blocks on the host.
//!
//! # Scheduling
//! The runtime never spawns timers. The embedding event loop feeds window
//! resizes to [`Window::on_window_resize`] and calls [`Window::poll`] each
//! frame; chart resizes run one tick after the layout pass that caused them.

pub mod chart;
pub mod container;
pub mod favorites;
pub mod frame;
pub mod host;
#[cfg(feature = "logging")]
pub mod logging;
pub mod primitive;
pub mod schedule;
pub mod window;

pub use chart::{ChartFactory, ChartHandle, ChartOptions, SeriesId, SeriesType, UnknownSeriesType};
pub use container::{Container, ContainerError, DisplaySlot};
pub use favorites::{
    Favorites, Interval, LayoutMenu, Menu, MenuItem, SeriesMenu, Timeframe, TimeframeMenu,
    TimeframeParseError,
};
pub use frame::{Frame, Pane, Symbol};
pub use host::{HostApi, HostCommand, HostCommandError, SymbolSearch};
pub use primitive::{
    Capabilities, DataScope, MouseParams, Primitive, PrimitiveError, PrimitiveEvent,
    PrimitiveOptions, PrimitiveOptionsPatch, PrimitiveRegistry,
};
pub use schedule::{DeferredTick, TrailingDebounce, WINDOW_RESIZE_DEBOUNCE};
pub use window::{ActiveSelection, Window, WindowError};
