//! Window-level orchestration.
//!
//! [`Window`] owns every container, the chart factory, the host handle and
//! the active selection. Host commands come in through
//! [`Window::dispatch`]; user actions that need the host go out through the
//! [`HostApi`] and come back, if accepted, as commands.

use std::fmt;

use lwpc_core::Rect;
use lwpc_layout::{LayoutConfig, Topology};
use web_time::Instant;

use crate::chart::{ChartFactory, SeriesType};
use crate::container::{Container, ContainerError};
use crate::favorites::{
    DEFAULT_LAYOUT_MENU, DEFAULT_SERIES_MENU, DEFAULT_TIMEFRAME_MENU, LayoutMenu, Menu,
    SeriesMenu, Timeframe, TimeframeMenu,
};
use crate::frame::Frame;
use crate::host::{HostApi, HostCommand, SymbolSearch};
use crate::schedule::TrailingDebounce;

/// The container and frame user actions apply to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSelection {
    container: Option<String>,
    frame: Option<String>,
}

impl ActiveSelection {
    /// Replace the selection. Returns true when it changed.
    pub fn select(&mut self, container: Option<String>, frame: Option<String>) -> bool {
        let next = Self { container, frame };
        if *self == next {
            return false;
        }
        *self = next;
        true
    }

    /// `(container id, frame id)`.
    #[must_use]
    pub fn active(&self) -> (Option<&str>, Option<&str>) {
        (self.container.as_deref(), self.frame.as_deref())
    }

    #[must_use]
    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    #[must_use]
    pub fn frame(&self) -> Option<&str> {
        self.frame.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    UnknownContainer(String),
    DuplicateContainer(String),
    UnknownFrame(String),
    IndexOutOfRange {
        index: usize,
        len: usize,
    },
    Container {
        container_id: String,
        source: ContainerError,
    },
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownContainer(id) => write!(f, "no container with id {id:?}"),
            Self::DuplicateContainer(id) => write!(f, "container {id:?} already exists"),
            Self::UnknownFrame(id) => write!(f, "no frame with id {id:?}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "container index {index} out of range for {len} containers")
            }
            Self::Container {
                container_id,
                source,
            } => write!(f, "container {container_id:?}: {source}"),
        }
    }
}

impl std::error::Error for WindowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Container { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub struct Window<F, H> {
    containers: Vec<Container>,
    factory: F,
    host: H,
    config: LayoutConfig,
    selection: ActiveSelection,
    timeframe_menu: TimeframeMenu,
    layout_menu: LayoutMenu,
    series_menu: SeriesMenu,
    resize_debounce: TrailingDebounce,
    viewport: Rect,
}

impl<F: ChartFactory, H: HostApi> Window<F, H> {
    pub fn new(factory: F, host: H, config: LayoutConfig) -> Self {
        Self {
            containers: Vec::new(),
            factory,
            host,
            config,
            selection: ActiveSelection::default(),
            timeframe_menu: TimeframeMenu::from_json(DEFAULT_TIMEFRAME_MENU),
            layout_menu: LayoutMenu::from_json(DEFAULT_LAYOUT_MENU),
            series_menu: SeriesMenu::from_json(DEFAULT_SERIES_MENU),
            resize_debounce: TrailingDebounce::default(),
            viewport: Rect::default(),
        }
    }

    #[must_use]
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    #[must_use]
    pub fn container(&self, id: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.id() == id)
    }

    pub fn container_mut(&mut self, id: &str) -> Option<&mut Container> {
        self.containers.iter_mut().find(|c| c.id() == id)
    }

    #[must_use]
    pub const fn selection(&self) -> &ActiveSelection {
        &self.selection
    }

    #[must_use]
    pub fn active_container(&self) -> Option<&Container> {
        self.selection.container().and_then(|id| self.container(id))
    }

    #[must_use]
    pub fn active_frame(&self) -> Option<&Frame> {
        let (container, frame) = self.selection.active();
        self.container(container?)?.frame(frame?)
    }

    #[must_use]
    pub const fn timeframe_menu(&self) -> &TimeframeMenu {
        &self.timeframe_menu
    }

    #[must_use]
    pub const fn layout_menu(&self) -> &LayoutMenu {
        &self.layout_menu
    }

    #[must_use]
    pub const fn series_menu(&self) -> &SeriesMenu {
        &self.series_menu
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub const fn factory(&self) -> &F {
        &self.factory
    }

    /// Rect containers are laid out in.
    #[must_use]
    pub const fn viewport(&self) -> Rect {
        self.viewport
    }

    // ------------------------------------------------------------------
    // Host commands
    // ------------------------------------------------------------------

    pub fn dispatch(&mut self, command: HostCommand) -> Result<(), WindowError> {
        tracing::debug!(command = command.name(), "host command");
        match command {
            HostCommand::AddContainer { container_id } => self.add_container(container_id),
            HostCommand::RemoveContainer { container_id } => self.remove_container(&container_id),
            HostCommand::SetLayout {
                container_id,
                layout,
            } => self.set_layout(&container_id, layout),
            HostCommand::AddFrame {
                frame_id,
                container_id,
            } => {
                let container = self
                    .containers
                    .iter_mut()
                    .find(|c| c.id() == container_id)
                    .ok_or_else(|| WindowError::UnknownContainer(container_id.clone()))?;
                let adopts_placeholder = container.frames().iter().any(Frame::is_placeholder);
                let frame_id = container.add_frame(frame_id, &mut self.factory).id().to_owned();

                // A selected placeholder is the first one, which is the one just claimed.
                if adopts_placeholder
                    && self.selection.active() == (Some(container_id.as_str()), Some(""))
                {
                    self.selection.select(Some(container_id), Some(frame_id));
                }
                Ok(())
            }
            HostCommand::AddPane { pane_id, frame_id } => {
                let frame = find_frame_mut(&mut self.containers, &frame_id)?;
                frame.add_pane(Some(pane_id), &mut self.factory);
                Ok(())
            }
            HostCommand::ReorderFrames {
                container_id,
                from,
                to,
            } => {
                let container = self
                    .container_mut(&container_id)
                    .ok_or_else(|| WindowError::UnknownContainer(container_id.clone()))?;
                container
                    .reorder_frames(from, to)
                    .map_err(|source| WindowError::Container {
                        container_id,
                        source,
                    })
            }
            HostCommand::SetTimeframes { settings } => {
                self.timeframe_menu = TimeframeMenu::from_json(&settings.to_string());
                Ok(())
            }
            HostCommand::SetLayoutFavorites { favorites } => {
                apply_favorites(&mut self.layout_menu, &favorites);
                Ok(())
            }
            HostCommand::SetSeriesFavorites { favorites } => {
                apply_favorites(&mut self.series_menu, &favorites);
                Ok(())
            }
            HostCommand::SetFrameSymbol { frame_id, symbol } => {
                find_frame_mut(&mut self.containers, &frame_id)?.set_symbol(symbol);
                Ok(())
            }
            HostCommand::SetFrameTimeframe {
                frame_id,
                timeframe,
            } => {
                find_frame_mut(&mut self.containers, &frame_id)?.set_timeframe(timeframe);
                Ok(())
            }
            HostCommand::SetFrameSeriesType {
                frame_id,
                series_type,
            } => {
                find_frame_mut(&mut self.containers, &frame_id)?.change_series_type(series_type);
                Ok(())
            }
        }
    }

    /// Decode and dispatch one JSON host message.
    ///
    /// Undecodable messages are logged and dropped.
    pub fn dispatch_json(&mut self, json: &str) -> Result<(), WindowError> {
        match HostCommand::from_json(json) {
            Ok(command) => self.dispatch(command),
            Err(error) => {
                tracing::warn!(%error, "dropping host message");
                Ok(())
            }
        }
    }

    fn add_container(&mut self, container_id: String) -> Result<(), WindowError> {
        if self.container(&container_id).is_some() {
            return Err(WindowError::DuplicateContainer(container_id));
        }
        let mut container = Container::new(container_id.clone(), self.config);
        container.resize(Some(self.viewport));
        self.containers.push(container);
        self.select_container(&container_id)
    }

    fn remove_container(&mut self, container_id: &str) -> Result<(), WindowError> {
        let index = self
            .containers
            .iter()
            .position(|c| c.id() == container_id)
            .ok_or_else(|| WindowError::UnknownContainer(container_id.to_owned()))?;
        let mut removed = self.containers.remove(index);
        removed.cancel_drag();
        removed.hide();

        if self.selection.container() == Some(container_id) {
            let fallback = self
                .containers
                .get(index.saturating_sub(1))
                .map(|c| c.id().to_owned());
            match fallback {
                Some(id) => self.select_container(&id)?,
                None => {
                    self.selection.select(None, None);
                }
            }
        }
        Ok(())
    }

    fn set_layout(&mut self, container_id: &str, layout: Topology) -> Result<(), WindowError> {
        let container = self
            .containers
            .iter_mut()
            .find(|c| c.id() == container_id)
            .ok_or_else(|| WindowError::UnknownContainer(container_id.to_owned()))?;
        container
            .set_layout_with(layout, &mut self.factory)
            .map_err(|source| WindowError::Container {
                container_id: container_id.to_owned(),
                source,
            })?;

        if self.selection.container() == Some(container_id) {
            let still_shown = self.selection.frame().is_some_and(|frame| {
                (0..container.displayed_frame_count())
                    .filter_map(|slot| container.frame_in_slot(slot))
                    .any(|f| f.id() == frame)
            });
            if !still_shown {
                let first = container.frames().first().map(|f| f.id().to_owned());
                self.selection
                    .select(Some(container_id.to_owned()), first);
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Make a container the visible tab; its first frame becomes active.
    pub fn select_container(&mut self, container_id: &str) -> Result<(), WindowError> {
        if self.container(container_id).is_none() {
            return Err(WindowError::UnknownContainer(container_id.to_owned()));
        }
        let viewport = self.viewport;
        let mut first_frame = None;
        for container in &mut self.containers {
            if container.id() == container_id {
                container.show();
                container.resize(Some(viewport));
                first_frame = container.frames().first().map(|f| f.id().to_owned());
            } else if container.is_visible() {
                container.cancel_drag();
                container.hide();
            }
        }
        if self
            .selection
            .select(Some(container_id.to_owned()), first_frame)
        {
            tracing::debug!(container = container_id, "active container changed");
        }
        Ok(())
    }

    /// Make a frame active, switching to its container if needed.
    pub fn select_frame(&mut self, frame_id: &str) -> Result<(), WindowError> {
        let container_id = self
            .containers
            .iter()
            .find(|c| c.frame(frame_id).is_some())
            .map(|c| c.id().to_owned())
            .ok_or_else(|| WindowError::UnknownFrame(frame_id.to_owned()))?;
        if self.selection.container() != Some(container_id.as_str()) {
            self.select_container(&container_id)?;
        }
        self.selection
            .select(Some(container_id), Some(frame_id.to_owned()));
        Ok(())
    }

    // ------------------------------------------------------------------
    // User actions
    // ------------------------------------------------------------------

    /// Ask the host to switch the active container's layout.
    ///
    /// Returns false (and logs) when no container is active.
    pub fn select_layout(&mut self, layout: Topology) -> bool {
        let Some(container_id) = self.selection.container() else {
            tracing::warn!(%layout, "cannot set layout, no active container");
            return false;
        };
        self.host.layout_change(container_id, layout);
        true
    }

    /// Ask the host to change the active frame's series type.
    pub fn select_series_type(&mut self, series_type: SeriesType) -> bool {
        let (Some(container_id), Some(frame_id)) = self.selection.active() else {
            tracing::warn!(%series_type, "cannot set series type, no active frame");
            return false;
        };
        self.host.series_change(container_id, frame_id, series_type);
        true
    }

    /// Ask the host for the active frame's symbol at another timeframe.
    pub fn select_timeframe(&mut self, timeframe: Timeframe) -> bool {
        let Some(frame) = self.active_frame() else {
            tracing::warn!(%timeframe, "cannot set timeframe, no active frame");
            return false;
        };
        let symbol = frame.symbol().cloned().unwrap_or_default();
        let (Some(container_id), Some(frame_id)) = self.selection.active() else {
            return false;
        };
        self.host.data_request(
            container_id,
            frame_id,
            &symbol,
            timeframe.multiplier,
            timeframe.period,
        );
        true
    }

    pub fn search_symbol(&mut self, query: &SymbolSearch) {
        self.host.symbol_search(query);
    }

    /// Star or unstar a timeframe in the menu.
    pub fn toggle_timeframe_favorite(&mut self, timeframe: Timeframe, favorite: bool) -> bool {
        self.timeframe_menu.set_favorite(&timeframe, favorite)
    }

    pub fn request_container(&mut self) {
        self.host.add_container();
    }

    /// Ask the host to close a container. The host answers with
    /// [`HostCommand::RemoveContainer`].
    pub fn close_container(&mut self, container_id: &str) -> Result<(), WindowError> {
        if self.container(container_id).is_none() {
            return Err(WindowError::UnknownContainer(container_id.to_owned()));
        }
        self.host.remove_container(container_id);
        Ok(())
    }

    /// Move a container tab, then tell the host.
    pub fn reorder_containers(&mut self, from: usize, to: usize) -> Result<(), WindowError> {
        let len = self.containers.len();
        for index in [from, to] {
            if index >= len {
                return Err(WindowError::IndexOutOfRange { index, len });
            }
        }
        let container = self.containers.remove(from);
        self.containers.insert(to, container);
        self.host.reorder_containers(from, to);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Event loop
    // ------------------------------------------------------------------

    /// Record a window resize; the layout pass runs once resizes settle.
    pub fn on_window_resize(&mut self, viewport: Rect, now: Instant) {
        self.viewport = viewport;
        self.resize_debounce.poke(now);
    }

    /// Run due work: a settled window resize, then deferred frame resizes.
    ///
    /// Returns true when any chart was resized.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.resize_debounce.poll(now) {
            let viewport = self.viewport;
            if let Some(container) = self
                .selection
                .container()
                .and_then(|id| self.containers.iter_mut().find(|c| c.id() == id))
            {
                container.resize(Some(viewport));
            }
        }
        let mut resized = false;
        for container in &mut self.containers {
            resized |= container.on_tick();
        }
        resized
    }
}

impl<F, H> fmt::Debug for Window<F, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("containers", &self.containers)
            .field("selection", &self.selection)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

fn find_frame_mut<'a>(
    containers: &'a mut [Container],
    frame_id: &str,
) -> Result<&'a mut Frame, WindowError> {
    containers
        .iter_mut()
        .find_map(|c| c.frame_mut(frame_id))
        .ok_or_else(|| WindowError::UnknownFrame(frame_id.to_owned()))
}

/// Star exactly the menu entries listed in `favorites`.
fn apply_favorites<T: Ord + Clone>(menu: &mut Menu<T>, favorites: &[T]) {
    let entries: Vec<T> = menu.entries().cloned().collect();
    for entry in entries {
        let favorite = favorites.contains(&entry);
        menu.set_favorite(&entry, favorite);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::Interval;
    use crate::frame::Symbol;
    use crate::frame::test_support::RecordingFactory;
    use crate::host::test_support::{HostCall, RecordingHost};
    use web_time::Duration;

    type TestWindow = Window<RecordingFactory, RecordingHost>;

    fn window() -> (TestWindow, RecordingFactory, RecordingHost) {
        let factory = RecordingFactory::default();
        let host = RecordingHost::default();
        let mut window = Window::new(factory.clone(), host.clone(), LayoutConfig::default());
        window.on_window_resize(Rect::from_size(1200, 800), Instant::now());
        (window, factory, host)
    }

    fn add_container(window: &mut TestWindow, id: &str, frames: usize) {
        window
            .dispatch(HostCommand::AddContainer {
                container_id: id.into(),
            })
            .unwrap();
        for i in 0..frames {
            window
                .dispatch(HostCommand::AddFrame {
                    frame_id: format!("{id}_f{i}"),
                    container_id: id.into(),
                })
                .unwrap();
        }
        window
            .dispatch(HostCommand::SetLayout {
                container_id: id.into(),
                layout: Topology::Single,
            })
            .unwrap();
    }

    #[test]
    fn adding_a_container_selects_it() {
        let (mut window, _, _) = window();
        add_container(&mut window, "c1", 1);
        add_container(&mut window, "c2", 1);
        assert_eq!(window.selection().container(), Some("c2"));
        assert!(!window.container("c1").unwrap().is_visible());
        assert!(window.container("c2").unwrap().is_visible());
        assert_eq!(
            window.dispatch(HostCommand::AddContainer {
                container_id: "c1".into()
            }),
            Err(WindowError::DuplicateContainer("c1".into()))
        );
    }

    #[test]
    fn selecting_a_container_activates_its_first_frame() {
        let (mut window, _, _) = window();
        add_container(&mut window, "c1", 1);
        window.select_container("c1").unwrap();
        assert_eq!(window.selection().active(), (Some("c1"), Some("c1_f0")));
    }

    #[test]
    fn layout_selection_is_a_host_round_trip() {
        let (mut window, _, host) = window();
        assert!(!window.select_layout(Topology::QuadSqV));

        add_container(&mut window, "c1", 1);
        assert!(window.select_layout(Topology::TripleVert));
        assert_eq!(
            host.calls(),
            vec![HostCall::LayoutChange("c1".into(), Topology::TripleVert)]
        );
        assert_eq!(window.container("c1").unwrap().topology(), Some(Topology::Single));

        window
            .dispatch(HostCommand::SetLayout {
                container_id: "c1".into(),
                layout: Topology::TripleVert,
            })
            .unwrap();
        let container = window.container("c1").unwrap();
        assert_eq!(container.topology(), Some(Topology::TripleVert));
        assert_eq!(container.frames().len(), 3);
    }

    #[test]
    fn frames_claimed_after_the_layout_take_over_the_selection() {
        let (mut window, _, host) = window();
        window
            .dispatch(HostCommand::AddContainer {
                container_id: "c1".into(),
            })
            .unwrap();
        window
            .dispatch(HostCommand::SetLayout {
                container_id: "c1".into(),
                layout: Topology::DoubleVert,
            })
            .unwrap();
        assert_eq!(window.selection().active(), (Some("c1"), Some("")));

        for id in ["c1_f1", "c1_f2"] {
            window
                .dispatch(HostCommand::AddFrame {
                    frame_id: id.into(),
                    container_id: "c1".into(),
                })
                .unwrap();
        }
        assert_eq!(window.selection().active(), (Some("c1"), Some("c1_f1")));
        assert_eq!(window.active_frame().map(Frame::id), Some("c1_f1"));

        assert!(window.select_series_type(SeriesType::Line));
        assert_eq!(
            host.calls(),
            vec![HostCall::SeriesChange("c1".into(), "c1_f1".into(), SeriesType::Line)]
        );
    }

    #[test]
    fn claiming_a_frame_keeps_an_explicit_selection() {
        let (mut window, _, _) = window();
        add_container(&mut window, "c1", 1);
        window
            .dispatch(HostCommand::SetLayout {
                container_id: "c1".into(),
                layout: Topology::DoubleVert,
            })
            .unwrap();
        assert_eq!(window.selection().active(), (Some("c1"), Some("c1_f0")));

        window
            .dispatch(HostCommand::AddFrame {
                frame_id: "c1_f1".into(),
                container_id: "c1".into(),
            })
            .unwrap();
        assert_eq!(window.selection().active(), (Some("c1"), Some("c1_f0")));
    }

    #[test]
    fn series_and_timeframe_need_an_active_frame() {
        let (mut window, _, host) = window();
        assert!(!window.select_series_type(SeriesType::Line));
        assert!(!window.select_timeframe(Timeframe::new(5, Interval::Minute)));
        assert!(host.calls().is_empty());

        add_container(&mut window, "c1", 1);
        window
            .dispatch(HostCommand::SetFrameSymbol {
                frame_id: "c1_f0".into(),
                symbol: Symbol::new("AAPL"),
            })
            .unwrap();
        assert!(window.select_series_type(SeriesType::Line));
        assert!(window.select_timeframe(Timeframe::new(5, Interval::Minute)));
        assert_eq!(
            host.calls(),
            vec![
                HostCall::SeriesChange("c1".into(), "c1_f0".into(), SeriesType::Line),
                HostCall::DataRequest(
                    "c1".into(),
                    "c1_f0".into(),
                    "AAPL".into(),
                    5,
                    Interval::Minute
                ),
            ]
        );
    }

    #[test]
    fn frame_commands_reach_frames_in_any_container() {
        let (mut window, _, _) = window();
        add_container(&mut window, "c1", 1);
        add_container(&mut window, "c2", 1);
        window
            .dispatch(HostCommand::SetFrameSeriesType {
                frame_id: "c1_f0".into(),
                series_type: SeriesType::Area,
            })
            .unwrap();
        window
            .dispatch(HostCommand::SetFrameTimeframe {
                frame_id: "c2_f0".into(),
                timeframe: Timeframe::new(1, Interval::Day),
            })
            .unwrap();
        let c1 = window.container("c1").unwrap();
        assert_eq!(c1.frames()[0].series_type(), SeriesType::Area);
        let c2 = window.container("c2").unwrap();
        assert_eq!(
            c2.frames()[0].timeframe(),
            Some(Timeframe::new(1, Interval::Day))
        );
        assert_eq!(
            window.dispatch(HostCommand::SetFrameSymbol {
                frame_id: "nope".into(),
                symbol: Symbol::new("X"),
            }),
            Err(WindowError::UnknownFrame("nope".into()))
        );
    }

    #[test]
    fn reorder_containers_splices_then_notifies() {
        let (mut window, _, host) = window();
        for id in ["a", "b", "c"] {
            add_container(&mut window, id, 1);
        }
        window.reorder_containers(0, 2).unwrap();
        let order: Vec<_> = window.containers().iter().map(Container::id).collect();
        assert_eq!(order, ["b", "c", "a"]);
        assert_eq!(host.calls(), vec![HostCall::ReorderContainers(0, 2)]);
        assert_eq!(
            window.reorder_containers(3, 0),
            Err(WindowError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn removing_the_active_container_selects_a_neighbor() {
        let (mut window, _, host) = window();
        add_container(&mut window, "a", 1);
        add_container(&mut window, "b", 1);
        window.close_container("b").unwrap();
        assert_eq!(host.calls(), vec![HostCall::RemoveContainer("b".into())]);
        assert!(window.container("b").is_some());

        window
            .dispatch(HostCommand::RemoveContainer {
                container_id: "b".into(),
            })
            .unwrap();
        assert_eq!(window.selection().active(), (Some("a"), Some("a_f0")));

        window
            .dispatch(HostCommand::RemoveContainer {
                container_id: "a".into(),
            })
            .unwrap();
        assert_eq!(window.selection().active(), (None, None));
    }

    #[test]
    fn window_resize_is_debounced() {
        let (mut window, _, _) = window();
        add_container(&mut window, "c1", 1);
        let start = Instant::now();
        window.poll(start + Duration::from_secs(1));

        window.on_window_resize(Rect::from_size(600, 400), start);
        assert!(!window.poll(start));
        assert!(window.poll(start + Duration::from_millis(50)));
        let frame = &window.container("c1").unwrap().frames()[0];
        assert_eq!(frame.rect(), Rect::from_size(600, 400));
        assert!(!window.poll(start + Duration::from_millis(100)));
    }

    #[test]
    fn favorites_commands_restar_menu_entries() {
        let (mut window, _, _) = window();
        window
            .dispatch(HostCommand::SetLayoutFavorites {
                favorites: vec![Topology::QuadSqH],
            })
            .unwrap();
        let favorites: Vec<_> = window.layout_menu().favorites.iter().copied().collect();
        assert_eq!(favorites, [Topology::QuadSqH]);

        window
            .dispatch(HostCommand::SetSeriesFavorites {
                favorites: vec![SeriesType::Bar, SeriesType::Line],
            })
            .unwrap();
        assert!(window.series_menu().favorites.contains(&SeriesType::Bar));
        assert!(!window.series_menu().favorites.contains(&SeriesType::RoundedCandle));
    }

    #[test]
    fn undecodable_host_messages_are_dropped() {
        let (mut window, _, _) = window();
        assert_eq!(window.dispatch_json("{not json"), Ok(()));
        assert!(window.containers().is_empty());
        window
            .dispatch_json(r#"{"cmd": "add_container", "container_id": "c9"}"#)
            .unwrap();
        assert!(window.container("c9").is_some());
    }
}
