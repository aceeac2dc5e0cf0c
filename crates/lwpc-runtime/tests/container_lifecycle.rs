//! End-to-end container and window behavior against mock chart and host
//! implementations.

use std::cell::RefCell;
use std::rc::Rc;

use lwpc_core::{PointerPosition, Rect};
use lwpc_layout::{LayoutConfig, ListenerCommand, NodeId, Topology};
use lwpc_runtime::{
    ChartFactory, ChartHandle, ChartOptions, Container, ContainerError, DisplaySlot, Frame,
    HostApi, HostCommand, Interval, SeriesId, SeriesType, Symbol, SymbolSearch, Timeframe, Window,
};
use pretty_assertions::assert_eq;
use web_time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Mocks
// ---------------------------------------------------------------------------

#[derive(Default, Clone)]
struct Charts {
    sizes: Rc<RefCell<Vec<(String, u32, u32)>>>,
}

struct MockChart {
    element: String,
    next_series: u32,
    sizes: Rc<RefCell<Vec<(String, u32, u32)>>>,
}

impl ChartHandle for MockChart {
    fn resize(&mut self, width: u32, height: u32, _force_repaint: bool) {
        self.sizes
            .borrow_mut()
            .push((self.element.clone(), width, height));
    }

    fn add_series(&mut self, _series_type: SeriesType) -> SeriesId {
        self.next_series += 1;
        SeriesId(self.next_series)
    }

    fn remove_series(&mut self, _series: SeriesId) {}

    fn time_to_coordinate(&self, _time: i64) -> Option<f64> {
        None
    }

    fn coordinate_to_logical(&self, _x: f64) -> Option<f64> {
        None
    }

    fn logical_to_coordinate(&self, _logical: f64) -> Option<f64> {
        None
    }

    fn attach_primitive(&mut self, _primitive_id: &str) {}

    fn detach_primitive(&mut self, _primitive_id: &str) {}
}

impl ChartFactory for Charts {
    fn create_chart(&mut self, element_id: &str, _options: &ChartOptions) -> Box<dyn ChartHandle> {
        Box::new(MockChart {
            element: element_id.to_owned(),
            next_series: 0,
            sizes: Rc::clone(&self.sizes),
        })
    }
}

#[derive(Default, Clone)]
struct Host {
    log: Rc<RefCell<Vec<String>>>,
}

impl Host {
    fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    fn push(&self, line: String) {
        self.log.borrow_mut().push(line);
    }
}

impl HostApi for Host {
    fn add_container(&mut self) {
        self.push("add_container".into());
    }

    fn remove_container(&mut self, container_id: &str) {
        self.push(format!("remove_container {container_id}"));
    }

    fn reorder_containers(&mut self, from: usize, to: usize) {
        self.push(format!("reorder_containers {from} {to}"));
    }

    fn layout_change(&mut self, container_id: &str, layout: Topology) {
        self.push(format!("layout_change {container_id} {layout}"));
    }

    fn series_change(&mut self, container_id: &str, frame_id: &str, series_type: SeriesType) {
        self.push(format!(
            "series_change {container_id} {frame_id} {}",
            u8::from(series_type)
        ));
    }

    fn data_request(
        &mut self,
        container_id: &str,
        frame_id: &str,
        symbol: &Symbol,
        multiplier: u32,
        period: Interval,
    ) {
        self.push(format!(
            "data_request {container_id} {frame_id} {} {multiplier}{}",
            symbol.ticker,
            period.code()
        ));
    }

    fn symbol_search(&mut self, query: &SymbolSearch) {
        self.push(format!("symbol_search {} {}", query.symbol, query.confirmed));
    }
}

fn container_with(frames: &[&str], charts: &mut Charts) -> Container {
    let mut container = Container::new("c1", LayoutConfig::default());
    for id in frames {
        container.add_frame(*id, charts);
    }
    container
}

fn ids(container: &Container) -> Vec<&str> {
    container.frames().iter().map(Frame::id).collect()
}

// ---------------------------------------------------------------------------
// Topology switches never truncate
// ---------------------------------------------------------------------------

#[test]
fn switching_to_a_larger_topology_errors_or_creates_frames() {
    let mut charts = Charts::default();
    let mut container = container_with(&["a"], &mut charts);
    container.set_layout(Topology::Single).unwrap();

    let err = container.set_layout(Topology::TripleHorizTop).unwrap_err();
    assert_eq!(
        err,
        ContainerError::NotEnoughFrames {
            required: 3,
            available: 1
        }
    );
    assert_eq!(container.topology(), Some(Topology::Single));

    container
        .set_layout_with(Topology::TripleHorizTop, &mut charts)
        .unwrap();
    assert_eq!(container.frames().len(), 3);
    let bound: Vec<_> = container
        .display()
        .iter()
        .filter_map(|slot| match slot {
            DisplaySlot::Frame { slot, .. } => Some(*slot),
            DisplaySlot::Separator { .. } => None,
        })
        .collect();
    assert_eq!(bound, [0, 1, 2]);
}

#[test]
fn every_topology_binds_all_its_slots() {
    let mut charts = Charts::default();
    let mut container = container_with(&[], &mut charts);
    for topology in Topology::ALL {
        container.set_layout_with(topology, &mut charts).unwrap();
        for slot in 0..topology.frame_count() {
            assert!(container.frame_in_slot(slot).is_some(), "{topology} slot {slot}");
        }
        assert!(container.frame_in_slot(topology.frame_count()).is_none());
    }
    assert_eq!(container.frames().len(), 4);
}

// ---------------------------------------------------------------------------
// Reorder keeps frame state and graph identity
// ---------------------------------------------------------------------------

#[test]
fn reorder_preserves_frame_state_and_graph() {
    let mut charts = Charts::default();
    let mut container = container_with(&["a", "b", "c"], &mut charts);
    container.show();
    container.set_layout(Topology::TripleVert).unwrap();
    container.resize(Some(Rect::from_size(1200, 600)));
    container.on_tick();

    container.frames_mut()[0].set_symbol(Symbol::new("AAPL"));
    container.frames_mut()[0].change_series_type(SeriesType::Area);
    container.frames_mut()[1].set_timeframe(Timeframe::new(1, Interval::Hour));
    let graph_before = container.layout().unwrap().graph().clone();
    let display_before = container.display().to_vec();

    container.reorder_frames(0, 2).unwrap();

    assert_eq!(ids(&container), ["b", "c", "a"]);
    let moved = container.frame("a").unwrap();
    assert_eq!(moved.symbol().map(|s| s.ticker.as_str()), Some("AAPL"));
    assert_eq!(moved.series_type(), SeriesType::Area);
    assert_eq!(
        container.frame("b").unwrap().timeframe(),
        Some(Timeframe::new(1, Interval::Hour))
    );
    assert_eq!(container.layout().unwrap().graph(), &graph_before);
    assert_eq!(container.display(), display_before.as_slice());

    // The moved frame takes the last slot's geometry on the next tick.
    assert!(container.on_tick());
    let last_slot = container.layout().unwrap().frame_slots()[2];
    let slot_rect = container.layout().unwrap().graph().get(last_slot).unwrap().rect;
    assert_eq!(container.frame("a").unwrap().rect(), slot_rect);
}

// ---------------------------------------------------------------------------
// Zero-size resize is ignored
// ---------------------------------------------------------------------------

#[test]
fn zero_width_resize_leaves_geometry_untouched() {
    let mut charts = Charts::default();
    let mut container = container_with(&["a", "b", "c", "d"], &mut charts);
    container.set_layout(Topology::QuadSqV).unwrap();
    container.resize(Some(Rect::from_size(1000, 800)));
    container.on_tick();
    let before = container.layout().unwrap().graph().rects();

    container.resize(Some(Rect::from_size(0, 500)));
    assert_eq!(container.layout().unwrap().graph().rects(), before);
    assert!(!container.on_tick());
}

// ---------------------------------------------------------------------------
// Drags through the container
// ---------------------------------------------------------------------------

#[test]
fn drag_clamps_at_minimum_and_resizes_charts() {
    let mut charts = Charts::default();
    let mut container = container_with(&["a", "b"], &mut charts);
    container.show();
    container.set_layout(Topology::DoubleHoriz).unwrap();
    container.resize(Some(Rect::new(100, 0, 800, 1000)));
    container.on_tick();
    charts.sizes.borrow_mut().clear();

    let separator = NodeId::from_raw(1);
    container.separator_pointer_down(separator, 1).unwrap();
    let split = container
        .separator_pointer_move(1, PointerPosition::new(400.0, 105.0))
        .unwrap()
        .unwrap();
    assert!((split.lead - 0.10).abs() < 1e-12);
    assert!((split.lead + split.trail - 1.0).abs() < 1e-12);

    assert!(container.on_tick());
    assert_eq!(
        *charts.sizes.borrow(),
        vec![
            ("a_p_main".to_owned(), 800, 100),
            ("b_p_main".to_owned(), 800, 900),
        ]
    );
    assert_eq!(
        container.separator_pointer_up(1),
        Some(ListenerCommand::Detach {
            separator,
            pointer_id: 1
        })
    );
}

#[test]
fn moves_from_a_second_pointer_are_ignored() {
    let mut charts = Charts::default();
    let mut container = container_with(&["a", "b"], &mut charts);
    container.set_layout(Topology::DoubleVert).unwrap();
    container.resize(Some(Rect::from_size(1000, 500)));
    container
        .separator_pointer_down(NodeId::from_raw(1), 1)
        .unwrap();
    let before = container.layout().unwrap().graph().clone();

    let moved = container
        .separator_pointer_move(2, PointerPosition::new(100.0, 10.0))
        .unwrap();
    assert_eq!(moved, None);
    assert_eq!(container.layout().unwrap().graph(), &before);
    assert_eq!(container.separator_pointer_up(2), None);
    assert!(container.cancel_drag().is_some());
}

// ---------------------------------------------------------------------------
// Window round trips
// ---------------------------------------------------------------------------

#[test]
fn layout_round_trip_through_the_host() {
    let charts = Charts::default();
    let host = Host::default();
    let mut window = Window::new(charts.clone(), host.clone(), LayoutConfig::default());
    let start = Instant::now();
    window.on_window_resize(Rect::from_size(1600, 900), start);

    for json in [
        r#"{"cmd": "add_container", "container_id": "c1"}"#,
        r#"{"cmd": "add_frame", "frame_id": "c1_f0", "container_id": "c1"}"#,
        r#"{"cmd": "set_layout", "container_id": "c1", "layout": 0}"#,
    ] {
        window.dispatch_json(json).unwrap();
    }
    assert!(window.select_layout(Topology::QuadLeft));
    assert_eq!(host.log(), ["layout_change c1 QUAD_LEFT"]);

    // The host confirms, then names the frames the switch created.
    window
        .dispatch(HostCommand::SetLayout {
            container_id: "c1".into(),
            layout: Topology::QuadLeft,
        })
        .unwrap();
    for id in ["c1_f1", "c1_f2", "c1_f3"] {
        window
            .dispatch(HostCommand::AddFrame {
                frame_id: id.into(),
                container_id: "c1".into(),
            })
            .unwrap();
    }
    let container = window.container("c1").unwrap();
    assert_eq!(ids(container), ["c1_f0", "c1_f1", "c1_f2", "c1_f3"]);
    assert!(container.frames().iter().all(Frame::is_visible));

    assert!(window.poll(start + Duration::from_millis(25)));
    let frame = window.container("c1").unwrap().frame("c1_f3").unwrap();
    assert!(!frame.rect().is_empty());
}

#[test]
fn timeframe_request_uses_the_frame_symbol() {
    let charts = Charts::default();
    let host = Host::default();
    let mut window = Window::new(charts, host.clone(), LayoutConfig::default());
    window
        .dispatch(HostCommand::AddContainer {
            container_id: "c1".into(),
        })
        .unwrap();
    window
        .dispatch(HostCommand::AddFrame {
            frame_id: "c1_f0".into(),
            container_id: "c1".into(),
        })
        .unwrap();
    window
        .dispatch(HostCommand::SetLayout {
            container_id: "c1".into(),
            layout: Topology::Single,
        })
        .unwrap();
    window
        .dispatch_json(
            r#"{"cmd": "set_frame_symbol", "frame_id": "c1_f0", "symbol": {"ticker": "BTCUSD"}}"#,
        )
        .unwrap();

    assert!(window.select_timeframe("4h".parse().unwrap()));
    assert!(window.select_series_type(SeriesType::Baseline));
    window.search_symbol(&SymbolSearch {
        symbol: "ETH".into(),
        confirmed: true,
        ..SymbolSearch::default()
    });
    assert_eq!(
        host.log(),
        [
            "data_request c1 c1_f0 BTCUSD 4h",
            "series_change c1 c1_f0 4",
            "symbol_search ETH true",
        ]
    );
}
