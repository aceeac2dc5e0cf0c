//! Structural and geometric invariants for every built-in topology.
//!
//! Random drag streams are applied to laid-out graphs and the band coverage,
//! minimum-size and idempotence guarantees are re-checked after each move.

use lwpc_core::event::PointerPosition;
use lwpc_layout::{
    FlexGraph, LayoutConfig, NodeId, RESIZE_HANDLE_WIDTH, Rect, Topology, apply_drag,
    build_layout, recompute,
};
use proptest::prelude::*;

const EPS: f64 = 1e-6;

fn topology_strategy() -> impl Strategy<Value = Topology> {
    (0u8..17).prop_map(Topology::from_index)
}

fn assert_bands_cover(graph: &FlexGraph, context: &str) {
    for step in 1..20 {
        let at = f64::from(step) * 0.05;
        let row = graph.row_share(at);
        let column = graph.column_share(at);
        assert!((row - 1.0).abs() < EPS, "{context}: row at {at} sums to {row}");
        assert!(
            (column - 1.0).abs() < EPS,
            "{context}: column at {at} sums to {column}"
        );
    }
}

fn separators(graph: &FlexGraph) -> Vec<NodeId> {
    graph.separators().collect()
}

#[test]
fn freshly_built_bands_sum_to_one() {
    for topology in Topology::ALL {
        let layout = build_layout(topology, &LayoutConfig::default());
        assert_bands_cover(layout.graph(), topology.name());
    }
}

#[test]
fn every_topology_is_a_valid_dag_with_expected_frames() {
    for topology in Topology::ALL {
        let layout = build_layout(topology, &LayoutConfig::default());
        assert_eq!(layout.graph().validate(), Ok(()), "{topology}");
        assert_eq!(layout.graph().frame_count(), topology.frame_count());
        assert_eq!(layout.topology(), topology);
    }
}

#[test]
fn double_vert_reference_geometry() {
    let mut layout = build_layout(Topology::DoubleVert, &LayoutConfig::default());
    let frames = layout.frame_slots();
    let graph = layout.graph();
    assert_eq!(graph.get(frames[0]).unwrap().flex_width, 0.5);
    assert_eq!(graph.get(frames[1]).unwrap().flex_width, 0.5);

    recompute(Rect::from_size(1000, 500), layout.graph_mut());
    let f1 = layout.graph().get(frames[0]).unwrap().rect;
    let f2 = layout.graph().get(frames[1]).unwrap().rect;
    assert_eq!(f1, Rect::new(0, 0, 500, 500));
    assert_eq!(f2.left, f1.width + RESIZE_HANDLE_WIDTH);
}

#[test]
fn zero_sized_container_is_a_no_op() {
    for topology in Topology::ALL {
        let mut layout = build_layout(topology, &LayoutConfig::default());
        let before = layout.graph().clone();
        recompute(Rect::from_size(0, 0), layout.graph_mut());
        recompute(Rect::from_size(500, 0), layout.graph_mut());
        assert_eq!(layout.graph(), &before, "{topology}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn recompute_is_idempotent(
        topology in topology_strategy(),
        width in 1i32..4000,
        height in 1i32..3000,
    ) {
        let mut layout = build_layout(topology, &LayoutConfig::default());
        let container = Rect::from_size(width, height);
        recompute(container, layout.graph_mut());
        let first = layout.graph().clone();
        recompute(container, layout.graph_mut());
        prop_assert_eq!(layout.graph(), &first);
    }

    #[test]
    fn drag_streams_preserve_bands_and_minimums(
        topology in topology_strategy(),
        moves in prop::collection::vec((any::<prop::sample::Index>(), -0.5f64..1.5, -0.5f64..1.5), 1..24),
    ) {
        let config = LayoutConfig::default();
        let container = Rect::new(40, 25, 1200, 800);
        let mut layout = build_layout(topology, &config);
        recompute(container, layout.graph_mut());
        let seps = separators(layout.graph());
        prop_assume!(!seps.is_empty());

        for (pick, fx, fy) in moves {
            let separator = seps[pick.index(seps.len())];
            let pointer = PointerPosition::new(
                f64::from(container.left) + fx * f64::from(container.width),
                f64::from(container.top) + fy * f64::from(container.height),
            );
            let split = apply_drag(layout.graph_mut(), separator, pointer, container, &config)
                .expect("separators are draggable");
            let split = split.expect("laid-out graph accepts moves");

            prop_assert!((split.lead + split.trail - split.flex_total).abs() < EPS);

            let node = layout.graph().get(separator).unwrap();
            let (min, lead, trail) = match node.orientation() {
                Some(lwpc_layout::Orientation::Vertical) => (
                    config.min_frame_width,
                    layout.graph().get(node.resize_pos[0]).unwrap().flex_width,
                    layout.graph().get(node.resize_neg[0]).unwrap().flex_width,
                ),
                _ => (
                    config.min_frame_height,
                    layout.graph().get(node.resize_pos[0]).unwrap().flex_height,
                    layout.graph().get(node.resize_neg[0]).unwrap().flex_height,
                ),
            };
            prop_assert!(lead >= min - EPS, "lead {} below {}", lead, min);
            prop_assert!(trail >= min - EPS, "trail {} below {}", trail, min);
            prop_assert_eq!(lead, split.lead);
            prop_assert_eq!(trail, split.trail);
        }
        assert_bands_cover(layout.graph(), topology.name());
        prop_assert_eq!(layout.graph().validate(), Ok(()));
    }

    #[test]
    fn lead_clamp_commits_exact_minimum(
        flex_total in 0.3f64..1.0,
        pixel_total in 10.0f64..5000.0,
        fraction in -1.0f64..0.14,
    ) {
        let min = 0.15;
        // Pointer positions whose raw lead share lands under the minimum.
        let relative = fraction / flex_total * pixel_total;
        let split = lwpc_layout::split_for_pointer(flex_total, pixel_total, relative, min).unwrap();
        prop_assert_eq!(split.lead, min);
        prop_assert!((split.lead + split.trail - flex_total).abs() < 1e-12);
    }
}
