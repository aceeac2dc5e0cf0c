#![forbid(unsafe_code)]

//! Style sheet and cursor output for a container's DOM subtree.
//!
//! A container renders its nodes as sibling `div.frame` elements in arena
//! order, preceded by one `<style>` element. Per-node geometry therefore lives
//! in a single generated sheet keyed by `:nth-child`, rather than in inline
//! styles the host would have to diff element by element.

use lwpc_layout::{FlexGraph, Orientation};

/// Offset from a node's arena index to its `:nth-child` position.
///
/// The container's `<style>` element occupies child 1 and CSS counts from 1.
pub const NTH_CHILD_OFFSET: usize = 2;

/// Render the positioning rules for every laid-out node of `graph`.
///
/// Nodes that have never been recomputed carry no style and are skipped.
#[must_use]
pub fn render_style_sheet(graph: &FlexGraph) -> String {
    let mut sheet = String::new();
    for (index, (_, node)) in graph.iter().enumerate() {
        if node.style.is_empty() {
            continue;
        }
        if !sheet.is_empty() {
            sheet.push('\n');
        }
        sheet.push_str(&format!(
            "div.frame:nth-child({}){}",
            index + NTH_CHILD_OFFSET,
            node.style
        ));
    }
    sheet
}

/// CSS cursor shown while hovering or dragging a separator.
#[must_use]
pub const fn separator_cursor(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::Vertical => "ew-resize",
        Orientation::Horizontal => "ns-resize",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lwpc_layout::{LayoutConfig, Rect, Topology, build_layout, recompute};

    #[test]
    fn unresized_graph_renders_nothing() {
        let layout = build_layout(Topology::DoubleVert, &LayoutConfig::default());
        assert_eq!(render_style_sheet(layout.graph()), "");
    }

    #[test]
    fn one_rule_per_node_in_arena_order() {
        let mut layout = build_layout(Topology::TripleVertLeft, &LayoutConfig::default());
        recompute(Rect::from_size(900, 600), layout.graph_mut());
        let sheet = render_style_sheet(layout.graph());
        let selectors: Vec<&str> = sheet
            .lines()
            .map(|line| line.split('{').next().unwrap_or_default())
            .collect();
        assert_eq!(
            selectors,
            [
                "div.frame:nth-child(2)",
                "div.frame:nth-child(3)",
                "div.frame:nth-child(4)",
                "div.frame:nth-child(5)",
                "div.frame:nth-child(6)",
            ]
        );
    }

    #[test]
    fn cursor_follows_drag_axis() {
        assert_eq!(separator_cursor(Orientation::Vertical), "ew-resize");
        assert_eq!(separator_cursor(Orientation::Horizontal), "ns-resize");
    }
}
