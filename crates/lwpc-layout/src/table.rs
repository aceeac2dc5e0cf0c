//! Declarative topology table.
//!
//! Every [`Topology`] maps to a static [`TopologySpec`]: the nodes in
//! evaluation order with their initial shares, plus the `resize_pos` /
//! `resize_neg` wiring of each node by position. [`build_layout`]
//! instantiates a fresh [`FlexGraph`] from the table.
//!
//! # Wiring rules
//!
//! - A separator between `A` (left/top) and `B` (right/bottom) gets
//!   `resize_pos = [A, ..]` and `resize_neg = [B, ..]`; `B` gets the separator
//!   in its own `resize_pos` to anchor its `left` (vertical separator) or
//!   `top` (horizontal separator).
//! - When one side of a separator is a nested group (the L-shaped layouts),
//!   that side lists every frame **and** nested separator of the group, so a
//!   drag rescales the whole group to the same new share without touching
//!   the group's internal ratios.
//!
//! ```text
//!  TRIPLE_VERT_LEFT     arena: [f1, s1, f2, s2, f3]
//!  +------+|+------+    s1: pos [f1]  neg [f2, f3, s2]
//!  |      |||  f2  |    s2: pos [f2]  neg [f3]
//!  |  f1  ||+--s2--+    f2: pos [s1]
//!  |      |||  f3  |    f3: pos [s1, s2]
//!  +------+|+------+
//! ```

use crate::config::LayoutConfig;
use crate::flex::{FlexGraph, FlexNode, NodeId, Orientation};
use crate::topology::Topology;

/// One third, so three-way splits cover the container exactly.
const THIRD: f64 = 1.0 / 3.0;

/// Node template in a [`TopologySpec`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeSpec {
    Frame { width: f64, height: f64 },
    Separator { orientation: Orientation, size: f64 },
}

impl NodeSpec {
    fn instantiate(self) -> FlexNode {
        match self {
            Self::Frame { width, height } => FlexNode::frame(width, height),
            Self::Separator { orientation, size } => FlexNode::separator(orientation, size),
        }
    }
}

/// Edge lists of the node at position `node`, by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSpec {
    pub node: u8,
    pub pos: &'static [u8],
    pub neg: &'static [u8],
}

/// Static description of one topology's graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopologySpec {
    pub nodes: &'static [NodeSpec],
    pub links: &'static [LinkSpec],
}

const fn frame(width: f64, height: f64) -> NodeSpec {
    NodeSpec::Frame { width, height }
}

const fn vsep(size: f64) -> NodeSpec {
    NodeSpec::Separator {
        orientation: Orientation::Vertical,
        size,
    }
}

const fn hsep(size: f64) -> NodeSpec {
    NodeSpec::Separator {
        orientation: Orientation::Horizontal,
        size,
    }
}

const fn link(node: u8, pos: &'static [u8], neg: &'static [u8]) -> LinkSpec {
    LinkSpec { node, pos, neg }
}

// ----------------------------------------------------------------------------
// Shared wiring
// ----------------------------------------------------------------------------

/// `[f1, s1, f2]`.
const LINKS_TWO: &[LinkSpec] = &[link(1, &[0], &[2]), link(2, &[1], &[])];

/// `[f1, s1, f2, s2, f3]`, three in a line.
const LINKS_THREE_LINE: &[LinkSpec] = &[
    link(1, &[0], &[2]),
    link(3, &[2], &[4]),
    link(2, &[1], &[]),
    link(4, &[3], &[]),
];

/// `[f1, s1, f2, s2, f3]`, f1 alone then f2/f3 split by the nested s2.
const LINKS_THREE_LEAD: &[LinkSpec] = &[
    link(1, &[0], &[2, 4, 3]),
    link(3, &[2], &[4]),
    link(2, &[1], &[]),
    link(4, &[1, 3], &[]),
];

/// `[f1, s1, f2, s2, f3]`, f1/f2 split by the nested s1 then f3 alone.
const LINKS_THREE_TRAIL: &[LinkSpec] = &[
    link(1, &[0], &[2]),
    link(3, &[0, 2, 1], &[4]),
    link(2, &[1], &[]),
    link(4, &[3], &[]),
];

/// `[f1, s1, f2, s2, f3, s3, f4]`, two pairs split by s2.
const LINKS_FOUR_SQUARE: &[LinkSpec] = &[
    link(1, &[0], &[2]),
    link(5, &[4], &[6]),
    link(3, &[0, 2, 1], &[4, 6, 5]),
    link(2, &[1], &[]),
    link(4, &[3], &[]),
    link(6, &[3, 5], &[]),
];

/// `[f1, s1, f2, s2, f3, s3, f4]`, four in a line.
const LINKS_FOUR_LINE: &[LinkSpec] = &[
    link(1, &[0], &[2]),
    link(3, &[2], &[4]),
    link(5, &[4], &[6]),
    link(2, &[1], &[]),
    link(4, &[3], &[]),
    link(6, &[5], &[]),
];

/// `[f1, s1, f2, s2, f3, s3, f4]`, f1 alone then a nested group of three.
const LINKS_FOUR_LEAD: &[LinkSpec] = &[
    link(1, &[0], &[2, 4, 6, 3, 5]),
    link(3, &[2], &[4]),
    link(5, &[4], &[6]),
    link(2, &[1], &[]),
    link(4, &[1, 3], &[]),
    link(6, &[1, 5], &[]),
];

/// `[f1, s1, f2, s2, f3, s3, f4]`, a nested group of three then f4 alone.
const LINKS_FOUR_TRAIL: &[LinkSpec] = &[
    link(1, &[0], &[2]),
    link(3, &[2], &[4]),
    link(5, &[0, 2, 4, 1, 3], &[6]),
    link(2, &[1], &[]),
    link(4, &[3], &[]),
    link(6, &[5], &[]),
];

// ----------------------------------------------------------------------------
// Per-topology tables
// ----------------------------------------------------------------------------

const SINGLE: TopologySpec = TopologySpec {
    nodes: &[frame(1.0, 1.0)],
    links: &[],
};

const DOUBLE_VERT: TopologySpec = TopologySpec {
    nodes: &[frame(0.5, 1.0), vsep(1.0), frame(0.5, 1.0)],
    links: LINKS_TWO,
};

const DOUBLE_HORIZ: TopologySpec = TopologySpec {
    nodes: &[frame(1.0, 0.5), hsep(1.0), frame(1.0, 0.5)],
    links: LINKS_TWO,
};

const TRIPLE_VERT: TopologySpec = TopologySpec {
    nodes: &[
        frame(THIRD, 1.0),
        vsep(1.0),
        frame(THIRD, 1.0),
        vsep(1.0),
        frame(THIRD, 1.0),
    ],
    links: LINKS_THREE_LINE,
};

const TRIPLE_VERT_LEFT: TopologySpec = TopologySpec {
    nodes: &[
        frame(0.5, 1.0),
        vsep(1.0),
        frame(0.5, 0.5),
        hsep(0.5),
        frame(0.5, 0.5),
    ],
    links: LINKS_THREE_LEAD,
};

const TRIPLE_VERT_RIGHT: TopologySpec = TopologySpec {
    nodes: &[
        frame(0.5, 0.5),
        hsep(0.5),
        frame(0.5, 0.5),
        vsep(1.0),
        frame(0.5, 1.0),
    ],
    links: LINKS_THREE_TRAIL,
};

const TRIPLE_HORIZ: TopologySpec = TopologySpec {
    nodes: &[
        frame(1.0, THIRD),
        hsep(1.0),
        frame(1.0, THIRD),
        hsep(1.0),
        frame(1.0, THIRD),
    ],
    links: LINKS_THREE_LINE,
};

const TRIPLE_HORIZ_TOP: TopologySpec = TopologySpec {
    nodes: &[
        frame(1.0, 0.5),
        hsep(1.0),
        frame(0.5, 0.5),
        vsep(0.5),
        frame(0.5, 0.5),
    ],
    links: LINKS_THREE_LEAD,
};

const TRIPLE_HORIZ_BOTTOM: TopologySpec = TopologySpec {
    nodes: &[
        frame(0.5, 0.5),
        vsep(0.5),
        frame(0.5, 0.5),
        hsep(1.0),
        frame(1.0, 0.5),
    ],
    links: LINKS_THREE_TRAIL,
};

const QUAD_SQ_V: TopologySpec = TopologySpec {
    nodes: &[
        frame(0.5, 0.5),
        hsep(0.5),
        frame(0.5, 0.5),
        vsep(1.0),
        frame(0.5, 0.5),
        hsep(0.5),
        frame(0.5, 0.5),
    ],
    links: LINKS_FOUR_SQUARE,
};

const QUAD_SQ_H: TopologySpec = TopologySpec {
    nodes: &[
        frame(0.5, 0.5),
        vsep(0.5),
        frame(0.5, 0.5),
        hsep(1.0),
        frame(0.5, 0.5),
        vsep(0.5),
        frame(0.5, 0.5),
    ],
    links: LINKS_FOUR_SQUARE,
};

const QUAD_VERT: TopologySpec = TopologySpec {
    nodes: &[
        frame(0.25, 1.0),
        vsep(1.0),
        frame(0.25, 1.0),
        vsep(1.0),
        frame(0.25, 1.0),
        vsep(1.0),
        frame(0.25, 1.0),
    ],
    links: LINKS_FOUR_LINE,
};

const QUAD_HORIZ: TopologySpec = TopologySpec {
    nodes: &[
        frame(1.0, 0.25),
        hsep(1.0),
        frame(1.0, 0.25),
        hsep(1.0),
        frame(1.0, 0.25),
        hsep(1.0),
        frame(1.0, 0.25),
    ],
    links: LINKS_FOUR_LINE,
};

const QUAD_LEFT: TopologySpec = TopologySpec {
    nodes: &[
        frame(0.5, 1.0),
        vsep(1.0),
        frame(0.5, THIRD),
        hsep(0.5),
        frame(0.5, THIRD),
        hsep(0.5),
        frame(0.5, THIRD),
    ],
    links: LINKS_FOUR_LEAD,
};

const QUAD_RIGHT: TopologySpec = TopologySpec {
    nodes: &[
        frame(0.5, THIRD),
        hsep(0.5),
        frame(0.5, THIRD),
        hsep(0.5),
        frame(0.5, THIRD),
        vsep(1.0),
        frame(0.5, 1.0),
    ],
    links: LINKS_FOUR_TRAIL,
};

const QUAD_TOP: TopologySpec = TopologySpec {
    nodes: &[
        frame(1.0, 0.5),
        hsep(1.0),
        frame(THIRD, 0.5),
        vsep(0.5),
        frame(THIRD, 0.5),
        vsep(0.5),
        frame(THIRD, 0.5),
    ],
    links: LINKS_FOUR_LEAD,
};

const QUAD_BOTTOM: TopologySpec = TopologySpec {
    nodes: &[
        frame(THIRD, 0.5),
        vsep(0.5),
        frame(THIRD, 0.5),
        vsep(0.5),
        frame(THIRD, 0.5),
        hsep(1.0),
        frame(1.0, 0.5),
    ],
    links: LINKS_FOUR_TRAIL,
};

/// Static table entry for `topology`.
#[must_use]
pub const fn topology_spec(topology: Topology) -> &'static TopologySpec {
    match topology {
        Topology::Single => &SINGLE,
        Topology::DoubleVert => &DOUBLE_VERT,
        Topology::DoubleHoriz => &DOUBLE_HORIZ,
        Topology::TripleVert => &TRIPLE_VERT,
        Topology::TripleVertLeft => &TRIPLE_VERT_LEFT,
        Topology::TripleVertRight => &TRIPLE_VERT_RIGHT,
        Topology::TripleHoriz => &TRIPLE_HORIZ,
        Topology::TripleHorizTop => &TRIPLE_HORIZ_TOP,
        Topology::TripleHorizBottom => &TRIPLE_HORIZ_BOTTOM,
        Topology::QuadSqV => &QUAD_SQ_V,
        Topology::QuadSqH => &QUAD_SQ_H,
        Topology::QuadVert => &QUAD_VERT,
        Topology::QuadHoriz => &QUAD_HORIZ,
        Topology::QuadLeft => &QUAD_LEFT,
        Topology::QuadRight => &QUAD_RIGHT,
        Topology::QuadTop => &QUAD_TOP,
        Topology::QuadBottom => &QUAD_BOTTOM,
    }
}

impl TopologySpec {
    /// Instantiate a fresh graph from this spec.
    #[must_use]
    pub fn instantiate(&self) -> FlexGraph {
        let mut graph = FlexGraph::new();
        for spec in self.nodes {
            graph.push(spec.instantiate());
        }
        let to_ids = |positions: &[u8]| -> Vec<NodeId> {
            positions
                .iter()
                .map(|&p| NodeId::from_raw(u32::from(p)))
                .collect()
        };
        for link in self.links {
            if let Some(node) = graph.get_mut(NodeId::from_raw(u32::from(link.node))) {
                node.resize_pos = to_ids(link.pos);
                node.resize_neg = to_ids(link.neg);
            }
        }
        graph
    }
}

/// A built layout: the flex graph plus the minimum sizes its separators enforce.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    topology: Topology,
    config: LayoutConfig,
    graph: FlexGraph,
}

impl Layout {
    #[must_use]
    pub const fn topology(&self) -> Topology {
        self.topology
    }

    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    #[must_use]
    pub const fn graph(&self) -> &FlexGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut FlexGraph {
        &mut self.graph
    }

    /// Frame node ids in the order frames are bound to them.
    #[must_use]
    pub fn frame_slots(&self) -> Vec<NodeId> {
        self.graph.frames().collect()
    }
}

/// Build the graph for `topology` with default shares.
///
/// Pure: every call returns a fresh graph, so any drag customization of a
/// previous layout is discarded.
#[must_use]
pub fn build_layout(topology: Topology, config: &LayoutConfig) -> Layout {
    let graph = topology_spec(topology).instantiate();
    debug_assert_eq!(graph.validate(), Ok(()), "{topology} table is malformed");
    debug_assert_eq!(graph.frame_count(), topology.frame_count());
    Layout {
        topology,
        config: *config,
        graph,
    }
}
