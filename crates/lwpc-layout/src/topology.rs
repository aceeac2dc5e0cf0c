//! Named layout topologies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One of the fixed frame arrangements a container can display.
///
/// The discriminant is the wire index shared with the host process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[repr(u8)]
pub enum Topology {
    /// One frame filling the container.
    #[default]
    Single = 0,
    /// Two frames side by side.
    DoubleVert = 1,
    /// Two frames stacked.
    DoubleHoriz = 2,
    /// Three equal columns.
    TripleVert = 3,
    /// One tall frame on the left, two stacked on the right.
    TripleVertLeft = 4,
    /// Two stacked frames on the left, one tall frame on the right.
    TripleVertRight = 5,
    /// Three equal rows.
    TripleHoriz = 6,
    /// One wide frame on top, two side by side below.
    TripleHorizTop = 7,
    /// Two side by side on top, one wide frame below.
    TripleHorizBottom = 8,
    /// 2x2 grid split into two columns first.
    QuadSqV = 9,
    /// 2x2 grid split into two rows first.
    QuadSqH = 10,
    /// Four equal columns.
    QuadVert = 11,
    /// Four equal rows.
    QuadHoriz = 12,
    /// One tall frame on the left, three stacked on the right.
    QuadLeft = 13,
    /// Three stacked frames on the left, one tall frame on the right.
    QuadRight = 14,
    /// One wide frame on top, three side by side below.
    QuadTop = 15,
    /// Three side by side on top, one wide frame below.
    QuadBottom = 16,
}

impl Topology {
    /// Every topology in wire order.
    pub const ALL: [Self; 17] = [
        Self::Single,
        Self::DoubleVert,
        Self::DoubleHoriz,
        Self::TripleVert,
        Self::TripleVertLeft,
        Self::TripleVertRight,
        Self::TripleHoriz,
        Self::TripleHorizTop,
        Self::TripleHorizBottom,
        Self::QuadSqV,
        Self::QuadSqH,
        Self::QuadVert,
        Self::QuadHoriz,
        Self::QuadLeft,
        Self::QuadRight,
        Self::QuadTop,
        Self::QuadBottom,
    ];

    /// Number of frames the topology displays.
    #[must_use]
    pub const fn frame_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::DoubleVert | Self::DoubleHoriz => 2,
            Self::TripleVert
            | Self::TripleVertLeft
            | Self::TripleVertRight
            | Self::TripleHoriz
            | Self::TripleHorizTop
            | Self::TripleHorizBottom => 3,
            Self::QuadSqV
            | Self::QuadSqH
            | Self::QuadVert
            | Self::QuadHoriz
            | Self::QuadLeft
            | Self::QuadRight
            | Self::QuadTop
            | Self::QuadBottom => 4,
        }
    }

    /// Wire index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Decode a wire index, falling back to [`Topology::Single`] when unknown.
    #[must_use]
    pub fn from_index(index: u8) -> Self {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .unwrap_or_default()
    }

    /// Wire name, e.g. `TRIPLE_VERT_LEFT`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Single => "SINGLE",
            Self::DoubleVert => "DOUBLE_VERT",
            Self::DoubleHoriz => "DOUBLE_HORIZ",
            Self::TripleVert => "TRIPLE_VERT",
            Self::TripleVertLeft => "TRIPLE_VERT_LEFT",
            Self::TripleVertRight => "TRIPLE_VERT_RIGHT",
            Self::TripleHoriz => "TRIPLE_HORIZ",
            Self::TripleHorizTop => "TRIPLE_HORIZ_TOP",
            Self::TripleHorizBottom => "TRIPLE_HORIZ_BOTTOM",
            Self::QuadSqV => "QUAD_SQ_V",
            Self::QuadSqH => "QUAD_SQ_H",
            Self::QuadVert => "QUAD_VERT",
            Self::QuadHoriz => "QUAD_HORIZ",
            Self::QuadLeft => "QUAD_LEFT",
            Self::QuadRight => "QUAD_RIGHT",
            Self::QuadTop => "QUAD_TOP",
            Self::QuadBottom => "QUAD_BOTTOM",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a topology name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTopology(pub String);

impl fmt::Display for UnknownTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown layout topology: {:?}", self.0)
    }
}

impl std::error::Error for UnknownTopology {}

impl FromStr for Topology {
    type Err = UnknownTopology;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|topology| topology.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTopology(s.to_owned()))
    }
}

impl Serialize for Topology {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.index())
    }
}

impl<'de> Deserialize<'de> for Topology {
    /// Unknown indices decode as [`Topology::Single`] rather than failing.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let index = i64::deserialize(deserializer)?;
        Ok(u8::try_from(index).map_or(Self::Single, Self::from_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_indices_are_dense() {
        for (i, topology) in Topology::ALL.iter().enumerate() {
            assert_eq!(usize::from(topology.index()), i);
            assert_eq!(Topology::from_index(i as u8), *topology);
        }
    }

    #[test]
    fn unknown_index_falls_back_to_single() {
        assert_eq!(Topology::from_index(17), Topology::Single);
        assert_eq!(Topology::from_index(u8::MAX), Topology::Single);
    }

    #[test]
    fn frame_counts() {
        assert_eq!(Topology::Single.frame_count(), 1);
        assert_eq!(Topology::DoubleHoriz.frame_count(), 2);
        assert_eq!(Topology::TripleHorizBottom.frame_count(), 3);
        assert_eq!(Topology::QuadBottom.frame_count(), 4);
    }

    #[test]
    fn names_round_trip() {
        for topology in Topology::ALL {
            assert_eq!(topology.to_string().parse::<Topology>(), Ok(topology));
        }
        assert_eq!("quad_sq_h".parse::<Topology>(), Ok(Topology::QuadSqH));
        assert!("HEXA".parse::<Topology>().is_err());
    }

    #[test]
    fn serde_uses_index_with_fallback() {
        assert_eq!(serde_json::to_string(&Topology::TripleVertLeft).unwrap(), "4");
        let decoded: Topology = serde_json::from_str("13").unwrap();
        assert_eq!(decoded, Topology::QuadLeft);
        let fallback: Topology = serde_json::from_str("42").unwrap();
        assert_eq!(fallback, Topology::Single);
        let negative: Topology = serde_json::from_str("-1").unwrap();
        assert_eq!(negative, Topology::Single);
    }
}
