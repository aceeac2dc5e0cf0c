//! Boundary to the charting library.
//!
//! The library itself (canvas rendering, series data, coordinate transforms)
//! lives outside this crate. Frames only ever talk to it through
//! [`ChartHandle`], and obtain handles from a [`ChartFactory`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle returned by [`ChartHandle::add_series`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(pub u32);

/// Display type of a series, in host wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum SeriesType {
    WhitespaceData = 0,
    SingleValueData = 1,
    Line = 2,
    Area = 3,
    Baseline = 4,
    Histogram = 5,
    OhlcData = 6,
    Bar = 7,
    Candlestick = 8,
    RoundedCandle = 9,
}

impl SeriesType {
    pub const ALL: [Self; 10] = [
        Self::WhitespaceData,
        Self::SingleValueData,
        Self::Line,
        Self::Area,
        Self::Baseline,
        Self::Histogram,
        Self::OhlcData,
        Self::Bar,
        Self::Candlestick,
        Self::RoundedCandle,
    ];

    /// Types offered in the series selector, in menu order.
    pub const SELECTABLE: [Self; 7] = [
        Self::Bar,
        Self::Candlestick,
        Self::RoundedCandle,
        Self::Line,
        Self::Area,
        Self::Histogram,
        Self::Baseline,
    ];

    /// Map a data-shape type onto the display type that renders it.
    ///
    /// Whitespace has nothing to draw and maps to `None`; bare OHLC data draws
    /// as candlesticks and bare single values as a line.
    #[must_use]
    pub const fn normalize(self) -> Option<Self> {
        match self {
            Self::WhitespaceData => None,
            Self::OhlcData => Some(Self::Candlestick),
            Self::SingleValueData => Some(Self::Line),
            other => Some(other),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::WhitespaceData => "Whitespace Data",
            Self::SingleValueData => "Single Value Data",
            Self::Line => "Line",
            Self::Area => "Area",
            Self::Baseline => "Baseline",
            Self::Histogram => "Histogram",
            Self::OhlcData => "OHLC Data",
            Self::Bar => "Bar",
            Self::Candlestick => "Candlestick",
            Self::RoundedCandle => "Rounded Candlestick",
        }
    }
}

impl fmt::Display for SeriesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Wire index that names no series type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownSeriesType(pub u8);

impl fmt::Display for UnknownSeriesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown series type index {}", self.0)
    }
}

impl std::error::Error for UnknownSeriesType {}

impl TryFrom<u8> for SeriesType {
    type Error = UnknownSeriesType;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(UnknownSeriesType(value))
    }
}

impl From<SeriesType> for u8 {
    fn from(value: SeriesType) -> Self {
        value as u8
    }
}

/// Options passed to the library when a chart is created.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    /// Let the library track its element size itself.
    #[serde(default)]
    pub auto_size: bool,
}

/// One chart instance owned by a pane.
pub trait ChartHandle {
    fn resize(&mut self, width: u32, height: u32, force_repaint: bool);

    fn add_series(&mut self, series_type: SeriesType) -> SeriesId;

    fn remove_series(&mut self, series: SeriesId);

    /// X coordinate of a UTC timestamp, if it falls on the time scale.
    fn time_to_coordinate(&self, time: i64) -> Option<f64>;

    /// Logical bar index under an x coordinate.
    fn coordinate_to_logical(&self, x: f64) -> Option<f64>;

    fn logical_to_coordinate(&self, logical: f64) -> Option<f64>;

    fn attach_primitive(&mut self, primitive_id: &str);

    fn detach_primitive(&mut self, primitive_id: &str);
}

/// Creates charts bound to a DOM element id.
pub trait ChartFactory {
    fn create_chart(&mut self, element_id: &str, options: &ChartOptions) -> Box<dyn ChartHandle>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_matches_data_shapes() {
        assert_eq!(SeriesType::WhitespaceData.normalize(), None);
        assert_eq!(
            SeriesType::OhlcData.normalize(),
            Some(SeriesType::Candlestick)
        );
        assert_eq!(SeriesType::SingleValueData.normalize(), Some(SeriesType::Line));
        assert_eq!(SeriesType::Area.normalize(), Some(SeriesType::Area));
    }

    #[test]
    fn wire_index_round_trip() {
        for series in SeriesType::ALL {
            assert_eq!(SeriesType::try_from(u8::from(series)), Ok(series));
        }
        assert_eq!(SeriesType::try_from(10), Err(UnknownSeriesType(10)));
        assert_eq!(serde_json::to_string(&SeriesType::Bar).unwrap(), "7");
        assert!(serde_json::from_str::<SeriesType>("42").is_err());
    }

    #[test]
    fn selectable_types_are_already_normalized() {
        for series in SeriesType::SELECTABLE {
            assert_eq!(series.normalize(), Some(series), "{series}");
        }
    }
}
