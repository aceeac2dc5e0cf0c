//! Chart frames and the panes they stack.
//!
//! A [`Frame`] is the unit a layout slot displays. It owns one or more
//! [`Pane`]s (the main pane plus optional indicator panes), each wrapping a
//! chart handle, and remembers what the host last told it to show: symbol,
//! timeframe and main series type.

use lwpc_core::Rect;
use serde::{Deserialize, Serialize};

use crate::chart::{ChartFactory, ChartHandle, ChartOptions, SeriesId, SeriesType};
use crate::favorites::Timeframe;
use crate::primitive::{Capabilities, Primitive, PrimitiveError, PrimitiveEvent, PrimitiveRegistry};

/// Instrument shown by a frame, as reported by the host's symbol search.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Symbol {
    pub ticker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sec_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
}

impl Symbol {
    #[must_use]
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Self::default()
        }
    }
}

/// One chart inside a frame, plus the primitives drawn on it.
///
/// `flex_width`/`flex_height` are the pane's share of its frame; a pane with
/// the default `1.0` fills it.
pub struct Pane {
    id: String,
    chart: Box<dyn ChartHandle>,
    flex_width: f64,
    flex_height: f64,
    main_series: SeriesId,
    main_series_type: SeriesType,
    primitives: PrimitiveRegistry,
}

impl Pane {
    /// Create a pane with a candlestick main series.
    pub fn new(id: impl Into<String>, factory: &mut dyn ChartFactory) -> Self {
        let id = id.into();
        let mut chart = factory.create_chart(&id, &ChartOptions::default());
        let main_series = chart.add_series(SeriesType::Candlestick);
        Self {
            id,
            chart,
            flex_width: 1.0,
            flex_height: 1.0,
            main_series,
            main_series_type: SeriesType::Candlestick,
            primitives: PrimitiveRegistry::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn chart(&self) -> &dyn ChartHandle {
        self.chart.as_ref()
    }

    pub fn chart_mut(&mut self) -> &mut dyn ChartHandle {
        self.chart.as_mut()
    }

    #[must_use]
    pub const fn main_series(&self) -> SeriesId {
        self.main_series
    }

    #[must_use]
    pub const fn main_series_type(&self) -> SeriesType {
        self.main_series_type
    }

    #[must_use]
    pub const fn flex(&self) -> (f64, f64) {
        (self.flex_width, self.flex_height)
    }

    /// Set this pane's share of the frame. Non-positive or non-finite
    /// shares are ignored.
    pub fn set_flex(&mut self, flex_width: f64, flex_height: f64) {
        if flex_width.is_finite() && flex_width > 0.0 {
            self.flex_width = flex_width;
        }
        if flex_height.is_finite() && flex_height > 0.0 {
            self.flex_height = flex_height;
        }
    }

    #[must_use]
    pub const fn primitives(&self) -> &PrimitiveRegistry {
        &self.primitives
    }

    pub fn primitives_mut(&mut self) -> &mut PrimitiveRegistry {
        &mut self.primitives
    }

    /// Draw `primitive` on this pane's chart and subscribe it to chart events.
    pub fn attach_primitive(
        &mut self,
        primitive: Box<dyn Primitive>,
    ) -> Result<Capabilities, PrimitiveError> {
        self.primitives.attach(primitive, self.chart.as_mut())
    }

    pub fn detach_primitive(&mut self, id: &str) -> Option<Box<dyn Primitive>> {
        self.primitives.detach(id, self.chart.as_mut())
    }

    /// Forward a chart event to the subscribed primitives.
    pub fn chart_event(&mut self, event: &PrimitiveEvent) -> usize {
        self.primitives.dispatch(event)
    }

    /// Resize the chart to this pane's share of a frame of the given size.
    pub fn resize(&mut self, frame_width: u32, frame_height: u32) {
        let width = scale(frame_width, self.flex_width);
        let height = scale(frame_height, self.flex_height);
        self.chart.resize(width, height, false);
    }

    /// Swap the main series for one of another type.
    ///
    /// The replacement series is added before the old one is removed so
    /// the chart never renders without a main series.
    fn replace_main_series(&mut self, series_type: SeriesType) {
        let replacement = self.chart.add_series(series_type);
        self.chart.remove_series(self.main_series);
        self.main_series = replacement;
        self.main_series_type = series_type;
    }
}

impl std::fmt::Debug for Pane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pane")
            .field("id", &self.id)
            .field("flex_width", &self.flex_width)
            .field("flex_height", &self.flex_height)
            .field("main_series", &self.main_series)
            .field("main_series_type", &self.main_series_type)
            .field("primitives", &self.primitives)
            .finish_non_exhaustive()
    }
}

fn scale(pixels: u32, share: f64) -> u32 {
    let scaled = (f64::from(pixels) * share).round();
    if scaled <= 0.0 {
        0
    } else if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        scaled as u32
    }
}

/// A chart slot in a container.
#[derive(Debug)]
pub struct Frame {
    id: String,
    panes: Vec<Pane>,
    series_type: SeriesType,
    symbol: Option<Symbol>,
    timeframe: Option<Timeframe>,
    rect: Rect,
    visible: bool,
}

impl Frame {
    /// Create a frame with its main pane (`<id>_p_main`).
    pub fn new(id: impl Into<String>, factory: &mut dyn ChartFactory) -> Self {
        let id = id.into();
        let main = Pane::new(format!("{id}_p_main"), factory);
        Self::with_main_pane(id, main)
    }

    /// Create a frame the host has not named yet.
    ///
    /// The frame's id stays empty until [`Frame::assign_id`]; `element_id`
    /// only names the chart element of its main pane.
    pub fn placeholder(element_id: &str, factory: &mut dyn ChartFactory) -> Self {
        let main = Pane::new(format!("{element_id}_p_main"), factory);
        Self::with_main_pane(String::new(), main)
    }

    fn with_main_pane(id: String, main: Pane) -> Self {
        Self {
            id,
            series_type: main.main_series_type(),
            panes: vec![main],
            symbol: None,
            timeframe: None,
            rect: Rect::default(),
            visible: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// True for a frame created by a layout switch that the host has not
    /// claimed with an id yet.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.id.is_empty()
    }

    pub fn assign_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    #[must_use]
    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    pub fn panes_mut(&mut self) -> &mut [Pane] {
        &mut self.panes
    }

    /// The pane created with the frame. Always present.
    #[must_use]
    pub fn main_pane(&self) -> &Pane {
        &self.panes[0]
    }

    /// Add an indicator pane and size it to the frame's current rect.
    ///
    /// Without an explicit id the pane is named `<frame>_p<n>`.
    pub fn add_pane(&mut self, id: Option<String>, factory: &mut dyn ChartFactory) -> &Pane {
        let id = id.unwrap_or_else(|| format!("{}_p{}", self.id, self.panes.len()));
        let mut pane = Pane::new(id, factory);
        if !self.rect.is_empty() {
            pane.resize(self.rect.width_px(), self.rect.height_px());
        }
        let index = self.panes.len();
        self.panes.push(pane);
        &self.panes[index]
    }

    /// Rect last written by the container's layout pass.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Store the frame's rect and resize every pane's chart to fit.
    ///
    /// Empty rects come from containers that were not measured yet and
    /// are ignored entirely.
    pub fn apply_rect(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        self.rect = rect;
        let (width, height) = (rect.width_px(), rect.height_px());
        for pane in &mut self.panes {
            pane.resize(width, height);
        }
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    #[must_use]
    pub const fn series_type(&self) -> SeriesType {
        self.series_type
    }

    /// Switch the main series type.
    ///
    /// Returns the type actually applied, or `None` when the request was a
    /// no-op: whitespace data has nothing to draw, and a request for the
    /// current type changes nothing.
    pub fn change_series_type(&mut self, requested: SeriesType) -> Option<SeriesType> {
        let series_type = requested.normalize()?;
        if series_type == self.series_type {
            return None;
        }
        self.panes[0].replace_main_series(series_type);
        self.series_type = series_type;
        Some(series_type)
    }

    #[must_use]
    pub fn symbol(&self) -> Option<&Symbol> {
        self.symbol.as_ref()
    }

    pub fn set_symbol(&mut self, symbol: Symbol) {
        self.symbol = Some(symbol);
    }

    #[must_use]
    pub const fn timeframe(&self) -> Option<Timeframe> {
        self.timeframe
    }

    pub fn set_timeframe(&mut self, timeframe: Timeframe) {
        self.timeframe = Some(timeframe);
    }
}
