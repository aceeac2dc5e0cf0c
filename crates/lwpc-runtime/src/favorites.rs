//! Timeframes, favorites and the selector menus built from host settings.
//!
//! Favorites are held in memory only. Menu settings arrive from the host as
//! JSON; a blob of the wrong shape is logged and produces an empty menu
//! instead of an error.

use std::fmt;
use std::str::FromStr;

use lwpc_layout::Topology;
use serde::{Deserialize, Serialize};

use crate::chart::SeriesType;

// ============================================================================
// Timeframes
// ============================================================================

/// Unit of a [`Timeframe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Interval {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Interval {
    /// Every interval, shortest first.
    pub const ALL: [Self; 7] = [
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Year,
    ];

    /// Single-character wire code (`s m h D W M Y`).
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Second => 's',
            Self::Minute => 'm',
            Self::Hour => 'h',
            Self::Day => 'D',
            Self::Week => 'W',
            Self::Month => 'M',
            Self::Year => 'Y',
        }
    }

    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|interval| interval.code() == code)
    }

    /// Length of one interval in seconds, as the host counts them.
    ///
    /// A month is 18_396_000 s and a year twelve of those.
    #[must_use]
    pub const fn seconds(self) -> u64 {
        match self {
            Self::Second => 1,
            Self::Minute => 60,
            Self::Hour => 3_600,
            Self::Day => 86_400,
            Self::Week => 604_800,
            Self::Month => 18_396_000,
            Self::Year => 220_752_000,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Second => "Second",
            Self::Minute => "Minute",
            Self::Hour => "Hour",
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
            Self::Year => "Year",
        }
    }
}

/// `multiplier` x `period`, e.g. `5m` or `1D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timeframe {
    pub multiplier: u32,
    pub period: Interval,
}

impl Timeframe {
    #[must_use]
    pub const fn new(multiplier: u32, period: Interval) -> Self {
        Self { multiplier, period }
    }

    #[must_use]
    pub const fn to_seconds(self) -> u64 {
        self.multiplier as u64 * self.period.seconds()
    }

    /// Largest whole-interval timeframe not longer than `seconds`.
    ///
    /// `from_seconds(86_399)` is `23h`. Returns `None` for zero.
    #[must_use]
    pub fn from_seconds(seconds: u64) -> Option<Self> {
        Interval::ALL.iter().rev().find_map(|&period| {
            let multiplier = seconds / period.seconds();
            (multiplier >= 1).then(|| Self::new(u32::try_from(multiplier).unwrap_or(u32::MAX), period))
        })
    }

    /// Human label, e.g. `5 Minutes`.
    #[must_use]
    pub fn label(self) -> String {
        let plural = if self.multiplier == 1 { "" } else { "s" };
        format!("{} {}{plural}", self.multiplier, self.period.name())
    }

    /// Compact label for a topbar button: `1D` shortens to `D`.
    #[must_use]
    pub fn button_label(self) -> String {
        let long_period = matches!(
            self.period,
            Interval::Day | Interval::Week | Interval::Month | Interval::Year
        );
        if self.multiplier == 1 && long_period {
            self.period.code().to_string()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.multiplier, self.period.code())
    }
}

impl PartialOrd for Timeframe {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timeframe {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_seconds()
            .cmp(&other.to_seconds())
            .then(self.period.cmp(&other.period))
    }
}

/// A timeframe string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeframeParseError(pub String);

impl fmt::Display for TimeframeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid timeframe {:?}", self.0)
    }
}

impl std::error::Error for TimeframeParseError {}

impl FromStr for Timeframe {
    type Err = TimeframeParseError;

    /// Parses `<multiplier><code>`; a missing multiplier means 1 and a
    /// fractional one is truncated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TimeframeParseError(s.to_owned());
        let code = s.chars().last().ok_or_else(err)?;
        let period = Interval::from_code(code).ok_or_else(err)?;
        let digits = &s[..s.len() - code.len_utf8()];
        let multiplier = if digits.is_empty() {
            1
        } else {
            let value: f64 = digits.parse().map_err(|_| err())?;
            if !(value >= 1.0 && value <= f64::from(u32::MAX)) {
                return Err(err());
            }
            value.floor() as u32
        };
        Ok(Self::new(multiplier, period))
    }
}

impl TryFrom<String> for Timeframe {
    type Error = TimeframeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timeframe> for String {
    fn from(value: Timeframe) -> Self {
        value.to_string()
    }
}

// ============================================================================
// Favorites
// ============================================================================

/// Ordered, duplicate-free favorites list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorites<T> {
    items: Vec<T>,
}

impl<T> Default for Favorites<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Ord> Favorites<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert in sorted position. Returns `false` if already present.
    pub fn add(&mut self, item: T) -> bool {
        match self.items.binary_search(&item) {
            Ok(_) => false,
            Err(at) => {
                self.items.insert(at, item);
                true
            }
        }
    }

    /// Returns `false` if `item` was not a favorite.
    pub fn remove(&mut self, item: &T) -> bool {
        match self.items.binary_search(item) {
            Ok(at) => {
                self.items.remove(at);
                true
            }
            Err(_) => false,
        }
    }

    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.items.binary_search(item).is_ok()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Ord> FromIterator<T> for Favorites<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut favorites = Self::new();
        for item in iter {
            favorites.add(item);
        }
        favorites
    }
}

impl<'a, T> IntoIterator for &'a Favorites<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// Menus
// ============================================================================

/// One row of a selector menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem<T> {
    /// Section header.
    Section { label: &'static str, visible: bool },
    /// Selectable entry; `star` marks a favorite.
    Entry { label: String, value: T, star: bool },
}

/// Selector menu plus the favorites it was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu<T> {
    pub items: Vec<MenuItem<T>>,
    pub favorites: Favorites<T>,
}

impl<T> Default for Menu<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            favorites: Favorites::default(),
        }
    }
}

impl<T: Ord + Clone> Menu<T> {
    /// Entries in menu order.
    pub fn entries(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter().filter_map(|item| match item {
            MenuItem::Entry { value, .. } => Some(value),
            MenuItem::Section { .. } => None,
        })
    }

    /// Star or unstar `value`, keeping entries and favorites consistent.
    pub fn set_favorite(&mut self, value: &T, favorite: bool) -> bool {
        let changed = if favorite {
            self.favorites.add(value.clone())
        } else {
            self.favorites.remove(value)
        };
        for item in &mut self.items {
            if let MenuItem::Entry { value: v, star, .. } = item
                && v == value
            {
                *star = favorite;
            }
        }
        changed
    }
}

pub type TimeframeMenu = Menu<Timeframe>;
pub type LayoutMenu = Menu<Topology>;
pub type SeriesMenu = Menu<SeriesType>;

/// Built-in timeframe menu settings.
pub const DEFAULT_TIMEFRAME_MENU: &str = r#"{
    "menu_listings": {"s": [1, 2, 5, 15, 30], "m": [1, 2, 5, 15, 30], "h": [1, 2, 4], "D": [1], "W": [1]},
    "favorites": ["1D"]
}"#;

/// Built-in layout menu settings.
pub const DEFAULT_LAYOUT_MENU: &str = r#"{"favorites": [0, 1, 2]}"#;

/// Built-in series menu settings.
pub const DEFAULT_SERIES_MENU: &str = r#"{"favorites": [9]}"#;

#[derive(Debug, Deserialize)]
struct TimeframeSettings {
    favorites: Vec<String>,
    menu_listings: TimeframeListings,
}

#[derive(Debug, Deserialize)]
struct TimeframeListings {
    s: Option<Vec<f64>>,
    m: Option<Vec<f64>>,
    h: Option<Vec<f64>>,
    #[serde(rename = "D")]
    day: Option<Vec<f64>>,
    #[serde(rename = "W")]
    week: Option<Vec<f64>>,
    #[serde(rename = "M")]
    month: Option<Vec<f64>>,
    #[serde(rename = "Y")]
    year: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct FavoriteSettings<T> {
    favorites: Vec<T>,
}

impl Menu<Timeframe> {
    /// Build from `{"favorites": ["1D", ..], "menu_listings": {"m": [1, 5], ..}}`.
    ///
    /// Only listed timeframes can be favorites. Malformed settings are logged
    /// and yield an empty menu.
    #[must_use]
    pub fn from_json(json: &str) -> Self {
        let settings: TimeframeSettings = match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(error) => {
                tracing::warn!(%error, "timeframe menu settings are malformed; menu left empty");
                return Self::default();
            }
        };

        let listings = settings.menu_listings;
        let sections = [
            ("Seconds", false, Interval::Second, listings.s),
            ("Minutes", true, Interval::Minute, listings.m),
            ("Hours", true, Interval::Hour, listings.h),
            ("Days", true, Interval::Day, listings.day),
            ("Weeks", false, Interval::Week, listings.week),
            ("Months", false, Interval::Month, listings.month),
            ("Years", false, Interval::Year, listings.year),
        ];

        let mut menu = Self::default();
        for (label, visible, period, values) in sections {
            let Some(values) = values else { continue };
            menu.items.push(MenuItem::Section { label, visible });
            for value in values {
                if !(value >= 1.0 && value <= f64::from(u32::MAX)) {
                    tracing::warn!(value, period = period.name(), "skipping invalid timeframe listing");
                    continue;
                }
                let timeframe = Timeframe::new(value.floor() as u32, period);
                let star = settings.favorites.contains(&timeframe.to_string());
                if star {
                    menu.favorites.add(timeframe);
                }
                menu.items.push(MenuItem::Entry {
                    label: timeframe.label(),
                    value: timeframe,
                    star,
                });
            }
        }
        menu
    }
}

impl Menu<Topology> {
    /// Build the layout menu from `{"favorites": [<topology index>, ..]}`.
    #[must_use]
    pub fn from_json(json: &str) -> Self {
        let settings: FavoriteSettings<Topology> = match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(error) => {
                tracing::warn!(%error, "layout menu settings are malformed; menu left empty");
                return Self::default();
            }
        };
        let favorites: Favorites<Topology> = settings.favorites.into_iter().collect();
        let groups: [(&'static str, bool, &[Topology]); 3] = [
            (
                "Basic",
                true,
                &[Topology::Single, Topology::DoubleVert, Topology::DoubleHoriz],
            ),
            (
                "Triple",
                false,
                &[
                    Topology::TripleVert,
                    Topology::TripleHoriz,
                    Topology::TripleVertLeft,
                    Topology::TripleVertRight,
                    Topology::TripleHorizTop,
                    Topology::TripleHorizBottom,
                ],
            ),
            (
                "Quad",
                false,
                &[
                    Topology::QuadSqV,
                    Topology::QuadSqH,
                    Topology::QuadVert,
                    Topology::QuadHoriz,
                    Topology::QuadLeft,
                    Topology::QuadRight,
                    Topology::QuadTop,
                    Topology::QuadBottom,
                ],
            ),
        ];

        let mut items = Vec::new();
        for (label, visible, topologies) in groups {
            items.push(MenuItem::Section { label, visible });
            items.extend(topologies.iter().map(|&topology| MenuItem::Entry {
                label: topology.name().to_owned(),
                value: topology,
                star: favorites.contains(&topology),
            }));
        }
        Self { items, favorites }
    }
}

impl Menu<SeriesType> {
    /// Build the series menu from `{"favorites": [<series index>, ..]}`.
    #[must_use]
    pub fn from_json(json: &str) -> Self {
        let settings: FavoriteSettings<SeriesType> = match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(error) => {
                tracing::warn!(%error, "series menu settings are malformed; menu left empty");
                return Self::default();
            }
        };
        let favorites: Favorites<SeriesType> = settings.favorites.into_iter().collect();
        let items = SeriesType::SELECTABLE
            .iter()
            .map(|&series| MenuItem::Entry {
                label: series.label().to_owned(),
                value: series,
                star: favorites.contains(&series),
            })
            .collect();
        Self { items, favorites }
    }
}
