//! Layout tunables.
//!
//! Only the minimum frame fractions are runtime configuration. Separator
//! handle geometry is fixed at compile time.
//!
//! ```toml
//! # lwpc-layout.toml
//! min_frame_width = 0.2
//! min_frame_height = 0.1
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Thickness of a separator handle in pixels.
pub const RESIZE_HANDLE_WIDTH: i32 = 8;

/// Offset that centres a separator handle on its boundary.
pub const HALF_HANDLE_WIDTH: i32 = RESIZE_HANDLE_WIDTH / 2;

/// Default minimum share of the container width a frame can be dragged to.
pub const DEFAULT_MIN_FRAME_WIDTH: f64 = 0.15;

/// Default minimum share of the container height a frame can be dragged to.
pub const DEFAULT_MIN_FRAME_HEIGHT: f64 = 0.10;

/// Minimum frame sizes enforced while dragging separators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Minimum fraction of the container width one frame may occupy.
    pub min_frame_width: f64,
    /// Minimum fraction of the container height one frame may occupy.
    pub min_frame_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_frame_width: DEFAULT_MIN_FRAME_WIDTH,
            min_frame_height: DEFAULT_MIN_FRAME_HEIGHT,
        }
    }
}

impl LayoutConfig {
    /// Validate the fractions.
    ///
    /// Returns a list of violations; empty means the config is usable. A
    /// minimum above one half would make a two-way split unsatisfiable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for (name, value) in [
            ("min_frame_width", self.min_frame_width),
            ("min_frame_height", self.min_frame_height),
        ] {
            if !(value > 0.0 && value <= 0.5) {
                errors.push(format!("{name} must be in (0, 0.5], got {value}"));
            }
        }
        errors
    }

    /// Validate, returning the config on success.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-files")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-files")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }
}

/// Error loading or validating a [`LayoutConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// JSON parse error.
    #[cfg(feature = "config-files")]
    Json(serde_json::Error),
    /// TOML parse error.
    #[cfg(feature = "config-files")]
    Toml(toml::de::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config-files")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            #[cfg(feature = "config-files")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Validation(errors) => write!(f, "validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-files")]
            Self::Json(e) => Some(e),
            #[cfg(feature = "config-files")]
            Self::Toml(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
