#![forbid(unsafe_code)]

//! Grid configuration as data.
//!
//! Every tunable of the grid in one [`GridConfig`], loadable from TOML or
//! JSON (feature `config`) and overridable from the environment.
//!
//! ```toml
//! # egrid.toml
//! [layout]
//! columns = "auto"
//! item_width = 120.0
//! item_height = 140.0
//!
//! [gesture]
//! drag_threshold = 4.0
//!
//! [selection]
//! multi_select = true
//! open_on_double_click = "quick_preview"
//! ```
//!
//! # Environment
//!
//! | Variable | Field |
//! |----------|-------|
//! | `EGRID_DRAG_THRESHOLD` | `gesture.drag_threshold` |
//! | `EGRID_OVERSCAN_ROWS` | `virtualization.overscan_rows` |
//! | `EGRID_SEARCH_DEBOUNCE_MS` | `search.debounce_ms` |
//!
//! Defaults match the constants the components use on their own, so
//! `GridConfig::default()` changes nothing.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use egrid_core::geometry::{Sides, Size};
use egrid_core::gesture::GestureConfig;

use crate::error::ConfigError;
use crate::layout::{ColumnCount, Gap, GridLayout};
use crate::open::OpenOnDoubleClick;
use crate::scroll::ScrollInsets;

pub const ENV_DRAG_THRESHOLD: &str = "EGRID_DRAG_THRESHOLD";
pub const ENV_OVERSCAN_ROWS: &str = "EGRID_OVERSCAN_ROWS";
pub const ENV_SEARCH_DEBOUNCE_MS: &str = "EGRID_SEARCH_DEBOUNCE_MS";

/// Top-level grid configuration.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct GridConfig {
    pub layout: LayoutConfig,
    pub gesture: GesturePolicyConfig,
    pub virtualization: VirtualizationConfig,
    pub selection: SelectionConfig,
    pub search: SearchConfig,
    pub scroll: ScrollInsets,
}

/// Cell geometry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct LayoutConfig {
    pub columns: ColumnCount,
    pub item_width: f32,
    pub item_height: f32,
    pub gap_x: f32,
    pub gap_y: f32,
    /// Uniform outer padding.
    pub padding: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let layout = GridLayout::default();
        Self {
            columns: layout.columns,
            item_width: layout.item_size.width,
            item_height: layout.item_size.height,
            gap_x: layout.gap.x,
            gap_y: layout.gap.y,
            padding: layout.padding.top,
        }
    }
}

/// Pointer gesture thresholds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct GesturePolicyConfig {
    /// Manhattan distance in pixels before a press becomes a drag. Default: 3.
    pub drag_threshold: f32,
    /// Double-click window. Default: 300.
    pub multi_click_timeout_ms: u64,
    /// Manhattan distance between clicks of a double-click. Default: 2.
    pub click_tolerance: f32,
}

impl Default for GesturePolicyConfig {
    fn default() -> Self {
        let g = GestureConfig::default();
        Self {
            drag_threshold: g.drag_threshold,
            multi_click_timeout_ms: g.multi_click_timeout.as_millis() as u64,
            click_tolerance: g.click_tolerance,
        }
    }
}

/// Mounted-window sizing and pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct VirtualizationConfig {
    /// Rows mounted beyond each viewport edge. Default: 2.
    pub overscan_rows: usize,
    /// Distance from the end, in rows, that requests the next page. Default: 5.
    pub load_more_rows: usize,
}

impl Default for VirtualizationConfig {
    fn default() -> Self {
        Self {
            overscan_rows: 2,
            load_more_rows: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SelectionConfig {
    pub multi_select: bool,
    pub open_on_double_click: OpenOnDoubleClick,
    /// Map Enter to open.
    pub enter_opens: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            multi_select: true,
            open_on_double_click: OpenOnDoubleClick::default(),
            enter_opens: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SearchConfig {
    /// Search input debounce. Default: 300.
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

impl GridConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str::<Self>(s).map_err(ConfigError::Toml)?.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(s).map_err(ConfigError::Json)?.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a custom environment lookup (for tests).
    ///
    /// Unparseable values are reported as validation errors rather than
    /// silently ignored.
    pub fn with_env<F>(mut self, get_env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();
        if let Some(raw) = get_env(ENV_DRAG_THRESHOLD) {
            match raw.trim().parse::<f32>() {
                Ok(v) => self.gesture.drag_threshold = v,
                Err(_) => errors.push(format!("{ENV_DRAG_THRESHOLD}: not a number: {raw:?}")),
            }
        }
        if let Some(raw) = get_env(ENV_OVERSCAN_ROWS) {
            match raw.trim().parse::<usize>() {
                Ok(v) => self.virtualization.overscan_rows = v,
                Err(_) => errors.push(format!("{ENV_OVERSCAN_ROWS}: not a row count: {raw:?}")),
            }
        }
        if let Some(raw) = get_env(ENV_SEARCH_DEBOUNCE_MS) {
            match raw.trim().parse::<u64>() {
                Ok(v) => self.search.debounce_ms = v,
                Err(_) => errors.push(format!("{ENV_SEARCH_DEBOUNCE_MS}: not milliseconds: {raw:?}")),
            }
        }
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }
        self.validated()
    }

    /// Return `self` if it validates, else the collected errors.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Check every field; returns one message per problem.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Err(err) = self.to_layout().validate() {
            errors.push(err.to_string());
        }
        if !(self.layout.padding.is_finite() && self.layout.padding >= 0.0) {
            errors.push(format!("layout.padding must be >= 0, got {}", self.layout.padding));
        }
        if !(self.gesture.drag_threshold.is_finite() && self.gesture.drag_threshold > 0.0) {
            errors.push(format!(
                "gesture.drag_threshold must be > 0, got {}",
                self.gesture.drag_threshold
            ));
        }
        if !(self.gesture.click_tolerance.is_finite() && self.gesture.click_tolerance >= 0.0) {
            errors.push(format!(
                "gesture.click_tolerance must be >= 0, got {}",
                self.gesture.click_tolerance
            ));
        }
        if self.gesture.multi_click_timeout_ms == 0 {
            errors.push("gesture.multi_click_timeout_ms must be > 0".into());
        }
        if self.scroll.top < 0.0 || self.scroll.bottom < 0.0 {
            errors.push("scroll insets must be >= 0".into());
        }
        errors
    }

    /// Layout with the configured geometry and no width yet.
    #[must_use]
    pub fn to_layout(&self) -> GridLayout {
        GridLayout {
            columns: self.layout.columns,
            item_size: Size::new(self.layout.item_width, self.layout.item_height),
            gap: Gap::new(self.layout.gap_x, self.layout.gap_y),
            padding: Sides::all(self.layout.padding),
            width: 0.0,
        }
    }

    #[must_use]
    pub fn to_gesture_config(&self) -> GestureConfig {
        GestureConfig {
            multi_click_timeout: Duration::from_millis(self.gesture.multi_click_timeout_ms),
            drag_threshold: self.gesture.drag_threshold,
            click_tolerance: self.gesture.click_tolerance,
        }
    }

    #[must_use]
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }
}
