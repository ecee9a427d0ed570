#![forbid(unsafe_code)]

//! egrid public facade crate.
//!
//! Re-exports the types a host needs to embed the explorer grid and offers
//! a prelude for day-to-day use.
//!
//! ```ignore
//! use egrid::prelude::*;
//!
//! fn build() -> egrid::Result<ExplorerGrid> {
//!     let config = GridConfig::from_env()?;
//!     let grid = GridBuilder::new()
//!         .config(config)
//!         .context(ExplorerContext::new())
//!         .viewport(1024.0, 768.0)
//!         .build()?;
//!     Ok(grid)
//! }
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use egrid_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind};
pub use egrid_core::geometry::{Point, Rect, Sides, Size};
pub use egrid_core::observable::{Observable, Subscription};

#[cfg(feature = "tracing-json")]
pub use egrid_core::logging::init_json_logging;

// --- Widget re-exports -----------------------------------------------------

pub use egrid_widgets::{
    ColumnCount, ConfigError, ExplorerContext, ExplorerGrid, ExplorerHost, ExplorerItem, GridBuilder, GridConfig,
    GridError, GridOutcome, ItemId, ItemKind, ItemState, NavigationTarget, OpenOnDoubleClick, OpenOutcome,
    PlatformError, QuickPreview, ScrollInsets, SelectionChange, SelectionModel, Toast, ToastLevel,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for egrid hosts.
#[derive(Debug)]
pub enum Error {
    /// The grid could not be built.
    Grid(GridError),
    /// Configuration failed to load or validate.
    Config(ConfigError),
    /// A host platform call failed.
    Platform(PlatformError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Platform(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Platform(err) => Some(err),
        }
    }
}

impl From<GridError> for Error {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<PlatformError> for Error {
    fn from(err: PlatformError) -> Self {
        Self::Platform(err)
    }
}

/// Standard result type for egrid APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, Event, ExplorerContext, ExplorerGrid, ExplorerHost, ExplorerItem, GridBuilder, GridConfig,
        GridOutcome, ItemState, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind,
        NavigationTarget, OpenOutcome, PlatformError, Result,
    };

    pub use crate::{core, widgets};
}

pub use egrid_core as core;
pub use egrid_widgets as widgets;
