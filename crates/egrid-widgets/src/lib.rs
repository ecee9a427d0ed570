#![forbid(unsafe_code)]

//! Explorer grid: a virtualized, multi-select grid of file-explorer items.
//!
//! # Role in egrid
//! `egrid-widgets` is the behavior layer. It turns the input primitives of
//! `egrid-core` into selection state for a grid whose rows are only partially
//! mounted at any time.
//!
//! # Layers
//! - [`item`] / [`collection`]: the items, their ids, and the paged list.
//! - [`selection`]: the selection set, its anchor and change deltas.
//! - [`layout`] / [`virtualized`] / [`spatial`]: geometry, the mounted
//!   window, and hit-testing over mounted cells only.
//! - [`marquee`] / [`drag_select`]: rubber-band selection, including rows
//!   that were never mounted during a fast drag.
//! - [`keyboard`] / [`scroll`]: arrow navigation and scroll-into-view.
//! - [`open`]: double-click dispatch to the host.
//! - [`grid`]: [`ExplorerGrid`], which wires all of the above to events.
//!
//! # How it fits in the system
//! The host renders cells from [`ExplorerGrid::item_state`], forwards input
//! through [`ExplorerGrid::handle_event`], and reacts to the returned
//! [`GridOutcome`]s. Shared flags live on an [`ExplorerContext`].

pub mod collection;
pub mod config;
pub mod context;
pub mod drag_select;
pub mod error;
pub mod grid;
pub mod item;
pub mod keyboard;
pub mod layout;
pub mod marquee;
pub mod notification_queue;
pub mod open;
pub mod scroll;
pub mod selection;
pub mod spatial;
pub mod virtualized;

pub use collection::ItemCollection;
pub use config::GridConfig;
pub use context::{ExplorerContext, QuickPreview};
pub use error::{ConfigError, GridError, PlatformError};
pub use grid::{ExplorerGrid, GridBuilder, GridOutcome, ItemState};
pub use item::{ExplorerItem, ItemId, ItemKind};
pub use layout::{ColumnCount, Gap, GridItem, GridLayout};
pub use marquee::{DragKind, MarqueeController};
pub use notification_queue::{Toast, ToastLevel, ToastQueue};
pub use open::{ExplorerHost, NavigationTarget, OpenDispatcher, OpenOnDoubleClick, OpenOutcome};
pub use scroll::ScrollInsets;
pub use selection::{SelectionChange, SelectionModel};
pub use spatial::SpatialIndex;
pub use virtualized::{Viewport, VirtualGrid};
