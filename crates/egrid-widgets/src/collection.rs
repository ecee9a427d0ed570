#![forbid(unsafe_code)]

//! Ordered, possibly paginated item collection.
//!
//! The collection is the logical list the grid lays out. It keeps an
//! id → index map so selection lookups, anchor resolution and open dispatch
//! never scan the full list.
//!
//! # Invariants
//!
//! 1. Item ids are unique: a page entry whose id is already present is
//!    dropped (a backend page can overlap the previous one when rows shift).
//! 2. `index_of(id)` and `get(index)` agree: `get(index_of(id)).id() == id`.

use ahash::AHashMap;

use crate::item::{ExplorerItem, ItemId};

/// The items currently known to the grid, in display order.
#[derive(Debug, Clone, Default)]
pub struct ItemCollection {
    items: Vec<ExplorerItem>,
    index: AHashMap<ItemId, usize>,
    context: Option<String>,
    has_more: bool,
}

impl ItemCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from a first page.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = ExplorerItem>) -> Self {
        let mut collection = Self::new();
        collection.push_page(items);
        collection
    }

    /// Replace every item, e.g. after navigating or re-sorting.
    ///
    /// `context` identifies what the items belong to (a location path, a
    /// search). Returns `true` if it differs from the previous context, in
    /// which case the caller resets the selection.
    pub fn replace(&mut self, context: Option<String>, items: impl IntoIterator<Item = ExplorerItem>) -> bool {
        let changed = self.context != context;
        self.context = context;
        self.items.clear();
        self.index.clear();
        self.has_more = false;
        self.push_page(items);
        changed
    }

    /// Append a page. Returns the number of items actually added.
    pub fn push_page(&mut self, items: impl IntoIterator<Item = ExplorerItem>) -> usize {
        let before = self.items.len();
        for item in items {
            let id = item.id();
            if self.index.contains_key(&id) {
                tracing::debug!(message = "collection.duplicate", id = %id);
                continue;
            }
            self.index.insert(id, self.items.len());
            self.items.push(item);
        }
        self.items.len() - before
    }

    /// Item at a grid index.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ExplorerItem> {
        self.items.get(index)
    }

    /// Grid index of an item id.
    #[inline]
    #[must_use]
    pub fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Whether an id is present.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.index.contains_key(id)
    }

    /// Number of loaded items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items are loaded.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All loaded items in display order.
    #[must_use]
    pub fn items(&self) -> &[ExplorerItem] {
        &self.items
    }

    /// Current context key.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Whether the backend has more pages after the loaded ones.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Record whether more pages are available.
    pub fn set_has_more(&mut self, has_more: bool) {
        self.has_more = has_more;
    }
}
