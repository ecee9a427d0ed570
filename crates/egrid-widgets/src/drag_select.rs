#![forbid(unsafe_code)]

//! Drag-select target tracker.
//!
//! Tracks which grid indices the current drag considers selected, so each
//! tick can be turned into an `added` / `removed` delta against the previous
//! tick. The tracker only trusts what it can see: mounted targets are
//! re-derived from the selection model on every tick, because the
//! virtualizer may have mounted or unmounted rows since the last one.
//! Targets that scrolled out of the mounted window are kept as they were.

use std::collections::BTreeSet;
use std::ops::Range;

/// Per-tick membership delta, as grid indices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetDelta {
    pub added: Vec<usize>,
    pub removed: Vec<usize>,
}

impl TargetDelta {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Set of indices the drag considers selected.
#[derive(Debug, Clone, Default)]
pub struct DragSelectTracker {
    selected: BTreeSet<usize>,
}

impl DragSelectTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-derive the state of every mounted index from `is_selected`.
    /// Unmounted indices keep their previous state.
    pub fn sync_mounted(&mut self, mounted: Range<usize>, mut is_selected: impl FnMut(usize) -> bool) {
        for index in mounted {
            if is_selected(index) {
                self.selected.insert(index);
            } else {
                self.selected.remove(&index);
            }
        }
    }

    /// Move to `desired` for the mounted window and report what changed.
    ///
    /// `desired` must only contain mounted indices. Previously selected
    /// indices outside the window are neither reported nor dropped.
    pub fn advance(&mut self, mounted: Range<usize>, desired: &BTreeSet<usize>) -> TargetDelta {
        let added: Vec<usize> = desired.difference(&self.selected).copied().collect();
        let removed: Vec<usize> = self
            .selected
            .iter()
            .copied()
            .filter(|i| mounted.contains(i) && !desired.contains(i))
            .collect();

        for i in &removed {
            self.selected.remove(i);
        }
        self.selected.extend(added.iter().copied());
        TargetDelta { added, removed }
    }

    /// Smallest selected index, if any.
    #[must_use]
    pub fn first(&self) -> Option<usize> {
        self.selected.first().copied()
    }

    /// Whether `index` is tracked as selected.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Tracked indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    /// Forget every target.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
