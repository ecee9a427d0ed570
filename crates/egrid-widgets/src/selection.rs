#![forbid(unsafe_code)]

//! Selection model: selected items plus the active anchor.
//!
//! # Invariants
//!
//! 1. `add` and `remove` are idempotent.
//! 2. With multi-select disabled the set holds at most one member.
//! 3. Every call that changes membership emits exactly one
//!    [`SelectionChange`] naming only the ids whose membership changed.
//!    Calls that change nothing emit nothing.
//! 4. The anchor, when set, is a member of the set.
//!
//! Renderers subscribe to the change signal and redraw only the items named
//! in each delta, so redraw cost stays proportional to the change.

use ahash::AHashMap;
use egrid_core::observable::{Signal, Subscription};

use crate::item::{ExplorerItem, ItemId};

/// Membership delta emitted by [`SelectionModel`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionChange {
    pub added: Vec<ItemId>,
    pub removed: Vec<ItemId>,
}

impl SelectionChange {
    /// Whether the delta names no ids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Total number of ids named.
    #[must_use]
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len()
    }
}

/// Set of selected items keyed by id, with the anchor used for keyboard
/// range operations.
#[derive(Debug)]
pub struct SelectionModel {
    members: AHashMap<ItemId, ExplorerItem>,
    anchor: Option<ItemId>,
    multi_select: bool,
    changes: Signal<SelectionChange>,
}

impl Default for SelectionModel {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SelectionModel {
    /// Create an empty selection.
    #[must_use]
    pub fn new(multi_select: bool) -> Self {
        Self {
            members: AHashMap::new(),
            anchor: None,
            multi_select,
            changes: Signal::new(),
        }
    }

    /// Whether `id` is selected.
    #[inline]
    #[must_use]
    pub fn has(&self, id: &ItemId) -> bool {
        self.members.contains_key(id)
    }

    /// Number of selected items.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Whether nothing is selected.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Selected ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.members.keys()
    }

    /// Selected items, in no particular order.
    pub fn items(&self) -> impl Iterator<Item = &ExplorerItem> {
        self.members.values()
    }

    /// Payload of a selected item.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&ExplorerItem> {
        self.members.get(id)
    }

    /// Whether more than one item may be selected.
    #[must_use]
    pub const fn multi_select(&self) -> bool {
        self.multi_select
    }

    /// Enable or disable multi-select.
    ///
    /// Disabling collapses the set to the anchor, or to an arbitrary member if
    /// there is no anchor. The survivor becomes the anchor.
    pub fn set_multi_select(&mut self, enabled: bool) {
        if self.multi_select == enabled {
            return;
        }
        self.multi_select = enabled;
        if enabled || self.members.len() <= 1 {
            return;
        }
        let keep = self
            .anchor
            .clone()
            .or_else(|| self.members.keys().min().cloned());
        self.retain(|id, _| Some(id) == keep.as_ref());
        self.anchor = keep;
    }

    /// Active anchor.
    #[must_use]
    pub fn anchor(&self) -> Option<&ItemId> {
        self.anchor.as_ref()
    }

    /// Set the anchor. Ids that are not members are refused and leave the
    /// anchor unchanged; returns whether it was accepted.
    pub fn set_anchor(&mut self, id: Option<ItemId>) -> bool {
        match id {
            Some(id) if !self.members.contains_key(&id) => false,
            other => {
                self.anchor = other;
                true
            }
        }
    }

    /// Select an item. Returns `true` if membership changed.
    pub fn add(&mut self, item: &ExplorerItem) -> bool {
        self.apply(std::slice::from_ref(item), &[])
    }

    /// Deselect an item. Returns `true` if membership changed.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        self.apply(&[], std::slice::from_ref(id))
    }

    /// Flip an item's membership. Returns `true` if it is now selected.
    pub fn toggle(&mut self, item: &ExplorerItem) -> bool {
        let id = item.id();
        if self.has(&id) {
            self.remove(&id);
            false
        } else {
            self.add(item);
            true
        }
    }

    /// Replace the whole selection with `items`. The anchor is cleared unless
    /// it is still a member.
    pub fn reset(&mut self, items: &[ExplorerItem]) {
        let mut next: AHashMap<ItemId, ExplorerItem> = AHashMap::with_capacity(items.len());
        for item in items {
            next.insert(item.id(), item.clone());
            if !self.multi_select {
                break;
            }
        }

        let mut change = SelectionChange::default();
        for id in self.members.keys() {
            if !next.contains_key(id) {
                change.removed.push(id.clone());
            }
        }
        for id in next.keys() {
            if !self.members.contains_key(id) {
                change.added.push(id.clone());
            }
        }

        // Payloads may refresh even when ids are unchanged.
        self.members = next;
        self.fix_anchor();
        self.publish("reset", change);
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.reset(&[]);
    }

    /// Apply a batch of additions and removals as a single change.
    ///
    /// Removals are applied after additions, so an id named in both ends up
    /// deselected. With multi-select disabled only the last addition is kept.
    /// Returns `true` if membership changed.
    pub fn apply(&mut self, added: &[ExplorerItem], removed: &[ItemId]) -> bool {
        let mut change = SelectionChange::default();

        if !self.multi_select
            && let Some(last) = added.last()
        {
            let id = last.id();
            let stale: Vec<ItemId> = self.members.keys().filter(|k| **k != id).cloned().collect();
            for k in stale {
                self.members.remove(&k);
                change.removed.push(k);
            }
            if self.members.insert(id.clone(), last.clone()).is_none() {
                change.added.push(id);
            }
        } else {
            for item in added {
                let id = item.id();
                if !self.members.contains_key(&id) {
                    self.members.insert(id.clone(), item.clone());
                    change.added.push(id);
                }
            }
        }

        for id in removed {
            if self.members.remove(id).is_some() {
                if let Some(pos) = change.added.iter().position(|a| a == id) {
                    change.added.swap_remove(pos);
                } else {
                    change.removed.push(id.clone());
                }
            }
        }

        self.fix_anchor();
        self.publish("apply", change)
    }

    /// Keep only members matching `keep`, emitting one change for the rest.
    /// Used to prune ids that left the collection.
    pub fn retain(&mut self, mut keep: impl FnMut(&ItemId, &ExplorerItem) -> bool) -> usize {
        let mut change = SelectionChange::default();
        self.members.retain(|id, item| {
            let kept = keep(id, item);
            if !kept {
                change.removed.push(id.clone());
            }
            kept
        });
        let pruned = change.removed.len();
        self.fix_anchor();
        self.publish("retain", change);
        pruned
    }

    /// Subscribe to membership deltas.
    pub fn subscribe(&self, callback: impl Fn(&SelectionChange) + 'static) -> Subscription {
        self.changes.subscribe(callback)
    }

    fn fix_anchor(&mut self) {
        if let Some(anchor) = &self.anchor
            && !self.members.contains_key(anchor)
        {
            self.anchor = None;
        }
    }

    fn publish(&self, action: &'static str, change: SelectionChange) -> bool {
        if change.is_empty() {
            return false;
        }
        tracing::debug!(
            message = "selection.change",
            action,
            added = change.added.len(),
            removed = change.removed.len(),
            size = self.members.len(),
        );
        self.changes.emit(&change);
        true
    }
}
