#![forbid(unsafe_code)]

//! Marquee (rubber-band) selection over a virtualized grid.
//!
//! # State machine
//!
//! ```text
//!            drag start              drag end / cancel
//!   Idle ──────────────────▶ Selecting ─────────────────▶ Idle
//!     │                                                    ▲
//!     └── drag start on a selected item ──▶ ItemDrag ──────┘
//! ```
//!
//! While `Selecting`, the explorer's `is_drag_selecting` flag is `true`.
//!
//! # Unmounted rows
//!
//! Hit-testing only sees mounted cells. When a fast drag starts in rows that
//! have since been unmounted, the cells between the drag origin and the
//! nearest mounted hit never intersect anything. Each tick therefore checks
//! whether the hits landed in a single column and, if so, synthesizes the
//! membership of the rows between the origin and that hit by index
//! arithmetic (`nearest ± k * columns`).
//!
//! Ids removed that way have no mounted target to carry the state; they are
//! remembered in a shadow set so re-mounted targets re-sync correctly.

use std::collections::BTreeSet;

use ahash::{AHashMap, AHashSet};
use egrid_core::geometry::{Point, Rect};
use egrid_core::observable::Observable;

use crate::collection::ItemCollection;
use crate::drag_select::DragSelectTracker;
use crate::item::{ExplorerItem, ItemId};
use crate::layout::GridItem;
use crate::selection::SelectionModel;
use crate::spatial::SpatialIndex;

/// What a drag turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// Rubber-band selection.
    Marquee,
    /// Drag-and-drop of the current selection.
    ItemDrag,
}

#[derive(Debug, Clone)]
struct DragSession {
    start: Point,
    shift: bool,
    /// Selection at drag start; shift-drags toggle relative to it.
    base: AHashSet<ItemId>,
    first_column: Option<usize>,
    last_column: Option<usize>,
}

#[derive(Debug, Clone, Default)]
enum MarqueeState {
    #[default]
    Idle,
    Selecting(DragSession),
    ItemDrag,
}

/// Drives the selection model from pointer gestures.
#[derive(Debug)]
pub struct MarqueeController {
    state: MarqueeState,
    tracker: DragSelectTracker,
    shadow: AHashSet<ItemId>,
    is_drag_selecting: Observable<bool>,
}

impl MarqueeController {
    /// Create a controller that reports drag activity through
    /// `is_drag_selecting`.
    #[must_use]
    pub fn new(is_drag_selecting: Observable<bool>) -> Self {
        Self {
            state: MarqueeState::Idle,
            tracker: DragSelectTracker::new(),
            shadow: AHashSet::new(),
            is_drag_selecting,
        }
    }

    /// Whether a marquee drag is in progress.
    #[must_use]
    pub fn is_selecting(&self) -> bool {
        matches!(self.state, MarqueeState::Selecting(_))
    }

    /// Whether an item drag is in progress.
    #[must_use]
    pub fn is_item_drag(&self) -> bool {
        matches!(self.state, MarqueeState::ItemDrag)
    }

    /// Ids known to be unselected without a mounted target.
    #[must_use]
    pub fn shadow(&self) -> &AHashSet<ItemId> {
        &self.shadow
    }

    /// Handle a drag start at content-space `pos`.
    ///
    /// Returns `None` when the drag is ignored (multi-select disabled).
    pub fn begin(
        &mut self,
        pos: Point,
        shift: bool,
        index: &impl SpatialIndex,
        items: &ItemCollection,
        selection: &mut SelectionModel,
    ) -> Option<DragKind> {
        if !selection.multi_select() {
            return None;
        }

        let from_item = index
            .hit(pos)
            .and_then(|cell| items.get(cell.index))
            .is_some_and(|item| selection.has(&item.id()));
        if from_item && !shift {
            self.state = MarqueeState::ItemDrag;
            tracing::debug!(message = "marquee.item_drag", size = selection.size());
            return Some(DragKind::ItemDrag);
        }

        let base = if shift {
            selection.ids().cloned().collect()
        } else {
            selection.clear();
            AHashSet::new()
        };
        self.tracker.clear();
        self.shadow.clear();
        self.state = MarqueeState::Selecting(DragSession {
            start: pos,
            shift,
            base,
            first_column: None,
            last_column: None,
        });
        self.is_drag_selecting.set(true);
        tracing::debug!(message = "marquee.begin", x = pos.x, y = pos.y, shift);
        Some(DragKind::Marquee)
    }

    /// Process one pointer move. Returns `true` if the selection changed.
    ///
    /// Ticks are idempotent: repeating one with the same pointer position
    /// changes nothing.
    pub fn tick(
        &mut self,
        current: Point,
        index: &impl SpatialIndex,
        items: &ItemCollection,
        selection: &mut SelectionModel,
    ) -> bool {
        let MarqueeState::Selecting(session) = &mut self.state else {
            return false;
        };
        let rect = Rect::from_corners(session.start, current);
        let _span = tracing::debug_span!(
            "marquee.tick",
            x = rect.x,
            y = rect.y,
            w = rect.width,
            h = rect.height
        )
        .entered();

        let mounted = index.mounted();
        let shadow = &self.shadow;
        self.tracker.sync_mounted(mounted.clone(), |i| {
            items.get(i).is_some_and(|item| {
                let id = item.id();
                selection.has(&id) && !shadow.contains(&id)
            })
        });

        let hits = index.intersecting(rect);
        let hit_set: BTreeSet<usize> = hits.iter().map(|cell| cell.index).collect();
        let desired: BTreeSet<usize> = if session.shift {
            mounted
                .clone()
                .filter(|i| {
                    let in_base = items.get(*i).is_some_and(|item| session.base.contains(&item.id()));
                    hit_set.contains(i) != in_base
                })
                .collect()
        } else {
            hit_set
        };
        let delta = self.tracker.advance(mounted, &desired);
        if delta.is_empty() {
            return false;
        }

        let mut wanted: Vec<(usize, bool)> = delta
            .added
            .iter()
            .map(|&i| (i, true))
            .chain(delta.removed.iter().map(|&i| (i, false)))
            .collect();
        let mut changed: Vec<GridItem> = delta
            .added
            .iter()
            .chain(delta.removed.iter())
            .filter_map(|&i| index.geometry(i))
            .collect();

        let right = current.x > session.start.x;
        let down = current.y >= session.start.y;
        let columns: BTreeSet<usize> = changed.iter().map(|cell| cell.column).collect();

        let mut synthesized: Vec<(usize, bool)> = Vec::new();
        if columns.len() > 1 {
            changed.sort_by_key(|cell| cell.column);
            if let (Some(first), Some(last)) = (changed.first(), changed.last()) {
                let (a, b) = if right { (first, last) } else { (last, first) };
                session.first_column = Some(a.column);
                session.last_column = Some(b.column);
            }
        } else if let Some(&column) = columns.first() {
            changed.sort_by_key(|cell| cell.row);
            let in_drag_area = changed.first().is_some_and(|cell| {
                if right {
                    current.x >= cell.rect.left()
                } else {
                    current.x <= cell.rect.right()
                }
            });

            if session.last_column != Some(column) || !in_drag_area {
                let nearest = if down { changed.first() } else { changed.last() };
                if let Some(nearest) = nearest {
                    for i in rows_behind(session.start.y, nearest, down, items.len(), index) {
                        let want = match items.get(i) {
                            Some(item) if session.shift => {
                                session.base.contains(&item.id()) != in_drag_area
                            }
                            Some(_) => in_drag_area,
                            None => continue,
                        };
                        synthesized.push((i, want));
                    }
                }
            }

            if !in_drag_area && session.first_column == Some(column) {
                session.first_column = None;
                session.last_column = None;
            } else {
                session.last_column = Some(column);
                session.first_column.get_or_insert(column);
            }
        }

        // Synthesized rows are applied last and win over direct hits.
        let direct = wanted.len();
        wanted.extend(synthesized);
        let mut verdict: AHashMap<ItemId, (usize, bool)> = AHashMap::with_capacity(wanted.len());
        for (n, (i, want)) in wanted.into_iter().enumerate() {
            let Some(item) = items.get(i) else { continue };
            let id = item.id();
            if n >= direct {
                if want {
                    self.shadow.remove(&id);
                } else {
                    self.shadow.insert(id.clone());
                }
            } else if want {
                self.shadow.remove(&id);
            }
            verdict.insert(id, (i, want));
        }

        let mut added: Vec<ExplorerItem> = Vec::new();
        let mut removed: Vec<ItemId> = Vec::new();
        let mut ordered: Vec<(ItemId, (usize, bool))> = verdict.into_iter().collect();
        ordered.sort_by_key(|(_, (i, _))| *i);
        for (id, (i, want)) in ordered {
            if want {
                if let Some(item) = items.get(i) {
                    added.push(item.clone());
                }
            } else {
                removed.push(id);
            }
        }
        selection.apply(&added, &removed)
    }

    /// Finish the drag. Sets the anchor after a marquee.
    pub fn end(&mut self, items: &ItemCollection, selection: &mut SelectionModel) -> Option<DragKind> {
        let kind = match std::mem::take(&mut self.state) {
            MarqueeState::Idle => return None,
            MarqueeState::ItemDrag => DragKind::ItemDrag,
            MarqueeState::Selecting(_) => {
                self.settle_anchor(items, selection);
                DragKind::Marquee
            }
        };
        self.finish();
        Some(kind)
    }

    /// Abandon the drag, keeping whatever the last tick selected. The anchor
    /// is settled as on [`end`](Self::end).
    pub fn cancel(&mut self, items: &ItemCollection, selection: &mut SelectionModel) -> Option<DragKind> {
        let kind = match std::mem::take(&mut self.state) {
            MarqueeState::Idle => return None,
            MarqueeState::ItemDrag => DragKind::ItemDrag,
            MarqueeState::Selecting(_) => {
                self.settle_anchor(items, selection);
                DragKind::Marquee
            }
        };
        tracing::debug!(message = "marquee.cancel", kind = ?kind);
        self.finish();
        Some(kind)
    }

    /// Handle a click (press and release without a drag) at `pos`.
    ///
    /// Returns `true` if the selection changed.
    pub fn click(
        &mut self,
        pos: Point,
        shift: bool,
        preview_open: bool,
        index: &impl SpatialIndex,
        items: &ItemCollection,
        selection: &mut SelectionModel,
    ) -> bool {
        let hit = index
            .hit(pos)
            .and_then(|cell| items.get(cell.index).cloned());

        let changed = if selection.multi_select() {
            match hit {
                Some(_) if shift && preview_open => false,
                Some(item) if shift => {
                    selection.toggle(&item);
                    true
                }
                Some(item) if selection.has(&item.id()) => false,
                Some(item) => {
                    selection.reset(std::slice::from_ref(&item));
                    self.shadow.clear();
                    true
                }
                None if shift => false,
                None => {
                    let had = !selection.is_empty();
                    selection.clear();
                    had
                }
            }
        } else {
            match hit {
                Some(item) => {
                    let same = selection.size() == 1 && selection.has(&item.id());
                    selection.reset(std::slice::from_ref(&item));
                    !same
                }
                None => {
                    let had = !selection.is_empty();
                    selection.clear();
                    had
                }
            }
        };

        let mounted = index.mounted();
        let shadow = &self.shadow;
        self.tracker.sync_mounted(mounted, |i| {
            items.get(i).is_some_and(|item| {
                let id = item.id();
                selection.has(&id) && !shadow.contains(&id)
            })
        });
        self.settle_anchor(items, selection);
        changed
    }

    /// Forget every tracked target, e.g. after Escape.
    pub fn clear_targets(&mut self) {
        self.tracker.clear();
        self.shadow.clear();
    }

    /// Anchor = selected target with the smallest index, falling back to the
    /// selection member with the smallest index.
    fn settle_anchor(&self, items: &ItemCollection, selection: &mut SelectionModel) {
        let from_targets = self
            .tracker
            .iter()
            .filter_map(|i| items.get(i))
            .map(ExplorerItem::id)
            .find(|id| selection.has(id));
        let anchor = from_targets.or_else(|| {
            selection
                .ids()
                .filter_map(|id| items.index_of(id).map(|i| (i, id)))
                .min_by_key(|(i, _)| *i)
                .map(|(_, id)| id.clone())
        });
        selection.set_anchor(anchor);
    }

    fn finish(&mut self) {
        self.tracker.clear();
        self.shadow.clear();
        self.is_drag_selecting.set(false);
    }
}

/// Indices in the nearest hit's column between the drag origin and that hit,
/// walking from the origin toward the hit. Never reaches past the loaded rows.
fn rows_behind(start_y: f32, nearest: &GridItem, down: bool, count: usize, index: &impl SpatialIndex) -> Vec<usize> {
    let columns = index.columns();
    if columns == 0 {
        return Vec::new();
    }
    let height = if down {
        nearest.rect.top() - start_y
    } else {
        start_y - nearest.rect.bottom()
    };
    if height <= 0.0 {
        return Vec::new();
    }
    let gap = index.row_gap();
    let rows = (height - gap) / (index.item_height() + gap);
    if !rows.is_finite() {
        return Vec::new();
    }
    let rows = if rows > 1.0 { rows.ceil() } else { rows.round() };
    let available = if down {
        nearest.row
    } else {
        (count.saturating_sub(1) / columns).saturating_sub(nearest.row)
    };
    let rows = (rows.max(0.0) as usize).min(available);

    (0..rows)
        .filter_map(|i| {
            let k = if down { rows - i } else { i + 1 };
            let step = k.checked_mul(columns)?;
            if down {
                nearest.index.checked_sub(step)
            } else {
                nearest.index.checked_add(step)
            }
        })
        .collect()
}
