#![forbid(unsafe_code)]

//! The explorer grid: input in, selection and outcomes out.
//!
//! [`ExplorerGrid`] owns the item collection, the selection, the mounted
//! window and every controller. The host feeds it [`Event`]s and gets back a
//! list of [`GridOutcome`]s to act on (scroll the container, fetch the next
//! page, render the drag ghost).
//!
//! Pointer events arrive in viewport coordinates. The grid converts them to
//! content space by adding the scroll offset before anything else sees them,
//! so a drag that scrolls keeps its origin fixed on the content.
//!
//! ```ignore
//! let mut grid = GridBuilder::new()
//!     .context(ExplorerContext::new())
//!     .viewport(800.0, 600.0)
//!     .build()?;
//! grid.replace_items(Some("location:1:/".into()), page, true);
//! for outcome in grid.handle_event(&event, &mut host, Instant::now()) {
//!     // ...
//! }
//! ```

use std::cell::Cell;
use std::rc::Rc;

use bitflags::bitflags;
use egrid_core::debounce::Debouncer;
use egrid_core::event::{Event, Modifiers, MouseButton};
use egrid_core::geometry::Point;
use egrid_core::gesture::GestureRecognizer;
use egrid_core::keybinding::{GridAction, GridKeyState, KeyMapConfig, KeyMapper};
use egrid_core::observable::Subscription;
use egrid_core::semantic_event::SemanticEvent;
use web_time::Instant;

use crate::collection::ItemCollection;
use crate::config::GridConfig;
use crate::context::ExplorerContext;
use crate::error::GridError;
use crate::item::ExplorerItem;
use crate::keyboard;
use crate::marquee::{DragKind, MarqueeController};
use crate::open::{ExplorerHost, OpenDispatcher, OpenOutcome};
use crate::scroll::ScrollInsets;
use crate::selection::SelectionModel;
use crate::spatial::SpatialIndex;
use crate::virtualized::{Viewport, VirtualGrid};

bitflags! {
    /// Render state of one cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ItemState: u8 {
        const SELECTED  = 0b001;
        const ANCHOR    = 0b010;
        const PREVIEWED = 0b100;
    }
}

/// Something the host should know about after handling an event.
#[derive(Debug, Clone, PartialEq)]
pub enum GridOutcome {
    /// Selection membership changed; subscribers already got the delta.
    SelectionChanged,
    /// Scroll the container to this content-space offset.
    ScrollTo(f32),
    /// An open was dispatched.
    Opened(OpenOutcome),
    /// A drag started on the selection; render a drag ghost of `count` items.
    ItemDragStarted { count: usize },
    ItemDragEnded { cancelled: bool },
    /// Fetch the next page.
    LoadMore,
    /// Debounced search input settled on this query.
    Search(String),
}

/// Builder for [`ExplorerGrid`].
#[derive(Debug, Clone, Default)]
pub struct GridBuilder {
    config: GridConfig,
    context: Option<ExplorerContext>,
    width: f32,
    height: f32,
}

impl GridBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    /// Explorer context the grid shares flags with. Required.
    #[must_use]
    pub fn context(mut self, context: ExplorerContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Initial viewport size.
    #[must_use]
    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Build the grid.
    ///
    /// # Errors
    ///
    /// [`GridError::MissingContext`] without a context,
    /// [`GridError::InvalidLayout`] if the configured geometry is unusable.
    pub fn build(self) -> Result<ExplorerGrid, GridError> {
        let ctx = self.context.ok_or(GridError::MissingContext)?;
        let layout = self.config.to_layout().with_width(self.width);
        layout.validate()?;

        let virtual_grid = VirtualGrid::new(layout, 0)
            .with_overscan(self.config.virtualization.overscan_rows)
            .with_load_more_rows(self.config.virtualization.load_more_rows)
            .with_viewport(Viewport::new(0.0, self.height));

        let selection = SelectionModel::new(self.config.selection.multi_select);
        let dirty = Rc::new(Cell::new(false));
        let flag = Rc::clone(&dirty);
        let selection_sub = selection.subscribe(move |_| flag.set(true));

        tracing::debug!(
            message = "grid.build",
            columns = virtual_grid.column_count(),
            multi_select = self.config.selection.multi_select,
            overscan = self.config.virtualization.overscan_rows,
        );

        Ok(ExplorerGrid {
            marquee: MarqueeController::new(ctx.is_drag_selecting.clone()),
            gestures: GestureRecognizer::new(self.config.to_gesture_config()),
            keys: KeyMapper::new(KeyMapConfig {
                enter_opens: self.config.selection.enter_opens,
            }),
            opener: OpenDispatcher::new(self.config.selection.open_on_double_click),
            search: Debouncer::new(self.config.search_debounce()),
            insets: self.config.scroll,
            items: ItemCollection::new(),
            last_pointer: None,
            selection,
            virtual_grid,
            dirty,
            _selection_sub: selection_sub,
            ctx,
        })
    }
}

/// Virtualized multi-select grid of explorer items.
#[derive(Debug)]
pub struct ExplorerGrid {
    ctx: ExplorerContext,
    items: ItemCollection,
    selection: SelectionModel,
    virtual_grid: VirtualGrid,
    gestures: GestureRecognizer,
    keys: KeyMapper,
    marquee: MarqueeController,
    opener: OpenDispatcher,
    search: Debouncer<String>,
    insets: ScrollInsets,
    /// Last pointer position in viewport space, for re-ticking on scroll.
    last_pointer: Option<Point>,
    dirty: Rc<Cell<bool>>,
    _selection_sub: Subscription,
}

impl ExplorerGrid {
    #[must_use]
    pub fn context(&self) -> &ExplorerContext {
        &self.ctx
    }

    #[must_use]
    pub fn items(&self) -> &ItemCollection {
        &self.items
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    /// Mutable selection access for programmatic changes (select-all, etc.).
    pub fn selection_mut(&mut self) -> &mut SelectionModel {
        &mut self.selection
    }

    #[must_use]
    pub fn virtual_grid(&self) -> &VirtualGrid {
        &self.virtual_grid
    }

    /// Toggle multi-select; disabling collapses the selection.
    pub fn set_multi_select(&mut self, enabled: bool) -> Vec<GridOutcome> {
        self.selection.set_multi_select(enabled);
        self.drain(Vec::new())
    }

    /// Render state of the cell at `index`.
    #[must_use]
    pub fn item_state(&self, index: usize) -> ItemState {
        let Some(item) = self.items.get(index) else {
            return ItemState::empty();
        };
        let id = item.id();
        let mut state = ItemState::empty();
        state.set(ItemState::SELECTED, self.selection.has(&id));
        state.set(ItemState::ANCHOR, self.selection.anchor() == Some(&id));
        let preview = self.ctx.quick_preview.get();
        state.set(ItemState::PREVIEWED, preview.open && preview.index == Some(index));
        state
    }

    /// Replace the collection.
    ///
    /// A new `context` resets the selection; the same context keeps it,
    /// minus ids that are gone.
    pub fn replace_items(
        &mut self,
        context: Option<String>,
        items: Vec<ExplorerItem>,
        has_more: bool,
    ) -> Vec<GridOutcome> {
        let changed = self.items.replace(context, items);
        self.items.set_has_more(has_more);
        self.virtual_grid.set_count(self.items.len());
        self.virtual_grid.reset_load_more();

        if changed {
            self.selection.clear();
            self.marquee.clear_targets();
        } else {
            let items = &self.items;
            self.selection.retain(|id, _| items.contains(id));
            self.restore_anchor();
        }
        let top = self.virtual_grid.viewport().scroll_top;
        self.virtual_grid.set_scroll_top(top);

        let mut out = Vec::new();
        self.check_load_more(&mut out);
        self.drain(out)
    }

    /// Append a page fetched after [`GridOutcome::LoadMore`].
    pub fn push_page(&mut self, items: Vec<ExplorerItem>, has_more: bool) -> Vec<GridOutcome> {
        let added = self.items.push_page(items);
        self.items.set_has_more(has_more);
        self.virtual_grid.set_count(self.items.len());
        tracing::debug!(message = "grid.page", added, total = self.items.len(), has_more);

        let mut out = Vec::new();
        self.check_load_more(&mut out);
        self.drain(out)
    }

    /// Feed search box input; the query is released by [`Self::tick`].
    pub fn search_input(&mut self, query: impl Into<String>, now: Instant) {
        self.search.push(query.into(), now);
    }

    /// Advance timers: debounced search and toast expiry.
    pub fn tick(&mut self, now: Instant) -> Vec<GridOutcome> {
        self.ctx.with_toasts_mut(|q| q.tick(now));
        self.search
            .poll(now)
            .map(GridOutcome::Search)
            .into_iter()
            .collect()
    }

    /// Handle one input event.
    pub fn handle_event(&mut self, event: &Event, host: &mut dyn ExplorerHost, now: Instant) -> Vec<GridOutcome> {
        let mut out = Vec::new();
        match event {
            Event::Resize { width, height } => {
                self.virtual_grid.set_width(*width);
                let mut viewport = self.virtual_grid.viewport();
                viewport.height = *height;
                self.virtual_grid.set_viewport(viewport);
                self.virtual_grid.set_scroll_top(viewport.scroll_top);
                self.check_load_more(&mut out);
            }
            Event::Scroll { top } => {
                self.virtual_grid.set_scroll_top(*top);
                if self.marquee.is_selecting()
                    && let Some(pointer) = self.last_pointer
                {
                    let current = self.to_content(pointer);
                    self.marquee
                        .tick(current, &self.virtual_grid, &self.items, &mut self.selection);
                }
                self.check_load_more(&mut out);
            }
            Event::Mouse(mouse) => {
                if self.ctx.selectable.get() {
                    self.last_pointer = Some(mouse.position());
                    let content = mouse.offset_y(self.virtual_grid.viewport().scroll_top);
                    for semantic in self.gestures.process(&Event::Mouse(content), now) {
                        self.on_semantic(semantic, host, now, &mut out);
                    }
                }
            }
            Event::Key(key) => {
                let semantic = self.gestures.process(event, now);
                let cancelled = !semantic.is_empty();
                for s in semantic {
                    self.on_semantic(s, host, now, &mut out);
                }
                if !cancelled {
                    let state = GridKeyState {
                        selectable: self.ctx.selectable.get(),
                        modal_open: self.ctx.modal_open.get(),
                    };
                    if let Some(action) = self.keys.map(key, &state) {
                        self.on_action(action, host, now, &mut out);
                    }
                }
            }
            Event::Focus(_) => {
                for s in self.gestures.process(event, now) {
                    self.on_semantic(s, host, now, &mut out);
                }
            }
        }
        self.drain(out)
    }

    fn on_semantic(&mut self, event: SemanticEvent, host: &mut dyn ExplorerHost, now: Instant, out: &mut Vec<GridOutcome>) {
        match event {
            SemanticEvent::Click {
                pos,
                button: MouseButton::Left,
                modifiers,
            } => {
                let shift = modifiers.contains(Modifiers::SHIFT);
                self.marquee.click(
                    pos,
                    shift,
                    self.ctx.preview_open(),
                    &self.virtual_grid,
                    &self.items,
                    &mut self.selection,
                );
            }
            SemanticEvent::DoubleClick {
                pos,
                button: MouseButton::Left,
                ..
            } => {
                let clicked = self
                    .virtual_grid
                    .hit(pos)
                    .and_then(|cell| self.items.get(cell.index).map(|item| (cell.index, item)));
                let outcome = self
                    .opener
                    .dispatch(clicked, &self.selection, &self.items, host, &self.ctx, now);
                out.push(GridOutcome::Opened(outcome));
            }
            SemanticEvent::DragStart {
                pos,
                button: MouseButton::Left,
                modifiers,
            } => {
                let shift = modifiers.contains(Modifiers::SHIFT);
                let kind = self
                    .marquee
                    .begin(pos, shift, &self.virtual_grid, &self.items, &mut self.selection);
                if kind == Some(DragKind::ItemDrag) {
                    out.push(GridOutcome::ItemDragStarted {
                        count: self.selection.size(),
                    });
                }
            }
            SemanticEvent::DragMove { current, .. } => {
                self.marquee
                    .tick(current, &self.virtual_grid, &self.items, &mut self.selection);
            }
            SemanticEvent::DragEnd { .. } => {
                if self.marquee.end(&self.items, &mut self.selection) == Some(DragKind::ItemDrag) {
                    out.push(GridOutcome::ItemDragEnded { cancelled: false });
                }
            }
            SemanticEvent::DragCancel => {
                if self.marquee.cancel(&self.items, &mut self.selection) == Some(DragKind::ItemDrag) {
                    out.push(GridOutcome::ItemDragEnded { cancelled: true });
                }
            }
            _ => {}
        }
    }

    fn on_action(&mut self, action: GridAction, host: &mut dyn ExplorerHost, now: Instant, out: &mut Vec<GridOutcome>) {
        match action {
            GridAction::Move { direction, extend } => {
                let nav = keyboard::navigate(
                    direction,
                    extend,
                    self.ctx.preview_open(),
                    &self.virtual_grid,
                    self.insets,
                    &self.items,
                    &mut self.selection,
                );
                if let Some(top) = nav.and_then(|n| n.scroll_to) {
                    self.virtual_grid.set_scroll_top(top);
                    out.push(GridOutcome::ScrollTo(top));
                    self.check_load_more(out);
                }
            }
            GridAction::ClearSelection => {
                keyboard::clear_selection(&mut self.selection, &mut self.marquee);
            }
            GridAction::Open => {
                let clicked = keyboard::anchor_index(&self.items, &self.selection)
                    .and_then(|i| self.items.get(i).map(|item| (i, item)));
                let outcome = self
                    .opener
                    .dispatch(clicked, &self.selection, &self.items, host, &self.ctx, now);
                out.push(GridOutcome::Opened(outcome));
            }
        }
    }

    fn check_load_more(&mut self, out: &mut Vec<GridOutcome>) {
        if self.virtual_grid.check_load_more(self.items.has_more()) {
            out.push(GridOutcome::LoadMore);
        }
    }

    /// Give a non-empty selection that lost its anchor the smallest-index
    /// member as anchor.
    fn restore_anchor(&mut self) {
        if self.selection.anchor().is_some() {
            return;
        }
        let anchor = keyboard::anchor_index(&self.items, &self.selection)
            .and_then(|i| self.items.get(i))
            .map(ExplorerItem::id);
        self.selection.set_anchor(anchor);
    }

    fn to_content(&self, viewport_point: Point) -> Point {
        viewport_point.offset_y(self.virtual_grid.viewport().scroll_top)
    }

    /// Prepend `SelectionChanged` if any selection delta fired.
    fn drain(&self, mut out: Vec<GridOutcome>) -> Vec<GridOutcome> {
        if self.dirty.replace(false) {
            out.insert(0, GridOutcome::SelectionChanged);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlatformError;
    use crate::item::FilePathItem;
    use crate::layout::ColumnCount;
    use crate::open::NavigationTarget;
    use egrid_core::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};

    #[derive(Default)]
    struct NullHost {
        navigations: Vec<NavigationTarget>,
    }

    impl ExplorerHost for NullHost {
        fn navigate(&mut self, target: NavigationTarget) {
            self.navigations.push(target);
        }
        fn open_file_paths(&mut self, _ids: &[i32]) -> Result<(), PlatformError> {
            Ok(())
        }
        fn open_ephemeral_files(&mut self, _paths: &[String]) -> Result<(), PlatformError> {
            Ok(())
        }
    }

    fn file(id: i32) -> ExplorerItem {
        ExplorerItem::path(FilePathItem {
            id,
            name: format!("f{id}"),
            ..FilePathItem::default()
        })
    }

    fn grid(count: i32) -> ExplorerGrid {
        let mut config = GridConfig::default();
        config.layout.columns = ColumnCount::Fixed(4);
        config.layout.gap_x = 10.0;
        config.layout.gap_y = 10.0;
        config.layout.padding = 0.0;
        let mut g = GridBuilder::new()
            .config(config)
            .context(ExplorerContext::new())
            .viewport(450.0, 400.0)
            .build()
            .unwrap();
        g.replace_items(Some("loc:1".into()), (0..count).map(file).collect(), false);
        g
    }

    fn mouse(kind: MouseEventKind, x: f32, y: f32) -> Event {
        Event::Mouse(MouseEvent::new(kind, x, y))
    }

    fn click(g: &mut ExplorerGrid, host: &mut NullHost, x: f32, y: f32, now: Instant) -> Vec<GridOutcome> {
        g.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), x, y), host, now);
        g.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), x, y), host, now)
    }

    fn shift_click(g: &mut ExplorerGrid, host: &mut NullHost, x: f32, y: f32, now: Instant) {
        g.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), x, y), host, now);
        g.handle_event(
            &Event::Mouse(MouseEvent::new(MouseEventKind::Up(MouseButton::Left), x, y).with_modifiers(Modifiers::SHIFT)),
            host,
            now,
        );
    }

    fn assert_anchored(g: &ExplorerGrid) {
        let sel = g.selection();
        assert!(sel.size() > 0);
        let anchor = sel.anchor().expect("non-empty selection without anchor");
        assert!(sel.has(anchor));
        let index = g.items().index_of(anchor).expect("anchor not loaded");
        assert!(g.item_state(index).contains(ItemState::ANCHOR));
    }

    #[test]
    fn build_requires_context() {
        let err = GridBuilder::new().build().unwrap_err();
        assert_eq!(err, GridError::MissingContext);
    }

    #[test]
    fn build_rejects_bad_layout() {
        let mut config = GridConfig::default();
        config.layout.item_height = -1.0;
        let err = GridBuilder::new()
            .config(config)
            .context(ExplorerContext::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, GridError::InvalidLayout(_)));
    }

    #[test]
    fn click_selects_and_reports_once() {
        let mut g = grid(20);
        let mut host = NullHost::default();
        let out = click(&mut g, &mut host, 150.0, 50.0, Instant::now());
        assert_eq!(out, vec![GridOutcome::SelectionChanged]);
        assert_eq!(g.item_state(1), ItemState::SELECTED | ItemState::ANCHOR);
        assert_eq!(g.item_state(0), ItemState::empty());
    }

    #[test]
    fn pointer_is_converted_to_content_space() {
        let mut g = grid(40);
        let mut host = NullHost::default();
        g.handle_event(&Event::Scroll { top: 220.0 }, &mut host, Instant::now());
        // Viewport y 50 + scroll 220 = content 270, row 2.
        click(&mut g, &mut host, 50.0, 50.0, Instant::now());
        assert!(g.item_state(8).contains(ItemState::SELECTED));
    }

    #[test]
    fn drag_selects_then_escape_key_cancels_only_the_drag() {
        let mut g = grid(20);
        let mut host = NullHost::default();
        let now = Instant::now();
        g.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 50.0, 50.0), &mut host, now);
        let out = g.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 160.0, 160.0), &mut host, now);
        assert_eq!(out, vec![GridOutcome::SelectionChanged]);
        assert!(g.context().is_drag_selecting.get());

        let esc = Event::Key(KeyEvent::new(KeyCode::Escape));
        let out = g.handle_event(&esc, &mut host, now);
        assert!(out.is_empty());
        assert!(!g.context().is_drag_selecting.get());
        assert_eq!(g.selection().size(), 4);

        // The release after a cancel does not clear the selection.
        g.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 160.0, 160.0), &mut host, now);
        assert_eq!(g.selection().size(), 4);

        let out = g.handle_event(&esc, &mut host, now);
        assert_eq!(out, vec![GridOutcome::SelectionChanged]);
        assert!(g.selection().is_empty());
    }

    #[test]
    fn item_drag_reports_start_and_end() {
        let mut g = grid(20);
        let mut host = NullHost::default();
        let now = Instant::now();
        click(&mut g, &mut host, 50.0, 50.0, now);
        g.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 50.0, 50.0), &mut host, now);
        let out = g.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 90.0, 90.0), &mut host, now);
        assert_eq!(out, vec![GridOutcome::ItemDragStarted { count: 1 }]);
        let out = g.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 300.0, 90.0), &mut host, now);
        assert_eq!(out, vec![GridOutcome::ItemDragEnded { cancelled: false }]);
    }

    #[test]
    fn arrow_scrolls_and_requests_more() {
        let mut g = grid(40);
        let mut host = NullHost::default();
        let now = Instant::now();
        g.replace_items(Some("loc:1".into()), (0..40).map(file).collect(), true);
        click(&mut g, &mut host, 50.0, 380.0, now);
        assert!(g.item_state(12).contains(ItemState::SELECTED));

        let out = g.handle_event(&Event::Key(KeyEvent::new(KeyCode::Down)), &mut host, now);
        assert_eq!(out.first(), Some(&GridOutcome::SelectionChanged));
        assert!(out.contains(&GridOutcome::ScrollTo(440.0 + 100.0 + 5.0 - 400.0)));
        assert!(g.item_state(16).contains(ItemState::ANCHOR));
    }

    #[test]
    fn shift_arrow_extends() {
        let mut g = grid(20);
        let mut host = NullHost::default();
        let now = Instant::now();
        click(&mut g, &mut host, 50.0, 50.0, now);
        let key = Event::Key(KeyEvent::new(KeyCode::Right).with_modifiers(Modifiers::SHIFT));
        g.handle_event(&key, &mut host, now);
        assert_eq!(g.selection().size(), 2);
    }

    #[test]
    fn modal_suspends_keys() {
        let mut g = grid(20);
        let mut host = NullHost::default();
        g.context().modal_open.set(true);
        let out = g.handle_event(&Event::Key(KeyEvent::new(KeyCode::Down)), &mut host, Instant::now());
        assert!(out.is_empty());
        assert!(g.selection().is_empty());
    }

    #[test]
    fn same_context_prunes_new_context_resets() {
        let mut g = grid(20);
        let mut host = NullHost::default();
        let now = Instant::now();
        click(&mut g, &mut host, 50.0, 50.0, now);
        g.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 150.0, 50.0), &mut host, now);
        g.handle_event(
            &Event::Mouse(
                MouseEvent::new(MouseEventKind::Up(MouseButton::Left), 150.0, 50.0).with_modifiers(Modifiers::SHIFT),
            ),
            &mut host,
            now,
        );

        let out = g.replace_items(Some("loc:1".into()), (1..20).map(file).collect(), false);
        assert_eq!(out, vec![GridOutcome::SelectionChanged]);
        assert_eq!(g.selection().size(), 1);

        g.replace_items(Some("loc:2".into()), (1..20).map(file).collect(), false);
        assert!(g.selection().is_empty());
    }

    #[test]
    fn cancelled_drag_leaves_an_anchor() {
        let now = Instant::now();
        for cancel in [Event::Key(KeyEvent::new(KeyCode::Escape)), Event::Focus(false)] {
            let mut g = grid(20);
            let mut host = NullHost::default();
            g.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 50.0, 50.0), &mut host, now);
            g.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 160.0, 160.0), &mut host, now);
            g.handle_event(&cancel, &mut host, now);
            assert!(!g.context().is_drag_selecting.get());
            assert_eq!(g.selection().size(), 4);
            assert_anchored(&g);
            assert_eq!(g.selection().anchor(), Some(&file(0).id()));
        }
    }

    #[test]
    fn toggling_off_the_anchor_moves_it() {
        let mut g = grid(20);
        let mut host = NullHost::default();
        let now = Instant::now();
        click(&mut g, &mut host, 50.0, 50.0, now);
        shift_click(&mut g, &mut host, 150.0, 50.0, now);
        assert_eq!(g.selection().anchor(), Some(&file(0).id()));

        shift_click(&mut g, &mut host, 50.0, 50.0, now);
        assert_eq!(g.selection().size(), 1);
        assert_anchored(&g);
        assert_eq!(g.selection().anchor(), Some(&file(1).id()));
    }

    #[test]
    fn pruning_the_anchor_picks_a_new_one() {
        let mut g = grid(20);
        let mut host = NullHost::default();
        let now = Instant::now();
        click(&mut g, &mut host, 50.0, 50.0, now);
        shift_click(&mut g, &mut host, 150.0, 50.0, now);
        shift_click(&mut g, &mut host, 260.0, 50.0, now);

        g.replace_items(Some("loc:1".into()), (1..20).map(file).collect(), false);
        assert_eq!(g.selection().size(), 2);
        assert_anchored(&g);
        assert_eq!(g.selection().anchor(), Some(&file(1).id()));
        assert_eq!(g.item_state(0), ItemState::SELECTED | ItemState::ANCHOR);
    }

    #[test]
    fn quick_preview_marks_the_double_clicked_cell() {
        let mut config = GridConfig::default();
        config.layout.columns = ColumnCount::Fixed(4);
        config.layout.gap_x = 10.0;
        config.layout.gap_y = 10.0;
        config.layout.padding = 0.0;
        config.selection.open_on_double_click = crate::open::OpenOnDoubleClick::QuickPreview;
        let mut g = GridBuilder::new()
            .config(config)
            .context(ExplorerContext::new())
            .viewport(450.0, 400.0)
            .build()
            .unwrap();
        g.replace_items(Some("loc:1".into()), (0..20).map(file).collect(), false);
        let mut host = NullHost::default();
        let now = Instant::now();

        click(&mut g, &mut host, 50.0, 50.0, now);
        shift_click(&mut g, &mut host, 150.0, 160.0, now);
        let out = click(&mut g, &mut host, 150.0, 160.0, now);
        assert_eq!(
            out,
            vec![GridOutcome::Opened(OpenOutcome::QuickPreview { index: Some(5) })]
        );
        assert_eq!(g.selection().size(), 2);
        assert!(g.item_state(5).contains(ItemState::PREVIEWED));
        assert!(!g.item_state(0).contains(ItemState::PREVIEWED));
    }

    #[test]
    fn search_is_debounced() {
        let mut g = grid(4);
        let t0 = Instant::now();
        g.search_input("a", t0);
        g.search_input("ab", t0 + std::time::Duration::from_millis(100));
        assert!(g.tick(t0 + std::time::Duration::from_millis(200)).is_empty());
        assert_eq!(
            g.tick(t0 + std::time::Duration::from_millis(400)),
            vec![GridOutcome::Search("ab".into())]
        );
    }
}
