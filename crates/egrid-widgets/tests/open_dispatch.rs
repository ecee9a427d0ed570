//! Double-click and Enter open dispatch through the grid.

use std::time::Duration;

use egrid_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use egrid_widgets::item::FilePathItem;
use egrid_widgets::layout::ColumnCount;
use egrid_widgets::{
    ExplorerContext, ExplorerGrid, ExplorerHost, ExplorerItem, GridBuilder, GridConfig, GridOutcome,
    NavigationTarget, OpenOnDoubleClick, OpenOutcome, PlatformError, ToastLevel,
};
use web_time::Instant;

#[derive(Default)]
struct RecordingHost {
    navigations: Vec<NavigationTarget>,
    opened: Vec<Vec<i32>>,
    fail_opens: bool,
}

impl ExplorerHost for RecordingHost {
    fn navigate(&mut self, target: NavigationTarget) {
        self.navigations.push(target);
    }

    fn open_file_paths(&mut self, ids: &[i32]) -> Result<(), PlatformError> {
        self.opened.push(ids.to_vec());
        if self.fail_opens {
            return Err(PlatformError::new("no application registered"));
        }
        Ok(())
    }

    fn open_ephemeral_files(&mut self, _paths: &[String]) -> Result<(), PlatformError> {
        Ok(())
    }
}

fn directory(id: i32, name: &str) -> ExplorerItem {
    ExplorerItem::path(FilePathItem {
        id,
        location_id: Some(1),
        materialized_path: "/media/".into(),
        name: name.into(),
        is_dir: true,
        ..FilePathItem::default()
    })
}

fn file(id: i32) -> ExplorerItem {
    ExplorerItem::path(FilePathItem {
        id,
        location_id: Some(1),
        materialized_path: "/media/".into(),
        name: format!("clip-{id}"),
        extension: "mp4".into(),
        ..FilePathItem::default()
    })
}

fn grid(mode: OpenOnDoubleClick) -> ExplorerGrid {
    let mut config = GridConfig::default();
    config.layout.columns = ColumnCount::Fixed(4);
    config.layout.item_width = 100.0;
    config.layout.item_height = 100.0;
    config.layout.gap_x = 10.0;
    config.layout.gap_y = 10.0;
    config.layout.padding = 0.0;
    config.selection.open_on_double_click = mode;
    let mut grid = GridBuilder::new()
        .config(config)
        .context(ExplorerContext::new())
        .viewport(450.0, 600.0)
        .build()
        .expect("valid grid");
    grid.replace_items(
        Some("location:1:/media/".into()),
        vec![directory(1, "Holiday"), file(2), file(3)],
        false,
    );
    grid
}

fn double_click(grid: &mut ExplorerGrid, host: &mut RecordingHost, x: f32, y: f32) -> Vec<GridOutcome> {
    let t = Instant::now();
    let ms = Duration::from_millis;
    let down = Event::Mouse(MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, y));
    let up = Event::Mouse(MouseEvent::new(MouseEventKind::Up(MouseButton::Left), x, y));
    grid.handle_event(&down, host, t);
    grid.handle_event(&up, host, t + ms(40));
    grid.handle_event(&down, host, t + ms(90));
    grid.handle_event(&up, host, t + ms(130))
}

#[test]
fn double_click_directory_navigates_once() {
    let mut g = grid(OpenOnDoubleClick::OpenFile);
    let mut host = RecordingHost::default();

    let out = double_click(&mut g, &mut host, 50.0, 50.0);

    let expected = NavigationTarget::Location {
        id: 1,
        path: "/media/Holiday/".into(),
    };
    assert_eq!(host.navigations, vec![expected.clone()]);
    assert!(host.opened.is_empty());
    assert_eq!(out, vec![GridOutcome::Opened(OpenOutcome::Navigated(expected))]);
}

#[test]
fn double_click_file_opens_whole_selection_clicked_first() {
    let mut g = grid(OpenOnDoubleClick::OpenFile);
    let mut host = RecordingHost::default();
    let items: Vec<_> = [file(2), file(3)].into();
    g.selection_mut().reset(&items);

    // Cell 2 is file 3; clicking a member keeps the selection.
    double_click(&mut g, &mut host, 250.0, 50.0);

    assert_eq!(host.opened, vec![vec![3, 2]]);
    assert!(host.navigations.is_empty());
}

#[test]
fn files_take_priority_over_directories() {
    let mut g = grid(OpenOnDoubleClick::OpenFile);
    let mut host = RecordingHost::default();
    let items: Vec<_> = [directory(1, "Holiday"), file(2)].into();
    g.selection_mut().reset(&items);

    double_click(&mut g, &mut host, 50.0, 50.0);

    assert_eq!(host.opened, vec![vec![2]]);
    assert!(host.navigations.is_empty());
}

#[test]
fn quick_preview_mode_opens_preview_at_clicked_index() {
    let mut g = grid(OpenOnDoubleClick::QuickPreview);
    let mut host = RecordingHost::default();

    let out = double_click(&mut g, &mut host, 150.0, 50.0);

    assert_eq!(
        out,
        vec![GridOutcome::Opened(OpenOutcome::QuickPreview { index: Some(1) })]
    );
    assert!(host.opened.is_empty());
    let preview = g.context().quick_preview.get();
    assert!(preview.open);
    assert_eq!(preview.index, Some(1));
}

#[test]
fn failed_open_queues_an_error_toast_and_keeps_selection() {
    let mut g = grid(OpenOnDoubleClick::OpenFile);
    let mut host = RecordingHost {
        fail_opens: true,
        ..RecordingHost::default()
    };

    let out = double_click(&mut g, &mut host, 150.0, 50.0);

    assert!(matches!(
        out.as_slice(),
        [GridOutcome::Opened(OpenOutcome::Failed(_))]
    ));
    assert_eq!(g.selection().size(), 1);
    g.tick(Instant::now());
    let toasts: Vec<(ToastLevel, String)> = g
        .context()
        .with_toasts_mut(|q| q.visible().map(|(_, t)| (t.level, t.title.clone())).collect());
    assert_eq!(toasts, vec![(ToastLevel::Error, "Failed to open file".to_owned())]);
}

#[test]
fn enter_opens_the_anchor() {
    let mut g = grid(OpenOnDoubleClick::OpenFile);
    let mut host = RecordingHost::default();
    let t = Instant::now();
    let click = |kind| Event::Mouse(MouseEvent::new(kind, 50.0, 50.0));
    g.handle_event(&click(MouseEventKind::Down(MouseButton::Left)), &mut host, t);
    g.handle_event(&click(MouseEventKind::Up(MouseButton::Left)), &mut host, t);

    g.handle_event(&Event::Key(KeyEvent::new(KeyCode::Enter)), &mut host, t);

    assert_eq!(host.navigations.len(), 1);
}

#[test]
fn double_click_on_empty_space_with_empty_selection_does_nothing() {
    let mut g = grid(OpenOnDoubleClick::OpenFile);
    let mut host = RecordingHost::default();

    let out = double_click(&mut g, &mut host, 400.0, 500.0);

    assert_eq!(out, vec![GridOutcome::Opened(OpenOutcome::Nothing)]);
    assert!(host.opened.is_empty());
    assert!(host.navigations.is_empty());
}
