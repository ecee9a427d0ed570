#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use egrid_core::event::{Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind};
use egrid_widgets::item::FilePathItem;
use egrid_widgets::layout::ColumnCount;
use egrid_widgets::{
    ExplorerContext, ExplorerHost, ExplorerItem, GridBuilder, GridConfig, NavigationTarget, PlatformError,
};
use libfuzzer_sys::fuzz_target;
use web_time::Instant;

struct NullHost;

impl ExplorerHost for NullHost {
    fn navigate(&mut self, _target: NavigationTarget) {}
    fn open_file_paths(&mut self, _ids: &[i32]) -> Result<(), PlatformError> {
        Err(PlatformError::new("fuzz"))
    }
    fn open_ephemeral_files(&mut self, _paths: &[String]) -> Result<(), PlatformError> {
        Ok(())
    }
}

#[derive(Debug, Arbitrary)]
enum Input {
    Down { x: u16, y: u16, shift: bool },
    Up { x: u16, y: u16, shift: bool },
    Drag { x: u16, y: u16 },
    Key { code: u8, shift: bool },
    Scroll { top: u16 },
    Resize { width: u16, height: u16 },
    Blur,
    Wait { ms: u16 },
    Page { count: u8, has_more: bool },
    MultiSelect(bool),
    Preview(bool),
}

fn key(code: u8) -> KeyCode {
    match code % 6 {
        0 => KeyCode::Up,
        1 => KeyCode::Down,
        2 => KeyCode::Left,
        3 => KeyCode::Right,
        4 => KeyCode::Escape,
        _ => KeyCode::Enter,
    }
}

fn mods(shift: bool) -> Modifiers {
    if shift { Modifiers::SHIFT } else { Modifiers::NONE }
}

fuzz_target!(|inputs: Vec<Input>| {
    let mut config = GridConfig::default();
    config.layout.columns = ColumnCount::Auto;
    let ctx = ExplorerContext::new();
    let Ok(mut grid) = GridBuilder::new()
        .config(config)
        .context(ctx.clone())
        .viewport(800.0, 600.0)
        .build()
    else {
        return;
    };

    let mut next_id = 0i32;
    let mut page = |n: u8| -> Vec<ExplorerItem> {
        (0..n)
            .map(|_| {
                next_id += 1;
                ExplorerItem::path(FilePathItem {
                    id: next_id,
                    name: format!("f{next_id}"),
                    is_dir: next_id % 7 == 0,
                    location_id: Some(1),
                    ..FilePathItem::default()
                })
            })
            .collect()
    };
    grid.replace_items(Some("location:1:/".into()), page(50), true);

    let mut host = NullHost;
    let mut now = Instant::now();
    for input in inputs.iter().take(256) {
        let event = match *input {
            Input::Down { x, y, shift } => Some(Event::Mouse(
                MouseEvent::new(MouseEventKind::Down(MouseButton::Left), f32::from(x % 1000), f32::from(y % 800))
                    .with_modifiers(mods(shift)),
            )),
            Input::Up { x, y, shift } => Some(Event::Mouse(
                MouseEvent::new(MouseEventKind::Up(MouseButton::Left), f32::from(x % 1000), f32::from(y % 800))
                    .with_modifiers(mods(shift)),
            )),
            Input::Drag { x, y } => Some(Event::Mouse(MouseEvent::new(
                MouseEventKind::Drag(MouseButton::Left),
                f32::from(x % 1000),
                f32::from(y % 800),
            ))),
            Input::Key { code, shift } => Some(Event::Key(KeyEvent::new(key(code)).with_modifiers(mods(shift)))),
            Input::Scroll { top } => Some(Event::Scroll { top: f32::from(top) }),
            Input::Resize { width, height } => Some(Event::Resize {
                width: f32::from(width % 3000),
                height: f32::from(height % 2000),
            }),
            Input::Blur => Some(Event::Focus(false)),
            Input::Wait { ms } => {
                now += Duration::from_millis(u64::from(ms % 1000));
                grid.tick(now);
                None
            }
            Input::Page { count, has_more } => {
                grid.push_page(page(count % 64), has_more);
                None
            }
            Input::MultiSelect(on) => {
                grid.set_multi_select(on);
                None
            }
            Input::Preview(open) => {
                ctx.quick_preview.update(|p| p.open = open);
                None
            }
        };
        if let Some(event) = event {
            grid.handle_event(&event, &mut host, now);
        }

        let selection = grid.selection();
        for id in selection.ids() {
            assert!(grid.items().contains(id), "selected id {id:?} not loaded");
        }
        if let Some(anchor) = selection.anchor() {
            assert!(selection.has(anchor), "anchor is not a member");
        }
        // Outside a marquee drag a non-empty selection always has an anchor.
        if !ctx.is_drag_selecting.get() && selection.size() > 0 {
            let anchor = selection.anchor().expect("non-empty selection at rest without anchor");
            assert!(selection.has(anchor), "anchor is not a member");
        }
        if !selection.multi_select() {
            assert!(selection.size() <= 1, "single-select holds {}", selection.size());
        }
    }
});
