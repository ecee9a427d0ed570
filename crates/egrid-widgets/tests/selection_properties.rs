//! Property-based invariant tests for the selection model.
//!
//! 1. `add` is idempotent.
//! 2. With multi-select disabled, membership never exceeds one.
//! 3. The anchor, whenever set, is a member.
//! 4. Every emitted delta names only ids whose membership changed.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use egrid_widgets::item::{ExplorerItem, FilePathItem};
use egrid_widgets::selection::{SelectionChange, SelectionModel};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn file(id: i32) -> ExplorerItem {
    ExplorerItem::path(FilePathItem {
        id,
        name: format!("f{id}"),
        ..FilePathItem::default()
    })
}

#[derive(Debug, Clone)]
enum Op {
    Add(i32),
    Remove(i32),
    Toggle(i32),
    Reset(Vec<i32>),
    Anchor(i32),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..12i32).prop_map(Op::Add),
        (0..12i32).prop_map(Op::Remove),
        (0..12i32).prop_map(Op::Toggle),
        proptest::collection::vec(0..12i32, 0..5).prop_map(Op::Reset),
        (0..12i32).prop_map(Op::Anchor),
        Just(Op::Clear),
    ]
}

fn run(sel: &mut SelectionModel, op: &Op) {
    match op {
        Op::Add(i) => {
            sel.add(&file(*i));
        }
        Op::Remove(i) => {
            sel.remove(&file(*i).id());
        }
        Op::Toggle(i) => {
            sel.toggle(&file(*i));
        }
        Op::Reset(ids) => {
            let items: Vec<_> = ids.iter().copied().map(file).collect();
            sel.reset(&items);
        }
        Op::Anchor(i) => {
            sel.set_anchor(Some(file(*i).id()));
        }
        Op::Clear => sel.clear(),
    }
}

fn members(sel: &SelectionModel) -> BTreeSet<String> {
    sel.ids().map(|id| id.as_str().to_owned()).collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. add is idempotent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn add_twice_equals_add_once(prefix in proptest::collection::vec(op(), 0..20), x in 0..12i32) {
        let mut once = SelectionModel::new(true);
        let mut twice = SelectionModel::new(true);
        for o in &prefix {
            run(&mut once, o);
            run(&mut twice, o);
        }
        once.add(&file(x));
        twice.add(&file(x));
        prop_assert!(!twice.add(&file(x)));
        prop_assert_eq!(members(&once), members(&twice));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. single-select holds at most one member
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn single_select_never_exceeds_one(ops in proptest::collection::vec(op(), 0..40)) {
        let mut sel = SelectionModel::new(false);
        let mut added_any = false;
        for o in &ops {
            run(&mut sel, o);
            prop_assert!(sel.size() <= 1);
            if let Op::Add(_) = o {
                added_any = true;
            }
        }
        if added_any && ops.iter().all(|o| matches!(o, Op::Add(_))) {
            prop_assert_eq!(sel.size(), 1);
        }
    }

    #[test]
    fn disabling_multi_select_collapses(ids in proptest::collection::vec(0..12i32, 1..8)) {
        let mut sel = SelectionModel::new(true);
        for i in &ids {
            sel.add(&file(*i));
        }
        sel.set_multi_select(false);
        prop_assert_eq!(sel.size(), 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. anchor membership
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn anchor_is_always_a_member(ops in proptest::collection::vec(op(), 0..40), multi in any::<bool>()) {
        let mut sel = SelectionModel::new(multi);
        for o in &ops {
            run(&mut sel, o);
            if let Some(anchor) = sel.anchor() {
                prop_assert!(sel.has(anchor));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. deltas are exact
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn deltas_name_only_changed_ids(ops in proptest::collection::vec(op(), 1..30), multi in any::<bool>()) {
        let mut sel = SelectionModel::new(multi);
        let seen: Rc<RefCell<Vec<SelectionChange>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let _sub = sel.subscribe(move |c| sink.borrow_mut().push(c.clone()));

        for o in &ops {
            let before = members(&sel);
            seen.borrow_mut().clear();
            run(&mut sel, o);
            let after = members(&sel);

            let deltas = seen.borrow();
            prop_assert!(deltas.len() <= 1);
            let added: BTreeSet<String> = after.difference(&before).cloned().collect();
            let removed: BTreeSet<String> = before.difference(&after).cloned().collect();
            match deltas.first() {
                None => prop_assert!(added.is_empty() && removed.is_empty()),
                Some(d) => {
                    let d_added: BTreeSet<String> = d.added.iter().map(|i| i.as_str().to_owned()).collect();
                    let d_removed: BTreeSet<String> = d.removed.iter().map(|i| i.as_str().to_owned()).collect();
                    prop_assert_eq!(d_added, added);
                    prop_assert_eq!(d_removed, removed);
                }
            }
        }
    }
}
