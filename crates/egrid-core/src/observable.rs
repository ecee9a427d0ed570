#![forbid(unsafe_code)]

//! Shared state and event streams for the grid's single UI thread.
//!
//! [`Observable<T>`] is a shared cell that notifies listeners when its value
//! changes. It backs the explorer context flags (`is_drag_selecting`,
//! quick-preview state, modal and selectable flags). [`Signal<T>`] has no
//! value and forwards every [`emit`](Signal::emit); the selection model uses
//! one for its change stream.
//!
//! Listening returns a [`Subscription`]. Dropping it removes the listener.
//!
//! Listeners run with no borrow held, so a listener may write back to the
//! cell that notified it. Listeners added during a notification first hear
//! the next one.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Listeners<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

impl<T: 'static> Listeners<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    fn snapshot(&self) -> Vec<Listener<T>> {
        self.entries.iter().map(|(_, l)| Rc::clone(l)).collect()
    }
}

fn listen<T: 'static>(list: &Rc<RefCell<Listeners<T>>>, listener: impl Fn(&T) + 'static) -> Subscription {
    let id = {
        let mut list = list.borrow_mut();
        let id = list.next_id;
        list.next_id += 1;
        list.entries.push((id, Rc::new(listener)));
        id
    };
    let weak: Weak<RefCell<Listeners<T>>> = Rc::downgrade(list);
    Subscription {
        remove: Some(Box::new(move || {
            if let Some(list) = weak.upgrade() {
                list.borrow_mut().entries.retain(|(entry, _)| *entry != id);
            }
        })),
    }
}

fn notify<T>(kind: &'static str, listeners: Vec<Listener<T>>, value: &T) {
    if listeners.is_empty() {
        return;
    }
    #[cfg(feature = "tracing")]
    let _span = tracing::trace_span!("observable.notify", kind, listeners = listeners.len()).entered();
    #[cfg(not(feature = "tracing"))]
    let _ = kind;

    for listener in listeners {
        listener(value);
    }
}

struct Cell<T> {
    value: T,
    version: u64,
}

/// A shared value with change notification.
///
/// Clones are handles to the same value. Writing a value equal to the
/// current one does nothing.
pub struct Observable<T> {
    cell: Rc<RefCell<Cell<T>>>,
    listeners: Rc<RefCell<Listeners<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = self.cell.borrow();
        f.debug_struct("Observable")
            .field("value", &cell.value)
            .field("version", &cell.version)
            .finish_non_exhaustive()
    }
}

impl<T: Default + Clone + PartialEq + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            cell: Rc::new(RefCell::new(Cell { value, version: 0 })),
            listeners: Rc::new(RefCell::new(Listeners::new())),
        }
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.cell.borrow().value.clone()
    }

    /// Borrow the value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.borrow().value)
    }

    pub fn set(&self, value: T) {
        self.update(|current| *current = value);
    }

    /// Edit the value in place. Listeners hear about it only if the result
    /// differs from the value before the edit.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let changed = {
            let mut cell = self.cell.borrow_mut();
            let before = cell.value.clone();
            f(&mut cell.value);
            let changed = cell.value != before;
            if changed {
                cell.version += 1;
            }
            changed.then(|| cell.value.clone())
        };
        if let Some(value) = changed {
            let listeners = self.listeners.borrow().snapshot();
            notify("observable", listeners, &value);
        }
    }

    /// Listen for later changes. The current value is not replayed.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        listen(&self.listeners, listener)
    }

    /// Number of changes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.cell.borrow().version
    }
}

/// A stream of values with no current value.
pub struct Signal<T> {
    listeners: Rc<RefCell<Listeners<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listeners.borrow().entries.len())
            .finish()
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Signal<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Listeners::new())),
        }
    }

    pub fn emit(&self, value: &T) {
        let listeners = self.listeners.borrow().snapshot();
        notify("signal", listeners, value);
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        listen(&self.listeners, listener)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

/// Keeps a listener registered. Dropping it unregisters the listener.
#[must_use = "dropping a Subscription unregisters the listener"]
pub struct Subscription {
    remove: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
