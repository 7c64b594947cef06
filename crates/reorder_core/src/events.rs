use std::rc::Rc;

use gpui::{Pixels, Point};

use crate::insertion::InsertionMode;

/// Payload for the cancelable drag-start request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemDragging {
    pub source_ix: usize,
}

/// Payload for the cancelable drop-completion request, raised before any
/// mutation. `position` is the drop point in list-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemDrag {
    pub source_ix: usize,
    pub dest_ix: usize,
    pub mode: InsertionMode,
    pub position: Point<Pixels>,
}

/// A plain observer list for property-changed notifications.
pub struct Hooks<E> {
    handlers: Vec<Rc<dyn Fn(&E)>>,
}

impl<E> Default for Hooks<E> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<E> Hooks<E> {
    pub fn subscribe(&mut self, handler: impl Fn(&E) + 'static) {
        self.handlers.push(Rc::new(handler));
    }

    pub fn emit(&self, event: &E) {
        for handler in &self.handlers {
            handler(event);
        }
    }
}

/// An observer list for cancelable requests.
///
/// Each handler returns `true` to allow the operation and `false` to cancel
/// it. All handlers run on every emit, and the result is the synchronous
/// aggregate: the request proceeds only if every handler allowed it. With no
/// handlers registered the request is allowed.
pub struct CancelHooks<E> {
    handlers: Vec<Rc<dyn Fn(&E) -> bool>>,
}

impl<E> Default for CancelHooks<E> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<E> CancelHooks<E> {
    pub fn subscribe(&mut self, handler: impl Fn(&E) -> bool + 'static) {
        self.handlers.push(Rc::new(handler));
    }

    pub fn emit(&self, event: &E) -> bool {
        let mut allowed = true;
        for handler in &self.handlers {
            allowed &= handler(event);
        }
        allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn empty_cancel_hooks_allow() {
        let hooks: CancelHooks<ItemDragging> = CancelHooks::default();
        assert!(hooks.emit(&ItemDragging { source_ix: 0 }));
    }

    #[test]
    fn any_canceling_handler_wins() {
        let mut hooks: CancelHooks<ItemDragging> = CancelHooks::default();
        let later_ran = Rc::new(Cell::new(false));

        hooks.subscribe(|_| true);
        hooks.subscribe(|_| false);
        hooks.subscribe({
            let later_ran = later_ran.clone();
            move |_| {
                later_ran.set(true);
                true
            }
        });

        assert!(!hooks.emit(&ItemDragging { source_ix: 2 }));
        // Every observer still sees the request.
        assert!(later_ran.get());
    }

    #[test]
    fn hooks_notify_every_handler() {
        let mut hooks: Hooks<bool> = Hooks::default();
        let count = Rc::new(Cell::new(0));
        for _ in 0..3 {
            let count = count.clone();
            hooks.subscribe(move |_| count.set(count.get() + 1));
        }
        hooks.emit(&true);
        assert_eq!(count.get(), 3);
    }
}
