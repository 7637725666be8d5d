//! Change-notification registry.
//!
//! UI screens subscribe a zero-argument callback and re-read whatever slice
//! of the store they render whenever it fires. The registry is owned by the
//! [`crate::Store`] instance rather than living in ambient global state, so
//! its lifecycle matches the store's.

use std::cell::{Cell, RefCell};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

/// Handle returned by [`Listeners::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type Callback = Rc<dyn Fn()>;

/// Registry of change listeners, notified synchronously in registration
/// order after every persisted mutation.
#[derive(Default)]
pub struct Listeners {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(ListenerId, Callback)>>,
}

impl Listeners {
    /// Register `callback` and return its handle.
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    /// Remove the listener registered under `id`. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: ListenerId) {
        self.entries.borrow_mut().retain(|(lid, _)| *lid != id);
    }

    /// Invoke every registered callback once, in registration order.
    ///
    /// A panicking callback is caught and logged so the remaining listeners
    /// still run. Callbacks run against a snapshot of the registry, so a
    /// listener may subscribe or unsubscribe re-entrantly; such changes take
    /// effect from the next emission.
    pub fn emit(&self) {
        let snapshot: Vec<Callback> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();

        for callback in snapshot {
            if catch_unwind(AssertUnwindSafe(|| callback())).is_err() {
                tracing::warn!("change listener panicked; continuing with remaining listeners");
            }
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}
